use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use yield_responder::config::AppConfig;
use yield_responder::identity::load_signer;
use yield_responder::near_client::client::NearClient;
use yield_responder::responder::{PassOutcome, Responder};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    match run_once().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("応答処理に失敗しました: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_once() -> Result<(), Box<dyn Error>> {
    let cfg = AppConfig::from_env()?;
    let signer = load_signer(&cfg.identity.account_id, &cfg.identity.private_key)?;
    let client = Arc::new(NearClient::new(
        &cfg.network.rpc_url,
        &cfg.network.network_id,
        signer,
    ));
    info!(
        "{} として {} ({}) の保留リクエストを確認します",
        client.account_id(),
        cfg.responder.contract_id,
        client.network_id()
    );

    let responder = Responder::new(client, &cfg.responder);
    match responder.run_once().await? {
        PassOutcome::Idle => {}
        PassOutcome::Answered {
            yield_id,
            answer,
            removed,
        } => {
            info!(
                "{}: 回答済み yield_id={} answer={:?} removed={}",
                responder.contract_id(),
                yield_id,
                answer,
                removed
            );
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
