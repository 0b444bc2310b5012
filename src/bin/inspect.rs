// どこで: クイックデバッグ用バイナリ
// 何を: list_requests を view で叩き、保留中のリクエストをそのまま表示する
// なぜ: respond を送らずにキューの中身と ID の形を確認するため

use std::error::Error;
use tracing_subscriber::EnvFilter;
use yield_responder::config::AppConfig;
use yield_responder::identity::load_signer;
use yield_responder::near_client::client::NearClient;
use yield_responder::near_client::requests::list_requests;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cfg = AppConfig::from_env()?;

    let signer = load_signer(&cfg.identity.account_id, &cfg.identity.private_key)?;
    let client = NearClient::new(&cfg.network.rpc_url, &cfg.network.network_id, signer);

    let requests = list_requests(&client, &cfg.responder.contract_id).await?;
    println!(
        "=== {} pending requests ({}) ===",
        cfg.responder.contract_id,
        requests.len()
    );
    for (i, request) in requests.iter().enumerate() {
        let marker = if i + 1 == requests.len() { " <- next" } else { "" };
        println!("[{}]{} {}", i, marker, serde_json::to_string_pretty(request)?);
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
