// どこで: NEAR への低レベル呼び出しをまとめる RPC ラッパ
// 何を: JsonRpcClient 初期化、view (読み取り) / call (署名付きトランザクション) のエラーハンドリング一元化
// なぜ: SDK の型をここで吸収し、上位はアカウント ID 文字列と JSON だけで扱えるようにするため

use async_trait::async_trait;
use near_crypto::InMemorySigner;
use near_jsonrpc_client::{methods, JsonRpcClient};
use near_jsonrpc_primitives::types::query::QueryResponseKind;
use near_primitives::transaction::{Action, FunctionCallAction, Transaction};
use near_primitives::types::{AccountId, Balance, BlockReference, Finality, FunctionArgs, Gas};
use near_primitives::views::{FinalExecutionStatus, QueryRequest};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

/// 300 TGas
pub const MAX_GAS: Gas = 300_000_000_000_000;
pub const NO_DEPOSIT: Balance = 0;

#[derive(Debug, Error)]
pub enum NearClientError {
    #[error("view 失敗: {0}")]
    Query(String),
    #[error("call 失敗: {0}")]
    Transaction(String),
}

/// call に付けるガスとデポジット。省略時は MAX_GAS / NO_DEPOSIT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOptions {
    pub gas: Gas,
    pub deposit: Balance,
}

impl Default for CallOptions {
    fn default() -> Self {
        CallOptions {
            gas: MAX_GAS,
            deposit: NO_DEPOSIT,
        }
    }
}

/// コントラクトに対する読み取り / 状態変更呼び出しの境界
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// 読み取り専用。署名もガスも使わない
    async fn view(
        &self,
        contract_id: &str,
        method: &str,
        args: Value,
    ) -> Result<Value, NearClientError>;

    /// 署名してブロードキャストし、実行完了まで待ってから戻り値を返す
    async fn call(
        &self,
        contract_id: &str,
        method: &str,
        args: Value,
        options: CallOptions,
    ) -> Result<Value, NearClientError>;
}

pub struct NearClient {
    rpc: JsonRpcClient,
    signer: InMemorySigner,
    network_id: String,
}

impl NearClient {
    pub fn new(rpc_url: &str, network_id: &str, signer: InMemorySigner) -> Self {
        info!(
            "NEAR RPC に接続します: network={} url={} account={}",
            network_id, rpc_url, signer.account_id
        );
        NearClient {
            rpc: JsonRpcClient::connect(rpc_url),
            signer,
            network_id: network_id.to_string(),
        }
    }

    pub fn account_id(&self) -> &AccountId {
        &self.signer.account_id
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    async fn current_nonce(
        &self,
    ) -> Result<(u64, near_primitives::hash::CryptoHash), NearClientError> {
        let response = self
            .rpc
            .call(methods::query::RpcQueryRequest {
                block_reference: BlockReference::latest(),
                request: QueryRequest::ViewAccessKey {
                    account_id: self.signer.account_id.clone(),
                    public_key: self.signer.public_key.clone(),
                },
            })
            .await
            .map_err(|e| NearClientError::Transaction(format!("access key: {}", e)))?;

        match response.kind {
            QueryResponseKind::AccessKey(access_key) => {
                Ok((access_key.nonce, response.block_hash))
            }
            _ => Err(NearClientError::Transaction(
                "access key の応答形式が想定外です".to_string(),
            )),
        }
    }
}

#[async_trait]
impl ChainClient for NearClient {
    async fn view(
        &self,
        contract_id: &str,
        method: &str,
        args: Value,
    ) -> Result<Value, NearClientError> {
        let account_id = parse_account_id(contract_id).map_err(NearClientError::Query)?;
        let args = encode_args(&args).map_err(NearClientError::Query)?;

        let response = self
            .rpc
            .call(methods::query::RpcQueryRequest {
                block_reference: BlockReference::Finality(Finality::Final),
                request: QueryRequest::CallFunction {
                    account_id,
                    method_name: method.to_string(),
                    args: FunctionArgs::from(args),
                },
            })
            .await
            .map_err(|e| NearClientError::Query(e.to_string()))?;

        match response.kind {
            QueryResponseKind::CallResult(result) => {
                debug!("view {}.{} logs={:?}", contract_id, method, result.logs);
                serde_json::from_slice(&result.result)
                    .map_err(|e| NearClientError::Query(format!("JSON デコード失敗: {}", e)))
            }
            _ => Err(NearClientError::Query(
                "call_function の応答形式が想定外です".to_string(),
            )),
        }
    }

    async fn call(
        &self,
        contract_id: &str,
        method: &str,
        args: Value,
        options: CallOptions,
    ) -> Result<Value, NearClientError> {
        let receiver_id = parse_account_id(contract_id).map_err(NearClientError::Transaction)?;
        let action = function_call_action(method, &args, options)?;
        let (nonce, block_hash) = self.current_nonce().await?;

        let transaction = Transaction {
            signer_id: self.signer.account_id.clone(),
            public_key: self.signer.public_key.clone(),
            nonce: nonce + 1,
            receiver_id,
            block_hash,
            actions: vec![action],
        };

        let outcome = self
            .rpc
            .call(methods::broadcast_tx_commit::RpcBroadcastTxCommitRequest {
                signed_transaction: transaction.sign(&self.signer),
            })
            .await
            .map_err(|e| NearClientError::Transaction(e.to_string()))?;

        info!(
            "call {}.{} tx={}",
            contract_id, method, outcome.transaction_outcome.id
        );
        decode_status(outcome.status)
    }
}

/// 呼び出し元の method / args / gas / deposit をそのまま FunctionCall に載せる
pub(crate) fn function_call_action(
    method: &str,
    args: &Value,
    options: CallOptions,
) -> Result<Action, NearClientError> {
    let args = encode_args(args).map_err(NearClientError::Transaction)?;
    Ok(Action::FunctionCall(Box::new(FunctionCallAction {
        method_name: method.to_string(),
        args,
        gas: options.gas,
        deposit: options.deposit,
    })))
}

pub(crate) fn decode_status(status: FinalExecutionStatus) -> Result<Value, NearClientError> {
    match status {
        FinalExecutionStatus::SuccessValue(bytes) => Ok(decode_return_value(&bytes)),
        FinalExecutionStatus::Failure(err) => Err(NearClientError::Transaction(format!(
            "コントラクト実行失敗: {:?}",
            err
        ))),
        FinalExecutionStatus::NotStarted | FinalExecutionStatus::Started => Err(
            NearClientError::Transaction("トランザクションが完了していません".to_string()),
        ),
    }
}

/// 空なら Null、JSON でなければ文字列として返す
fn decode_return_value(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

fn parse_account_id(raw: &str) -> Result<AccountId, String> {
    raw.parse::<AccountId>()
        .map_err(|e| format!("アカウント ID が不正です ({}): {}", raw, e))
}

fn encode_args(args: &Value) -> Result<Vec<u8>, String> {
    serde_json::to_vec(args).map_err(|e| format!("引数のエンコード失敗: {}", e))
}
