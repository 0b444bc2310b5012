// どこで: yield-responder バイナリの設定モジュール
// 何を: ネットワーク・アカウント・鍵・対象コントラクトを環境変数から読み込む
// なぜ: 鍵や ID をコードに埋め込まず、.env だけで切り替えられるようにするため

use near_jsonrpc_client::{NEAR_MAINNET_RPC_URL, NEAR_TESTNET_RPC_URL};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_NETWORK_ID: &str = "testnet";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("環境変数 {0} が設定されていません")]
    Missing(&'static str),
    #[error("環境変数 {key} の値が不正です: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("ネットワーク {0} の RPC URL が不明です (RPC_URL を指定してください)")]
    UnknownNetwork(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network_id: String,
    pub rpc_url: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub account_id: String,
    /// `ed25519:<base58>` 形式。Debug / Serialize には出さない
    #[serde(skip_serializing)]
    pub private_key: String,
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("account_id", &self.account_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderParams {
    pub contract_id: String,
    /// respond 後に remove_request を呼ぶか
    pub remove_after_respond: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub identity: IdentityConfig,
    pub responder: ResponderParams,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の key -> value 関数から組み立てる（テストではプロセス環境を触らない）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let network_id = get("NETWORK_ID").unwrap_or_else(|| DEFAULT_NETWORK_ID.to_string());
        let rpc_url = match get("RPC_URL") {
            Some(url) => url,
            None => default_rpc_url(&network_id)?.to_string(),
        };

        let remove_after_respond = match get("REMOVE_AFTER_RESPOND") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                key: "REMOVE_AFTER_RESPOND",
                value: v,
            })?,
            None => false,
        };

        Ok(AppConfig {
            network: NetworkConfig {
                network_id,
                rpc_url,
            },
            identity: IdentityConfig {
                account_id: required("ACCOUNT_ID")?,
                private_key: required("PRIVATE_KEY")?,
            },
            responder: ResponderParams {
                contract_id: required("CONTRACT_ID")?,
                remove_after_respond,
            },
        })
    }
}

pub fn default_rpc_url(network_id: &str) -> Result<&'static str, ConfigError> {
    match network_id {
        "testnet" => Ok(NEAR_TESTNET_RPC_URL),
        "mainnet" => Ok(NEAR_MAINNET_RPC_URL),
        other => Err(ConfigError::UnknownNetwork(other.to_string())),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
