// どこで: yield-responder の署名鍵管理
// 何を: ACCOUNT_ID と PRIVATE_KEY から InMemorySigner を構築し、クライアントに渡す
// なぜ: 署名方法を一箇所に集約し、鍵のパース失敗を起動時に検出するため

use near_crypto::{InMemorySigner, SecretKey};
use near_primitives::types::AccountId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("アカウント ID が不正です ({account_id}): {reason}")]
    InvalidAccountId { account_id: String, reason: String },
    #[error("秘密鍵をパースできませんでした: {0}")]
    InvalidSecretKey(String),
}

pub fn load_signer(account_id: &str, private_key: &str) -> Result<InMemorySigner, IdentityError> {
    let account_id = account_id
        .parse::<AccountId>()
        .map_err(|e| IdentityError::InvalidAccountId {
            account_id: account_id.to_string(),
            reason: e.to_string(),
        })?;

    // 鍵そのものはエラーメッセージに含めない
    let secret_key = private_key
        .trim()
        .parse::<SecretKey>()
        .map_err(|e| IdentityError::InvalidSecretKey(e.to_string()))?;

    Ok(InMemorySigner::from_secret_key(account_id, secret_key))
}
