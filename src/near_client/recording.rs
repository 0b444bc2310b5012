// どこで: テスト用の ChainClient 実装
// 何を: view の戻り値を固定し、すべての呼び出しを記録する
// なぜ: ネットワークなしで応答ループの呼び出し順と引数を検証するため

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::client::{CallOptions, ChainClient, NearClientError};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recorded {
    View {
        contract_id: String,
        method: String,
        args: Value,
    },
    Call {
        contract_id: String,
        method: String,
        args: Value,
        options: CallOptions,
    },
}

#[derive(Default)]
pub(crate) struct RecordingClient {
    views: HashMap<String, Value>,
    fail_view: Option<String>,
    fail_call: Option<String>,
    log: Mutex<Vec<Recorded>>,
}

impl RecordingClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_view(mut self, method: &str, result: Value) -> Self {
        self.views.insert(method.to_string(), result);
        self
    }

    pub(crate) fn failing_view(mut self, message: &str) -> Self {
        self.fail_view = Some(message.to_string());
        self
    }

    pub(crate) fn failing_call(mut self, message: &str) -> Self {
        self.fail_call = Some(message.to_string());
        self
    }

    pub(crate) fn recorded(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    pub(crate) fn submitted(&self) -> Vec<Recorded> {
        self.recorded()
            .into_iter()
            .filter(|r| matches!(r, Recorded::Call { .. }))
            .collect()
    }
}

#[async_trait]
impl ChainClient for RecordingClient {
    async fn view(
        &self,
        contract_id: &str,
        method: &str,
        args: Value,
    ) -> Result<Value, NearClientError> {
        self.log.lock().unwrap().push(Recorded::View {
            contract_id: contract_id.to_string(),
            method: method.to_string(),
            args,
        });
        if let Some(msg) = &self.fail_view {
            return Err(NearClientError::Query(msg.clone()));
        }
        self.views
            .get(method)
            .cloned()
            .ok_or_else(|| NearClientError::Query(format!("method not found: {}", method)))
    }

    async fn call(
        &self,
        contract_id: &str,
        method: &str,
        args: Value,
        options: CallOptions,
    ) -> Result<Value, NearClientError> {
        self.log.lock().unwrap().push(Recorded::Call {
            contract_id: contract_id.to_string(),
            method: method.to_string(),
            args,
            options,
        });
        match &self.fail_call {
            Some(msg) => Err(NearClientError::Transaction(msg.clone())),
            None => Ok(Value::Null),
        }
    }
}
