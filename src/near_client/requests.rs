// どこで: yield/resume コントラクトのリクエスト系メソッド
// 何を: list_requests の読み取りと respond / remove_request の呼び出し
// なぜ: メソッド名と引数の形をここで固定し、応答ループから JSON 組み立てを消すため

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use super::client::{CallOptions, ChainClient, NearClientError};

pub const LIST_REQUESTS: &str = "list_requests";
pub const RESPOND: &str = "respond";
pub const REMOVE_REQUEST: &str = "remove_request";

/// コントラクトが返す保留中リクエスト。
/// `id` / `yield_id` は 32 バイトハッシュの JSON 表現で、受け取ったまま送り返す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub prompt: String,
    pub yield_id: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum RequestsError {
    #[error("NEAR クライアントエラー: {0}")]
    Client(#[from] NearClientError),
    #[error("list_requests のデコード失敗: {0}")]
    Decode(String),
}

pub async fn list_requests<C>(client: &C, contract_id: &str) -> Result<Vec<Request>, RequestsError>
where
    C: ChainClient + ?Sized,
{
    let raw = client.view(contract_id, LIST_REQUESTS, json!({})).await?;
    parse_requests(raw)
}

pub async fn respond<C>(
    client: &C,
    contract_id: &str,
    yield_id: &Value,
    response: &str,
) -> Result<Value, RequestsError>
where
    C: ChainClient + ?Sized,
{
    let args = json!({ "yield_id": yield_id, "response": response });
    let result = client
        .call(contract_id, RESPOND, args, CallOptions::default())
        .await?;
    Ok(result)
}

pub async fn remove_request<C>(
    client: &C,
    contract_id: &str,
    id: &Value,
) -> Result<Value, RequestsError>
where
    C: ChainClient + ?Sized,
{
    let result = client
        .call(
            contract_id,
            REMOVE_REQUEST,
            json!({ "id": id }),
            CallOptions::default(),
        )
        .await?;
    Ok(result)
}

fn parse_requests(raw: Value) -> Result<Vec<Request>, RequestsError> {
    serde_json::from_value(raw).map_err(|e| RequestsError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::near_client::recording::{Recorded, RecordingClient};

    #[test]
    fn parses_hash_ids_and_keeps_extra_fields() {
        let raw = json!([
            { "yield_id": [7, 7, 7], "prompt": "hello", "request_id": 4 }
        ]);
        let requests = parse_requests(raw).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].prompt, "hello");
        assert_eq!(requests[0].yield_id, json!([7, 7, 7]));
        assert_eq!(requests[0].id, None);
        assert_eq!(requests[0].extra.get("request_id"), Some(&json!(4)));
    }

    #[test]
    fn request_without_yield_id_is_a_decode_error() {
        let err = parse_requests(json!([{ "id": 1, "prompt": "x" }])).unwrap_err();
        assert!(matches!(err, RequestsError::Decode(_)));
    }

    #[test]
    fn non_array_is_a_decode_error() {
        let err = parse_requests(json!({ "requests": [] })).unwrap_err();
        assert!(matches!(err, RequestsError::Decode(_)));
    }

    #[tokio::test]
    async fn list_requests_is_view_only() {
        let client = RecordingClient::new().with_view(LIST_REQUESTS, json!([]));
        let requests = list_requests(&client, "oracle.testnet").await.unwrap();

        assert!(requests.is_empty());
        assert!(client.submitted().is_empty());
        assert_eq!(
            client.recorded(),
            vec![Recorded::View {
                contract_id: "oracle.testnet".to_string(),
                method: LIST_REQUESTS.to_string(),
                args: json!({}),
            }]
        );
    }

    #[tokio::test]
    async fn respond_sends_yield_id_unchanged_with_default_options() {
        let client = RecordingClient::new();
        let yield_id = json!([1, 2, 3, 4]);
        respond(&client, "oracle.testnet", &yield_id, "ok")
            .await
            .unwrap();

        assert_eq!(
            client.recorded(),
            vec![Recorded::Call {
                contract_id: "oracle.testnet".to_string(),
                method: RESPOND.to_string(),
                args: json!({ "yield_id": [1, 2, 3, 4], "response": "ok" }),
                options: CallOptions::default(),
            }]
        );
    }

    #[tokio::test]
    async fn remove_request_sends_id() {
        let client = RecordingClient::new();
        remove_request(&client, "oracle.testnet", &json!(9))
            .await
            .unwrap();

        match &client.submitted()[..] {
            [Recorded::Call { method, args, .. }] => {
                assert_eq!(method, REMOVE_REQUEST);
                assert_eq!(args, &json!({ "id": 9 }));
            }
            other => panic!("unexpected calls: {:?}", other),
        }
    }

    #[tokio::test]
    async fn client_failure_is_propagated() {
        let client = RecordingClient::new().failing_view("unreachable");
        let err = list_requests(&client, "oracle.testnet").await.unwrap_err();
        assert!(matches!(
            err,
            RequestsError::Client(NearClientError::Query(_))
        ));
    }
}
