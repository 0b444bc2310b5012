// どこで: 応答ループの中心ロジック
// 何を: 保留リクエストの取得、最新 1 件の選択、回答生成、respond 送信、任意で削除
// なぜ: 上位(main)から見たときに 1 回の実行として扱えるようにするため

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::answer::{AnswerGenerator, TemplateAnswer};
use crate::config::ResponderParams;
use crate::near_client::client::ChainClient;
use crate::near_client::requests::{list_requests, remove_request, respond, RequestsError};

#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("リクエスト処理失敗: {0}")]
    Requests(#[from] RequestsError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    /// 保留中のリクエストがなかった
    Idle,
    Answered {
        yield_id: Value,
        answer: String,
        removed: bool,
    },
}

pub struct Responder<C: ?Sized, A = TemplateAnswer> {
    client: Arc<C>,
    answerer: A,
    contract_id: String,
    remove_after_respond: bool,
}

impl<C> Responder<C, TemplateAnswer>
where
    C: ChainClient + ?Sized,
{
    pub fn new(client: Arc<C>, params: &ResponderParams) -> Self {
        Responder::with_answerer(client, params, TemplateAnswer)
    }
}

impl<C, A> Responder<C, A>
where
    C: ChainClient + ?Sized,
    A: AnswerGenerator,
{
    pub fn with_answerer(client: Arc<C>, params: &ResponderParams, answerer: A) -> Self {
        Responder {
            client,
            answerer,
            contract_id: params.contract_id.clone(),
            remove_after_respond: params.remove_after_respond,
        }
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    /// 1 回分の処理。respond は最大 1 回、対象は一覧の末尾のみ
    pub async fn run_once(&self) -> Result<PassOutcome, ResponderError> {
        let requests = list_requests(self.client.as_ref(), &self.contract_id).await?;

        let Some(last) = requests.last() else {
            info!("There are no requests, going back to sleep");
            return Ok(PassOutcome::Idle);
        };
        info!(
            "{}: 保留 {} 件、最新のリクエストに回答します: {}",
            self.contract_id,
            requests.len(),
            last.prompt
        );

        let answer = self.answerer.answer(&last.prompt);
        respond(
            self.client.as_ref(),
            &self.contract_id,
            &last.yield_id,
            &answer,
        )
        .await?;
        info!("{}: respond 送信完了 yield_id={}", self.contract_id, last.yield_id);

        let removed = if self.remove_after_respond {
            match &last.id {
                Some(id) => {
                    remove_request(self.client.as_ref(), &self.contract_id, id).await?;
                    info!("{}: リクエスト {} を削除しました", self.contract_id, id);
                    true
                }
                None => {
                    warn!(
                        "{}: id のないリクエストのため削除をスキップします",
                        self.contract_id
                    );
                    false
                }
            }
        } else {
            false
        };

        Ok(PassOutcome::Answered {
            yield_id: last.yield_id.clone(),
            answer,
            removed,
        })
    }
}
