// どこで: NEAR 呼び出しのクライアントをまとめるモジュール
// 何を: RPC クライアント初期化、view/call、リクエスト用コントラクトメソッドの呼び出し
// なぜ: 外部依存をここに閉じ込め、上位ロジックを簡潔にするため

pub mod client;
pub mod requests;

#[cfg(test)]
pub(crate) mod recording;
