// どこで: プロンプトから回答文字列を作る部分
// 何を: 固定テンプレートで包むだけの回答生成と、差し替え用のトレイト
// なぜ: 推論呼び出しなどに置き換えるときに応答ループを触らずに済むようにするため

/// プロンプトだけから回答を作る。ID や順序、外部状態には依存させない
pub trait AnswerGenerator: Send + Sync {
    fn answer(&self, prompt: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateAnswer;

impl AnswerGenerator for TemplateAnswer {
    fn answer(&self, prompt: &str) -> String {
        generate_answer(prompt)
    }
}

pub fn generate_answer(prompt: &str) -> String {
    format!("Answer to \"{}\"", prompt)
}
