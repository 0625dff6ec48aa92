use db::models::{
    analysis::Analysis,
    convo::{Conversation, ConversationInput},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ConversationCreateBody {
    pub title: String,
    pub persona: String,
}

#[derive(Debug, Deserialize)]
pub struct InputCreateBody {
    /// "text" or "image" (base64 screenshot payload).
    pub kind: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisCreateBody {
    pub input_id: Uuid,
    /// Overrides the conversation's persona for this one analysis.
    pub persona: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConversationDetail {
    #[serde(flatten)]
    pub conversation: Conversation,
    pub inputs: Vec<ConversationInput>,
    pub analyses: Vec<Analysis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_body_persona_is_optional() {
        let body: AnalysisCreateBody = serde_json::from_str(
            r#"{"input_id":"6f0a2f9e-55f1-43a6-b0a7-6f4d6e2b9c11"}"#,
        )
        .unwrap();
        assert!(body.persona.is_none());
    }
}
