use sqlx::types::JsonValue;
use uuid::Uuid;

pub struct AnalysisCreateRequest {
    pub conversation_id: Uuid,
    pub input_id: Uuid,
    pub persona: String,
    pub cringe_score: i32,
    pub interest_level: i32,
    pub flags: JsonValue,
    pub suggested_replies: JsonValue,
    pub clarifying_questions: JsonValue,
    pub summary: String,
}
