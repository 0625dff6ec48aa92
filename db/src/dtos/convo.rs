use uuid::Uuid;

pub struct ConversationCreateRequest {
    pub user_id: Uuid,
    pub title: String,
    pub persona: String,
}

pub struct InputCreateRequest {
    pub conversation_id: Uuid,
    pub kind: String,
    pub content: String,
}
