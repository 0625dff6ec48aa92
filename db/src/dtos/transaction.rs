use uuid::Uuid;

pub struct TransactionCreateRequest {
    pub user_id: Uuid,
    pub reference: String,
    pub amount: i64,
    pub currency: String,
    pub plan: String,
}
