pub mod in_memory;

use crate::error::SettleError;
use crate::models::Payment;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Create-payment call shape at the persistence boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub from_user_id: String,
    pub to_user_id: String,
    pub amount_minor: i64,
    pub description: String,
    pub idempotency_key: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Persists one transfer. Implementations must return the already-created
    /// payment when the idempotency key has been seen before.
    async fn create_payment(&self, request: CreatePaymentRequest) -> Result<Payment, SettleError>;
}
