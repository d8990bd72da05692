use crate::error::SettleError;
use crate::gateway::{CreatePaymentRequest, PaymentGateway};
use crate::models::Payment;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory stand-in for the payment backend. Honors idempotency keys and
/// supports scripted failures for exercising the retry paths.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    payments: Arc<RwLock<HashMap<String, Payment>>>,
    by_idempotency_key: Arc<RwLock<HashMap<String, String>>>,
    failures: Arc<RwLock<HashMap<(String, String), u32>>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        InMemoryGateway::default()
    }

    /// Makes the next `times` submissions from `from_user_id` to `to_user_id`
    /// fail.
    pub async fn fail_times(&self, from_user_id: &str, to_user_id: &str, times: u32) {
        let mut failures = self.failures.write().await;
        failures.insert((from_user_id.to_string(), to_user_id.to_string()), times);
    }

    pub async fn payments(&self) -> Vec<Payment> {
        let payments = self.payments.read().await;
        payments.values().cloned().collect()
    }

    pub async fn payment_count(&self) -> usize {
        let payments = self.payments.read().await;
        payments.len()
    }
}

#[async_trait]
impl PaymentGateway for InMemoryGateway {
    async fn create_payment(&self, request: CreatePaymentRequest) -> Result<Payment, SettleError> {
        {
            let mut failures = self.failures.write().await;
            let pair = (request.from_user_id.clone(), request.to_user_id.clone());
            if let Some(remaining) = failures.get_mut(&pair) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(SettleError::TransferSubmission {
                        suggestion_id: format!(
                            "{}->{}",
                            request.from_user_id, request.to_user_id
                        ),
                        message: "injected backend failure".to_string(),
                    });
                }
            }
        }

        {
            let by_key = self.by_idempotency_key.read().await;
            if let Some(payment_id) = by_key.get(&request.idempotency_key) {
                let payments = self.payments.read().await;
                if let Some(existing) = payments.get(payment_id) {
                    return Ok(existing.clone());
                }
            }
        }

        let payment = Payment::completed(
            &request.from_user_id,
            &request.to_user_id,
            request.amount_minor,
        );
        let mut payments = self.payments.write().await;
        let mut by_key = self.by_idempotency_key.write().await;
        payments.insert(payment.id.clone(), payment.clone());
        by_key.insert(request.idempotency_key, payment.id.clone());
        Ok(payment)
    }
}
