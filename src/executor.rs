use crate::config::ExecutorConfig;
use crate::constants::RETRY_BACKOFF_MS;
use crate::error::SettleError;
use crate::gateway::{CreatePaymentRequest, PaymentGateway};
use crate::models::{Payment, SettlementPlan, SettlementSuggestion};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Caller's answer to a plan preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmDecision {
    Accept,
    Cancel,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum ExecutionState {
    Planned,
    AwaitingConfirmation,
    Confirmed,
    Submitting,
    Applied,
    Cancelled,
    Failed,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ExecutionResult {
    pub state: ExecutionState,
    pub applied_suggestion_ids: Vec<String>,
    pub failed_suggestion_ids: Vec<String>,
    pub finalized: bool,
}

impl ExecutionResult {
    fn cancelled() -> Self {
        ExecutionResult {
            state: ExecutionState::Cancelled,
            applied_suggestion_ids: Vec::new(),
            failed_suggestion_ids: Vec::new(),
            finalized: false,
        }
    }
}

/// Applies a settlement plan at most once: waits for explicit confirmation
/// (bounded by a timeout), then submits each suggestion to the payment
/// gateway in plan order with per-attempt idempotency keys.
///
/// Balances and plans are stale after any attempt, successful or not; the
/// plan is consumed by value so a snapshot cannot be resubmitted.
pub struct SettlementExecutor<G: PaymentGateway> {
    gateway: G,
    config: ExecutorConfig,
    in_progress: Arc<Mutex<HashSet<String>>>,
}

impl<G: PaymentGateway> SettlementExecutor<G> {
    pub fn new(gateway: G, config: ExecutorConfig) -> Self {
        SettlementExecutor {
            gateway,
            config,
            in_progress: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub async fn execute(
        &self,
        group_id: &str,
        plan: SettlementPlan,
        confirmation: oneshot::Receiver<ConfirmDecision>,
    ) -> Result<ExecutionResult, SettleError> {
        if plan.is_empty() {
            debug!(group_id, "nothing to settle");
            return Ok(ExecutionResult {
                state: ExecutionState::Applied,
                applied_suggestion_ids: Vec::new(),
                failed_suggestion_ids: Vec::new(),
                finalized: true,
            });
        }

        let _guard = GroupGuard::acquire(&self.in_progress, group_id)?;

        info!(
            group_id,
            transactions = plan.transaction_count,
            total = plan.total_amount,
            "awaiting settlement confirmation"
        );
        let decision = match timeout(self.config.confirm_timeout, confirmation).await {
            Ok(Ok(decision)) => decision,
            Ok(Err(_)) => {
                debug!(group_id, "confirmation channel closed, treating as cancel");
                ConfirmDecision::Cancel
            }
            Err(_) => {
                info!(group_id, "confirmation timed out, cancelling");
                ConfirmDecision::Cancel
            }
        };
        if decision == ConfirmDecision::Cancel {
            return Ok(ExecutionResult::cancelled());
        }

        info!(group_id, "settlement confirmed, submitting transfers");
        let attempt_id = Uuid::new_v4();
        let mut applied = Vec::new();
        let mut failed = Vec::new();

        for (idx, suggestion) in plan.suggestions.iter().enumerate() {
            let idempotency_key = format!("{}:{}", attempt_id, suggestion.id);
            match self.submit_with_retry(suggestion, &idempotency_key).await {
                Ok(payment) => {
                    debug!(
                        suggestion_id = %suggestion.id,
                        payment_id = %payment.id,
                        "transfer applied"
                    );
                    applied.push(suggestion.id.clone());
                }
                Err(err) => {
                    // No point submitting the rest; the caller recalculates
                    // from the persisted state and re-plans the residue.
                    warn!(
                        suggestion_id = %suggestion.id,
                        error = %err,
                        "transfer submission failed, aborting remaining submissions"
                    );
                    failed.extend(plan.suggestions[idx..].iter().map(|s| s.id.clone()));
                    break;
                }
            }
        }

        let finalized = failed.is_empty();
        if finalized {
            info!(
                group_id,
                transfers = applied.len(),
                "settlement applied, balances must be recalculated"
            );
        }
        Ok(ExecutionResult {
            state: if finalized {
                ExecutionState::Applied
            } else {
                ExecutionState::Failed
            },
            applied_suggestion_ids: applied,
            failed_suggestion_ids: failed,
            finalized,
        })
    }

    async fn submit_with_retry(
        &self,
        suggestion: &SettlementSuggestion,
        idempotency_key: &str,
    ) -> Result<Payment, SettleError> {
        let mut attempt: u32 = 0;
        loop {
            let request = CreatePaymentRequest {
                from_user_id: suggestion.from_user_id.clone(),
                to_user_id: suggestion.to_user_id.clone(),
                amount_minor: suggestion.amount_minor,
                description: suggestion.description.clone(),
                idempotency_key: idempotency_key.to_string(),
            };
            match self.gateway.create_payment(request).await {
                Ok(payment) => return Ok(payment),
                Err(err) if attempt < self.config.max_submit_retries => {
                    attempt += 1;
                    warn!(
                        suggestion_id = %suggestion.id,
                        attempt,
                        error = %err,
                        "transfer submission failed, retrying"
                    );
                    sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Per-group mutual exclusion for in-flight settlements. Released on drop,
/// whichever way the execution attempt ends.
struct GroupGuard {
    groups: Arc<Mutex<HashSet<String>>>,
    group_id: String,
}

impl GroupGuard {
    fn acquire(groups: &Arc<Mutex<HashSet<String>>>, group_id: &str) -> Result<Self, SettleError> {
        let mut held = groups.lock().unwrap_or_else(PoisonError::into_inner);
        if !held.insert(group_id.to_string()) {
            return Err(SettleError::SettlementInProgress(group_id.to_string()));
        }
        Ok(GroupGuard {
            groups: Arc::clone(groups),
            group_id: group_id.to_string(),
        })
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        let mut held = self.groups.lock().unwrap_or_else(PoisonError::into_inner);
        held.remove(&self.group_id);
    }
}
