use crate::constants::{SETTLED_EPSILON, SPLIT_TOLERANCE};
use crate::error::{RecordKind, SettleError};
use crate::models::{Expense, Member, NetBalance, Payment, PaymentStatus};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Net balances for one calculation run, kept in member input order so the
/// planner's tie-break is reproducible. Inconsistent records are skipped and
/// reported as warnings rather than aborting the run.
#[derive(Clone, Debug, PartialEq)]
pub struct BalanceSheet {
    balances: Vec<NetBalance>,
    warnings: Vec<SettleError>,
}

impl BalanceSheet {
    pub fn balances(&self) -> &[NetBalance] {
        &self.balances
    }

    pub fn get(&self, user_id: &str) -> Option<&NetBalance> {
        self.balances.iter().find(|b| b.user_id == user_id)
    }

    pub fn net(&self, user_id: &str) -> Option<i64> {
        self.get(user_id).map(|b| b.net_balance)
    }

    pub fn warnings(&self) -> &[SettleError] {
        &self.warnings
    }

    /// Sum of all net balances. Zero for consistent inputs.
    pub fn residual(&self) -> i64 {
        self.balances.iter().map(|b| b.net_balance).sum()
    }

    pub fn is_settled(&self) -> bool {
        self.balances.iter().all(NetBalance::is_settled)
    }
}

pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Derives each member's net balance from active expenses and completed
    /// payments. Pure function of its inputs.
    pub fn calculate(
        members: &[Member],
        expenses: &[Expense],
        payments: &[Payment],
    ) -> Result<BalanceSheet, SettleError> {
        if members.is_empty() {
            return Err(SettleError::NoMembers);
        }

        let mut index: HashMap<&str, usize> = HashMap::with_capacity(members.len());
        let mut balances: Vec<NetBalance> = Vec::with_capacity(members.len());
        for (idx, member) in members.iter().enumerate() {
            index.insert(member.id.as_str(), idx);
            balances.push(NetBalance::zeroed(&member.id));
        }

        let mut warnings = Vec::new();

        for expense in expenses.iter().filter(|e| e.is_active) {
            let Some(&payer_idx) = index.get(expense.payer_id.as_str()) else {
                warn!(
                    expense_id = %expense.id,
                    user_id = %expense.payer_id,
                    "expense references unknown payer, skipping"
                );
                warnings.push(SettleError::InvalidReference {
                    record: RecordKind::Expense,
                    record_id: expense.id.clone(),
                    user_id: expense.payer_id.clone(),
                });
                continue;
            };

            // A participant outside the group would credit the payer without
            // the matching debit, so the whole expense is skipped.
            if let Some(unknown) = expense
                .participants
                .iter()
                .find(|s| !index.contains_key(s.user_id.as_str()))
            {
                warn!(
                    expense_id = %expense.id,
                    user_id = %unknown.user_id,
                    "expense references unknown participant, skipping"
                );
                warnings.push(SettleError::InvalidReference {
                    record: RecordKind::Expense,
                    record_id: expense.id.clone(),
                    user_id: unknown.user_id.clone(),
                });
                continue;
            }

            let share_sum = expense.share_sum();
            if (share_sum - expense.amount_minor).abs() > SPLIT_TOLERANCE {
                warn!(
                    expense_id = %expense.id,
                    share_sum,
                    amount = expense.amount_minor,
                    "expense shares do not sum to amount, skipping"
                );
                warnings.push(SettleError::ShareMismatch {
                    expense_id: expense.id.clone(),
                    share_sum,
                    amount: expense.amount_minor,
                });
                continue;
            }

            balances[payer_idx].total_paid += expense.amount_minor;
            for share in &expense.participants {
                balances[index[share.user_id.as_str()]].total_owed += share.share_minor;
            }
        }

        for payment in payments.iter().filter(|p| p.status == PaymentStatus::Completed) {
            let (from_idx, to_idx) = match (
                index.get(payment.from_user_id.as_str()),
                index.get(payment.to_user_id.as_str()),
            ) {
                (Some(&from_idx), Some(&to_idx)) => (from_idx, to_idx),
                (from, _) => {
                    let user_id = if from.is_none() {
                        payment.from_user_id.clone()
                    } else {
                        payment.to_user_id.clone()
                    };
                    warn!(
                        payment_id = %payment.id,
                        user_id = %user_id,
                        "payment references unknown user, skipping"
                    );
                    warnings.push(SettleError::InvalidReference {
                        record: RecordKind::Payment,
                        record_id: payment.id.clone(),
                        user_id,
                    });
                    continue;
                }
            };

            balances[from_idx].total_sent += payment.amount_minor;
            balances[to_idx].total_received += payment.amount_minor;
        }

        for balance in &mut balances {
            balance.recompute();
        }

        let residual: i64 = balances.iter().map(|b| b.net_balance).sum();
        let tolerance = SETTLED_EPSILON * members.len() as i64;
        if residual.abs() > tolerance {
            warn!(residual, tolerance, "net balances do not sum to zero");
            warnings.push(SettleError::BalanceIntegrity {
                residual,
                tolerance,
            });
        }

        debug!(
            members = members.len(),
            warnings = warnings.len(),
            "balances calculated"
        );
        Ok(BalanceSheet { balances, warnings })
    }
}
