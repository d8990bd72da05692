use crate::constants::SETTLED_EPSILON;
use crate::models::{NetBalance, SettlementPlan, SettlementSuggestion};
use tracing::debug;

pub struct SettlementPlanner;

impl SettlementPlanner {
    /// Greedy two-pointer matching of the largest creditor against the most
    /// negative debtor. Keeps the transfer count low in the common case; the
    /// theoretical minimum is a subset-sum problem and is not attempted.
    ///
    /// Ties sort stably, so members with equal balances match in input order.
    pub fn plan(balances: &[NetBalance]) -> SettlementPlan {
        let mut creditors: Vec<(&str, i64)> = balances
            .iter()
            .filter(|b| b.net_balance > SETTLED_EPSILON)
            .map(|b| (b.user_id.as_str(), b.net_balance))
            .collect();
        let mut debtors: Vec<(&str, i64)> = balances
            .iter()
            .filter(|b| b.net_balance < -SETTLED_EPSILON)
            .map(|b| (b.user_id.as_str(), b.net_balance))
            .collect();

        if creditors.is_empty() || debtors.is_empty() {
            debug!("nothing to settle");
            return SettlementPlan::empty();
        }

        creditors.sort_by(|a, b| b.1.cmp(&a.1));
        debtors.sort_by(|a, b| a.1.cmp(&b.1));

        // Naive hub-and-spoke settlement needs one transfer per nonzero
        // balance but one.
        let naive_upper = creditors.len() + debtors.len() - 1;

        let mut suggestions = Vec::new();
        let mut i = 0;
        let mut j = 0;

        while i < creditors.len() && j < debtors.len() {
            let amount = creditors[i].1.min(-debtors[j].1);
            suggestions.push(SettlementSuggestion::new(
                debtors[j].0,
                creditors[i].0,
                amount,
            ));

            creditors[i].1 -= amount;
            debtors[j].1 += amount;

            if creditors[i].1 <= SETTLED_EPSILON {
                i += 1;
            }
            if debtors[j].1 >= -SETTLED_EPSILON {
                j += 1;
            }
        }

        let total_amount = suggestions.iter().map(|s| s.amount_minor).sum();
        let transaction_count = suggestions.len();
        debug!(transaction_count, total_amount, "settlement plan ready");

        SettlementPlan {
            suggestions,
            total_amount,
            transaction_count,
            optimized: transaction_count < naive_upper,
        }
    }
}
