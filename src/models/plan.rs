use serde::{Deserialize, Serialize};

/// One proposed transfer. The id is derived from the pair so the UI can use
/// it as a stable key across re-plans.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementSuggestion {
    pub id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub amount_minor: i64,
    pub description: String,
}

impl SettlementSuggestion {
    pub fn new(from_user_id: &str, to_user_id: &str, amount_minor: i64) -> Self {
        SettlementSuggestion {
            id: format!("{}->{}", from_user_id, to_user_id),
            from_user_id: from_user_id.to_string(),
            to_user_id: to_user_id.to_string(),
            amount_minor,
            description: format!(
                "{} pays {} {}",
                from_user_id,
                to_user_id,
                format_minor_units(amount_minor)
            ),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementPlan {
    pub suggestions: Vec<SettlementSuggestion>,
    pub total_amount: i64,
    pub transaction_count: usize,
    pub optimized: bool,
}

impl SettlementPlan {
    /// The "nothing to settle" plan.
    pub fn empty() -> Self {
        SettlementPlan::default()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// Renders minor units as a decimal string, e.g. 1234 -> "12.34". The only
/// place the core turns amounts into display text.
pub fn format_minor_units(amount_minor: i64) -> String {
    let sign = if amount_minor < 0 { "-" } else { "" };
    let abs = amount_minor.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
