use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseShare {
    pub user_id: String,
    pub share_minor: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    pub payer_id: String,
    pub amount_minor: i64,
    pub description: String,
    pub participants: Vec<ExpenseShare>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn with_shares(
        payer_id: &str,
        amount_minor: i64,
        description: &str,
        participants: Vec<ExpenseShare>,
    ) -> Self {
        Expense {
            id: Uuid::new_v4().to_string(),
            payer_id: payer_id.to_string(),
            amount_minor,
            description: description.to_string(),
            participants,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Splits the amount evenly across participants. The rounding remainder
    /// goes to the payer's share, or to the first participant when the payer
    /// is not one of them.
    pub fn split_equal(
        payer_id: &str,
        amount_minor: i64,
        description: &str,
        participant_ids: &[&str],
    ) -> Self {
        if participant_ids.is_empty() {
            return Self::with_shares(payer_id, amount_minor, description, Vec::new());
        }

        let count = participant_ids.len() as i64;
        let base = amount_minor / count;
        let remainder = amount_minor - base * count;
        let remainder_idx = participant_ids
            .iter()
            .position(|&id| id == payer_id)
            .unwrap_or(0);

        let participants = participant_ids
            .iter()
            .enumerate()
            .map(|(idx, &id)| ExpenseShare {
                user_id: id.to_string(),
                share_minor: if idx == remainder_idx {
                    base + remainder
                } else {
                    base
                },
            })
            .collect();

        Self::with_shares(payer_id, amount_minor, description, participants)
    }

    pub fn share_sum(&self) -> i64 {
        self.participants.iter().map(|s| s.share_minor).sum()
    }
}
