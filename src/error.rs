use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum RecordKind {
    Expense,
    Payment,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecordKind::Expense => "Expense",
            RecordKind::Payment => "Payment",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Clone, Debug, Serialize, PartialEq, Eq)]
pub enum SettleError {
    /// Balance calculation requires at least one member
    #[error("Group has no members")]
    NoMembers,

    /// Expense or payment references a user absent from the member list
    #[error("{record} {record_id} references unknown user {user_id}")]
    InvalidReference {
        record: RecordKind,
        record_id: String,
        user_id: String,
    },

    /// Expense shares do not sum to the expense amount
    #[error("Expense {expense_id} shares sum to {share_sum}, expected {amount}")]
    ShareMismatch {
        expense_id: String,
        share_sum: i64,
        amount: i64,
    },

    /// Net balances do not sum to zero within the accumulated tolerance
    #[error("Net balances sum to {residual}, outside tolerance {tolerance}")]
    BalanceIntegrity { residual: i64, tolerance: i64 },

    /// Another settlement is already running for the group
    #[error("Settlement already in progress for group {0}")]
    SettlementInProgress(String),

    /// Backend rejected or failed a transfer submission
    #[error("Failed to submit transfer {suggestion_id}: {message}")]
    TransferSubmission {
        suggestion_id: String,
        message: String,
    },
}
