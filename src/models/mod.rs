pub mod balance;
pub mod expense;
pub mod member;
pub mod payment;
pub mod plan;

pub use balance::NetBalance;
pub use expense::{Expense, ExpenseShare};
pub use member::Member;
pub use payment::{Payment, PaymentStatus};
pub use plan::{SettlementPlan, SettlementSuggestion, format_minor_units};
