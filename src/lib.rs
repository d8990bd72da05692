pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod models;
pub mod planner;

pub use balance::{BalanceCalculator, BalanceSheet};
pub use config::ExecutorConfig;
pub use error::{RecordKind, SettleError};
pub use executor::{ConfirmDecision, ExecutionResult, ExecutionState, SettlementExecutor};
pub use gateway::in_memory::InMemoryGateway;
pub use gateway::{CreatePaymentRequest, PaymentGateway};
pub use planner::SettlementPlanner;

#[cfg(test)]
mod tests;
