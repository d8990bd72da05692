use crate::constants::{DEFAULT_CONFIRM_TIMEOUT_SECS, DEFAULT_MAX_SUBMIT_RETRIES};
use dotenv::dotenv;
use std::env;
use std::time::Duration;

/// Executor tuning. Owned by the caller, one per executor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutorConfig {
    pub confirm_timeout: Duration,
    pub max_submit_retries: u32,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        ExecutorConfig {
            confirm_timeout: Duration::from_secs(DEFAULT_CONFIRM_TIMEOUT_SECS),
            max_submit_retries: DEFAULT_MAX_SUBMIT_RETRIES,
        }
    }
}

impl ExecutorConfig {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = ExecutorConfig::default();

        ExecutorConfig {
            confirm_timeout: env::var("SPLITSETTLE_CONFIRM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.confirm_timeout),
            max_submit_retries: env::var("SPLITSETTLE_MAX_SUBMIT_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_submit_retries),
        }
    }
}
