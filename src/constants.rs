/// Balance residue at or below this many minor units counts as settled.
pub const SETTLED_EPSILON: i64 = 1;

/// Expense shares may differ from the expense amount by at most this many minor units.
pub const SPLIT_TOLERANCE: i64 = 1;

/// How long a plan may sit unconfirmed before it is auto-cancelled.
pub const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 300;

/// Resubmission attempts per suggestion after the initial failure.
pub const DEFAULT_MAX_SUBMIT_RETRIES: u32 = 3;

/// Base delay between resubmissions, scaled by the attempt number.
pub const RETRY_BACKOFF_MS: u64 = 200;
