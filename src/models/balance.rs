use crate::constants::SETTLED_EPSILON;
use serde::{Deserialize, Serialize};

/// One member's derived position for a single calculation run.
///
/// `total_paid`/`total_owed` come from active expenses, `total_sent`/
/// `total_received` from completed payments. Positive net means the group
/// owes this member.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetBalance {
    pub user_id: String,
    pub total_paid: i64,
    pub total_owed: i64,
    pub total_sent: i64,
    pub total_received: i64,
    pub net_balance: i64,
}

impl NetBalance {
    pub fn zeroed(user_id: &str) -> Self {
        NetBalance {
            user_id: user_id.to_string(),
            total_paid: 0,
            total_owed: 0,
            total_sent: 0,
            total_received: 0,
            net_balance: 0,
        }
    }

    pub(crate) fn recompute(&mut self) {
        self.net_balance = self.total_paid - self.total_owed + self.total_sent - self.total_received;
    }

    pub fn is_settled(&self) -> bool {
        self.net_balance.abs() <= SETTLED_EPSILON
    }
}
