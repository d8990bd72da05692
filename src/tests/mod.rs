mod balance_tests;

use crate::models::{Member, NetBalance};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("splitsettle=debug")
        .try_init();
}

pub fn members(ids: &[&str]) -> Vec<Member> {
    ids.iter()
        .map(|id| Member::new(id, &id.to_uppercase()))
        .collect()
}

/// Balance fixture with the given net, backed by a consistent paid/owed split.
pub fn net(user_id: &str, net_balance: i64) -> NetBalance {
    let mut balance = NetBalance::zeroed(user_id);
    if net_balance >= 0 {
        balance.total_paid = net_balance;
    } else {
        balance.total_owed = -net_balance;
    }
    balance.recompute();
    balance
}
