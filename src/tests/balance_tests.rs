use super::{init_tracing, members};
use crate::balance::BalanceCalculator;
use crate::error::{RecordKind, SettleError};
use crate::models::{Expense, ExpenseShare, Payment, PaymentStatus};
use crate::planner::SettlementPlanner;

#[test]
fn single_expense_split_equally() {
    init_tracing();
    let members = members(&["a", "b", "c"]);
    let expenses = vec![Expense::split_equal("a", 9000, "Dinner", &["a", "b", "c"])];

    let sheet = BalanceCalculator::calculate(&members, &expenses, &[]).unwrap();

    assert_eq!(sheet.net("a"), Some(6000));
    assert_eq!(sheet.net("b"), Some(-3000));
    assert_eq!(sheet.net("c"), Some(-3000));
    assert_eq!(sheet.residual(), 0);
    assert!(sheet.warnings().is_empty());

    let a = sheet.get("a").unwrap();
    assert_eq!(a.total_paid, 9000);
    assert_eq!(a.total_owed, 3000);
}

#[test]
fn completed_payment_settles_the_debt() {
    let members = members(&["a", "b"]);
    let expenses = vec![Expense::split_equal("a", 10000, "Groceries", &["a", "b"])];
    let payments = vec![Payment::completed("b", "a", 5000)];

    let sheet = BalanceCalculator::calculate(&members, &expenses, &payments).unwrap();

    assert_eq!(sheet.net("a"), Some(0));
    assert_eq!(sheet.net("b"), Some(0));
    assert!(sheet.is_settled());
    assert!(SettlementPlanner::plan(sheet.balances()).is_empty());
}

#[test]
fn pending_payments_do_not_count() {
    let members = members(&["a", "b"]);
    let expenses = vec![Expense::split_equal("a", 10000, "Groceries", &["a", "b"])];
    let mut payment = Payment::completed("b", "a", 5000);
    payment.status = PaymentStatus::Pending;

    let sheet = BalanceCalculator::calculate(&members, &expenses, &[payment]).unwrap();

    assert_eq!(sheet.net("a"), Some(5000));
    assert_eq!(sheet.net("b"), Some(-5000));
}

#[test]
fn inactive_expenses_are_excluded() {
    let members = members(&["a", "b"]);
    let mut expense = Expense::split_equal("a", 10000, "Refunded", &["a", "b"]);
    expense.is_active = false;

    let sheet = BalanceCalculator::calculate(&members, &[expense], &[]).unwrap();

    assert!(sheet.is_settled());
    assert!(sheet.warnings().is_empty());
}

#[test]
fn payment_referencing_unknown_user_is_skipped_with_warning() {
    let members = members(&["a", "b"]);
    let expenses = vec![Expense::split_equal("a", 1000, "Coffee", &["a", "b"])];
    let payments = vec![Payment::completed("ghost", "a", 500)];

    let sheet = BalanceCalculator::calculate(&members, &expenses, &payments).unwrap();

    assert_eq!(sheet.net("a"), Some(500));
    assert_eq!(sheet.net("b"), Some(-500));
    assert_eq!(sheet.warnings().len(), 1);
    assert!(matches!(
        &sheet.warnings()[0],
        SettleError::InvalidReference {
            record: RecordKind::Payment,
            ..
        }
    ));
}

#[test]
fn expense_with_unknown_participant_is_skipped_entirely() {
    let members = members(&["a", "b"]);
    let expenses = vec![Expense::split_equal("a", 9000, "Dinner", &["a", "b", "ghost"])];

    let sheet = BalanceCalculator::calculate(&members, &expenses, &[]).unwrap();

    // Crediting the payer without all the debits would break the zero sum.
    assert!(sheet.is_settled());
    assert_eq!(sheet.residual(), 0);
    assert_eq!(sheet.warnings().len(), 1);
    assert!(matches!(
        &sheet.warnings()[0],
        SettleError::InvalidReference {
            record: RecordKind::Expense,
            ..
        }
    ));
}

#[test]
fn expense_with_mismatched_shares_is_skipped_with_warning() {
    let members = members(&["a", "b"]);
    let expense = Expense::with_shares(
        "a",
        1000,
        "Broken split",
        vec![
            ExpenseShare {
                user_id: "a".to_string(),
                share_minor: 400,
            },
            ExpenseShare {
                user_id: "b".to_string(),
                share_minor: 400,
            },
        ],
    );

    let sheet = BalanceCalculator::calculate(&members, &[expense], &[]).unwrap();

    assert!(sheet.is_settled());
    assert!(matches!(
        &sheet.warnings()[0],
        SettleError::ShareMismatch {
            share_sum: 800,
            amount: 1000,
            ..
        }
    ));
}

#[test]
fn empty_member_list_is_an_error() {
    let result = BalanceCalculator::calculate(&[], &[], &[]);
    assert_eq!(result.unwrap_err(), SettleError::NoMembers);
}

#[test]
fn equal_split_assigns_remainder_to_payer() {
    let expense = Expense::split_equal("a", 10000, "Taxi", &["a", "b", "c"]);

    assert_eq!(expense.share_sum(), 10000);
    let payer_share = expense
        .participants
        .iter()
        .find(|s| s.user_id == "a")
        .unwrap();
    assert_eq!(payer_share.share_minor, 3334);
    assert!(
        expense
            .participants
            .iter()
            .filter(|s| s.user_id != "a")
            .all(|s| s.share_minor == 3333)
    );
}

#[test]
fn equal_split_remainder_falls_back_to_first_participant() {
    let expense = Expense::split_equal("a", 100, "For the others", &["b", "c", "d"]);

    assert_eq!(expense.share_sum(), 100);
    assert_eq!(expense.participants[0].share_minor, 34);
}

#[test]
fn zero_sum_holds_across_mixed_records() {
    let members = members(&["a", "b", "c", "d"]);
    let expenses = vec![
        Expense::split_equal("a", 9001, "Dinner", &["a", "b", "c"]),
        Expense::split_equal("b", 4444, "Taxi", &["b", "c", "d"]),
        Expense::split_equal("c", 77, "Tip", &["a", "d"]),
    ];
    let payments = vec![
        Payment::completed("b", "a", 1200),
        Payment::completed("d", "b", 900),
    ];

    let sheet = BalanceCalculator::calculate(&members, &expenses, &payments).unwrap();

    assert!(sheet.residual().abs() <= members.len() as i64);
    assert!(sheet.warnings().is_empty());
}

#[test]
fn repeated_calculation_is_deterministic_and_drift_free() {
    let members = members(&["a", "b", "c"]);
    let expenses = vec![Expense::split_equal("a", 10000, "Rent", &["a", "b", "c"])];

    let first_sheet = BalanceCalculator::calculate(&members, &expenses, &[]).unwrap();
    let first_plan = SettlementPlanner::plan(first_sheet.balances());

    for _ in 0..1000 {
        let sheet = BalanceCalculator::calculate(&members, &expenses, &[]).unwrap();
        assert_eq!(sheet.residual(), 0);
        assert_eq!(sheet.balances(), first_sheet.balances());
        assert_eq!(SettlementPlanner::plan(sheet.balances()), first_plan);
    }
}
