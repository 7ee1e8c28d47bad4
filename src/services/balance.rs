//! Balance aggregation
//!
//! Folds the complete transaction history into per-account, per-currency
//! balances. There is no stored running balance: every call re-derives the
//! whole map from its inputs, so the result only depends on which accounts
//! and transactions are passed in, never on their order.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::models::{Account, AccountId, Currency, Money, Transaction, TransactionKind};

/// Currency buckets for one account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    #[serde(rename = "balanceDOP")]
    pub balance_dop: Money,
    #[serde(rename = "balanceUSD")]
    pub balance_usd: Money,
}

impl AccountBalance {
    /// Amount held in the given currency bucket
    pub fn get(&self, currency: Currency) -> Money {
        match currency {
            Currency::Dop => self.balance_dop,
            Currency::Usd => self.balance_usd,
        }
    }

    fn bucket_mut(&mut self, currency: Currency) -> &mut Money {
        match currency {
            Currency::Dop => &mut self.balance_dop,
            Currency::Usd => &mut self.balance_usd,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.balance_dop.is_zero() && self.balance_usd.is_zero()
    }
}

/// Per-account balances keyed by account id
pub type Balances = HashMap<AccountId, AccountBalance>;

/// Compute every account's DOP and USD balance from the full history
///
/// Every account in `accounts` gets an entry, zeroed if nothing touches it.
/// A side of a transaction that names an account not in `accounts` (or a
/// transfer with no destination) is skipped; the other side still applies.
pub fn compute_balances(accounts: &[Account], transactions: &[Transaction]) -> Balances {
    let mut balances: Balances = accounts
        .iter()
        .map(|account| (account.id, AccountBalance::default()))
        .collect();

    for txn in transactions {
        match txn.kind {
            TransactionKind::Income => {
                apply(&mut balances, txn, Some(txn.account_id), txn.amount);
            }
            TransactionKind::Expense => {
                apply(&mut balances, txn, Some(txn.account_id), -txn.amount);
            }
            TransactionKind::Transfer => {
                apply(&mut balances, txn, Some(txn.account_id), -txn.amount);
                apply(&mut balances, txn, txn.transfer_to_account_id, txn.amount);
            }
        }
    }

    balances
}

fn apply(balances: &mut Balances, txn: &Transaction, account_id: Option<AccountId>, delta: Money) {
    let Some(account_id) = account_id else {
        debug!(transaction = %txn.id, "transfer has no destination; skipping credit side");
        return;
    };

    match balances.get_mut(&account_id) {
        Some(balance) => *balance.bucket_mut(txn.currency) += delta,
        None => debug!(
            transaction = %txn.id,
            account = %account_id,
            "transaction references an unknown account; skipping"
        ),
    }
}

/// Sum every account's buckets, keeping currencies apart
pub fn total_by_currency(balances: &Balances) -> AccountBalance {
    balances
        .values()
        .fold(AccountBalance::default(), |mut total, balance| {
            total.balance_dop += balance.balance_dop;
            total.balance_usd += balance.balance_usd;
            total
        })
}

/// One row of a balance sheet
#[derive(Debug, Clone, Serialize)]
pub struct BalanceLine {
    pub account: Account,
    #[serde(flatten)]
    pub balance: AccountBalance,
}

/// Accounts paired with their balances, in the caller's account order
#[derive(Debug, Clone, Serialize)]
pub struct BalanceSheet {
    pub lines: Vec<BalanceLine>,
    pub totals: AccountBalance,
}

impl BalanceSheet {
    pub fn build(accounts: &[Account], transactions: &[Transaction]) -> Self {
        let balances = compute_balances(accounts, transactions);
        let totals = total_by_currency(&balances);
        let lines = accounts
            .iter()
            .map(|account| BalanceLine {
                account: account.clone(),
                balance: balances.get(&account.id).copied().unwrap_or_default(),
            })
            .collect();

        Self { lines, totals }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn account(name: &str, currency: Currency) -> Account {
        Account::new(name, AccountType::Checking, currency)
    }

    fn dop(units: i64) -> Money {
        Money::from_units_cents(units, 0)
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_balances(&[], &[]).is_empty());
    }

    #[test]
    fn test_accounts_without_transactions_are_zeroed() {
        let accounts = vec![account("A", Currency::Dop), account("B", Currency::Usd)];
        let balances = compute_balances(&accounts, &[]);

        assert_eq!(balances.len(), 2);
        for account in &accounts {
            assert!(balances[&account.id].is_zero());
        }
    }

    #[test]
    fn test_income_expense_transfer_scenario() {
        let a = account("A", Currency::Dop);
        let b = account("B", Currency::Dop);
        let transactions = vec![
            Transaction::income(a.id, date(), dop(100), Currency::Dop, "Salario"),
            Transaction::expense(a.id, date(), dop(30), Currency::Dop, "Comida"),
            Transaction::transfer(a.id, b.id, date(), dop(20), Currency::Dop),
        ];

        let balances = compute_balances(&[a.clone(), b.clone()], &transactions);
        assert_eq!(balances[&a.id].balance_dop, dop(50));
        assert_eq!(balances[&b.id].balance_dop, dop(20));
        assert!(balances[&a.id].balance_usd.is_zero());
        assert!(balances[&b.id].balance_usd.is_zero());
    }

    #[test]
    fn test_currency_follows_transaction_not_account() {
        let a = account("Pesos", Currency::Dop);
        let b = account("Dollars", Currency::Usd);
        let transactions = vec![Transaction::income(
            a.id,
            date(),
            Money::from_cents(12_550),
            Currency::Usd,
            "Freelance",
        )];

        let balances = compute_balances(&[a.clone(), b.clone()], &transactions);
        assert_eq!(balances[&a.id].balance_usd, Money::from_cents(12_550));
        assert!(balances[&a.id].balance_dop.is_zero());
        assert!(balances[&b.id].is_zero());
    }

    #[test]
    fn test_currency_partitioning() {
        let a = account("A", Currency::Dop);
        let transactions = vec![
            Transaction::income(a.id, date(), dop(500), Currency::Dop, "Salario"),
            Transaction::expense(a.id, date(), dop(75), Currency::Dop, "Luz"),
        ];

        let balances = compute_balances(&[a.clone()], &transactions);
        assert_eq!(balances[&a.id].balance_dop, dop(425));
        assert!(balances[&a.id].balance_usd.is_zero());
    }

    #[test]
    fn test_dangling_source_does_not_affect_others() {
        let a = account("A", Currency::Dop);
        let ghost = AccountId::new();
        let transactions = vec![
            Transaction::income(a.id, date(), dop(10), Currency::Dop, "Salario"),
            Transaction::expense(ghost, date(), dop(999), Currency::Dop, "Comida"),
        ];

        let balances = compute_balances(&[a.clone()], &transactions);
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[&a.id].balance_dop, dop(10));
        assert!(!balances.contains_key(&ghost));
    }

    #[test]
    fn test_dangling_transfer_side_is_skipped() {
        let a = account("A", Currency::Dop);
        let ghost = AccountId::new();

        let outgoing = Transaction::transfer(a.id, ghost, date(), dop(40), Currency::Dop);
        let incoming = Transaction::transfer(ghost, a.id, date(), dop(15), Currency::Dop);

        let balances = compute_balances(&[a.clone()], &[outgoing, incoming]);
        assert_eq!(balances[&a.id].balance_dop, dop(-25));
    }

    #[test]
    fn test_transfer_without_destination_only_debits_source() {
        let a = account("A", Currency::Usd);
        let mut txn = Transaction::transfer(a.id, AccountId::new(), date(), dop(5), Currency::Usd);
        txn.transfer_to_account_id = None;

        let balances = compute_balances(&[a.clone()], &[txn]);
        assert_eq!(balances[&a.id].balance_usd, dop(-5));
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_overflowing() {
        let a = account("A", Currency::Dop);
        let b = account("B", Currency::Dop);
        let huge = Money::from_cents(5_000_000_000_000_000_000);
        let transactions = vec![
            Transaction::income(a.id, date(), huge, Currency::Dop, "Premio"),
            Transaction::income(a.id, date(), huge, Currency::Dop, "Premio"),
            Transaction::expense(b.id, date(), huge, Currency::Dop, "Deuda"),
            Transaction::expense(b.id, date(), huge, Currency::Dop, "Deuda"),
        ];

        let balances = compute_balances(&[a.clone(), b.clone()], &transactions);
        assert_eq!(balances[&a.id].balance_dop, Money::from_cents(i64::MAX));
        assert_eq!(balances[&b.id].balance_dop, Money::from_cents(i64::MIN));

        let totals = total_by_currency(&balances);
        assert!(totals.balance_usd.is_zero());
    }

    #[test]
    fn test_huge_loaded_amounts_do_not_blank_the_sheet() {
        let json = r#"{
            "accounts": [{"id": "a0000000-0000-4000-8000-000000000001", "name": "A", "type": "savings", "currency": "DOP"}],
            "transactions": [
                {"id": "b0000000-0000-4000-8000-000000000001", "type": "income", "amount": 50000000000000000,
                 "currency": "DOP", "date": "2024-03-01", "accountId": "a0000000-0000-4000-8000-000000000001"},
                {"id": "b0000000-0000-4000-8000-000000000002", "type": "income", "amount": 50000000000000000,
                 "currency": "DOP", "date": "2024-03-02", "accountId": "a0000000-0000-4000-8000-000000000001"}
            ]
        }"#;
        let (snapshot, report) = crate::storage::Snapshot::from_json_str(json).unwrap();
        assert!(report.is_clean());

        let sheet = BalanceSheet::build(&snapshot.accounts, &snapshot.transactions);
        assert_eq!(sheet.lines.len(), 1);
        assert_eq!(sheet.totals.balance_dop, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_transfers_are_zero_sum() {
        let x = account("X", Currency::Usd);
        let y = account("Y", Currency::Usd);
        let mut transactions = vec![
            Transaction::income(x.id, date(), Money::from_cents(80_000), Currency::Usd, "Salario"),
            Transaction::expense(y.id, date(), Money::from_cents(1_234), Currency::Usd, "Café"),
        ];
        let accounts = vec![x.clone(), y.clone()];

        let before = compute_balances(&accounts, &transactions);
        transactions.push(Transaction::transfer(
            x.id,
            y.id,
            date(),
            Money::from_cents(33_333),
            Currency::Usd,
        ));
        let after = compute_balances(&accounts, &transactions);

        let sum = |b: &Balances| b[&x.id].balance_usd + b[&y.id].balance_usd;
        assert_eq!(sum(&before), sum(&after));
        assert_eq!(after[&y.id].balance_usd, Money::from_cents(33_333 - 1_234));
        assert_eq!(
            total_by_currency(&before).balance_usd,
            total_by_currency(&after).balance_usd
        );
    }

    #[test]
    fn test_order_independence() {
        let a = account("A", Currency::Dop);
        let b = account("B", Currency::Usd);
        let c = account("C", Currency::Dop);
        let accounts = vec![a.clone(), b.clone(), c.clone()];
        let transactions = vec![
            Transaction::income(a.id, date(), Money::from_cents(10_001), Currency::Dop, "Salario"),
            Transaction::expense(a.id, date(), Money::from_cents(2_550), Currency::Dop, "Comida"),
            Transaction::transfer(a.id, c.id, date(), Money::from_cents(1_000), Currency::Dop),
            Transaction::income(b.id, date(), Money::from_cents(7_000), Currency::Usd, "Bono"),
            Transaction::transfer(b.id, a.id, date(), Money::from_cents(300), Currency::Usd),
            Transaction::expense(AccountId::new(), date(), Money::from_cents(5), Currency::Usd, "X"),
        ];

        let expected = compute_balances(&accounts, &transactions);

        // Every rotation plus the reversal of each rotation
        for shift in 0..transactions.len() {
            let mut permuted = transactions.clone();
            permuted.rotate_left(shift);
            assert_eq!(compute_balances(&accounts, &permuted), expected);

            permuted.reverse();
            assert_eq!(compute_balances(&accounts, &permuted), expected);
        }
    }

    #[test]
    fn test_is_idempotent() {
        let a = account("A", Currency::Dop);
        let transactions = vec![Transaction::income(a.id, date(), dop(1), Currency::Dop, "X")];
        let accounts = vec![a];

        assert_eq!(
            compute_balances(&accounts, &transactions),
            compute_balances(&accounts, &transactions)
        );
    }

    #[test]
    fn test_many_small_amounts_do_not_drift() {
        let a = account("A", Currency::Dop);
        let transactions: Vec<_> = (0..10_000)
            .map(|_| {
                Transaction::income(
                    a.id,
                    date(),
                    Money::from_decimal(0.1).unwrap(),
                    Currency::Dop,
                    "Propina",
                )
            })
            .collect();

        let balances = compute_balances(&[a.clone()], &transactions);
        assert_eq!(balances[&a.id].balance_dop, dop(1_000));
    }

    #[test]
    fn test_balance_sheet_keeps_account_order() {
        let a = account("Zeta", Currency::Dop);
        let b = account("Alfa", Currency::Usd);
        let transactions = vec![
            Transaction::income(a.id, date(), dop(10), Currency::Dop, "X"),
            Transaction::income(b.id, date(), dop(3), Currency::Usd, "X"),
        ];

        let sheet = BalanceSheet::build(&[a.clone(), b.clone()], &transactions);
        assert_eq!(sheet.lines[0].account.name, "Zeta");
        assert_eq!(sheet.lines[1].account.name, "Alfa");
        assert_eq!(sheet.totals.balance_dop, dop(10));
        assert_eq!(sheet.totals.balance_usd, dop(3));
    }

    #[test]
    fn test_balance_serializes_with_bucket_names() {
        let balance = AccountBalance {
            balance_dop: Money::from_cents(5_000),
            balance_usd: Money::zero(),
        };
        let json = serde_json::to_value(balance).unwrap();
        assert_eq!(json["balanceDOP"], 50.0);
        assert_eq!(json["balanceUSD"], 0.0);
    }
}
