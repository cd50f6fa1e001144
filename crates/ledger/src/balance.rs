//! Pure sign-convention arithmetic.
//!
//! The sign convention is a function of the account kind alone. Asset
//! accounts (checking, savings) apply a transaction amount to the balance as
//! is; credit accounts store debt owed, so the same amount moves the balance
//! in the opposite direction. No operation is allowed to special-case sign
//! logic outside this module.

use crate::{AccountKind, MoneyCents};

/// Balance change produced by applying `amount` to an account of `kind`.
///
/// Asset accounts: a positive amount is a deposit, a negative one a
/// withdrawal. Credit accounts: a positive amount is a purchase (debt up), a
/// negative one a payment (debt down) — the stored transaction keeps the raw
/// amount, only the balance moves with the inverted sign.
#[must_use]
pub fn balance_delta(kind: AccountKind, amount: MoneyCents) -> MoneyCents {
    if kind.is_credit() { -amount } else { amount }
}

/// Balance changes for the two sides of a transfer of `amount` (> 0).
///
/// Defined through [`balance_delta`]: the source sees `-amount`, the
/// destination `+amount`. For a credit source that means debt *increases*
/// (moving money out of a credit account borrows more); for a credit
/// destination debt *decreases* (paying it down).
#[must_use]
pub fn transfer_deltas(
    from_kind: AccountKind,
    to_kind: AccountKind,
    amount: MoneyCents,
) -> (MoneyCents, MoneyCents) {
    (
        balance_delta(from_kind, -amount),
        balance_delta(to_kind, amount),
    )
}

/// Transaction amount equivalent to overwriting a balance from `old` to
/// `new`.
///
/// Used when a credit balance is synced against a statement: the synthetic
/// adjustment transaction must be sized so the balance invariant still holds.
#[must_use]
pub fn adjustment_amount(old_balance: MoneyCents, new_balance: MoneyCents) -> MoneyCents {
    old_balance - new_balance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_kinds_keep_the_raw_sign() {
        for kind in [AccountKind::Checking, AccountKind::Savings] {
            assert_eq!(balance_delta(kind, MoneyCents::new(5000)).cents(), 5000);
            assert_eq!(balance_delta(kind, MoneyCents::new(-5000)).cents(), -5000);
        }
    }

    #[test]
    fn credit_inverts_the_sign() {
        assert_eq!(
            balance_delta(AccountKind::Credit, MoneyCents::new(3000)).cents(),
            -3000
        );
        assert_eq!(
            balance_delta(AccountKind::Credit, MoneyCents::new(-3000)).cents(),
            3000
        );
    }

    #[test]
    fn transfer_between_assets_is_balance_neutral() {
        let (from, to) = transfer_deltas(
            AccountKind::Checking,
            AccountKind::Savings,
            MoneyCents::new(4000),
        );
        assert_eq!(from.cents(), -4000);
        assert_eq!(to.cents(), 4000);
        assert!((from + to).is_zero());
    }

    #[test]
    fn transfer_from_credit_raises_debt() {
        let (from, to) = transfer_deltas(
            AccountKind::Credit,
            AccountKind::Checking,
            MoneyCents::new(2500),
        );
        assert_eq!(from.cents(), 2500);
        assert_eq!(to.cents(), 2500);
    }

    #[test]
    fn transfer_to_credit_pays_down_debt() {
        let (from, to) = transfer_deltas(
            AccountKind::Checking,
            AccountKind::Credit,
            MoneyCents::new(2500),
        );
        assert_eq!(from.cents(), -2500);
        assert_eq!(to.cents(), -2500);
    }

    #[test]
    fn adjustment_preserves_the_balance_invariant() {
        // Statement sync from $230 debt to $180 debt is a $50 payment.
        let adjustment = adjustment_amount(MoneyCents::new(230_00), MoneyCents::new(180_00));
        assert_eq!(adjustment.cents(), 50_00);
        // Applying it through the credit convention lands on the new balance.
        let new_balance =
            MoneyCents::new(230_00) + balance_delta(AccountKind::Credit, adjustment);
        assert_eq!(new_balance.cents(), 180_00);
    }
}
