//! Stateless calculators that do not touch the ledger.

use billcheck_domain::{sanitize_amount, IncomeSplit};

pub const NEEDS_RATIO: f64 = 0.50;
pub const WANTS_RATIO: f64 = 0.30;
pub const SAVINGS_RATIO: f64 = 0.20;

pub struct SplitService;

impl SplitService {
    /// Splits an income amount 50/30/20. Each share is clamped at zero.
    pub fn compute_split(amount: f64) -> IncomeSplit {
        let amount = sanitize_amount(amount);
        IncomeSplit {
            needs: (amount * NEEDS_RATIO).max(0.0),
            wants: (amount * WANTS_RATIO).max(0.0),
            savings: (amount * SAVINGS_RATIO).max(0.0),
        }
    }

    /// What remains of `balance` plus an expected `bonus` after `purchase`.
    pub fn quick_check(balance: f64, bonus: f64, purchase: f64) -> f64 {
        sanitize_amount(balance) + sanitize_amount(bonus) - sanitize_amount(purchase)
    }
}
