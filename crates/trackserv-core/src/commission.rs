//! Commission split calculator.
//!
//! The single place a gross amount is divided into commission and net.
//! Rounding rule, fixed everywhere: half away from zero. Period totals
//! are sums of per-record roundings, never a rounding of the sum.

use trackserv_domain::CommissionSplit;

use crate::error::{CoreError, CoreResult};

/// Splits `amount_cents` into commission and net for the given rate.
///
/// Rejects negative amounts and rates outside `[0, 100]`; inputs are
/// never clamped. The result always satisfies
/// `commission_cents + net_cents == amount_cents`.
pub fn compute_split(amount_cents: i64, rate_percent: f64) -> CoreResult<CommissionSplit> {
    if amount_cents < 0 {
        return Err(CoreError::Validation(format!(
            "amount must be non-negative, got {amount_cents}"
        )));
    }
    validate_rate(rate_percent)?;

    let commission_cents = (amount_cents as f64 * rate_percent / 100.0).round() as i64;
    Ok(CommissionSplit {
        commission_cents,
        net_cents: amount_cents - commission_cents,
    })
}

/// Checks a commission rate lies in `[0, 100]` and is a real number.
pub fn validate_rate(rate_percent: f64) -> CoreResult<()> {
    if !rate_percent.is_finite() || !(0.0..=100.0).contains(&rate_percent) {
        return Err(CoreError::Validation(format!(
            "commission rate must be within [0, 100], got {rate_percent}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_the_documented_scenario() {
        let split = compute_split(10_000, 15.0).expect("valid split");
        assert_eq!(split.commission_cents, 1_500);
        assert_eq!(split.net_cents, 8_500);
    }

    #[test]
    fn zero_amount_yields_zero_split() {
        for rate in [0.0, 15.0, 100.0] {
            let split = compute_split(0, rate).expect("valid split");
            assert_eq!(split.commission_cents, 0);
            assert_eq!(split.net_cents, 0);
        }
    }

    #[test]
    fn commission_plus_net_equals_gross() {
        for amount in [1, 99, 1_234, 10_000, 999_999] {
            for rate in [0.0, 0.5, 10.0, 33.3, 50.0, 99.9, 100.0] {
                let split = compute_split(amount, rate).expect("valid split");
                assert_eq!(split.commission_cents + split.net_cents, amount);
            }
        }
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 125 * 10% = 12.5 -> 13
        let split = compute_split(125, 10.0).expect("valid split");
        assert_eq!(split.commission_cents, 13);
        assert_eq!(split.net_cents, 112);
        // 124 * 10% = 12.4 -> 12
        let split = compute_split(124, 10.0).expect("valid split");
        assert_eq!(split.commission_cents, 12);
    }

    #[test]
    fn rejects_negative_amounts() {
        let err = compute_split(-1, 10.0).expect_err("negative amount must fail");
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn rejects_out_of_range_rates() {
        for rate in [-0.1, 100.1, f64::NAN, f64::INFINITY] {
            let err = compute_split(1_000, rate).expect_err("invalid rate must fail");
            assert!(matches!(err, CoreError::Validation(_)), "rate {rate}");
        }
    }
}
