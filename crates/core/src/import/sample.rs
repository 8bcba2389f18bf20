use rust_decimal_macros::dec;

use crate::portfolio::Holding;

/// Default four-asset portfolio used when no input table is supplied.
pub fn sample_portfolio() -> Vec<Holding> {
    vec![
        Holding::new("Domestic Equity", dec!(1000000), dec!(25)),
        Holding::new("Foreign Equity", dec!(800000), dec!(25)),
        Holding::new("Domestic Bonds", dec!(500000), dec!(25)),
        Holding::new("Foreign Bonds", dec!(300000), dec!(25)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_sample_portfolio_is_valid() {
        let holdings = sample_portfolio();
        let weights: Decimal = holdings.iter().map(|h| h.target_weight_pct).sum();

        assert_eq!(holdings.len(), 4);
        assert_eq!(weights, dec!(100));
        assert!(holdings.iter().all(|h| h.validate().is_ok()));
    }
}
