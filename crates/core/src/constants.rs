use rust_decimal::Decimal;

/// Decimal places kept on current allocation percentages
pub const WEIGHT_DECIMAL_PRECISION: u32 = 2;

/// Decimal places kept on target values (whole monetary units)
pub const VALUE_DECIMAL_PRECISION: u32 = 0;

/// Diversification scores strictly above this are considered well diversified (0.7)
pub const WELL_DIVERSIFIED_THRESHOLD: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// Deviation from target, in percentage points, that warrants attention (5.0)
pub const DEVIATION_ALERT_THRESHOLD_PCT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Target weights are expected to add up to this
pub const FULL_ALLOCATION_PCT: Decimal = Decimal::ONE_HUNDRED;
