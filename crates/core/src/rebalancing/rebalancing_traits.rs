use rust_decimal::Decimal;

use crate::portfolio::Holding;
use crate::Result;

use super::rebalancing_model::{RebalancePlan, RebalanceRecommendation, RebalanceReport};

pub trait RebalancingServiceTrait: Send + Sync {
    /// Runs both engine passes. The target total is the current total plus
    /// `additional_investment`.
    fn build_plan(
        &self,
        holdings: Vec<Holding>,
        additional_investment: Decimal,
    ) -> Result<RebalancePlan>;

    /// Re-runs the rebalance pass of an existing plan toward a new target
    /// total without recomputing current allocation.
    fn retarget_plan(&self, plan: &RebalancePlan, target_total: Decimal) -> Result<RebalancePlan>;

    fn recommend(&self, plan: &RebalancePlan) -> Result<RebalanceRecommendation>;

    /// Plan, summary, risk metrics and recommendation for one scenario.
    fn build_report(
        &self,
        holdings: Vec<Holding>,
        additional_investment: Decimal,
    ) -> Result<RebalanceReport>;
}
