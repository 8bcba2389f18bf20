use log::{debug, warn};
use rust_decimal::Decimal;

use crate::errors::{CalculatorError, Error, ValidationError};
use crate::portfolio::{Holding, Portfolio};
use crate::risk::assess_risk;
use crate::Result;

use super::rebalancing_calculator::{
    compute_current_allocation, compute_rebalance, recommend, summarize,
};
use super::rebalancing_model::{RebalancePlan, RebalanceRecommendation, RebalanceReport};
use super::rebalancing_traits::RebalancingServiceTrait;

/// Stateless entry point over the allocation engine. Each call owns its
/// portfolio, so one instance can be shared across sessions.
#[derive(Debug, Default, Clone)]
pub struct RebalancingService;

impl RebalancingService {
    pub fn new() -> Self {
        Self
    }
}

impl RebalancingServiceTrait for RebalancingService {
    fn build_plan(
        &self,
        holdings: Vec<Holding>,
        additional_investment: Decimal,
    ) -> Result<RebalancePlan> {
        if additional_investment < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Additional investment cannot be negative (got {})",
                additional_investment
            ))));
        }

        let portfolio = Portfolio::new(holdings);
        let duplicates = portfolio.duplicate_labels();
        if !duplicates.is_empty() {
            warn!("Duplicate holding labels: {}", duplicates.join(", "));
        }

        let target_total = portfolio
            .total_current_value()?
            .checked_add(additional_investment)
            .ok_or_else(|| CalculatorError::overflow("target total"))?;
        debug!(
            "Building rebalance plan: {} holdings, additional investment {}, target total {}",
            portfolio.len(),
            additional_investment,
            target_total
        );

        let allocated = compute_current_allocation(&portfolio)?;
        let rebalanced = compute_rebalance(&allocated, target_total)?;

        Ok(RebalancePlan {
            target_total,
            portfolio: rebalanced,
        })
    }

    fn retarget_plan(&self, plan: &RebalancePlan, target_total: Decimal) -> Result<RebalancePlan> {
        Ok(RebalancePlan {
            target_total,
            portfolio: compute_rebalance(&plan.portfolio, target_total)?,
        })
    }

    fn recommend(&self, plan: &RebalancePlan) -> Result<RebalanceRecommendation> {
        recommend(&plan.portfolio)
    }

    fn build_report(
        &self,
        holdings: Vec<Holding>,
        additional_investment: Decimal,
    ) -> Result<RebalanceReport> {
        let plan = self.build_plan(holdings, additional_investment)?;
        let summary = summarize(&plan)?;
        let risk = assess_risk(&plan.portfolio)?;
        let recommendation = self.recommend(&plan)?;

        Ok(RebalanceReport {
            plan,
            summary,
            risk,
            recommendation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parse_portfolio_csv;
    use crate::rebalancing::TradeAction;
    use crate::risk::RiskLabel;
    use rust_decimal_macros::dec;

    fn holdings() -> Vec<Holding> {
        vec![
            Holding::new("A", dec!(1000000), dec!(25)),
            Holding::new("B", dec!(800000), dec!(25)),
            Holding::new("C", dec!(500000), dec!(25)),
            Holding::new("D", dec!(300000), dec!(25)),
        ]
    }

    #[test]
    fn test_build_plan_defaults_target_to_current_total() {
        let plan = RebalancingService::new()
            .build_plan(holdings(), Decimal::ZERO)
            .unwrap();

        assert_eq!(plan.target_total, dec!(2600000));
        assert_eq!(plan.portfolio.rows()[0].current_weight_pct, Some(dec!(38.46)));
        assert_eq!(plan.portfolio.rows()[3].delta, Some(dec!(350000)));
    }

    #[test]
    fn test_build_plan_adds_additional_investment() {
        let plan = RebalancingService::new()
            .build_plan(holdings(), dec!(400000))
            .unwrap();

        assert_eq!(plan.target_total, dec!(3000000));
        assert_eq!(plan.portfolio.rows()[0].target_value, Some(dec!(750000)));
    }

    #[test]
    fn test_build_plan_rejects_negative_investment() {
        let err = RebalancingService::new()
            .build_plan(holdings(), dec!(-1))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_build_plan_zero_total_fails() {
        let err = RebalancingService::new()
            .build_plan(vec![Holding::new("A", dec!(0), dec!(100))], dec!(1000))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Calculation(CalculatorError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_build_plan_out_of_range_import_fails() {
        let csv = "label,current_value,target_weight_pct\n\
                   A,50000000000000000000000000000,50\n\
                   B,50000000000000000000000000000,50\n";
        let holdings = parse_portfolio_csv(csv.as_bytes()).unwrap();

        let err = RebalancingService::new()
            .build_plan(holdings, Decimal::ZERO)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Calculation(CalculatorError::Overflow(_))
        ));
    }

    #[test]
    fn test_build_plan_out_of_range_investment_fails() {
        let err = RebalancingService::new()
            .build_plan(holdings(), Decimal::MAX)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Calculation(CalculatorError::Overflow(_))
        ));
    }

    #[test]
    fn test_retarget_keeps_current_weights() {
        let service = RebalancingService::new();
        let plan = service.build_plan(holdings(), Decimal::ZERO).unwrap();
        let retargeted = service.retarget_plan(&plan, dec!(4000000)).unwrap();

        assert_eq!(retargeted.target_total, dec!(4000000));
        assert_eq!(
            retargeted.portfolio.rows()[0].current_weight_pct,
            Some(dec!(38.46))
        );
        assert_eq!(retargeted.portfolio.rows()[0].target_value, Some(dec!(1000000)));
        assert_eq!(retargeted.portfolio.rows()[0].action, Some(TradeAction::Hold));
        // Input plan is untouched
        assert_eq!(plan.portfolio.rows()[0].target_value, Some(dec!(650000)));
    }

    #[test]
    fn test_build_report() {
        let report = RebalancingService::new()
            .build_report(holdings(), Decimal::ZERO)
            .unwrap();

        assert_eq!(report.summary.total_buy, dec!(500000));
        assert_eq!(report.summary.total_sell, dec!(500000));
        assert_eq!(report.summary.residual, Decimal::ZERO);
        assert_eq!(report.risk.label, RiskLabel::WellDiversified);
        assert_eq!(report.recommendation.steps.len(), 4);
        assert_eq!(report.recommendation.steps[0].label, "A");
        assert_eq!(report.recommendation.steps[0].action, TradeAction::Sell);
        assert_eq!(report.recommendation.max_deviation_pct, dec!(13.46));
        assert!(report.recommendation.deviation_alert);
    }
}
