//! Rebalancing module - allocation engine passes, models and service.

mod rebalancing_calculator;
mod rebalancing_model;
mod rebalancing_service;
mod rebalancing_traits;

pub use rebalancing_calculator::{
    compute_current_allocation, compute_rebalance, recommend, summarize,
};
pub use rebalancing_model::{
    ExecutionStep, RebalancePlan, RebalanceRecommendation, RebalanceReport, RebalanceSummary,
    TradeAction, TradeInstruction,
};
pub use rebalancing_service::RebalancingService;
pub use rebalancing_traits::RebalancingServiceTrait;
