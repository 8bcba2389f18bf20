//! Risk metrics module - concentration and diversification scoring.

mod risk_calculator;
mod risk_model;

pub use risk_calculator::{assess_risk, concentration_index, diversification_score, risk_label};
pub use risk_model::{RiskLabel, RiskMetrics};
