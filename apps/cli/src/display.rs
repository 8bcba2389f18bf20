//! Plain-text rendering of a rebalance report.

use std::fmt::Write;

use rebalancer_core::{RebalanceReport, TradeAction};
use rust_decimal::Decimal;

/// Whole-unit amount with `,` digit grouping, e.g. `-1,250,000`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp(0);
    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < Decimal::ZERO {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_pct(value: Decimal) -> String {
    format!("{}%", value.round_dp(1))
}

fn format_optional_pct(value: Option<Decimal>) -> String {
    value.map(format_pct).unwrap_or_else(|| "-".to_string())
}

fn format_optional_amount(value: Option<Decimal>) -> String {
    value.map(format_amount).unwrap_or_else(|| "-".to_string())
}

pub fn render_report(report: &RebalanceReport) -> String {
    let mut out = String::new();
    let rows = report.plan.portfolio.rows();
    let label_width = rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0)
        .max("Asset".len());

    let _ = writeln!(out, "Current allocation");
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<width$}  {:>8} (target {})",
            row.label,
            format_optional_pct(row.current_weight_pct),
            format_pct(row.target_weight_pct),
            width = label_width
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Rebalance plan");
    let _ = writeln!(
        out,
        "  {:<width$}  {:>15}  {:>15}  {:>15}  {:>6}",
        "Asset",
        "Current",
        "Target",
        "Delta",
        "Action",
        width = label_width
    );
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<width$}  {:>15}  {:>15}  {:>15}  {:>6}",
            row.label,
            format_amount(row.current_value),
            format_optional_amount(row.target_value),
            format_optional_amount(row.delta),
            row.action.map(|a| a.to_string()).unwrap_or_default(),
            width = label_width
        );
    }
    let _ = writeln!(out);

    let summary = &report.summary;
    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "  Total assets:   {}", format_amount(summary.total_assets));
    let _ = writeln!(out, "  Total to buy:   {}", format_amount(summary.total_buy));
    let _ = writeln!(out, "  Total to sell:  {}", format_amount(summary.total_sell));
    let _ = writeln!(out, "  Residual:       {}", format_amount(summary.residual));
    let _ = writeln!(out);

    let risk = &report.risk;
    let _ = writeln!(out, "Risk");
    let _ = writeln!(
        out,
        "  Concentration index:    {}",
        risk.concentration_index.round_dp(4)
    );
    let _ = writeln!(
        out,
        "  Diversification score:  {}",
        risk.diversification_score.round_dp(4)
    );
    if let Some(effective) = risk.effective_holdings {
        let _ = writeln!(out, "  Effective holdings:     {}", effective.round_dp(2));
    }
    let _ = writeln!(out, "  Assessment:             {}", risk.label);
    let _ = writeln!(out);

    let recommendation = &report.recommendation;
    let _ = writeln!(
        out,
        "Max deviation from target: {}{}",
        format_pct(recommendation.max_deviation_pct),
        if recommendation.deviation_alert {
            " (above alert threshold)"
        } else {
            ""
        }
    );
    if recommendation.is_balanced() {
        let _ = writeln!(out, "Portfolio matches its target allocation.");
    } else {
        let _ = writeln!(out, "Execution steps");
        for step in &recommendation.steps {
            let verb = match step.action {
                TradeAction::Sell => "Sell",
                TradeAction::Buy => "Buy",
                TradeAction::Hold => "Hold",
            };
            let _ = writeln!(
                out,
                "  {}. {} {} of {}",
                step.step,
                verb,
                format_amount(step.amount),
                step.label
            );
        }
    }

    out
}
