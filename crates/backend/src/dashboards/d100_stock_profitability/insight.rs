use contracts::dashboards::d100_stock_profitability::{InsightTone, PeriodInsight, TrendDirection};

use super::charts::{critical_stock_split, monthly_profit_trend};
use crate::domain::inventory::Dataset;

fn pct_change(cur: f64, prev: f64) -> Option<f64> {
    if prev.abs() < 0.01 {
        None
    } else {
        Some(((cur - prev) / prev.abs()) * 100.0)
    }
}

/// Net profit of the latest period against the period right before it.
///
/// Only periods present in `dataset` count, so a gap month is skipped.
/// `None` when there are fewer than two periods to compare.
pub fn period_insight(dataset: &Dataset) -> Option<PeriodInsight> {
    let trend = monthly_profit_trend(dataset);
    let [.., previous, current] = trend.as_slice() else {
        return None;
    };

    let change_percent = pct_change(current.value, previous.value);
    let direction = match change_percent {
        Some(c) if c < 0.0 => TrendDirection::Down,
        Some(_) => TrendDirection::Up,
        None if current.value < previous.value => TrendDirection::Down,
        None => TrendDirection::Up,
    };

    let critical_stock_count = critical_stock_split(dataset).critical;
    let tone = if critical_stock_count > 0 {
        InsightTone::Warning
    } else {
        InsightTone::Info
    };

    let verb = match direction {
        TrendDirection::Up => "subiu",
        TrendDirection::Down => "caiu",
    };
    let change = match change_percent {
        Some(c) => format!("{} {:.1}%", verb, c.abs()),
        None => verb.to_string(),
    };
    let message = format!(
        "O lucro líquido {} em {} em relação a {}. Estoque crítico: {} itens.",
        change, current.category, previous.category, critical_stock_count
    );

    Some(PeriodInsight {
        current_period: current.category.clone(),
        previous_period: previous.category.clone(),
        current_net_profit: current.value,
        previous_net_profit: previous.value,
        change_percent,
        direction,
        critical_stock_count,
        tone,
        message,
    })
}
