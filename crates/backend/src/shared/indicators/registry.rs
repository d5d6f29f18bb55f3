use contracts::shared::indicators::*;

use super::metadata;
use crate::shared::format::format_value;

/// Severity of the critical-stock situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAlert {
    Adequate,
    Attention,
    Urgent,
}

impl StockAlert {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => StockAlert::Adequate,
            1..=5 => StockAlert::Attention,
            _ => StockAlert::Urgent,
        }
    }

    pub fn status(&self) -> IndicatorStatus {
        match self {
            StockAlert::Adequate => IndicatorStatus::Good,
            StockAlert::Attention => IndicatorStatus::Warning,
            StockAlert::Urgent => IndicatorStatus::Bad,
        }
    }

    pub fn message(&self, count: usize) -> String {
        match self {
            StockAlert::Adequate => "Estoque adequado".to_string(),
            StockAlert::Attention => format!("Atenção: {} item com estoque baixo", count),
            StockAlert::Urgent => format!("Urgente: {} itens com estoque crítico", count),
        }
    }
}

fn status_by_sign(value: Option<f64>) -> IndicatorStatus {
    match value {
        Some(v) if v < 0.0 => IndicatorStatus::Bad,
        Some(v) if v > 0.0 => IndicatorStatus::Good,
        _ => IndicatorStatus::Neutral,
    }
}

fn build_value(id: KpiId, snapshot: &KpiSnapshot) -> IndicatorValue {
    let value = snapshot.get(id);
    let display = format_value(value, &metadata::meta(id).format);

    let (status, subtitle) = match id {
        KpiId::NetProfitTotal | KpiId::ProfitToSalesPercent | KpiId::AverageMargin => {
            (status_by_sign(value), None)
        }
        KpiId::CriticalStockCount => {
            let alert = StockAlert::from_count(snapshot.critical_stock_count);
            (
                alert.status(),
                Some(alert.message(snapshot.critical_stock_count)),
            )
        }
        KpiId::LossMakingCount if snapshot.loss_making_count > 0 => (IndicatorStatus::Bad, None),
        _ => (IndicatorStatus::Neutral, None),
    };

    IndicatorValue {
        id,
        value,
        display,
        status,
        subtitle,
    }
}

/// KPI cards for `snapshot`, in fixed order.
pub fn build_indicator_values(snapshot: &KpiSnapshot) -> Vec<IndicatorValue> {
    KpiId::ALL
        .iter()
        .map(|id| build_value(*id, snapshot))
        .collect()
}
