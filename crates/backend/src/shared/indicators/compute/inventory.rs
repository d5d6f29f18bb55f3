use contracts::shared::indicators::KpiSnapshot;

use crate::domain::inventory::Dataset;

// ---------------------------------------------------------------------------
// Internal aggregation row
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct InventoryAgg {
    total_sales: f64,
    total_inventory_cost: f64,
    net_profit_total: f64,
    margin_sum: f64,
    critical_stock_count: usize,
    loss_making_count: usize,
    record_count: usize,
}

fn fetch_agg(dataset: &Dataset) -> InventoryAgg {
    dataset.iter().fold(InventoryAgg::default(), |mut agg, r| {
        agg.total_sales += r.unit_sale_value();
        agg.total_inventory_cost += r.current_stock() * r.unit_cost();
        agg.net_profit_total += r.net_profit();
        agg.margin_sum += r.margin_percent();
        agg.critical_stock_count += usize::from(r.is_critical_stock());
        agg.loss_making_count += usize::from(r.is_loss_making());
        agg.record_count += 1;
        agg
    })
}

/// `numerator / denominator`, or 0 when the denominator is 0.
fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

// ---------------------------------------------------------------------------
// Public compute functions
// ---------------------------------------------------------------------------

/// Every KPI of `dataset`. Pure; an empty dataset yields zeros and an
/// undefined average margin.
pub fn calculate_kpis(dataset: &Dataset) -> KpiSnapshot {
    let agg = fetch_agg(dataset);

    let average_margin = if agg.record_count > 0 {
        Some(agg.margin_sum / agg.record_count as f64)
    } else {
        None
    };

    KpiSnapshot {
        total_sales: agg.total_sales,
        total_inventory_cost: agg.total_inventory_cost,
        net_profit_total: agg.net_profit_total,
        average_margin,
        critical_stock_count: agg.critical_stock_count,
        loss_making_count: agg.loss_making_count,
        inventory_turnover: ratio_or_zero(agg.total_sales, agg.total_inventory_cost),
        average_ticket: ratio_or_zero(agg.total_sales, agg.record_count as f64),
        profit_to_sales_percent: ratio_or_zero(agg.net_profit_total, agg.total_sales) * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::dataset::fixtures::{record, two_suppliers};
    use crate::domain::inventory::{RecordFilter, SupplierSelection};
    use chrono::NaiveDate;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_dataset() {
        let kpis = calculate_kpis(&Dataset::default());
        assert_eq!(kpis.total_sales, 0.0);
        assert_eq!(kpis.total_inventory_cost, 0.0);
        assert_eq!(kpis.net_profit_total, 0.0);
        assert_eq!(kpis.average_margin, None);
        assert_eq!(kpis.critical_stock_count, 0);
        assert_eq!(kpis.loss_making_count, 0);
        assert_eq!(kpis.inventory_turnover, 0.0);
        assert_eq!(kpis.average_ticket, 0.0);
        assert_eq!(kpis.profit_to_sales_percent, 0.0);
    }

    #[test]
    fn test_two_record_reference() {
        let kpis = calculate_kpis(&two_suppliers());
        assert_close(kpis.total_sales, 300.0);
        assert_close(kpis.total_inventory_cost, 1600.0);
        assert_close(kpis.net_profit_total, 25.0);
        assert_close(kpis.average_margin.unwrap(), 7.5);
        assert_eq!(kpis.critical_stock_count, 1);
        assert_eq!(kpis.loss_making_count, 1);
        assert_close(kpis.inventory_turnover, 0.1875);
        assert_close(kpis.average_ticket, 150.0);
        assert_close(kpis.profit_to_sales_percent, 25.0 / 300.0 * 100.0);
    }

    #[test]
    fn test_filtered_single_record() {
        let ds = two_suppliers();
        let filter = RecordFilter::new(
            &ds,
            SupplierSelection::from_names(["A"]),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        );
        let kpis = calculate_kpis(&filter.apply(&ds));
        assert_close(kpis.total_sales, 100.0);
        assert_close(kpis.total_inventory_cost, 400.0);
        assert_close(kpis.net_profit_total, -5.0);
        assert_close(kpis.average_margin.unwrap(), 5.0);
        assert_eq!(kpis.critical_stock_count, 1);
        assert_eq!(kpis.loss_making_count, 1);
        assert_close(kpis.inventory_turnover, 0.25);
        assert_close(kpis.average_ticket, 100.0);
        assert_close(kpis.profit_to_sales_percent, -5.0);
    }

    #[test]
    fn test_zero_denominators_are_guarded() {
        // No cost and no sales: turnover and profit share fall back to 0.
        let ds = Dataset::from_source(vec![record(
            "A",
            "Brinde",
            (2024, 1, 1),
            0.0,
            0.0,
            0.0,
            -3.0,
            -10.0,
        )]);
        let kpis = calculate_kpis(&ds);
        assert_eq!(kpis.inventory_turnover, 0.0);
        assert_eq!(kpis.profit_to_sales_percent, 0.0);
        assert_eq!(kpis.average_ticket, 0.0);
        assert_eq!(kpis.average_margin, Some(-10.0));
        assert!(kpis.inventory_turnover.is_finite());
    }
}
