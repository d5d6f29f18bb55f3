use contracts::dashboards::d100_stock_profitability::{
    CategoryValue, CriticalStockSplit, DashboardCharts, LossRanking,
};
use contracts::domain::a001_inventory_record::EnrichedRecord;

use crate::domain::inventory::Dataset;
use crate::shared::aggregate::{group_mean, group_sum, sort_by_category, top_asc, top_desc};

/// Net profit per supplier, highest first.
pub fn profit_by_supplier(dataset: &Dataset, top_n: usize) -> Vec<CategoryValue> {
    top_desc(
        group_sum(dataset, EnrichedRecord::supplier, EnrichedRecord::net_profit),
        top_n,
    )
}

/// Mean margin per product description, highest first.
pub fn margin_by_product(dataset: &Dataset, top_n: usize) -> Vec<CategoryValue> {
    top_desc(
        group_mean(
            dataset,
            EnrichedRecord::description,
            EnrichedRecord::margin_percent,
        ),
        top_n,
    )
}

/// Net profit per `YYYY-MM` bucket, chronological.
pub fn monthly_profit_trend(dataset: &Dataset) -> Vec<CategoryValue> {
    sort_by_category(group_sum(
        dataset,
        EnrichedRecord::period_bucket,
        EnrichedRecord::net_profit,
    ))
}

pub fn critical_stock_split(dataset: &Dataset) -> CriticalStockSplit {
    let critical = dataset.iter().filter(|r| r.is_critical_stock()).count();
    CriticalStockSplit {
        critical,
        normal: dataset.len() - critical,
    }
}

/// Summed loss per product description, most negative first.
pub fn loss_making_products(dataset: &Dataset, top_n: usize) -> LossRanking {
    let groups = group_sum(
        dataset.iter().filter(|r| r.is_loss_making()),
        EnrichedRecord::description,
        EnrichedRecord::net_profit,
    );

    if groups.is_empty() {
        LossRanking::NoLosses
    } else {
        LossRanking::Ranked {
            items: top_asc(groups, top_n),
        }
    }
}

pub fn build_charts(dataset: &Dataset, top_n: usize) -> DashboardCharts {
    DashboardCharts {
        profit_by_supplier: profit_by_supplier(dataset, top_n),
        margin_by_product: margin_by_product(dataset, top_n),
        monthly_profit_trend: monthly_profit_trend(dataset),
        critical_stock_split: critical_stock_split(dataset),
        loss_making_products: loss_making_products(dataset, top_n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::dataset::fixtures::{record, two_suppliers};

    fn sample() -> Dataset {
        Dataset::from_source(vec![
            record("Alfa", "Café", (2024, 3, 5), 10.0, 5.0, 80.0, 20.0, 25.0),
            record("Beta", "Chá", (2024, 1, 9), 80.0, 2.0, 40.0, -8.0, -20.0),
            record("Alfa", "Chá", (2024, 1, 20), 70.0, 2.0, 40.0, -4.0, -10.0),
            record("Gama", "Açúcar", (2023, 12, 1), 5.0, 1.0, 10.0, 12.0, 40.0),
            record("Beta", "Café", (2024, 3, 30), 90.0, 5.0, 80.0, 30.0, 35.0),
            record("Gama", "Sal", (2024, 1, 2), 200.0, 1.0, 5.0, -1.0, -5.0),
        ])
    }

    fn categories(items: &[CategoryValue]) -> Vec<&str> {
        items.iter().map(|c| c.category.as_str()).collect()
    }

    #[test]
    fn test_profit_by_supplier() {
        let top = profit_by_supplier(&sample(), 2);
        assert_eq!(
            top,
            vec![CategoryValue::new("Beta", 22.0), CategoryValue::new("Alfa", 16.0)]
        );
    }

    #[test]
    fn test_margin_by_product() {
        let top = margin_by_product(&sample(), 3);
        assert_eq!(
            top,
            vec![
                CategoryValue::new("Açúcar", 40.0),
                CategoryValue::new("Café", 30.0),
                CategoryValue::new("Sal", -5.0),
            ]
        );
    }

    #[test]
    fn test_monthly_profit_trend_is_chronological() {
        let trend = monthly_profit_trend(&sample());
        assert_eq!(categories(&trend), vec!["2023-12", "2024-01", "2024-03"]);
        assert_eq!(trend[1].value, -13.0);
        assert_eq!(trend[2].value, 50.0);
    }

    #[test]
    fn test_critical_stock_split() {
        let split = critical_stock_split(&sample());
        assert_eq!(split, CriticalStockSplit { critical: 2, normal: 4 });
        assert_eq!(split.total(), 6);
    }

    #[test]
    fn test_loss_making_products_most_negative_first() {
        match loss_making_products(&sample(), 5) {
            LossRanking::Ranked { items } => {
                assert_eq!(
                    items,
                    vec![CategoryValue::new("Chá", -12.0), CategoryValue::new("Sal", -1.0)]
                );
            }
            LossRanking::NoLosses => panic!("expected losses"),
        }
    }

    #[test]
    fn test_no_losses_is_explicit() {
        let ds = Dataset::from_source(vec![
            record("A", "Zero", (2024, 1, 1), 10.0, 1.0, 10.0, 0.0, 0.0),
            record("B", "Lucro", (2024, 1, 2), 10.0, 1.0, 10.0, 5.0, 1.0),
        ]);
        assert_eq!(loss_making_products(&ds, 7), LossRanking::NoLosses);
    }

    #[test]
    fn test_top_n_larger_than_groups_and_zero() {
        let ds = two_suppliers();
        assert_eq!(profit_by_supplier(&ds, 20).len(), 2);
        assert_eq!(margin_by_product(&ds, 20).len(), 2);
        assert!(profit_by_supplier(&ds, 0).is_empty());
        assert!(margin_by_product(&ds, 0).is_empty());
        assert!(loss_making_products(&ds, 0).items().is_empty());
    }

    #[test]
    fn test_empty_dataset() {
        let charts = build_charts(&Dataset::default(), 7);
        assert!(charts.profit_by_supplier.is_empty());
        assert!(charts.margin_by_product.is_empty());
        assert!(charts.monthly_profit_trend.is_empty());
        assert_eq!(charts.critical_stock_split, CriticalStockSplit::default());
        assert_eq!(charts.loss_making_products, LossRanking::NoLosses);
    }
}
