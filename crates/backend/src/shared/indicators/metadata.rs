use contracts::shared::indicators::*;
use once_cell::sync::Lazy;

const CURRENCY: &str = "R$";

static CATALOG: Lazy<IndicatorCatalogResponse> = Lazy::new(build_catalog);

/// Shared catalogue instance.
pub fn catalog() -> &'static IndicatorCatalogResponse {
    &CATALOG
}

/// Display metadata of one KPI.
pub fn meta(id: KpiId) -> &'static IndicatorMeta {
    // Every KpiId has exactly one entry, see `test_catalog_covers_every_kpi`.
    CATALOG
        .indicators
        .iter()
        .find(|m| m.id == id)
        .unwrap_or(&CATALOG.indicators[0])
}

fn money() -> ValueFormat {
    ValueFormat::Money {
        currency: CURRENCY.into(),
    }
}

/// Build the full catalogue of indicators + sets.
pub fn build_catalog() -> IndicatorCatalogResponse {
    let indicators = vec![
        IndicatorMeta {
            id: KpiId::TotalSales,
            label: "Vendas Totais".into(),
            short_label: Some("Vendas".into()),
            icon: "dollar-sign".into(),
            format: money(),
            description: Some("Soma de vl_venda".into()),
        },
        IndicatorMeta {
            id: KpiId::TotalInventoryCost,
            label: "Custo Total do Estoque".into(),
            short_label: Some("Custo Estoque".into()),
            icon: "package".into(),
            format: money(),
            description: Some("Soma de estoque_atual × vl_custo".into()),
        },
        IndicatorMeta {
            id: KpiId::NetProfitTotal,
            label: "Lucro Líquido".into(),
            short_label: None,
            icon: "trending-up".into(),
            format: money(),
            description: Some("Soma de lucro_liquido".into()),
        },
        IndicatorMeta {
            id: KpiId::AverageMargin,
            label: "Margem Média".into(),
            short_label: None,
            icon: "percent".into(),
            format: ValueFormat::Percent { decimals: 2 },
            description: Some("Média de margem_percentual; N/A sem dados".into()),
        },
        IndicatorMeta {
            id: KpiId::CriticalStockCount,
            label: "Itens em Estoque Crítico".into(),
            short_label: Some("Estoque Crítico".into()),
            icon: "alert-triangle".into(),
            format: ValueFormat::Integer,
            description: Some("estoque_atual < 50 unidades".into()),
        },
        IndicatorMeta {
            id: KpiId::LossMakingCount,
            label: "Itens com Prejuízo".into(),
            short_label: Some("Prejuízo".into()),
            icon: "package-x".into(),
            format: ValueFormat::Integer,
            description: Some("lucro_liquido < 0".into()),
        },
        IndicatorMeta {
            id: KpiId::InventoryTurnover,
            label: "Giro do Estoque (vezes)".into(),
            short_label: Some("Giro".into()),
            icon: "refresh-cw".into(),
            format: ValueFormat::Number { decimals: 4 },
            description: Some("vendas_totais / custo_total_estoque".into()),
        },
        IndicatorMeta {
            id: KpiId::AverageTicket,
            label: "Ticket Médio".into(),
            short_label: Some("Ticket".into()),
            icon: "invoices".into(),
            format: money(),
            description: Some("vendas_totais / número de itens".into()),
        },
        IndicatorMeta {
            id: KpiId::ProfitToSalesPercent,
            label: "Lucro / Faturamento (%)".into(),
            short_label: Some("Lucro/Fat.".into()),
            icon: "pie-chart".into(),
            format: ValueFormat::Percent { decimals: 2 },
            description: Some("lucro_liquido / vendas_totais × 100".into()),
        },
    ];

    let sets = vec![
        IndicatorSetMeta {
            id: "main_indicators".into(),
            label: "Principais Indicadores".into(),
            indicators: vec![
                KpiId::TotalSales,
                KpiId::TotalInventoryCost,
                KpiId::NetProfitTotal,
                KpiId::AverageMargin,
                KpiId::CriticalStockCount,
                KpiId::LossMakingCount,
            ],
            columns: 3,
        },
        IndicatorSetMeta {
            id: "efficiency".into(),
            label: "Eficiência".into(),
            indicators: vec![
                KpiId::InventoryTurnover,
                KpiId::AverageTicket,
                KpiId::ProfitToSalesPercent,
            ],
            columns: 3,
        },
    ];

    IndicatorCatalogResponse { indicators, sets }
}
