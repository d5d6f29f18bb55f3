use chrono::{DateTime, NaiveDate, NaiveDateTime};
use contracts::dashboards::d100_stock_profitability::LoadReport;
use contracts::domain::a001_inventory_record::InventoryRecord;
use std::path::Path;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::dataset::Dataset;
use super::error::SourceError;

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Required column and the normalized header names accepted for it.
/// The first alias is the name used by the original export.
struct ColumnSpec {
    aliases: &'static [&'static str],
}

const ENTRY_DATE: ColumnSpec = ColumnSpec {
    aliases: &["data_entrada", "entry_date"],
};
const CURRENT_STOCK: ColumnSpec = ColumnSpec {
    aliases: &["estoque_atual", "current_stock"],
};
const UNIT_COST: ColumnSpec = ColumnSpec {
    aliases: &["vl_custo", "unit_cost"],
};
const UNIT_SALE_VALUE: ColumnSpec = ColumnSpec {
    aliases: &["vl_venda", "unit_sale_value"],
};
const GROSS_PROFIT: ColumnSpec = ColumnSpec {
    aliases: &["lucro_bruto", "gross_profit"],
};
const NET_PROFIT: ColumnSpec = ColumnSpec {
    aliases: &["lucro_liquido", "net_profit"],
};
const MARGIN_PERCENT: ColumnSpec = ColumnSpec {
    aliases: &["margem_percentual", "margin_percent"],
};
const SUPPLIER: ColumnSpec = ColumnSpec {
    aliases: &["fornecedor", "supplier"],
};
const DESCRIPTION: ColumnSpec = ColumnSpec {
    aliases: &["descricao", "description"],
};

/// Positions of the required columns in the header row.
struct ColumnIndex {
    entry_date: usize,
    current_stock: usize,
    unit_cost: usize,
    unit_sale_value: usize,
    gross_profit: usize,
    net_profit: usize,
    margin_percent: usize,
    supplier: usize,
    description: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, SourceError> {
        let mut missing = Vec::new();
        let mut find = |spec: &ColumnSpec| -> usize {
            match headers
                .iter()
                .position(|h| spec.aliases.contains(&h.as_str()))
            {
                Some(i) => i,
                None => {
                    missing.push(spec.aliases.join("|"));
                    usize::MAX
                }
            }
        };

        let index = Self {
            entry_date: find(&ENTRY_DATE),
            current_stock: find(&CURRENT_STOCK),
            unit_cost: find(&UNIT_COST),
            unit_sale_value: find(&UNIT_SALE_VALUE),
            gross_profit: find(&GROSS_PROFIT),
            net_profit: find(&NET_PROFIT),
            margin_percent: find(&MARGIN_PERCENT),
            supplier: find(&SUPPLIER),
            description: find(&DESCRIPTION),
        };

        if missing.is_empty() {
            Ok(index)
        } else {
            Err(SourceError::SchemaMismatch { missing })
        }
    }

    /// Coerce one row; `None` if any required value is absent or malformed.
    fn coerce(&self, row: &csv::StringRecord) -> Option<InventoryRecord> {
        let field = |i: usize| row.get(i).unwrap_or("");

        Some(InventoryRecord {
            supplier: parse_text(field(self.supplier))?,
            description: parse_text(field(self.description))?,
            entry_date: parse_entry_date(field(self.entry_date))?,
            current_stock: parse_number(field(self.current_stock))?,
            unit_cost: parse_number(field(self.unit_cost))?,
            unit_sale_value: parse_number(field(self.unit_sale_value))?,
            gross_profit: parse_number(field(self.gross_profit))?,
            net_profit: parse_number(field(self.net_profit))?,
            margin_percent: parse_number(field(self.margin_percent))?,
        })
    }
}

// ---------------------------------------------------------------------------
// Normalization & coercion
// ---------------------------------------------------------------------------

/// Canonical header name: trimmed, lowercase, accents stripped, spaces as `_`.
///
/// ```
/// use backend::domain::inventory::ingest::normalize_column_name;
/// assert_eq!(normalize_column_name(" Descrição "), "descricao");
/// assert_eq!(normalize_column_name("Lucro Líquido"), "lucro_liquido");
/// ```
pub fn normalize_column_name(name: &str) -> String {
    name.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Calendar date of an entry; time-of-day and offsets are dropped.
pub fn parse_entry_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Finite number with `.` as decimal separator.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Placeholders that spreadsheet and dataframe exports write for a missing
/// value. Matched exactly, after trimming.
const NULL_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn parse_text(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() || NULL_MARKERS.contains(&s) {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Enriched dataset plus row counts of the load that produced it.
#[derive(Debug, Clone)]
pub struct LoadedInventory {
    pub dataset: Dataset,
    pub report: LoadReport,
}

/// Parse CSV bytes into the enriched dataset.
///
/// Rows with any missing or malformed required value are dropped; the count
/// is reported in [`LoadReport`]. Surviving rows keep their source order.
pub fn parse_inventory(bytes: &[u8]) -> Result<LoadedInventory, SourceError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_column_name)
        .collect();

    tracing::debug!("Inventory CSV headers: {:?}", headers);

    let columns = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for result in reader.records() {
        report.rows_read += 1;

        let row = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Skipping malformed CSV record: {}", e);
                report.rows_dropped += 1;
                continue;
            }
        };

        match columns.coerce(&row) {
            Some(record) => records.push(record),
            None => report.rows_dropped += 1,
        }
    }

    if report.rows_dropped > 0 {
        tracing::warn!(
            "Inventory load dropped {} of {} rows with missing or invalid values",
            report.rows_dropped,
            report.rows_read
        );
    }

    tracing::info!(
        "Inventory load complete: {} rows read, {} kept",
        report.rows_read,
        report.rows_kept()
    );

    Ok(LoadedInventory {
        dataset: Dataset::from_source(records),
        report,
    })
}

/// Read and parse the source file at `path`.
pub fn load_inventory(path: impl AsRef<Path>) -> Result<LoadedInventory, SourceError> {
    let path = path.as_ref();
    tracing::info!("Loading inventory source: {}", path.display());

    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
        _ => SourceError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    parse_inventory(&bytes)
}
