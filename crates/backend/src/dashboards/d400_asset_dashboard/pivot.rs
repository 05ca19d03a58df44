use contracts::dashboards::d400_asset_dashboard::{
    DashboardTotals, PivotRow, PivotTable, IT_STOCK, UNASSIGNED_DEPARTMENT, UNKNOWN_DEVICE,
};
use contracts::domain::a002_asset_issue::aggregate::AssetIssue;
use std::collections::{BTreeMap, BTreeSet};

use crate::shared::data::asset_store::RegisteredAssetFlag;

/// Label of the grand-total row
pub const TOTAL_LABEL: &str = "Total";

/// Колонка сводной таблицы.
///
/// Порядок вариантов задаёт порядок колонок: отделы по алфавиту,
/// "IT Stock" всегда последней.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Column {
    Department(String),
    ItStock,
}

impl Column {
    fn label(&self) -> &str {
        match self {
            Column::Department(name) => name,
            Column::ItStock => IT_STOCK,
        }
    }
}

fn label_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Column of an issued row.
///
/// A department literally named "IT Stock" would merge issued devices into
/// the stock column, so it gets a distinct label.
fn department_column(department: Option<&str>) -> Column {
    let name = label_or(department, UNASSIGNED_DEPARTMENT);
    if name == IT_STOCK {
        Column::Department(format!("{} (issued)", IT_STOCK))
    } else {
        Column::Department(name)
    }
}

/// Builder for the device-by-department count table
pub struct PivotBuilder {
    /// device -> column -> count
    cells: BTreeMap<String, BTreeMap<Column, u64>>,
    columns: BTreeSet<Column>,
}

impl Default for PivotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PivotBuilder {
    pub fn new() -> Self {
        let mut columns = BTreeSet::new();
        columns.insert(Column::ItStock);
        Self {
            cells: BTreeMap::new(),
            columns,
        }
    }

    fn add(&mut self, device: String, column: Column) {
        *self
            .cells
            .entry(device)
            .or_default()
            .entry(column.clone())
            .or_insert(0) += 1;
        self.columns.insert(column);
    }

    /// Count issued rows by (asset type, department)
    pub fn add_issues(&mut self, issues: &[AssetIssue]) -> &mut Self {
        for issue in issues {
            let device = label_or(issue.asset.asset_type.as_deref(), UNKNOWN_DEVICE);
            self.add(device, department_column(issue.employee.department.as_deref()));
        }
        self
    }

    /// Count registered assets without an issue into "IT Stock", by make
    pub fn add_stock(&mut self, registered: &[RegisteredAssetFlag]) -> &mut Self {
        for asset in registered.iter().filter(|a| !a.is_issued) {
            let device = label_or(asset.asset_make.as_deref(), UNKNOWN_DEVICE);
            self.add(device, Column::ItStock);
        }
        self
    }

    pub fn build(&self) -> (PivotTable, DashboardTotals) {
        let columns: Vec<&Column> = self.columns.iter().collect();
        let mut column_sums = vec![0u64; columns.len()];
        let mut totals = DashboardTotals::default();

        let rows = self
            .cells
            .iter()
            .map(|(device, by_column)| {
                let counts: Vec<u64> = columns
                    .iter()
                    .map(|c| by_column.get(*c).copied().unwrap_or(0))
                    .collect();
                for (i, count) in counts.iter().enumerate() {
                    column_sums[i] += count;
                    match columns[i] {
                        Column::ItStock => totals.available_total += count,
                        Column::Department(_) => totals.issued_total += count,
                    }
                }
                PivotRow {
                    device: device.clone(),
                    total: counts.iter().sum(),
                    counts,
                }
            })
            .collect();
        totals.grand_total = totals.issued_total + totals.available_total;

        let table = PivotTable {
            departments: columns.iter().map(|c| c.label().to_string()).collect(),
            rows,
            grand_total: PivotRow {
                device: TOTAL_LABEL.to_string(),
                total: column_sums.iter().sum(),
                counts: column_sums,
            },
        };
        (table, totals)
    }
}

/// Сводная таблица и итоги по выданным и свободным активам
pub fn build_pivot(
    issues: &[AssetIssue],
    registered: &[RegisteredAssetFlag],
) -> (PivotTable, DashboardTotals) {
    PivotBuilder::new()
        .add_issues(issues)
        .add_stock(registered)
        .build()
}
