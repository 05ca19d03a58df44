use serde::{Deserialize, Serialize};

/// Synthetic department column holding registered but unissued assets
pub const IT_STOCK: &str = "IT Stock";
/// Device label used when an issued row has no asset type
pub const UNKNOWN_DEVICE: &str = "Unknown";
/// Department label used when an issued row has no department
pub const UNASSIGNED_DEPARTMENT: &str = "Unassigned";
/// Distribution category for issued rows without an asset type
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// Response of the asset dashboard (d400)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDashboardResponse {
    pub pivot: PivotTable,
    pub distribution: Vec<DistributionEntry>,
    pub totals: DashboardTotals,
}

/// Device-by-department count table.
///
/// `departments` lists the column labels in display order; "IT Stock" is
/// always present and always last. Every `PivotRow::counts` is aligned with
/// `departments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub departments: Vec<String>,
    pub rows: Vec<PivotRow>,
    /// Column sums, with `device` set to "Total"
    pub grand_total: PivotRow,
}

/// One device type (or the grand-total line)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub device: String,
    pub counts: Vec<u64>,
    /// Row total across all department columns
    pub total: u64,
}

/// Slice of the issued-assets pie chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub category: String,
    pub count: u64,
}

/// Scalar cards shown above the pivot table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    /// Sum over every non-"IT Stock" cell
    pub issued_total: u64,
    /// Sum over the "IT Stock" column
    pub available_total: u64,
    pub grand_total: u64,
}
