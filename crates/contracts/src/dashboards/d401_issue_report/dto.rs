use serde::{Deserialize, Serialize};

/// Query string of `GET /api/reports` and `GET /api/reports/export`.
///
/// The report form always submits all four keys, so blank values mean
/// "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReportRequest {
    /// Inclusive lower bound, "YYYY-MM-DD"
    pub start_date: Option<String>,
    /// Inclusive upper bound (whole calendar day), "YYYY-MM-DD"
    pub end_date: Option<String>,
    /// Case-insensitive substring of the department
    pub department: Option<String>,
    /// Case-insensitive substring of the employee name or code
    pub user: Option<String>,
}

/// Column headers of the exported report, in output order
pub const REPORT_COLUMNS: [&str; 7] = [
    "Date",
    "Emp Code",
    "Name",
    "Department",
    "Asset Type",
    "Serial No.",
    "Hostname",
];
