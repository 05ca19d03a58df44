// Dashboards and reports (d400-d401)
pub mod d400_asset_dashboard;
pub mod d401_issue_report;
