pub mod d400_asset_dashboard;
pub mod d401_issue_report;
