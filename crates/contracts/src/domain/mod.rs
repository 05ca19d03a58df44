// Aggregates (a001-a002)
pub mod a001_registered_asset;
pub mod a002_asset_issue;
