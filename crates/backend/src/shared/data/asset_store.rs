use anyhow::Result;
use async_trait::async_trait;
use contracts::domain::a002_asset_issue::aggregate::AssetIssue;
use sea_orm::DatabaseConnection;

use crate::dashboards::d401_issue_report::filter::ReportFilter;
use crate::dashboards::d401_issue_report::repository as report_repository;
use crate::domain::a001_registered_asset::repository as registered_repository;
use crate::domain::a002_asset_issue::repository as issue_repository;

/// Registered asset reduced to what the availability count needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAssetFlag {
    pub asset_make: Option<String>,
    pub is_issued: bool,
}

/// Источник строк для дашборда и отчёта.
///
/// Каждый вызов читает текущее состояние хранилища целиком, без кэша.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn fetch_all_issues(&self) -> Result<Vec<AssetIssue>>;

    /// Registered assets left-joined against issues by serial number
    async fn fetch_registered_with_issue_flag(&self) -> Result<Vec<RegisteredAssetFlag>>;

    /// Issues matching `filter`, newest first
    async fn fetch_issues_filtered(&self, filter: &ReportFilter) -> Result<Vec<AssetIssue>>;
}

/// `AssetStore` over the SQLite database
pub struct SeaOrmAssetStore<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SeaOrmAssetStore<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<'a> AssetStore for SeaOrmAssetStore<'a> {
    async fn fetch_all_issues(&self) -> Result<Vec<AssetIssue>> {
        issue_repository::list_all(self.db).await
    }

    async fn fetch_registered_with_issue_flag(&self) -> Result<Vec<RegisteredAssetFlag>> {
        let rows = registered_repository::list_with_issue_flag(self.db).await?;
        Ok(rows
            .into_iter()
            .map(|row| RegisteredAssetFlag {
                asset_make: row.asset_make,
                is_issued: row.is_issued,
            })
            .collect())
    }

    async fn fetch_issues_filtered(&self, filter: &ReportFilter) -> Result<Vec<AssetIssue>> {
        report_repository::find_filtered(self.db, filter).await
    }
}
