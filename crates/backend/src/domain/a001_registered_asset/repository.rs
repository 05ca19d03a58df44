use anyhow::Result;
use chrono::NaiveDate;
use contracts::domain::a001_registered_asset::aggregate::{NewRegisteredAsset, RegisteredAsset};
use contracts::shared::validation::DATE_FORMAT;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, FromQueryResult, QueryOrder, Set, Statement};
use uuid::Uuid;

use crate::shared::data::db::now_timestamp;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "registered_assets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub asset_serial_no: String,
    pub asset_make: Option<String>,
    pub asset_model: Option<String>,
    pub vendor: Option<String>,
    pub warranty_end_date: Option<String>,
    pub registration_date: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(&v, DATE_FORMAT).ok())
}

fn format_date(value: Option<NaiveDate>) -> Option<String> {
    value.map(|d| d.format(DATE_FORMAT).to_string())
}

impl From<Model> for RegisteredAsset {
    fn from(m: Model) -> Self {
        RegisteredAsset {
            id: m.id,
            asset_serial_no: m.asset_serial_no,
            asset_make: m.asset_make,
            asset_model: m.asset_model,
            vendor: m.vendor,
            warranty_end_date: parse_date(m.warranty_end_date),
            registration_date: parse_date(m.registration_date),
            created_at: m.created_at,
        }
    }
}

/// Зарегистрированный актив вместе с признаком выдачи
#[derive(Debug, Clone, FromQueryResult)]
pub struct RegisteredWithIssueFlag {
    pub id: String,
    pub asset_serial_no: String,
    pub asset_make: Option<String>,
    pub asset_model: Option<String>,
    pub vendor: Option<String>,
    pub warranty_end_date: Option<String>,
    pub registration_date: Option<String>,
    pub created_at: String,
    pub is_issued: bool,
}

impl RegisteredWithIssueFlag {
    pub fn into_parts(self) -> (RegisteredAsset, bool) {
        let is_issued = self.is_issued;
        let asset = Model {
            id: self.id,
            asset_serial_no: self.asset_serial_no,
            asset_make: self.asset_make,
            asset_model: self.asset_model,
            vendor: self.vendor,
            warranty_end_date: self.warranty_end_date,
            registration_date: self.registration_date,
            created_at: self.created_at,
        };
        (asset.into(), is_issued)
    }
}

/// Вставить новый актив, вернуть его id
pub async fn insert(db: &DatabaseConnection, asset: &NewRegisteredAsset) -> Result<String> {
    let id = Uuid::new_v4().to_string();
    let active_model = ActiveModel {
        id: Set(id.clone()),
        asset_serial_no: Set(asset.asset_serial_no.clone()),
        asset_make: Set(asset.asset_make.clone()),
        asset_model: Set(asset.asset_model.clone()),
        vendor: Set(asset.vendor.clone()),
        warranty_end_date: Set(format_date(asset.warranty_end_date)),
        registration_date: Set(format_date(asset.registration_date)),
        created_at: Set(now_timestamp()),
    };
    Entity::insert(active_model).exec(db).await?;
    Ok(id)
}

/// Все активы, последние зарегистрированные сверху
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<RegisteredAsset>> {
    let items = Entity::find()
        .order_by_desc(Column::RegistrationDate)
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Все активы с производным признаком `is_issued`.
///
/// Актив выдан, если его серийный номер присутствует в `asset_issues`.
/// Полусоединение через EXISTS: каждая запись реестра попадает в результат ровно один раз.
pub async fn list_with_issue_flag(db: &DatabaseConnection) -> Result<Vec<RegisteredWithIssueFlag>> {
    let sql = r#"
        SELECT
            ra.id,
            ra.asset_serial_no,
            ra.asset_make,
            ra.asset_model,
            ra.vendor,
            ra.warranty_end_date,
            ra.registration_date,
            ra.created_at,
            CASE WHEN EXISTS (
                SELECT 1 FROM asset_issues ai WHERE ai.serial_number = ra.asset_serial_no
            ) THEN 1 ELSE 0 END AS is_issued
        FROM registered_assets ra
        ORDER BY ra.registration_date DESC, ra.created_at DESC
    "#;

    let stmt = Statement::from_string(sea_orm::DatabaseBackend::Sqlite, sql.to_string());
    let rows = RegisteredWithIssueFlag::find_by_statement(stmt)
        .all(db)
        .await?;
    Ok(rows)
}
