use super::repository;
use chrono::Utc;
use contracts::domain::a001_registered_asset::aggregate::{
    AssetStatus, InventoryItem, RegisteredAsset, RegisteredAssetDto,
};
use sea_orm::DatabaseConnection;

use crate::shared::error::AppError;
use crate::shared::logger;

/// Зарегистрировать актив в мастер-инвентаре, вернуть id
pub async fn register(
    db: &DatabaseConnection,
    dto: RegisteredAssetDto,
) -> Result<String, AppError> {
    let mut asset = dto.validate().map_err(AppError::Validation)?;
    if asset.registration_date.is_none() {
        asset.registration_date = Some(Utc::now().date_naive());
    }

    let id = repository::insert(db, &asset).await.map_err(|e| {
        AppError::from_write(
            e,
            "An asset with this serial number is already registered.",
            "Failed to register asset.",
        )
    })?;

    tracing::info!("Registered asset {} ({})", asset.asset_serial_no, id);
    logger::record(
        db,
        "registration",
        &asset.asset_serial_no,
        &format!(
            "Registered {}",
            asset.asset_make.as_deref().unwrap_or("asset")
        ),
    )
    .await;
    Ok(id)
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<RegisteredAsset>, AppError> {
    repository::list_all(db)
        .await
        .map_err(|e| AppError::fetch("Failed to fetch registered assets.", e))
}

/// Реестр активов с вычисляемым статусом `available | issued`
pub async fn inventory(db: &DatabaseConnection) -> Result<Vec<InventoryItem>, AppError> {
    let rows = repository::list_with_issue_flag(db)
        .await
        .map_err(|e| AppError::fetch("Failed to fetch inventory.", e))?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let (asset, is_issued) = row.into_parts();
            InventoryItem {
                asset,
                status: AssetStatus::from_issue_flag(is_issued),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use crate::shared::logger::repository as log_repository;

    fn dto(serial: &str) -> RegisteredAssetDto {
        RegisteredAssetDto {
            asset_serial_no: Some(serial.to_string()),
            asset_make: Some("Laptop".to_string()),
            asset_model: Some("Latitude 5440".to_string()),
            vendor: Some("".to_string()),
            warranty_end_date: Some("2027-06-30".to_string()),
            registration_date: None,
        }
    }

    #[tokio::test]
    async fn test_register_defaults_registration_date_to_today() {
        let db = connect_in_memory().await;
        register(&db, dto("SN-100")).await.unwrap();

        let items = list_all(&db).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].registration_date, Some(Utc::now().date_naive()));
        assert_eq!(items[0].vendor, None);

        let logs = log_repository::list_recent(&db, 10).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].category, "registration");
        assert_eq!(logs[0].subject, "SN-100");
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        let db = connect_in_memory().await;
        register(&db, dto("SN-100")).await.unwrap();
        let err = register(&db, dto("SN-100")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_blank_serial_and_bad_date() {
        let db = connect_in_memory().await;
        let mut bad = dto("  ");
        bad.warranty_end_date = Some("31/06/2027".to_string());

        match register(&db, bad).await {
            Err(AppError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["asset_serial_no", "warranty_end_date"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(list_all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_inventory_of_empty_registry() {
        let db = connect_in_memory().await;
        assert!(inventory(&db).await.unwrap().is_empty());
    }
}
