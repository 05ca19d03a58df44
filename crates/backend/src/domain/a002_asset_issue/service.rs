use super::repository;
use contracts::domain::a002_asset_issue::aggregate::{
    AssetIssue, AssetIssueDto, AssetTransferRequest,
};
use contracts::shared::validation::{blank_to_none, FieldError};
use sea_orm::DatabaseConnection;

use crate::shared::error::AppError;
use crate::shared::logger;

const NOT_FOUND: &str = "Asset not found.";

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<AssetIssue>, AppError> {
    repository::list_all(db)
        .await
        .map_err(|e| AppError::fetch("Failed to fetch assets.", e))
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<AssetIssue, AppError> {
    repository::get_by_id(db, id)
        .await
        .map_err(|e| AppError::fetch("Failed to fetch asset.", e))?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

/// Выдать актив сотруднику, вернуть id записи
pub async fn create(db: &DatabaseConnection, dto: AssetIssueDto) -> Result<String, AppError> {
    let draft = dto.validate().map_err(AppError::Validation)?;
    let id = repository::insert(db, &draft).await.map_err(|e| {
        AppError::from_write(
            e,
            "An asset with this serial number already exists.",
            "Failed to create new asset issue.",
        )
    })?;

    tracing::info!(
        "Issued asset {} to {} ({})",
        draft.asset.serial_number,
        draft.employee.employee_code,
        id
    );
    logger::record(
        db,
        "issue",
        &draft.asset.serial_number,
        &format!(
            "Issued to {} ({})",
            draft.employee.employee_name, draft.employee.employee_code
        ),
    )
    .await;
    Ok(id)
}

pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    dto: AssetIssueDto,
) -> Result<(), AppError> {
    let draft = dto.validate().map_err(AppError::Validation)?;
    let updated = repository::update(db, id, &draft).await.map_err(|e| {
        AppError::from_write(
            e,
            "An asset with this serial number already exists.",
            "Failed to update asset.",
        )
    })?;
    if !updated {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }

    tracing::info!("Updated asset issue {}", id);
    logger::record(db, "edit", &draft.asset.serial_number, "Issue record updated").await;
    Ok(())
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<(), AppError> {
    let existing = get_by_id(db, id).await?;
    let deleted = repository::delete(db, id)
        .await
        .map_err(|e| AppError::fetch("Failed to delete asset.", e))?;
    if !deleted {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }

    tracing::info!("Deleted asset issue {}", id);
    logger::record(
        db,
        "delete",
        &existing.asset.serial_number,
        &format!("Issue to {} deleted", existing.employee.employee_code),
    )
    .await;
    Ok(())
}

/// Последняя выдача по подстроке имени или кода сотрудника
pub async fn find_by_employee(
    db: &DatabaseConnection,
    search_term: Option<String>,
) -> Result<AssetIssue, AppError> {
    let Some(term) = blank_to_none(search_term) else {
        return Err(AppError::Validation(vec![FieldError::new(
            "searchTerm",
            "Search term is required.",
        )]));
    };

    repository::find_by_employee(db, &term)
        .await
        .map_err(|e| AppError::fetch("Failed to search assets.", e))?
        .ok_or_else(|| AppError::NotFound("No issued asset found for this employee.".to_string()))
}

/// Передать актив новому сотруднику.
///
/// Запись выдачи перезаписывается на месте; цепочка владельцев
/// восстанавливается по записям `transfer` в `system_log`.
pub async fn transfer(
    db: &DatabaseConnection,
    request: AssetTransferRequest,
) -> Result<AssetIssue, AppError> {
    let order = request.validate().map_err(AppError::Validation)?;
    let current = get_by_id(db, &order.asset_issue_id).await?;

    let previous_code = order
        .previous_employee_code
        .clone()
        .unwrap_or_else(|| current.employee.employee_code.clone());

    let applied = repository::apply_transfer(
        db,
        &order.asset_issue_id,
        &previous_code,
        &order.new_employee,
        &order.checklist,
    )
    .await
    .map_err(|e| AppError::fetch("Failed to transfer asset.", e))?;
    if !applied {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }

    tracing::info!(
        "Transferred asset {} from {} to {}",
        current.asset.serial_number,
        previous_code,
        order.new_employee.employee_code
    );
    logger::record(
        db,
        "transfer",
        &current.asset.serial_number,
        &format!(
            "{} -> {} ({})",
            previous_code, order.new_employee.employee_code, order.new_employee.employee_name
        ),
    )
    .await;

    get_by_id(db, &order.asset_issue_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use crate::shared::logger::repository as log_repository;

    fn issue_dto(code: &str, name: &str, serial: &str) -> AssetIssueDto {
        AssetIssueDto {
            employee_code: Some(code.to_string()),
            employee_name: Some(name.to_string()),
            department: Some("Sales".to_string()),
            asset_type: Some("Laptop".to_string()),
            serial_number: Some(serial.to_string()),
            ..Default::default()
        }
    }

    fn transfer_request(id: &str) -> AssetTransferRequest {
        AssetTransferRequest {
            asset_issue_id: Some(id.to_string()),
            employee_code_to: Some("E2".to_string()),
            employee_name_to: Some("Ravi Kumar".to_string()),
            department_to: Some("Finance".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_duplicate_serial() {
        let db = connect_in_memory().await;
        let id = create(&db, issue_dto("E1", "Asha Rao", "SN-1")).await.unwrap();
        assert_eq!(get_by_id(&db, &id).await.unwrap().employee.employee_code, "E1");

        let err = create(&db, issue_dto("E9", "Other", "SN-1")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_row() {
        let db = connect_in_memory().await;
        let err = update(&db, "missing", issue_dto("E1", "Asha Rao", "SN-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(matches!(
            delete(&db, "missing").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_find_by_employee_blank_and_missing() {
        let db = connect_in_memory().await;
        create(&db, issue_dto("E1", "Asha Rao", "SN-1")).await.unwrap();

        assert!(matches!(
            find_by_employee(&db, Some("  ".to_string())).await.unwrap_err(),
            AppError::Validation(_)
        ));
        assert!(matches!(
            find_by_employee(&db, Some("Nobody".to_string())).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        let found = find_by_employee(&db, Some("rao".to_string())).await.unwrap();
        assert_eq!(found.asset.serial_number, "SN-1");
    }

    #[tokio::test]
    async fn test_transfer_falls_back_to_current_holder_and_logs() {
        let db = connect_in_memory().await;
        let id = create(&db, issue_dto("E1", "Asha Rao", "SN-1")).await.unwrap();

        let issue = transfer(&db, transfer_request(&id)).await.unwrap();
        assert_eq!(issue.employee.employee_code, "E2");
        assert_eq!(issue.employee.department.as_deref(), Some("Finance"));
        assert_eq!(issue.previous_employee_code.as_deref(), Some("E1"));
        assert!(issue.last_transfer_date.is_some());

        let logs = log_repository::list_recent(&db, 10).await.unwrap();
        assert_eq!(logs[0].category, "transfer");
        assert_eq!(logs[0].subject, "SN-1");
        assert!(logs[0].message.starts_with("E1 -> E2"));
    }

    #[tokio::test]
    async fn test_transfer_of_missing_issue() {
        let db = connect_in_memory().await;
        let err = transfer(&db, transfer_request("missing")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
