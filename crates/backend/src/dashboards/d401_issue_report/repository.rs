use anyhow::Result;
use contracts::domain::a002_asset_issue::aggregate::AssetIssue;
use sea_orm::{DatabaseBackend, DatabaseConnection, EntityTrait, Statement, Value};

use super::filter::ReportFilter;
use super::query_builder::QueryBuilder;
use crate::domain::a002_asset_issue::repository::Entity as AssetIssueEntity;

/// Выдачи, удовлетворяющие фильтру, новые сверху
pub async fn find_filtered(db: &DatabaseConnection, filter: &ReportFilter) -> Result<Vec<AssetIssue>> {
    let query = QueryBuilder::new(filter).build();
    tracing::debug!("Report query: {} {:?}", query.sql, query.params);

    let values: Vec<Value> = query.params.into_iter().map(Value::from).collect();
    let stmt = Statement::from_sql_and_values(DatabaseBackend::Sqlite, query.sql, values);

    let items = AssetIssueEntity::find()
        .from_raw_sql(stmt)
        .all(db)
        .await?
        .into_iter()
        .map(AssetIssue::from)
        .filter(|issue| filter.matches_text(issue))
        .collect();
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_asset_issue::repository as issue_repository;
    use crate::shared::data::db::connect_in_memory;
    use chrono::NaiveDate;
    use contracts::domain::a002_asset_issue::aggregate::AssetIssueDto;
    use sea_orm::ConnectionTrait;

    async fn seed(db: &DatabaseConnection, code: &str, name: &str, dept: &str, created_at: &str) {
        let draft = AssetIssueDto {
            employee_code: Some(code.to_string()),
            employee_name: Some(name.to_string()),
            department: Some(dept.to_string()),
            asset_type: Some("Laptop".to_string()),
            serial_number: Some(format!("SN-{}", code)),
            ..Default::default()
        }
        .validate()
        .unwrap();
        let id = issue_repository::insert(db, &draft).await.unwrap();
        db.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE asset_issues SET created_at = ? WHERE id = ?",
            [created_at.into(), id.into()],
        ))
        .await
        .unwrap();
    }

    async fn ledger() -> DatabaseConnection {
        let db = connect_in_memory().await;
        seed(&db, "E1", "Asha Rao", "Sales Dept", "2024-01-15 09:00:00").await;
        seed(&db, "E2", "Ravi Kumar", "HR", "2024-01-31 23:59:59").await;
        seed(&db, "E3", "Meera Iyer", "Inside sales", "2024-02-01 00:00:00").await;
        seed(&db, "E4", "Vikram Shah", "Finance", "2024-02-10 12:30:00").await;
        db
    }

    fn codes(items: &[AssetIssue]) -> Vec<&str> {
        items.iter().map(|i| i.employee.employee_code.as_str()).collect()
    }

    #[tokio::test]
    async fn test_no_filter_returns_ledger_newest_first() {
        let db = ledger().await;
        let items = find_filtered(&db, &ReportFilter::default()).await.unwrap();
        assert_eq!(codes(&items), vec!["E4", "E3", "E2", "E1"]);
    }

    #[tokio::test]
    async fn test_end_date_includes_last_second_of_day() {
        let db = ledger().await;
        let filter = ReportFilter {
            end_before: NaiveDate::from_ymd_opt(2024, 2, 1),
            ..Default::default()
        };
        let items = find_filtered(&db, &filter).await.unwrap();
        assert_eq!(codes(&items), vec!["E2", "E1"]);
    }

    #[tokio::test]
    async fn test_start_date_is_inclusive() {
        let db = ledger().await;
        let filter = ReportFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            ..Default::default()
        };
        let items = find_filtered(&db, &filter).await.unwrap();
        assert_eq!(codes(&items), vec!["E4", "E3"]);
    }

    #[tokio::test]
    async fn test_department_substring_ignores_case() {
        let db = ledger().await;
        let filter = ReportFilter {
            department: Some("sales".to_string()),
            ..Default::default()
        };
        let items = find_filtered(&db, &filter).await.unwrap();
        assert_eq!(codes(&items), vec!["E3", "E1"]);
    }

    #[tokio::test]
    async fn test_user_matches_name_or_code() {
        let db = ledger().await;
        let by_name = ReportFilter {
            user: Some("KUMAR".to_string()),
            ..Default::default()
        };
        assert_eq!(codes(&find_filtered(&db, &by_name).await.unwrap()), vec!["E2"]);

        let by_code = ReportFilter {
            user: Some("e4".to_string()),
            ..Default::default()
        };
        assert_eq!(codes(&find_filtered(&db, &by_code).await.unwrap()), vec!["E4"]);
    }

    #[tokio::test]
    async fn test_text_filters_fold_accented_letters() {
        let db = ledger().await;
        seed(&db, "E5", "Élodie Ünal", "ÉQUIPE Ventes", "2024-02-12 10:00:00").await;

        for department in ["ÉQUIPE", "Équipe", "équipe"] {
            let filter = ReportFilter {
                department: Some(department.to_string()),
                ..Default::default()
            };
            assert_eq!(codes(&find_filtered(&db, &filter).await.unwrap()), vec!["E5"]);
        }

        let filter = ReportFilter {
            user: Some("élodie".to_string()),
            ..Default::default()
        };
        assert_eq!(codes(&find_filtered(&db, &filter).await.unwrap()), vec!["E5"]);
    }

    #[tokio::test]
    async fn test_adding_constraints_never_grows_result() {
        let db = ledger().await;
        let mut filter = ReportFilter::default();
        let mut previous = find_filtered(&db, &filter).await.unwrap().len();

        filter.start_date = NaiveDate::from_ymd_opt(2024, 1, 20);
        let n = find_filtered(&db, &filter).await.unwrap().len();
        assert!(n <= previous);
        previous = n;

        filter.department = Some("s".to_string());
        let n = find_filtered(&db, &filter).await.unwrap().len();
        assert!(n <= previous);
        previous = n;

        filter.end_before = NaiveDate::from_ymd_opt(2024, 2, 2);
        let n = find_filtered(&db, &filter).await.unwrap().len();
        assert!(n <= previous);
        assert_eq!(n, 1);
    }
}
