use contracts::shared::validation::DATE_FORMAT;

use super::filter::ReportFilter;

/// Result of query building
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// SQL query string with `?` placeholders
    pub sql: String,
    /// Bound parameters, in placeholder order
    pub params: Vec<String>,
}

/// Построитель запроса отчёта по журналу выдач.
///
/// В SQL уходят только границы дат; отдел и сотрудник проверяются
/// `ReportFilter::matches_text` после выборки.
pub struct QueryBuilder<'a> {
    filter: &'a ReportFilter,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(filter: &'a ReportFilter) -> Self {
        Self { filter }
    }

    pub fn build(&self) -> QueryResult {
        let (where_clause, params) = self.build_where_clause();

        let mut sql = String::from("SELECT * FROM asset_issues");
        if !where_clause.is_empty() {
            sql.push_str(&format!(" WHERE {}", where_clause));
        }
        sql.push_str(" ORDER BY created_at DESC, rowid DESC");

        QueryResult { sql, params }
    }

    fn build_where_clause(&self) -> (String, Vec<String>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(start) = self.filter.start_date {
            conditions.push("created_at >= ?".to_string());
            params.push(start.format(DATE_FORMAT).to_string());
        }

        // Half-open upper bound keeps every timestamp of the last day
        if let Some(end_before) = self.filter.end_before {
            conditions.push("created_at < ?".to_string());
            params.push(end_before.format(DATE_FORMAT).to_string());
        }

        (conditions.join(" AND "), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_no_filter_selects_whole_ledger() {
        let filter = ReportFilter::default();
        let query = QueryBuilder::new(&filter).build();
        assert_eq!(
            query.sql,
            "SELECT * FROM asset_issues ORDER BY created_at DESC, rowid DESC"
        );
        assert!(query.params.is_empty());
    }

    #[test]
    fn test_date_bounds_in_order() {
        let filter = ReportFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_before: NaiveDate::from_ymd_opt(2024, 2, 1),
            department: Some("Sales".to_string()),
            user: Some("Rao".to_string()),
        };
        let query = QueryBuilder::new(&filter).build();

        assert_eq!(
            query.sql,
            "SELECT * FROM asset_issues WHERE created_at >= ? AND created_at < ? ORDER BY created_at DESC, rowid DESC"
        );
        assert_eq!(query.sql.matches('?').count(), query.params.len());
        assert_eq!(query.params, vec!["2024-01-01", "2024-02-01"]);
    }

    #[test]
    fn test_text_filters_stay_out_of_sql() {
        let filter = ReportFilter {
            user: Some("E10".to_string()),
            ..Default::default()
        };
        let query = QueryBuilder::new(&filter).build();
        assert!(!query.sql.contains("WHERE"));
        assert!(query.params.is_empty());
    }
}
