use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d401_issue_report::IssueReportRequest;
use contracts::domain::a002_asset_issue::aggregate::AssetIssue;
use contracts::shared::validation::{
    blank_to_none, parse_optional_date, FieldError, MAX_DATE_YEAR,
};

use crate::shared::data::db::contains_ignore_case;

/// Проверенный фильтр отчёта по выдачам.
///
/// Каждое заданное поле сужает выборку; `None` снимает ограничение.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// `created_at >= start_date`
    pub start_date: Option<NaiveDate>,
    /// Day after the requested end date: `created_at < end_before`.
    /// `None` for an end date of 9999-12-31.
    pub end_before: Option<NaiveDate>,
    pub department: Option<String>,
    pub user: Option<String>,
}

impl ReportFilter {
    /// Validate the query string. Every malformed field is reported.
    pub fn from_request(request: IssueReportRequest) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let start_date = parse_optional_date("startDate", request.start_date, &mut errors);
        let end_date = parse_optional_date("endDate", request.end_date, &mut errors);

        // An end date of 9999-12-31 leaves the range open
        let end_before = end_date
            .and_then(|end| end.succ_opt())
            .filter(|next| next.year() <= MAX_DATE_YEAR);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            start_date,
            end_before,
            department: blank_to_none(request.department),
            user: blank_to_none(request.user),
        })
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Department and user predicates. Dates are checked in SQL.
    pub fn matches_text(&self, issue: &AssetIssue) -> bool {
        let department_ok = self.department.as_deref().map_or(true, |fragment| {
            issue
                .employee
                .department
                .as_deref()
                .is_some_and(|department| contains_ignore_case(department, fragment))
        });
        let user_ok = self.user.as_deref().map_or(true, |fragment| {
            contains_ignore_case(&issue.employee.employee_name, fragment)
                || contains_ignore_case(&issue.employee.employee_code, fragment)
        });
        department_ok && user_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: &str, end: &str, department: &str, user: &str) -> IssueReportRequest {
        IssueReportRequest {
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
            department: Some(department.to_string()),
            user: Some(user.to_string()),
        }
    }

    #[test]
    fn test_blank_form_means_no_constraint() {
        let filter = ReportFilter::from_request(request("", " ", "", "  ")).unwrap();
        assert!(filter.is_empty());
        assert!(ReportFilter::from_request(IssueReportRequest::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_end_date_becomes_next_day_bound() {
        let filter = ReportFilter::from_request(request("2024-03-01", "2024-03-31", " Sales ", ""))
            .unwrap();
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(filter.end_before, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(filter.department.as_deref(), Some("Sales"));
        assert_eq!(filter.user, None);
    }

    #[test]
    fn test_malformed_dates_are_reported_per_field() {
        let errors =
            ReportFilter::from_request(request("2024-13-01", "yesterday", "", "")).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["startDate", "endDate"]);
    }

    #[test]
    fn test_unrepresentable_end_date_is_rejected() {
        let max = NaiveDate::MAX.format("%Y-%m-%d").to_string();
        let errors = ReportFilter::from_request(request("", &max, "", "")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "endDate");
    }

    #[test]
    fn test_last_representable_end_date_is_open_ended() {
        let filter = ReportFilter::from_request(request("", "9999-12-31", "", "")).unwrap();
        assert_eq!(filter.end_before, None);

        let filter = ReportFilter::from_request(request("", "2999-12-31", "", "")).unwrap();
        assert_eq!(filter.end_before, NaiveDate::from_ymd_opt(3000, 1, 1));
    }

    #[test]
    fn test_five_digit_start_year_is_rejected() {
        let errors = ReportFilter::from_request(request("+10000-01-01", "", "", "")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "startDate");
    }

    #[test]
    fn test_text_match_folds_accents_and_skips_missing_department() {
        use contracts::domain::a002_asset_issue::aggregate::AssetIssueDto;

        let draft = AssetIssueDto {
            employee_code: Some("E5".to_string()),
            employee_name: Some("Élodie Ünal".to_string()),
            serial_number: Some("SN-5".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        let mut issue = AssetIssue {
            id: "issue-5".to_string(),
            employee: draft.employee,
            asset: draft.asset,
            issue_date_manual: None,
            created_at: "2024-02-12 10:00:00".to_string(),
            previous_employee_code: None,
            last_transfer_date: None,
            checklist: draft.checklist,
        };

        let by_user = ReportFilter {
            user: Some("ÉLODIE".to_string()),
            ..Default::default()
        };
        assert!(by_user.matches_text(&issue));

        let by_department = ReportFilter {
            department: Some("équipe".to_string()),
            ..Default::default()
        };
        assert!(!by_department.matches_text(&issue));
        issue.employee.department = Some("ÉQUIPE Ventes".to_string());
        assert!(by_department.matches_text(&issue));
    }
}
