use serde::{Deserialize, Serialize};

use crate::shared::validation::{blank_to_none, FieldError};

/// Сотрудник, за которым закреплён актив
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDetails {
    pub employee_code: String,
    pub employee_name: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
    pub email_id: Option<String>,
    pub hod_name: Option<String>,
}

/// Идентификация выданного оборудования
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDetails {
    pub asset_type: Option<String>,
    pub asset_code: Option<String>,
    pub make_model: Option<String>,
    pub serial_number: String,
    pub hostname: Option<String>,
    pub ip_address: Option<String>,
    pub old_laptop_serial: Option<String>,
}

/// Чек-лист настройки рабочего места (заполняется при выдаче и при передаче)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationChecklist {
    pub operating_system: Option<String>,
    pub printer_configured: Option<String>,
    pub ms_office_version: Option<String>,
    pub windows_update: Option<String>,
    pub licensed_software_name: Option<String>,
    pub local_admin_rights_removed: Option<String>,
    pub antivirus: Option<String>,
    pub local_admin_pass_set: Option<String>,
    pub sap_configured: Option<String>,
    pub backup_configured: Option<String>,
    pub seven_zip: Option<String>,
    pub chrome: Option<String>,
    pub onedrive_configured: Option<String>,
    pub laptop_bag: Option<String>,
    pub rmm_agent: Option<String>,
    pub cleaned: Option<String>,
    pub physical_condition: Option<String>,
    pub asset_tag: Option<String>,
}

impl ConfigurationChecklist {
    /// Blank answers are stored as NULL.
    pub fn normalized(self) -> Self {
        Self {
            operating_system: blank_to_none(self.operating_system),
            printer_configured: blank_to_none(self.printer_configured),
            ms_office_version: blank_to_none(self.ms_office_version),
            windows_update: blank_to_none(self.windows_update),
            licensed_software_name: blank_to_none(self.licensed_software_name),
            local_admin_rights_removed: blank_to_none(self.local_admin_rights_removed),
            antivirus: blank_to_none(self.antivirus),
            local_admin_pass_set: blank_to_none(self.local_admin_pass_set),
            sap_configured: blank_to_none(self.sap_configured),
            backup_configured: blank_to_none(self.backup_configured),
            seven_zip: blank_to_none(self.seven_zip),
            chrome: blank_to_none(self.chrome),
            onedrive_configured: blank_to_none(self.onedrive_configured),
            laptop_bag: blank_to_none(self.laptop_bag),
            rmm_agent: blank_to_none(self.rmm_agent),
            cleaned: blank_to_none(self.cleaned),
            physical_condition: blank_to_none(self.physical_condition),
            asset_tag: blank_to_none(self.asset_tag),
        }
    }
}

/// Выдача актива сотруднику (агрегат a002), строка журнала выдач.
///
/// Передача актива перезаписывает блок сотрудника на месте, сохраняя код
/// предыдущего сотрудника и дату передачи.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetIssue {
    pub id: String,
    #[serde(flatten)]
    pub employee: EmployeeDetails,
    #[serde(flatten)]
    pub asset: AssetDetails,
    /// Дата выдачи в том виде, как её ввёл оператор
    pub issue_date_manual: Option<String>,
    /// "YYYY-MM-DD HH:MM:SS", UTC
    pub created_at: String,
    pub previous_employee_code: Option<String>,
    pub last_transfer_date: Option<String>,
    #[serde(flatten)]
    pub checklist: ConfigurationChecklist,
}

impl AssetIssue {
    /// Date shown in tables: the manual issue date, else the day of `created_at`.
    pub fn display_date(&self) -> String {
        match self.issue_date_manual.as_deref().map(str::trim) {
            Some(manual) if !manual.is_empty() => manual.to_string(),
            _ => self
                .created_at
                .split(|c| c == ' ' || c == 'T')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Payload of `POST /api/assets` and `PUT /api/assets/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetIssueDto {
    pub employee_code: Option<String>,
    pub employee_name: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
    pub email_id: Option<String>,
    pub hod_name: Option<String>,
    pub asset_type: Option<String>,
    pub asset_code: Option<String>,
    pub make_model: Option<String>,
    pub serial_number: Option<String>,
    pub hostname: Option<String>,
    pub ip_address: Option<String>,
    pub old_laptop_serial: Option<String>,
    pub issue_date_manual: Option<String>,
    #[serde(flatten)]
    pub checklist: ConfigurationChecklist,
}

/// Validated issuance data, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueDraft {
    pub employee: EmployeeDetails,
    pub asset: AssetDetails,
    pub issue_date_manual: Option<String>,
    pub checklist: ConfigurationChecklist,
}

impl AssetIssueDto {
    pub fn validate(self) -> Result<IssueDraft, Vec<FieldError>> {
        let mut errors = Vec::new();
        let employee_name = required(
            self.employee_name,
            "employee_name",
            "Employee Name is required.",
            &mut errors,
        );
        let employee_code = required(
            self.employee_code,
            "employee_code",
            "Employee Code is required.",
            &mut errors,
        );
        let serial_number = required(
            self.serial_number,
            "serial_number",
            "Asset Serial Number is required.",
            &mut errors,
        );

        let (Some(employee_name), Some(employee_code), Some(serial_number)) =
            (employee_name, employee_code, serial_number)
        else {
            return Err(errors);
        };

        Ok(IssueDraft {
            employee: EmployeeDetails {
                employee_code,
                employee_name,
                department: blank_to_none(self.department),
                designation: blank_to_none(self.designation),
                location: blank_to_none(self.location),
                phone_number: blank_to_none(self.phone_number),
                email_id: blank_to_none(self.email_id),
                hod_name: blank_to_none(self.hod_name),
            },
            asset: AssetDetails {
                asset_type: blank_to_none(self.asset_type),
                asset_code: blank_to_none(self.asset_code),
                make_model: blank_to_none(self.make_model),
                serial_number,
                hostname: blank_to_none(self.hostname),
                ip_address: blank_to_none(self.ip_address),
                old_laptop_serial: blank_to_none(self.old_laptop_serial),
            },
            issue_date_manual: blank_to_none(self.issue_date_manual),
            checklist: self.checklist.normalized(),
        })
    }
}

/// Payload of `POST /api/transfer-asset`.
///
/// The transfer form also posts the `*_from` fields of the current holder;
/// they are informational and ignored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetTransferRequest {
    pub asset_issue_id: Option<String>,
    pub previous_employee_code: Option<String>,
    pub employee_name_to: Option<String>,
    pub employee_code_to: Option<String>,
    pub department_to: Option<String>,
    pub designation_to: Option<String>,
    pub location_to: Option<String>,
    pub phone_number_to: Option<String>,
    pub email_id_to: Option<String>,
    pub hod_name_to: Option<String>,
    #[serde(flatten)]
    pub checklist: ConfigurationChecklist,
}

/// Validated transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOrder {
    pub asset_issue_id: String,
    pub previous_employee_code: Option<String>,
    pub new_employee: EmployeeDetails,
    pub checklist: ConfigurationChecklist,
}

impl AssetTransferRequest {
    pub fn validate(self) -> Result<TransferOrder, Vec<FieldError>> {
        let mut errors = Vec::new();
        let asset_issue_id = required(
            self.asset_issue_id,
            "asset_issue_id",
            "Select the asset to transfer.",
            &mut errors,
        );
        let employee_name = required(
            self.employee_name_to,
            "employee_name_to",
            "New employee name is required.",
            &mut errors,
        );
        let employee_code = required(
            self.employee_code_to,
            "employee_code_to",
            "New employee code is required.",
            &mut errors,
        );

        let (Some(asset_issue_id), Some(employee_name), Some(employee_code)) =
            (asset_issue_id, employee_name, employee_code)
        else {
            return Err(errors);
        };

        Ok(TransferOrder {
            asset_issue_id,
            previous_employee_code: blank_to_none(self.previous_employee_code),
            new_employee: EmployeeDetails {
                employee_code,
                employee_name,
                department: blank_to_none(self.department_to),
                designation: blank_to_none(self.designation_to),
                location: blank_to_none(self.location_to),
                phone_number: blank_to_none(self.phone_number_to),
                email_id: blank_to_none(self.email_id_to),
                hod_name: blank_to_none(self.hod_name_to),
            },
            checklist: self.checklist.normalized(),
        })
    }
}

fn required(
    value: Option<String>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let value = blank_to_none(value);
    if value.is_none() {
        errors.push(FieldError::new(field, message));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_issue() -> AssetIssue {
        AssetIssue {
            id: "a".into(),
            employee: EmployeeDetails {
                employee_code: "E100".into(),
                employee_name: "Asha Rao".into(),
                department: Some("Sales".into()),
                designation: None,
                location: None,
                phone_number: None,
                email_id: None,
                hod_name: None,
            },
            asset: AssetDetails {
                asset_type: Some("Laptop".into()),
                asset_code: None,
                make_model: None,
                serial_number: "SN-1".into(),
                hostname: Some("GF-LT-01".into()),
                ip_address: None,
                old_laptop_serial: None,
            },
            issue_date_manual: None,
            created_at: "2024-05-03 09:15:00".into(),
            previous_employee_code: None,
            last_transfer_date: None,
            checklist: ConfigurationChecklist::default(),
        }
    }

    #[test]
    fn test_issue_serializes_flat() {
        let value = serde_json::to_value(sample_issue()).unwrap();
        assert_eq!(value["employee_code"], "E100");
        assert_eq!(value["serial_number"], "SN-1");
        assert_eq!(value["antivirus"], serde_json::Value::Null);
        assert!(value.get("employee").is_none());
    }

    #[test]
    fn test_display_date_prefers_manual_value() {
        let mut issue = sample_issue();
        assert_eq!(issue.display_date(), "2024-05-03");
        issue.issue_date_manual = Some("03-05-2024".into());
        assert_eq!(issue.display_date(), "03-05-2024");
    }

    #[test]
    fn test_issue_dto_requires_identity_fields() {
        let dto: AssetIssueDto = serde_json::from_value(serde_json::json!({
            "id": "",
            "employee_name": "Asha Rao",
            "employee_code": "",
            "serial_number": "  ",
            "antivirus": "Yes"
        }))
        .unwrap();

        let errors = dto.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["employee_code", "serial_number"]);
    }

    #[test]
    fn test_issue_dto_validates_and_normalises() {
        let dto: AssetIssueDto = serde_json::from_value(serde_json::json!({
            "employee_name": "Asha Rao",
            "employee_code": "E100",
            "serial_number": "SN-1",
            "department": "",
            "antivirus": "Yes",
            "chrome": ""
        }))
        .unwrap();

        let draft = dto.validate().unwrap();
        assert_eq!(draft.employee.department, None);
        assert_eq!(draft.checklist.antivirus.as_deref(), Some("Yes"));
        assert_eq!(draft.checklist.chrome, None);
    }

    #[test]
    fn test_transfer_request_validation() {
        let request: AssetTransferRequest = serde_json::from_value(serde_json::json!({
            "asset_issue_id": "abc",
            "previous_employee_code": "E100",
            "employee_name_from": "Asha Rao",
            "employee_name_to": "Vikram Shah",
            "employee_code_to": "E200",
            "department_to": "HR",
            "cleaned": "Yes"
        }))
        .unwrap();

        let order = request.validate().unwrap();
        assert_eq!(order.asset_issue_id, "abc");
        assert_eq!(order.new_employee.employee_code, "E200");
        assert_eq!(order.new_employee.department.as_deref(), Some("HR"));
        assert_eq!(order.checklist.cleaned.as_deref(), Some("Yes"));

        let errors = AssetTransferRequest::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
