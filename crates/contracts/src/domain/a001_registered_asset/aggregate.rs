use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::validation::{blank_to_none, parse_optional_date, FieldError};

/// Зарегистрированный актив (агрегат a001), запись мастер-инвентаря.
///
/// Серийный номер является бизнес-идентификатором; `id` является техническим UUID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredAsset {
    pub id: String,
    pub asset_serial_no: String,
    pub asset_make: Option<String>,
    pub asset_model: Option<String>,
    pub vendor: Option<String>,
    pub warranty_end_date: Option<NaiveDate>,
    pub registration_date: Option<NaiveDate>,
    /// "YYYY-MM-DD HH:MM:SS", UTC
    pub created_at: String,
}

/// Payload of `POST /api/register-asset`.
///
/// Form fields arrive as strings; blank strings are treated as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisteredAssetDto {
    pub asset_serial_no: Option<String>,
    pub asset_make: Option<String>,
    pub asset_model: Option<String>,
    pub vendor: Option<String>,
    pub warranty_end_date: Option<String>,
    pub registration_date: Option<String>,
}

/// Registration input after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegisteredAsset {
    pub asset_serial_no: String,
    pub asset_make: Option<String>,
    pub asset_model: Option<String>,
    pub vendor: Option<String>,
    pub warranty_end_date: Option<NaiveDate>,
    pub registration_date: Option<NaiveDate>,
}

impl RegisteredAssetDto {
    /// Validate the form and normalise blank strings to `None`.
    pub fn validate(self) -> Result<NewRegisteredAsset, Vec<FieldError>> {
        let mut errors = Vec::new();

        let asset_serial_no = blank_to_none(self.asset_serial_no);
        if asset_serial_no.is_none() {
            errors.push(FieldError::new(
                "asset_serial_no",
                "Asset Serial Number is required.",
            ));
        }
        let warranty_end_date =
            parse_optional_date("warranty_end_date", self.warranty_end_date, &mut errors);
        let registration_date =
            parse_optional_date("registration_date", self.registration_date, &mut errors);

        match asset_serial_no {
            Some(asset_serial_no) if errors.is_empty() => Ok(NewRegisteredAsset {
                asset_serial_no,
                asset_make: blank_to_none(self.asset_make),
                asset_model: blank_to_none(self.asset_model),
                vendor: blank_to_none(self.vendor),
                warranty_end_date,
                registration_date,
            }),
            _ => Err(errors),
        }
    }
}

/// Производный статус актива: не хранится, вычисляется при каждом запросе
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Available,
    Issued,
}

impl AssetStatus {
    pub fn from_issue_flag(is_issued: bool) -> Self {
        if is_issued {
            AssetStatus::Issued
        } else {
            AssetStatus::Available
        }
    }
}

/// Row of the inventory screen: a registered asset plus its derived status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(flatten)]
    pub asset: RegisteredAsset,
    pub status: AssetStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_normalises_blank_fields() {
        let dto = RegisteredAssetDto {
            asset_serial_no: Some("  SN-001 ".to_string()),
            asset_make: Some("Dell".to_string()),
            asset_model: Some("".to_string()),
            vendor: Some("   ".to_string()),
            warranty_end_date: Some("2027-03-31".to_string()),
            registration_date: None,
        };

        let asset = dto.validate().unwrap();
        assert_eq!(asset.asset_serial_no, "SN-001");
        assert_eq!(asset.asset_make.as_deref(), Some("Dell"));
        assert_eq!(asset.asset_model, None);
        assert_eq!(asset.vendor, None);
        assert_eq!(
            asset.warranty_end_date,
            NaiveDate::from_ymd_opt(2027, 3, 31)
        );
    }

    #[test]
    fn test_validate_reports_every_bad_field() {
        let dto = RegisteredAssetDto {
            asset_serial_no: Some(" ".to_string()),
            warranty_end_date: Some("31/03/2027".to_string()),
            ..Default::default()
        };

        let errors = dto.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["asset_serial_no", "warranty_end_date"]);
    }

    #[test]
    fn test_status_from_flag() {
        assert_eq!(AssetStatus::from_issue_flag(true), AssetStatus::Issued);
        assert_eq!(AssetStatus::from_issue_flag(false), AssetStatus::Available);
        assert_eq!(
            serde_json::to_string(&AssetStatus::Available).unwrap(),
            "\"available\""
        );
    }
}
