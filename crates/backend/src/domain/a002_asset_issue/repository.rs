use anyhow::Result;
use contracts::domain::a002_asset_issue::aggregate::{
    AssetDetails, AssetIssue, ConfigurationChecklist, EmployeeDetails, IssueDraft,
};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseBackend, EntityTrait, Set, Statement};
use uuid::Uuid;

use crate::shared::data::db::{contains_ignore_case, now_timestamp};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "asset_issues")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub employee_code: String,
    pub employee_name: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
    pub email_id: Option<String>,
    pub hod_name: Option<String>,
    pub asset_type: Option<String>,
    pub asset_code: Option<String>,
    pub make_model: Option<String>,
    pub serial_number: String,
    pub hostname: Option<String>,
    pub ip_address: Option<String>,
    pub old_laptop_serial: Option<String>,
    pub issue_date_manual: Option<String>,
    pub created_at: String,
    pub previous_employee_code: Option<String>,
    pub last_transfer_date: Option<String>,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AssetIssue {
    fn from(m: Model) -> Self {
        AssetIssue {
            id: m.id,
            employee: EmployeeDetails {
                employee_code: m.employee_code,
                employee_name: m.employee_name,
                department: m.department,
                designation: m.designation,
                location: m.location,
                phone_number: m.phone_number,
                email_id: m.email_id,
                hod_name: m.hod_name,
            },
            asset: AssetDetails {
                asset_type: m.asset_type,
                asset_code: m.asset_code,
                make_model: m.make_model,
                serial_number: m.serial_number,
                hostname: m.hostname,
                ip_address: m.ip_address,
                old_laptop_serial: m.old_laptop_serial,
            },
            issue_date_manual: m.issue_date_manual,
            created_at: m.created_at,
            previous_employee_code: m.previous_employee_code,
            last_transfer_date: m.last_transfer_date,
            checklist: ConfigurationChecklist {
                operating_system: m.operating_system,
                printer_configured: m.printer_configured,
                ms_office_version: m.ms_office_version,
                windows_update: m.windows_update,
                licensed_software_name: m.licensed_software_name,
                local_admin_rights_removed: m.local_admin_rights_removed,
                antivirus: m.antivirus,
                local_admin_pass_set: m.local_admin_pass_set,
                sap_configured: m.sap_configured,
                backup_configured: m.backup_configured,
                seven_zip: m.seven_zip,
                chrome: m.chrome,
                onedrive_configured: m.onedrive_configured,
                laptop_bag: m.laptop_bag,
                rmm_agent: m.rmm_agent,
                cleaned: m.cleaned,
                physical_condition: m.physical_condition,
                asset_tag: m.asset_tag,
            },
        }
    }
}

fn set_employee(active: &mut ActiveModel, employee: &EmployeeDetails) {
    active.employee_code = Set(employee.employee_code.clone());
    active.employee_name = Set(employee.employee_name.clone());
    active.department = Set(employee.department.clone());
    active.designation = Set(employee.designation.clone());
    active.location = Set(employee.location.clone());
    active.phone_number = Set(employee.phone_number.clone());
    active.email_id = Set(employee.email_id.clone());
    active.hod_name = Set(employee.hod_name.clone());
}

fn set_asset(active: &mut ActiveModel, asset: &AssetDetails) {
    active.asset_type = Set(asset.asset_type.clone());
    active.asset_code = Set(asset.asset_code.clone());
    active.make_model = Set(asset.make_model.clone());
    active.serial_number = Set(asset.serial_number.clone());
    active.hostname = Set(asset.hostname.clone());
    active.ip_address = Set(asset.ip_address.clone());
    active.old_laptop_serial = Set(asset.old_laptop_serial.clone());
}

fn set_checklist(active: &mut ActiveModel, c: &ConfigurationChecklist) {
    active.operating_system = Set(c.operating_system.clone());
    active.printer_configured = Set(c.printer_configured.clone());
    active.ms_office_version = Set(c.ms_office_version.clone());
    active.windows_update = Set(c.windows_update.clone());
    active.licensed_software_name = Set(c.licensed_software_name.clone());
    active.local_admin_rights_removed = Set(c.local_admin_rights_removed.clone());
    active.antivirus = Set(c.antivirus.clone());
    active.local_admin_pass_set = Set(c.local_admin_pass_set.clone());
    active.sap_configured = Set(c.sap_configured.clone());
    active.backup_configured = Set(c.backup_configured.clone());
    active.seven_zip = Set(c.seven_zip.clone());
    active.chrome = Set(c.chrome.clone());
    active.onedrive_configured = Set(c.onedrive_configured.clone());
    active.laptop_bag = Set(c.laptop_bag.clone());
    active.rmm_agent = Set(c.rmm_agent.clone());
    active.cleaned = Set(c.cleaned.clone());
    active.physical_condition = Set(c.physical_condition.clone());
    active.asset_tag = Set(c.asset_tag.clone());
}

/// Записать новую выдачу, вернуть id
pub async fn insert(db: &DatabaseConnection, draft: &IssueDraft) -> Result<String> {
    let id = Uuid::new_v4().to_string();
    let mut active = <ActiveModel as ActiveModelTrait>::default();
    active.id = Set(id.clone());
    set_employee(&mut active, &draft.employee);
    set_asset(&mut active, &draft.asset);
    set_checklist(&mut active, &draft.checklist);
    active.issue_date_manual = Set(draft.issue_date_manual.clone());
    active.created_at = Set(now_timestamp());
    active.previous_employee_code = Set(None);
    active.last_transfer_date = Set(None);

    Entity::insert(active).exec(db).await?;
    Ok(id)
}

/// Весь журнал выдач, новые сверху.
///
/// `rowid` разрешает равные `created_at` (секундная точность) в порядке вставки.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<AssetIssue>> {
    let stmt = Statement::from_string(
        DatabaseBackend::Sqlite,
        "SELECT * FROM asset_issues ORDER BY created_at DESC, rowid DESC".to_string(),
    );
    let items = Entity::find()
        .from_raw_sql(stmt)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<AssetIssue>> {
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(Into::into))
}

/// Перезаписать редактируемые поля. `created_at` и поля передачи не трогаются.
///
/// Returns `false` when no row has this id.
pub async fn update(db: &DatabaseConnection, id: &str, draft: &IssueDraft) -> Result<bool> {
    let mut active = <ActiveModel as ActiveModelTrait>::default();
    set_employee(&mut active, &draft.employee);
    set_asset(&mut active, &draft.asset);
    set_checklist(&mut active, &draft.checklist);
    active.issue_date_manual = Set(draft.issue_date_manual.clone());

    let result = Entity::update_many()
        .set(active)
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Returns `false` when no row has this id.
pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Последняя выдача сотруднику, найденному по подстроке имени или кода
pub async fn find_by_employee(db: &DatabaseConnection, term: &str) -> Result<Option<AssetIssue>> {
    let found = list_all(db).await?.into_iter().find(|issue| {
        contains_ignore_case(&issue.employee.employee_name, term)
            || contains_ignore_case(&issue.employee.employee_code, term)
    });
    Ok(found)
}

/// Передать актив другому сотруднику: блок сотрудника и чек-лист
/// перезаписываются на месте, фиксируются прежний код и время передачи.
pub async fn apply_transfer(
    db: &DatabaseConnection,
    id: &str,
    previous_employee_code: &str,
    employee: &EmployeeDetails,
    checklist: &ConfigurationChecklist,
) -> Result<bool> {
    let mut active = <ActiveModel as ActiveModelTrait>::default();
    set_employee(&mut active, employee);
    set_checklist(&mut active, checklist);
    active.previous_employee_code = Set(Some(previous_employee_code.to_string()));
    active.last_transfer_date = Set(Some(now_timestamp()));

    let result = Entity::update_many()
        .set(active)
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
