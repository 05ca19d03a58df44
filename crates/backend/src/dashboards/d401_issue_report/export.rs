use anyhow::Result;
use contracts::dashboards::d401_issue_report::REPORT_COLUMNS;
use contracts::domain::a002_asset_issue::aggregate::AssetIssue;

/// Выгрузка отчёта в CSV: фиксированная шапка, строки в исходном порядке
pub fn render_csv(rows: &[AssetIssue]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(REPORT_COLUMNS)?;

    for row in rows {
        writer.write_record([
            row.display_date().as_str(),
            row.employee.employee_code.as_str(),
            row.employee.employee_name.as_str(),
            row.employee.department.as_deref().unwrap_or(""),
            row.asset.asset_type.as_deref().unwrap_or(""),
            row.asset.serial_number.as_str(),
            row.asset.hostname.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}
