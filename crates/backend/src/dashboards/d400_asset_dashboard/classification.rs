use contracts::dashboards::d400_asset_dashboard::{DistributionEntry, UNKNOWN_CATEGORY};
use contracts::domain::a002_asset_issue::aggregate::AssetIssue;
use std::collections::HashMap;

/// Категория круговой диаграммы выданных активов
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    LaptopsDesktops,
    DataCards,
    Printers,
    /// Тип без правила группировки, выводится как записан
    Other(String),
    Unknown,
}

impl AssetCategory {
    /// Map a stored asset type to its display category.
    ///
    /// Matching ignores case and surrounding whitespace; an unmatched type
    /// keeps its stored spelling.
    pub fn classify(asset_type: Option<&str>) -> Self {
        let Some(raw) = asset_type.filter(|t| !t.trim().is_empty()) else {
            return AssetCategory::Unknown;
        };

        match raw.trim().to_lowercase().as_str() {
            "laptop" | "desktop" | "laptop/desktop" => AssetCategory::LaptopsDesktops,
            "data card" => AssetCategory::DataCards,
            "printer" => AssetCategory::Printers,
            _ => AssetCategory::Other(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AssetCategory::LaptopsDesktops => "Laptops/Desktops",
            AssetCategory::DataCards => "Data Cards",
            AssetCategory::Printers => "Printers",
            AssetCategory::Other(label) => label,
            AssetCategory::Unknown => UNKNOWN_CATEGORY,
        }
    }
}

/// Count issued rows per category, largest first.
///
/// Equal counts are ordered by label so the series is deterministic.
pub fn build_distribution(issues: &[AssetIssue]) -> Vec<DistributionEntry> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for issue in issues {
        let category = AssetCategory::classify(issue.asset.asset_type.as_deref());
        *counts.entry(category.label().to_string()).or_insert(0) += 1;
    }

    let mut entries: Vec<DistributionEntry> = counts
        .into_iter()
        .map(|(category, count)| DistributionEntry { category, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    entries
}
