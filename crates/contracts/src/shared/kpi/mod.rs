use crate::enums::aggregation_op::AggregationOp;
use crate::enums::granularity::Granularity;
use crate::enums::scope_mode::ScopeMode;
use crate::system::session::SiteId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// KPI identifier as issued by the catalog endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KpiId(pub String);

impl KpiId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for KpiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One KPI offered by a site's catalog.
///
/// The API is inconsistent about the identifier key; both `id` and `_id` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiDescriptor {
    #[serde(alias = "_id")]
    pub id: KpiId,
    pub name: String,
}

/// `GET /api/v1.0/kpi/?site={id}` response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KpiCatalogResponse {
    #[serde(default)]
    pub data: Vec<KpiDescriptor>,
}

// ---------------------------------------------------------------------------
// Widget query
// ---------------------------------------------------------------------------

/// Fully validated parameters of one ad-hoc widget request.
///
/// Immutable once handed to the fetcher. `operation` and `granularity` are
/// optional and forwarded as-is; the remote service decides what to do with
/// missing values or an inverted date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetQuery {
    pub kpi_id: KpiId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub operation: Option<AggregationOp>,
    pub granularity: Option<Granularity>,
    pub scope_mode: ScopeMode,
    pub site: SiteId,
}

/// Canonical date representation used on the wire and in the draft
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a date as `yyyy-MM-dd`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_accepts_both_id_keys() {
        let body = r#"{"data":[{"id":"k1","name":"Uptime"},{"_id":"k2","name":"Scrap rate"}]}"#;
        let parsed: KpiCatalogResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 2);
        assert_eq!(parsed.data[0].id, KpiId::new("k1"));
        assert_eq!(parsed.data[1].id, KpiId::new("k2"));
        assert_eq!(parsed.data[1].name, "Scrap rate");
    }

    #[test]
    fn test_catalog_missing_data_is_empty() {
        let parsed: KpiCatalogResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();
        assert_eq!(format_date(date), "2024-09-03");
    }
}
