use crate::enums::aggregation_op::AggregationOp;
use crate::enums::report_language::ReportLanguage;
use crate::shared::kpi::KpiId;
use crate::system::session::SiteId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Validated report generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub name: String,
    pub site: SiteId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub operation: AggregationOp,
    /// KPIs picked in the form; the endpoint does not take them yet
    #[serde(default)]
    pub kpi_ids: Vec<KpiId>,
    /// Picked in the form, not sent either
    #[serde(default)]
    pub language: Option<ReportLanguage>,
}

/// `POST /api/v1.0/report/` response body, `data` is the download URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
