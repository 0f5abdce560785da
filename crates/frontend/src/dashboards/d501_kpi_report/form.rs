use chrono::NaiveDate;
use contracts::dashboards::d501_kpi_report::dto::ReportRequest;
use contracts::enums::aggregation_op::AggregationOp;
use contracts::enums::report_language::ReportLanguage;
use contracts::shared::kpi::KpiId;
use contracts::system::session::SiteId;

use crate::shared::date_utils::parse_picker_date;

/// Name used when the user leaves the field blank
pub const DEFAULT_REPORT_NAME: &str = "report";

/// Report form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDraft {
    pub name: String,
    pub site: Option<SiteId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub operation: Option<AggregationOp>,
    pub kpi_ids: Vec<KpiId>,
    pub language: Option<ReportLanguage>,
}

impl ReportDraft {
    pub fn new(site: Option<SiteId>) -> Self {
        Self {
            site,
            ..Self::default()
        }
    }

    pub fn set_start_date(&mut self, raw: &str) -> Result<(), String> {
        self.start_date = parse_picker_date(raw)?;
        Ok(())
    }

    pub fn set_end_date(&mut self, raw: &str) -> Result<(), String> {
        self.end_date = parse_picker_date(raw)?;
        Ok(())
    }

    /// Name for the request and the downloaded file
    pub fn effective_name(&self) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            DEFAULT_REPORT_NAME.to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn validate(&self) -> Result<ReportRequest, String> {
        let mut missing = Vec::new();
        if self.site.is_none() {
            missing.push("site");
        }
        if self.start_date.is_none() {
            missing.push("start date");
        }
        if self.end_date.is_none() {
            missing.push("end date");
        }
        if self.operation.is_none() {
            missing.push("aggregation operation");
        }

        match (self.site, self.start_date, self.end_date, self.operation) {
            (Some(site), Some(start_date), Some(end_date), Some(operation)) => Ok(ReportRequest {
                name: self.effective_name(),
                site,
                start_date,
                end_date,
                operation,
                kpi_ids: self.kpi_ids.clone(),
                language: self.language,
            }),
            _ => Err(format!("Please fill in: {}", missing.join(", "))),
        }
    }
}
