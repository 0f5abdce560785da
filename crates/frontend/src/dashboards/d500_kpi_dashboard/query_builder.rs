//! Accumulates widget parameters from user input.
//!
//! Pure state: no network access. [`QueryBuilder::validate`] is the only way
//! to obtain a [`WidgetQuery`], so an incomplete draft can never reach the fetcher.

use chrono::NaiveDate;
use contracts::enums::aggregation_op::AggregationOp;
use contracts::enums::granularity::Granularity;
use contracts::enums::scope_mode::ScopeMode;
use contracts::shared::kpi::{format_date, KpiId, WidgetQuery};
use contracts::system::session::{Session, SiteId};

use crate::shared::date_utils::parse_picker_date;
use crate::shared::error::{KpiError, QueryField};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    kpi_id: Option<KpiId>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    operation: Option<AggregationOp>,
    granularity: Option<Granularity>,
    scope_mode: ScopeMode,
    site: Option<SiteId>,
    /// Single-site sessions cannot change the site
    site_locked: bool,
}

impl QueryBuilder {
    /// Empty draft scoped to the session: FFM drafts start with their site fixed
    pub fn for_session(session: &Session) -> Self {
        Self {
            site: session.site(),
            site_locked: session.site().is_some(),
            ..Self::default()
        }
    }

    pub fn set_kpi(&mut self, kpi_id: Option<KpiId>) {
        self.kpi_id = kpi_id;
    }

    /// Set the start date from a raw picker value; blank clears it
    pub fn set_start_date(&mut self, raw: &str) -> Result<(), String> {
        self.start_date = parse_picker_date(raw)?;
        Ok(())
    }

    /// Set the end date from a raw picker value; blank clears it
    pub fn set_end_date(&mut self, raw: &str) -> Result<(), String> {
        self.end_date = parse_picker_date(raw)?;
        Ok(())
    }

    pub fn set_operation(&mut self, operation: Option<AggregationOp>) {
        self.operation = operation;
    }

    pub fn set_granularity(&mut self, granularity: Option<Granularity>) {
        self.granularity = granularity;
    }

    pub fn set_scope_mode(&mut self, scope_mode: ScopeMode) {
        self.scope_mode = scope_mode;
    }

    /// Change the target site. Returns `false` if the site is fixed by the session.
    ///
    /// The selected KPI is cleared on change since it belongs to the previous site's catalog.
    pub fn set_site(&mut self, site: Option<SiteId>) -> bool {
        if self.site_locked {
            return false;
        }
        if self.site != site {
            self.kpi_id = None;
        }
        self.site = site;
        true
    }

    pub fn kpi_id(&self) -> Option<&KpiId> {
        self.kpi_id.as_ref()
    }

    pub fn site(&self) -> Option<SiteId> {
        self.site
    }

    pub fn scope_mode(&self) -> ScopeMode {
        self.scope_mode
    }

    pub fn operation(&self) -> Option<AggregationOp> {
        self.operation
    }

    pub fn granularity(&self) -> Option<Granularity> {
        self.granularity
    }

    /// Canonical `yyyy-MM-dd` text for the date inputs
    pub fn start_date_text(&self) -> String {
        self.start_date.map(format_date).unwrap_or_default()
    }

    pub fn end_date_text(&self) -> String {
        self.end_date.map(format_date).unwrap_or_default()
    }

    /// Required fields still unset, in form order
    pub fn missing_fields(&self) -> Vec<QueryField> {
        let mut missing = Vec::new();
        if self.kpi_id.is_none() {
            missing.push(QueryField::Kpi);
        }
        if self.start_date.is_none() {
            missing.push(QueryField::StartDate);
        }
        if self.end_date.is_none() {
            missing.push(QueryField::EndDate);
        }
        if self.site.is_none() {
            missing.push(QueryField::Site);
        }
        missing
    }

    /// Freeze the draft into a query.
    ///
    /// Date order is not checked here; the remote service owns range validation.
    pub fn validate(&self) -> Result<WidgetQuery, KpiError> {
        match (&self.kpi_id, self.start_date, self.end_date, self.site) {
            (Some(kpi_id), Some(start_date), Some(end_date), Some(site)) => Ok(WidgetQuery {
                kpi_id: kpi_id.clone(),
                start_date,
                end_date,
                operation: self.operation,
                granularity: self.granularity,
                scope_mode: self.scope_mode,
                site,
            }),
            _ => Err(KpiError::Validation(self.missing_fields())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(raw: u8) -> SiteId {
        SiteId::new(raw).unwrap()
    }

    fn filled(session: &Session) -> QueryBuilder {
        let mut builder = QueryBuilder::for_session(session);
        builder.set_kpi(Some(KpiId::new("k1")));
        builder.set_start_date("2024-09-30").unwrap();
        builder.set_end_date("2024/10/14").unwrap();
        builder
    }

    #[test]
    fn test_ffm_draft_has_fixed_site() {
        let session = Session::ffm(site(1), "tok");
        let mut builder = QueryBuilder::for_session(&session);
        assert_eq!(builder.site(), Some(site(1)));
        assert!(!builder.set_site(Some(site(2))));
        assert_eq!(builder.site(), Some(site(1)));
    }

    #[test]
    fn test_validate_complete_draft() {
        let session = Session::ffm(site(1), "tok");
        let query = filled(&session).validate().unwrap();
        assert_eq!(query.kpi_id, KpiId::new("k1"));
        assert_eq!(query.site, site(1));
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2024, 9, 30).unwrap());
        assert_eq!(query.end_date, NaiveDate::from_ymd_opt(2024, 10, 14).unwrap());
        assert_eq!(query.operation, None);
        assert_eq!(query.granularity, None);
    }

    #[test]
    fn test_each_required_field_is_enforced() {
        let session = Session::ffm(site(0), "tok");

        let mut no_kpi = filled(&session);
        no_kpi.set_kpi(None);
        assert_eq!(
            no_kpi.validate(),
            Err(KpiError::Validation(vec![QueryField::Kpi]))
        );

        let mut no_start = filled(&session);
        no_start.set_start_date("").unwrap();
        assert_eq!(no_start.missing_fields(), vec![QueryField::StartDate]);

        let mut no_end = filled(&session);
        no_end.set_end_date(" ").unwrap();
        assert_eq!(no_end.missing_fields(), vec![QueryField::EndDate]);

        let smo = Session::smo("tok");
        let no_site = filled(&smo);
        assert_eq!(no_site.missing_fields(), vec![QueryField::Site]);
        assert!(no_site.validate().is_err());
    }

    #[test]
    fn test_inverted_range_is_accepted() {
        let session = Session::ffm(site(0), "tok");
        let mut builder = filled(&session);
        builder.set_start_date("2024-12-31").unwrap();
        builder.set_end_date("2024-01-01").unwrap();
        assert!(builder.validate().is_ok());
    }

    #[test]
    fn test_site_change_clears_kpi() {
        let session = Session::smo("tok");
        let mut builder = filled(&session);
        assert!(builder.set_site(Some(site(0))));
        assert!(builder.kpi_id().is_none());

        builder.set_kpi(Some(KpiId::new("k2")));
        builder.set_site(Some(site(0)));
        assert_eq!(builder.kpi_id(), Some(&KpiId::new("k2")));
    }

    #[test]
    fn test_invalid_date_keeps_previous_value() {
        let session = Session::ffm(site(0), "tok");
        let mut builder = filled(&session);
        assert!(builder.set_start_date("30.09.2024").is_err());
        assert_eq!(builder.start_date_text(), "2024-09-30");
    }

    #[test]
    fn test_operation_and_granularity_pass_through() {
        let session = Session::ffm(site(2), "tok");
        let mut builder = filled(&session);
        builder.set_operation(Some(AggregationOp::Max));
        builder.set_granularity(Some(Granularity::Monthly));
        builder.set_scope_mode(ScopeMode::ByCategory);
        let query = builder.validate().unwrap();
        assert_eq!(query.operation, Some(AggregationOp::Max));
        assert_eq!(query.granularity, Some(Granularity::Monthly));
        assert_eq!(query.scope_mode, ScopeMode::ByCategory);
    }
}
