//! Decides what the dashboard shows for a session.

use contracts::system::session::{Session, SiteId};

use super::registry::{WidgetId, WidgetRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelVisibility {
    #[default]
    Closed,
    Open,
}

impl PanelVisibility {
    pub fn is_open(&self) -> bool {
        matches!(self, PanelVisibility::Open)
    }
}

/// Pre-built time-series chart for one site; fetches its own data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseChart {
    pub site: SiteId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayout {
    pub base_charts: Vec<BaseChart>,
    /// Registry contents, in registry order
    pub widgets: Vec<WidgetId>,
    pub panel_open: bool,
    /// Scope selector is only offered to multi-site sessions
    pub show_scope_selector: bool,
    /// Site whose KPI summary is rendered; `None` hides the summary
    pub kpi_summary_site: Option<SiteId>,
}

/// One chart for a single-site session, one per known site otherwise
pub fn base_charts(session: &Session, known_sites: &[SiteId]) -> Vec<BaseChart> {
    match session.site() {
        Some(site) => vec![BaseChart { site }],
        None => known_sites.iter().map(|&site| BaseChart { site }).collect(),
    }
}

/// Lay out the dashboard.
///
/// `selected_site` is the site picked in the widget panel; it only matters
/// for supervisor sessions, whose own site is undetermined.
pub fn compose(
    session: &Session,
    known_sites: &[SiteId],
    panel: PanelVisibility,
    selected_site: Option<SiteId>,
    registry: &WidgetRegistry,
) -> DashboardLayout {
    DashboardLayout {
        base_charts: base_charts(session, known_sites),
        widgets: registry.list().iter().map(|w| w.id).collect(),
        panel_open: panel.is_open(),
        show_scope_selector: session.is_supervisor(),
        kpi_summary_site: session.site().or(selected_site),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::enums::scope_mode::ScopeMode;
    use contracts::shared::kpi::{KpiId, WidgetQuery};

    fn site(raw: u8) -> SiteId {
        SiteId::new(raw).unwrap()
    }

    fn query(site: SiteId) -> WidgetQuery {
        WidgetQuery {
            kpi_id: KpiId::new("k1"),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            operation: None,
            granularity: None,
            scope_mode: ScopeMode::BySite,
            site,
        }
    }

    #[test]
    fn test_supervisor_fans_out_to_every_site() {
        let session = Session::smo("tok");
        let layout = compose(
            &session,
            &SiteId::all(),
            PanelVisibility::Closed,
            None,
            &WidgetRegistry::new(),
        );
        let sites: Vec<u8> = layout.base_charts.iter().map(|c| c.site.index()).collect();
        assert_eq!(sites, vec![0, 1, 2]);
        assert!(layout.show_scope_selector);
        assert_eq!(layout.kpi_summary_site, None);
    }

    #[test]
    fn test_operator_gets_one_chart_for_own_site() {
        let session = Session::ffm(site(1), "tok");
        let layout = compose(
            &session,
            &SiteId::all(),
            PanelVisibility::Open,
            None,
            &WidgetRegistry::new(),
        );
        assert_eq!(layout.base_charts, vec![BaseChart { site: site(1) }]);
        assert!(!layout.show_scope_selector);
        assert!(layout.panel_open);
        assert_eq!(layout.kpi_summary_site, Some(site(1)));
    }

    #[test]
    fn test_supervisor_summary_follows_selected_site() {
        let session = Session::smo("tok");
        let layout = compose(
            &session,
            &SiteId::all(),
            PanelVisibility::Open,
            Some(site(2)),
            &WidgetRegistry::new(),
        );
        assert_eq!(layout.kpi_summary_site, Some(site(2)));
        assert_eq!(layout.base_charts.len(), 3);
    }

    #[test]
    fn test_operator_ignores_selected_site() {
        let session = Session::ffm(site(0), "tok");
        let layout = compose(
            &session,
            &SiteId::all(),
            PanelVisibility::Closed,
            Some(site(2)),
            &WidgetRegistry::new(),
        );
        assert_eq!(layout.kpi_summary_site, Some(site(0)));
    }

    #[test]
    fn test_widgets_follow_registry_order() {
        let mut registry = WidgetRegistry::new();
        let a = registry.submit(query(site(0)));
        let b = registry.submit(query(site(1)));
        let layout = compose(
            &Session::smo("tok"),
            &SiteId::all(),
            PanelVisibility::Closed,
            None,
            &registry,
        );
        assert_eq!(layout.widgets, vec![a, b]);

        registry.remove(a);
        let layout = compose(
            &Session::smo("tok"),
            &SiteId::all(),
            PanelVisibility::Closed,
            None,
            &registry,
        );
        assert_eq!(layout.widgets, vec![b]);
    }
}
