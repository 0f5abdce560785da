//! Widget creation panel controller.
//!
//! Ties panel visibility, the query draft and the catalog loader together.
//! Methods that may require a catalog fetch return a [`CatalogTicket`]; the
//! caller issues the fetch and feeds the outcome back through
//! [`WidgetPanel::settle_catalog`].

use contracts::shared::kpi::KpiDescriptor;
use contracts::system::session::{Session, SiteId};

use super::catalog::{CatalogLoader, CatalogTicket, CatalogView};
use super::composer::PanelVisibility;
use super::query_builder::QueryBuilder;
use crate::shared::error::KpiError;

#[derive(Debug, Clone)]
pub struct WidgetPanel {
    visibility: PanelVisibility,
    draft: QueryBuilder,
    catalog: CatalogLoader,
}

impl WidgetPanel {
    pub fn new(session: &Session) -> Self {
        Self {
            visibility: PanelVisibility::Closed,
            draft: QueryBuilder::for_session(session),
            catalog: CatalogLoader::new(),
        }
    }

    /// Open the panel; fetches the catalog when the site is known
    pub fn open(&mut self) -> Option<CatalogTicket> {
        self.visibility = PanelVisibility::Open;
        self.draft.site().map(|site| self.catalog.begin(site))
    }

    /// Close the panel and abandon any in-flight catalog fetch
    pub fn close(&mut self) {
        self.visibility = PanelVisibility::Closed;
        self.catalog.reset();
    }

    pub fn toggle(&mut self) -> Option<CatalogTicket> {
        if self.visibility.is_open() {
            self.close();
            None
        } else {
            self.open()
        }
    }

    /// Change the draft's site. Refetches only while the panel is open.
    pub fn select_site(&mut self, site: Option<SiteId>) -> Option<CatalogTicket> {
        if self.draft.site() == site || !self.draft.set_site(site) {
            return None;
        }

        match (self.visibility, site) {
            (PanelVisibility::Open, Some(site)) => Some(self.catalog.begin(site)),
            (PanelVisibility::Open, None) => {
                self.catalog.reset();
                None
            }
            (PanelVisibility::Closed, _) => None,
        }
    }

    /// Apply a catalog result; stale results are dropped
    pub fn settle_catalog(
        &mut self,
        ticket: CatalogTicket,
        result: Result<Vec<KpiDescriptor>, KpiError>,
    ) -> bool {
        self.catalog.settle(ticket, result)
    }

    pub fn visibility(&self) -> PanelVisibility {
        self.visibility
    }

    pub fn catalog(&self) -> &CatalogView {
        self.catalog.view()
    }

    pub fn draft(&self) -> &QueryBuilder {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut QueryBuilder {
        &mut self.draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::aggregation_op::AggregationOp;
    use contracts::enums::granularity::Granularity;
    use contracts::shared::kpi::KpiId;

    fn site(raw: u8) -> SiteId {
        SiteId::new(raw).unwrap()
    }

    fn uptime() -> Vec<KpiDescriptor> {
        vec![KpiDescriptor {
            id: KpiId::new("k1"),
            name: "Uptime".into(),
        }]
    }

    #[test]
    fn test_operator_open_fetches_own_site() {
        let mut panel = WidgetPanel::new(&Session::ffm(site(1), "tok"));
        let ticket = panel.open().expect("catalog fetch expected");
        assert_eq!(ticket.site, site(1));
        assert_eq!(panel.catalog(), &CatalogView::Loading);

        assert!(panel.settle_catalog(ticket, Ok(uptime())));
        assert_eq!(panel.catalog(), &CatalogView::Populated(uptime()));
    }

    #[test]
    fn test_supervisor_open_waits_for_site() {
        let mut panel = WidgetPanel::new(&Session::smo("tok"));
        assert!(panel.open().is_none());
        assert_eq!(panel.catalog(), &CatalogView::Idle);

        let ticket = panel.select_site(Some(site(2))).expect("catalog fetch expected");
        assert_eq!(ticket.site, site(2));
    }

    #[test]
    fn test_no_fetch_while_closed() {
        let mut panel = WidgetPanel::new(&Session::smo("tok"));
        assert!(panel.select_site(Some(site(0))).is_none());
        assert_eq!(panel.draft().site(), Some(site(0)));

        // opening later picks up the selected site
        let ticket = panel.open().unwrap();
        assert_eq!(ticket.site, site(0));
    }

    #[test]
    fn test_site_switch_discards_previous_catalog() {
        let mut panel = WidgetPanel::new(&Session::smo("tok"));
        panel.open();
        let first = panel.select_site(Some(site(0))).unwrap();
        let second = panel.select_site(Some(site(1))).unwrap();

        assert!(!panel.settle_catalog(first, Ok(uptime())));
        assert_eq!(panel.catalog(), &CatalogView::Loading);
        assert!(panel.settle_catalog(second, Ok(vec![])));
        assert_eq!(panel.catalog(), &CatalogView::Empty);
    }

    #[test]
    fn test_reselecting_same_site_does_not_refetch() {
        let mut panel = WidgetPanel::new(&Session::smo("tok"));
        panel.open();
        assert!(panel.select_site(Some(site(1))).is_some());
        assert!(panel.select_site(Some(site(1))).is_none());
    }

    #[test]
    fn test_close_abandons_in_flight_fetch() {
        let mut panel = WidgetPanel::new(&Session::ffm(site(0), "tok"));
        let ticket = panel.toggle().unwrap();
        assert!(panel.toggle().is_none());
        assert_eq!(panel.visibility(), PanelVisibility::Closed);
        assert!(!panel.settle_catalog(ticket, Ok(uptime())));
        assert_eq!(panel.catalog(), &CatalogView::Idle);
    }

    #[test]
    fn test_operator_cannot_switch_site() {
        let mut panel = WidgetPanel::new(&Session::ffm(site(0), "tok"));
        panel.open();
        assert!(panel.select_site(Some(site(2))).is_none());
        assert_eq!(panel.draft().site(), Some(site(0)));
    }

    #[test]
    fn test_clearing_site_resets_catalog() {
        let mut panel = WidgetPanel::new(&Session::smo("tok"));
        panel.open();
        let ticket = panel.select_site(Some(site(1))).unwrap();
        assert!(panel.select_site(None).is_none());
        assert!(!panel.settle_catalog(ticket, Ok(uptime())));
        assert_eq!(panel.catalog(), &CatalogView::Idle);
    }

    #[test]
    fn test_reopen_keeps_draft_and_refetches_its_site() {
        let mut panel = WidgetPanel::new(&Session::smo("tok"));
        panel.open();
        panel.select_site(Some(site(2)));
        panel.draft_mut().set_operation(Some(AggregationOp::Max));
        panel.draft_mut().set_granularity(Some(Granularity::Monthly));
        panel.close();

        // the rebuilt form reads these back from the draft
        let ticket = panel.open().expect("catalog fetch expected");
        assert_eq!(ticket.site, site(2));
        assert_eq!(panel.draft().site(), Some(site(2)));
        assert_eq!(panel.draft().operation(), Some(AggregationOp::Max));
        assert_eq!(panel.draft().granularity(), Some(Granularity::Monthly));
    }
}
