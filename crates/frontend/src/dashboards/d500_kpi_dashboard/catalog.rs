//! KPI catalog loader.
//!
//! Fetches the KPIs offered by one site and tracks the four mutually
//! exclusive panel states. Every fetch is bound to a [`CatalogTicket`];
//! a result whose ticket is no longer current (site switched, panel
//! closed) is discarded instead of overwriting the newer catalog.

use contracts::shared::kpi::{KpiCatalogResponse, KpiDescriptor};
use contracts::system::session::SiteId;

use super::api;
use crate::shared::api_utils::KpiTransport;
use crate::shared::error::KpiError;

/// What the KPI selector should render
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogView {
    /// No site in scope or panel closed
    #[default]
    Idle,
    Loading,
    /// Fetch succeeded and the site offers no KPIs
    Empty,
    Populated(Vec<KpiDescriptor>),
    Failed(String),
}

/// Binds an in-flight fetch to the site it was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogTicket {
    pub site: SiteId,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    generation: u64,
    pending: Option<CatalogTicket>,
    view: CatalogView,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `site`. The previous catalog is dropped right away.
    pub fn begin(&mut self, site: SiteId) -> CatalogTicket {
        self.generation += 1;
        let ticket = CatalogTicket {
            site,
            generation: self.generation,
        };
        self.pending = Some(ticket);
        self.view = CatalogView::Loading;
        ticket
    }

    /// Apply a settled fetch. Returns `false` when the result was stale and dropped.
    pub fn settle(
        &mut self,
        ticket: CatalogTicket,
        result: Result<Vec<KpiDescriptor>, KpiError>,
    ) -> bool {
        if self.pending != Some(ticket) {
            log::debug!(
                "Discarding stale KPI catalog for site {} (generation {})",
                ticket.site,
                ticket.generation
            );
            return false;
        }

        self.pending = None;
        self.view = match result {
            Ok(items) if items.is_empty() => CatalogView::Empty,
            Ok(items) => CatalogView::Populated(items),
            Err(e) => {
                log::error!("Failed to load KPI catalog for site {}: {}", ticket.site, e);
                CatalogView::Failed(e.to_string())
            }
        };
        true
    }

    /// Forget the current catalog and invalidate any in-flight fetch
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.view = CatalogView::Idle;
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }
}

/// Fetch and decode the catalog for a site
pub async fn load<T>(
    transport: &T,
    site: SiteId,
    token: Option<&str>,
) -> Result<Vec<KpiDescriptor>, KpiError>
where
    T: KpiTransport + ?Sized,
{
    let body = api::get_catalog(transport, site, token).await?;
    let parsed: KpiCatalogResponse =
        serde_json::from_str(&body).map_err(|e| KpiError::Parse(e.to_string()))?;
    log::debug!("KPI catalog for site {}: {} entries", site, parsed.data.len());
    Ok(parsed.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::mock::MockTransport;
    use contracts::shared::kpi::KpiId;

    fn site(raw: u8) -> SiteId {
        SiteId::new(raw).unwrap()
    }

    fn names(view: &CatalogView) -> Vec<&str> {
        match view {
            CatalogView::Populated(items) => items.iter().map(|k| k.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    fn kpi(id: &str, name: &str) -> KpiDescriptor {
        KpiDescriptor {
            id: KpiId::new(id),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_single_entry_catalog() {
        let transport = MockTransport::new();
        transport.respond(
            "/api/v1.0/kpi/?site=1",
            200,
            r#"{"data":[{"id":"k1","name":"Uptime"}]}"#,
        );

        let mut loader = CatalogLoader::new();
        let ticket = loader.begin(site(1));
        assert_eq!(loader.view(), &CatalogView::Loading);

        let result = load(&transport, site(1), Some("tok")).await;
        assert!(loader.settle(ticket, result));

        assert_eq!(names(loader.view()), vec!["Uptime"]);

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].authorization_header(), "Bearer tok");
    }

    #[tokio::test]
    async fn test_empty_and_failed_are_distinct() {
        let transport = MockTransport::new();
        transport
            .respond("/api/v1.0/kpi/?site=0", 200, r#"{"data":[]}"#)
            .respond("/api/v1.0/kpi/?site=0", 503, "unavailable");

        let mut loader = CatalogLoader::new();
        let ticket = loader.begin(site(0));
        let result = load(&transport, site(0), Some("tok")).await;
        loader.settle(ticket, result);
        assert_eq!(loader.view(), &CatalogView::Empty);

        let ticket = loader.begin(site(0));
        let result = load(&transport, site(0), Some("tok")).await;
        loader.settle(ticket, result);
        assert!(matches!(loader.view(), CatalogView::Failed(msg) if !msg.is_empty()));
    }

    #[tokio::test]
    async fn test_missing_token_issues_no_request() {
        let transport = MockTransport::new();
        let result = load(&transport, site(2), None).await;
        assert!(matches!(result, Err(KpiError::Auth(_))));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_an_error() {
        let transport = MockTransport::new();
        transport.respond("/api/v1.0/kpi/", 200, "<html>");
        let result = load(&transport, site(1), Some("tok")).await;
        assert!(matches!(result, Err(KpiError::Parse(_))));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut loader = CatalogLoader::new();
        let first = loader.begin(site(0));
        let second = loader.begin(site(1));

        // Newer request settles first, older one arrives late
        assert!(loader.settle(second, Ok(vec![kpi("k1", "Uptime")])));
        assert!(!loader.settle(first, Ok(vec![kpi("k9", "Old site KPI")])));

        assert_eq!(names(loader.view()), vec!["Uptime"]);
    }

    #[test]
    fn test_stale_response_does_not_end_loading() {
        let mut loader = CatalogLoader::new();
        let first = loader.begin(site(0));
        let _second = loader.begin(site(2));

        assert!(!loader.settle(first, Err(KpiError::Network("timeout".into()))));
        assert_eq!(loader.view(), &CatalogView::Loading);
    }

    #[test]
    fn test_reset_invalidates_in_flight_fetch() {
        let mut loader = CatalogLoader::new();
        let ticket = loader.begin(site(1));
        loader.reset();

        assert!(!loader.settle(ticket, Ok(vec![kpi("k1", "Uptime")])));
        assert_eq!(loader.view(), &CatalogView::Idle);
    }

    #[test]
    fn test_same_site_refetch_supersedes_previous() {
        let mut loader = CatalogLoader::new();
        let first = loader.begin(site(1));
        let second = loader.begin(site(1));
        assert_ne!(first, second);
        assert!(!loader.settle(first, Ok(vec![])));
        assert!(loader.settle(second, Ok(vec![kpi("k1", "Uptime")])));
    }
}
