//! Widget registry: ordered list of ad-hoc widgets and their fetch status.
//!
//! A widget is appended as `Loading` the moment it is submitted and settles
//! exactly once into `Ready` or `Failed`. Settled widgets never go back to
//! loading; a retry is a new submission and a new widget.

use contracts::shared::kpi::WidgetQuery;
use uuid::Uuid;

use super::fetcher::{fetch_series, DataSeries};
use super::query_builder::QueryBuilder;
use crate::shared::api_utils::KpiTransport;
use crate::shared::error::KpiError;

/// Stable identifier assigned at submission time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(Uuid);

impl WidgetId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetStatus {
    Loading,
    Ready(DataSeries),
    Failed(String),
}

impl WidgetStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, WidgetStatus::Loading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub id: WidgetId,
    pub query: WidgetQuery,
    pub status: WidgetStatus,
}

/// Fetch that must be run for a freshly registered widget
#[derive(Debug, Clone)]
pub struct PendingFetch {
    pub id: WidgetId,
    pub query: WidgetQuery,
}

impl PendingFetch {
    /// Run the compute request; the caller applies the outcome with [`WidgetRegistry::settle`]
    pub async fn run<T>(
        self,
        transport: &T,
        token: Option<&str>,
    ) -> (WidgetId, Result<DataSeries, KpiError>)
    where
        T: KpiTransport + ?Sized,
    {
        let result = fetch_series(transport, &self.query, token).await;
        (self.id, result)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    widgets: Vec<Widget>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a loading widget for an already validated query
    pub fn submit(&mut self, query: WidgetQuery) -> WidgetId {
        let id = WidgetId::new();
        self.widgets.push(Widget {
            id,
            query,
            status: WidgetStatus::Loading,
        });
        id
    }

    /// Validate the draft and register a widget for it.
    ///
    /// An incomplete draft registers nothing and yields `KpiError::Validation`.
    pub fn begin(&mut self, draft: &QueryBuilder) -> Result<PendingFetch, KpiError> {
        let query = draft.validate()?;
        let id = self.submit(query.clone());
        Ok(PendingFetch { id, query })
    }

    /// Record the outcome of a widget's fetch.
    ///
    /// Returns `false` when the widget is gone or already settled; such
    /// outcomes are ignored.
    pub fn settle(&mut self, id: WidgetId, result: Result<DataSeries, KpiError>) -> bool {
        let Some(widget) = self.widgets.iter_mut().find(|w| w.id == id) else {
            log::debug!("Dropping result for removed widget {}", id.as_string());
            return false;
        };

        if widget.status.is_terminal() {
            log::warn!("Widget {} already settled, ignoring result", id.as_string());
            return false;
        }

        widget.status = match result {
            Ok(series) => WidgetStatus::Ready(series),
            Err(e) => {
                log::error!("Widget {} failed: {}", id.as_string(), e);
                WidgetStatus::Failed(e.to_string())
            }
        };
        true
    }

    /// Explicit user removal
    pub fn remove(&mut self, id: WidgetId) -> bool {
        let before = self.widgets.len();
        self.widgets.retain(|w| w.id != id);
        self.widgets.len() != before
    }

    /// Widgets in submission order
    pub fn list(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

}
