use contracts::system::session::SiteId;
use leptos::prelude::*;

/// Slot for the pre-built per-site time-series chart.
///
/// The chart fetches and draws its own data; the dashboard only decides
/// how many there are and which site each one is bound to.
#[component]
pub fn BaseChartCard(site: SiteId) -> impl IntoView {
    view! {
        <div class="linegraph" data-site=site.index().to_string()>
            <div class="linegraph__title">{format!("Site {}", site.display())}</div>
            <div class="linegraph__body"></div>
        </div>
    }
}

/// Slot for the KPI summary of the site in scope
#[component]
pub fn KpiSummary(site: SiteId) -> impl IntoView {
    view! {
        <div class="kpi-summary" data-site=site.index().to_string()>
            <h3>{format!("KPI summary · Site {}", site.display())}</h3>
        </div>
    }
}
