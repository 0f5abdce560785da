use contracts::system::session::SiteId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::base_chart::{BaseChartCard, KpiSummary};
use super::widget_card::WidgetCard;
use super::widget_panel::WidgetPanelView;
use crate::dashboards::d500_kpi_dashboard::catalog::{self, CatalogTicket};
use crate::dashboards::d500_kpi_dashboard::composer::{compose, BaseChart};
use crate::dashboards::d500_kpi_dashboard::panel::WidgetPanel;
use crate::dashboards::d500_kpi_dashboard::registry::{WidgetId, WidgetRegistry};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::system::session::context::use_session;

/// KPI dashboard: base charts for the session's sites plus ad-hoc widgets
#[component]
pub fn KpiDashboard() -> impl IntoView {
    let ctx = StoredValue::new(use_session());
    let session = ctx.with_value(|c| c.session.clone());
    let known_sites = StoredValue::new(ctx.with_value(|c| c.config.known_sites()));

    let panel = RwSignal::new(WidgetPanel::new(&session));
    let registry = RwSignal::new(WidgetRegistry::new());
    let submit_error = RwSignal::new(None::<String>);

    let layout = Memo::new(move |_| {
        let (visibility, selected_site) = panel.with(|p| (p.visibility(), p.draft().site()));
        let sites = known_sites.get_value();
        registry.with(|r| compose(&session, &sites, visibility, selected_site, r))
    });

    // Each ticket is bound to the site it was issued for; stale results are
    // dropped by the panel.
    let start_catalog_fetch = move |ticket: Option<CatalogTicket>| {
        let Some(ticket) = ticket else { return };
        let ctx = ctx.get_value();
        spawn_local(async move {
            let token = ctx.request_token();
            let result = catalog::load(&ctx.transport, ticket.site, token.as_deref()).await;
            panel.update(|p| {
                p.settle_catalog(ticket, result);
            });
        });
    };

    let on_toggle = move |_| {
        let ticket = panel.try_update(|p| p.toggle()).flatten();
        submit_error.set(None);
        start_catalog_fetch(ticket);
    };

    let on_site_change = Callback::new(move |site: Option<SiteId>| {
        let ticket = panel.try_update(|p| p.select_site(site)).flatten();
        start_catalog_fetch(ticket);
    });

    let on_submit = Callback::new(move |_: ()| {
        let draft = panel.with_untracked(|p| p.draft().clone());
        match registry.try_update(|r| r.begin(&draft)) {
            Some(Ok(pending)) => {
                submit_error.set(None);
                let ctx = ctx.get_value();
                spawn_local(async move {
                    let token = ctx.request_token();
                    let (id, result) = pending.run(&ctx.transport, token.as_deref()).await;
                    registry.update(|r| {
                        r.settle(id, result);
                    });
                });
            }
            Some(Err(e)) => submit_error.set(Some(e.to_string())),
            None => {}
        }
    });

    let on_remove = Callback::new(move |id: WidgetId| {
        registry.update(|r| {
            r.remove(id);
        });
    });

    view! {
        <PageFrame page_id="d500_kpi_dashboard--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div>
                    <h2 class="page__title">"Welcome to the Dashboard"</h2>
                    <p>"Here is your overview."</p>
                </div>
                <Button appearance=ButtonAppearance::Primary on_click=on_toggle>
                    {move || if layout.get().panel_open { "Close" } else { "Add New" }}
                </Button>
            </div>

            <div class="page__content">
                <Show when=move || layout.get().panel_open>
                    <WidgetPanelView
                        panel=panel
                        known_sites=known_sites.get_value()
                        show_scope_selector=layout.get_untracked().show_scope_selector
                        on_site_change=on_site_change
                        on_submit=on_submit
                        submit_error=submit_error
                    />
                </Show>

                <div class="linegraph-container">
                    <For
                        each=move || layout.get().base_charts
                        key=|chart: &BaseChart| chart.site
                        children=|chart: BaseChart| view! { <BaseChartCard site=chart.site /> }
                    />
                </div>

                <div class="widget-list">
                    <For
                        each=move || layout.get().widgets
                        key=|id: &WidgetId| *id
                        children=move |id: WidgetId| {
                            let widget = Signal::derive(move || registry.with(|r| r.get(id).cloned()));
                            view! { <WidgetCard widget=widget on_remove=on_remove /> }
                        }
                    />
                </div>

                {move || layout.get().kpi_summary_site.map(|site| view! { <KpiSummary site=site /> })}
            </div>
        </PageFrame>
    }
}
