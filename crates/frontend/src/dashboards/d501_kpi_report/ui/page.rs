use contracts::enums::aggregation_op::AggregationOp;
use contracts::enums::report_language::ReportLanguage;
use contracts::shared::kpi::KpiId;
use contracts::system::session::SiteId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use crate::dashboards::d500_kpi_dashboard::catalog::{self, CatalogLoader, CatalogTicket};
use crate::dashboards::d501_kpi_report::api;
use crate::dashboards::d501_kpi_report::form::ReportDraft;
use crate::shared::components::catalog_select::CatalogSelect;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::system::session::context::use_session;

/// Start a browser download of `url` saved as `file_name`
fn trigger_download(url: &str, file_name: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "Document not available".to_string())?;
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "Failed to create download link".to_string())?;
    anchor.set_href(url);
    anchor.set_download(file_name);
    anchor.click();
    Ok(())
}

/// Report generation form
#[component]
pub fn ReportPage() -> impl IntoView {
    let ctx = StoredValue::new(use_session());
    let session = ctx.with_value(|c| c.session.clone());
    let known_sites = ctx.with_value(|c| c.config.known_sites());

    let draft = RwSignal::new(ReportDraft::new(session.site()));
    let catalog_loader = RwSignal::new(CatalogLoader::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let date_error = RwSignal::new(None::<String>);

    let start_catalog_fetch = move |ticket: CatalogTicket| {
        let ctx = ctx.get_value();
        spawn_local(async move {
            let token = ctx.request_token();
            let result = catalog::load(&ctx.transport, ticket.site, token.as_deref()).await;
            catalog_loader.update(|c| {
                c.settle(ticket, result);
            });
        });
    };

    if let Some(ticket) = session
        .site()
        .and_then(|site| catalog_loader.try_update(|c| c.begin(site)))
    {
        start_catalog_fetch(ticket);
    }

    let on_site_change = move |site: Option<SiteId>| {
        draft.update(|d| {
            d.site = site;
            d.kpi_ids.clear();
        });
        match site {
            Some(site) => {
                if let Some(ticket) = catalog_loader.try_update(|c| c.begin(site)) {
                    start_catalog_fetch(ticket);
                }
            }
            None => catalog_loader.update(|c| c.reset()),
        }
    };

    let on_generate = move |_| {
        let request = match draft.with_untracked(|d| d.validate()) {
            Ok(request) => request,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };

        loading.set(true);
        error.set(None);
        let ctx = ctx.get_value();
        spawn_local(async move {
            let token = ctx.request_token();
            match api::generate_report(&ctx.transport, &request, token.as_deref()).await {
                Ok(url) => {
                    if let Err(e) = trigger_download(&url, &request.name) {
                        log::error!("Failed to start report download: {}", e);
                        error.set(Some(e));
                    }
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    let site_selector = session.site().is_none().then(|| {
        view! {
            <div class="form-group">
                <label>"Site"</label>
                <select on:change=move |ev| {
                    let site = event_target_value(&ev)
                        .parse::<u8>()
                        .ok()
                        .and_then(|label| SiteId::from_display(label).ok());
                    on_site_change(site);
                }>
                    <option value="">"-- Select site --"</option>
                    {known_sites
                        .iter()
                        .map(|site| {
                            let label = site.display();
                            view! { <option value=label.to_string()>{format!("Site {}", label)}</option> }
                        })
                        .collect_view()}
                </select>
            </div>
        }
    });

    view! {
        <PageFrame page_id="d501_kpi_report--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <h2 class="page__title">"Create report"</h2>
            </div>

            <div class="page__content create-report-container">
                <Flex vertical=true gap=FlexGap::Large>
                    <div class="form-group">
                        <label for="report-name">"Name"</label>
                        <input
                            id="report-name"
                            type="text"
                            placeholder="Enter report name"
                            prop:value=move || draft.with(|d| d.name.clone())
                            on:input=move |ev| {
                                let name = event_target_value(&ev);
                                draft.update(|d| d.name = name);
                            }
                        />
                    </div>

                    {site_selector}

                    <div class="form-group">
                        <label for="language">"Language"</label>
                        <select
                            id="language"
                            on:change=move |ev| {
                                let language = ReportLanguage::from_code(&event_target_value(&ev));
                                draft.update(|d| d.language = language);
                            }
                        >
                            <option value="">"Select Language"</option>
                            {ReportLanguage::all()
                                .into_iter()
                                .map(|lang| view! { <option value=lang.code()>{lang.display_name()}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <label>"Period"</label>
                        <input
                            type="date"
                            on:input=move |ev| {
                                let raw = event_target_value(&ev);
                                if let Some(result) = draft.try_update(|d| d.set_start_date(&raw)) {
                                    date_error.set(result.err());
                                }
                            }
                        />
                        <div>"-"</div>
                        <input
                            type="date"
                            on:input=move |ev| {
                                let raw = event_target_value(&ev);
                                if let Some(result) = draft.try_update(|d| d.set_end_date(&raw)) {
                                    date_error.set(result.err());
                                }
                            }
                        />
                    </Flex>
                    {move || date_error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}

                    <div class="form-group">
                        <label for="operation">"Aggregation Operation"</label>
                        <select
                            id="operation"
                            on:change=move |ev| {
                                let op = AggregationOp::from_code(&event_target_value(&ev));
                                draft.update(|d| d.operation = op);
                            }
                        >
                            <option value="">"Select Operation"</option>
                            {AggregationOp::all()
                                .into_iter()
                                .map(|op| view! { <option value=op.code()>{op.display_name()}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="form-group">
                        <label>"Select KPIs"</label>
                        <CatalogSelect
                            catalog=Signal::derive(move || catalog_loader.with(|c| c.view().clone()))
                            selected=Signal::derive(move || draft.with(|d| d.kpi_ids.clone()))
                            on_change=Callback::new(move |ids: Vec<KpiId>| draft.update(|d| d.kpi_ids = ids))
                            multiple=true
                        />
                    </div>

                    <div class="button-container">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=on_generate
                            disabled=loading
                        >
                            {move || if loading.get() { "Generating..." } else { "Generate Report" }}
                        </Button>
                        {move || error.get().map(|err| view! { <p class="error-message">{err}</p> })}
                    </div>
                </Flex>
            </div>
        </PageFrame>
    }
}
