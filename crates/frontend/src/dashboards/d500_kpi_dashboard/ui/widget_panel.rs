use contracts::enums::aggregation_op::AggregationOp;
use contracts::enums::granularity::Granularity;
use contracts::enums::scope_mode::ScopeMode;
use contracts::shared::kpi::KpiId;
use contracts::system::session::SiteId;
use leptos::prelude::*;
use thaw::*;

use crate::dashboards::d500_kpi_dashboard::panel::WidgetPanel;
use crate::shared::components::catalog_select::CatalogSelect;

/// Widget creation form
#[component]
pub fn WidgetPanelView(
    panel: RwSignal<WidgetPanel>,
    known_sites: Vec<SiteId>,
    show_scope_selector: bool,
    on_site_change: Callback<Option<SiteId>>,
    on_submit: Callback<()>,
    #[prop(into)] submit_error: Signal<Option<String>>,
) -> impl IntoView {
    let date_error = RwSignal::new(None::<String>);

    let catalog = Signal::derive(move || panel.with(|p| p.catalog().clone()));
    let selected_kpi = Signal::derive(move || {
        panel.with(|p| p.draft().kpi_id().cloned().into_iter().collect::<Vec<_>>())
    });
    let missing = Signal::derive(move || {
        panel.with(|p| {
            p.draft()
                .missing_fields()
                .iter()
                .map(|f| f.label())
                .collect::<Vec<_>>()
                .join(", ")
        })
    });

    let on_kpi_change = Callback::new(move |ids: Vec<KpiId>| {
        panel.update(|p| p.draft_mut().set_kpi(ids.into_iter().next()));
    });

    let on_start_date = move |raw: String| {
        let result = panel
            .try_update(|p| p.draft_mut().set_start_date(&raw))
            .unwrap_or(Ok(()));
        date_error.set(result.err());
    };

    let on_end_date = move |raw: String| {
        let result = panel
            .try_update(|p| p.draft_mut().set_end_date(&raw))
            .unwrap_or(Ok(()));
        date_error.set(result.err());
    };

    let scope_selector = show_scope_selector.then(|| {
        let site_options = known_sites
            .iter()
            .map(|&site| {
                let label = site.display();
                view! {
                    <option
                        value=label.to_string()
                        prop:selected=move || panel.with(|p| p.draft().site() == Some(site))
                    >
                        {format!("Site {}", label)}
                    </option>
                }
            })
            .collect_view();

        view! {
            <div class="form-group">
                <label>"Scope"</label>
                <select on:change=move |ev| {
                    if let Some(mode) = ScopeMode::from_code(&event_target_value(&ev)) {
                        panel.update(|p| p.draft_mut().set_scope_mode(mode));
                    }
                }>
                    {[ScopeMode::BySite, ScopeMode::ByCategory]
                        .into_iter()
                        .map(|mode| view! {
                            <option
                                value=mode.code()
                                prop:selected=move || panel.with(|p| p.draft().scope_mode() == mode)
                            >
                                {mode.display_name()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </div>
            <div class="form-group">
                <label>"Site"</label>
                <select on:change=move |ev| {
                    let site = event_target_value(&ev)
                        .parse::<u8>()
                        .ok()
                        .and_then(|label| SiteId::from_display(label).ok());
                    on_site_change.run(site);
                }>
                    <option
                        value=""
                        prop:selected=move || panel.with(|p| p.draft().site().is_none())
                    >
                        "-- Select site --"
                    </option>
                    {site_options}
                </select>
            </div>
        }
    });

    view! {
        <div class="widget-panel">
            <Flex vertical=true gap=FlexGap::Large>
                {scope_selector}

                <div class="form-group">
                    <label>"KPI"</label>
                    <CatalogSelect catalog=catalog selected=selected_kpi on_change=on_kpi_change />
                </div>

                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <label>"Period"</label>
                    <input
                        type="date"
                        prop:value=move || panel.with(|p| p.draft().start_date_text())
                        on:input=move |ev| on_start_date(event_target_value(&ev))
                    />
                    <div>"-"</div>
                    <input
                        type="date"
                        prop:value=move || panel.with(|p| p.draft().end_date_text())
                        on:input=move |ev| on_end_date(event_target_value(&ev))
                    />
                </Flex>
                {move || date_error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}

                <Flex gap=FlexGap::Small>
                    <div class="form-group">
                        <label>"Aggregation"</label>
                        <select on:change=move |ev| {
                            let op = AggregationOp::from_code(&event_target_value(&ev));
                            panel.update(|p| p.draft_mut().set_operation(op));
                        }>
                            <option
                                value=""
                                prop:selected=move || panel.with(|p| p.draft().operation().is_none())
                            >
                                "-- Operation --"
                            </option>
                            {AggregationOp::all()
                                .into_iter()
                                .map(|op| view! {
                                    <option
                                        value=op.code()
                                        prop:selected=move || panel.with(|p| p.draft().operation() == Some(op))
                                    >
                                        {op.display_name()}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label>"Granularity"</label>
                        <select on:change=move |ev| {
                            let granularity = event_target_value(&ev)
                                .parse::<u32>()
                                .ok()
                                .and_then(Granularity::from_days);
                            panel.update(|p| p.draft_mut().set_granularity(granularity));
                        }>
                            <option
                                value=""
                                prop:selected=move || panel.with(|p| p.draft().granularity().is_none())
                            >
                                "-- Granularity --"
                            </option>
                            {Granularity::all()
                                .into_iter()
                                .map(|g| view! {
                                    <option
                                        value=g.days().to_string()
                                        prop:selected=move || panel.with(|p| p.draft().granularity() == Some(g))
                                    >
                                        {g.display_name()}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                    </div>
                </Flex>

                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| on_submit.run(())>
                        "Add widget"
                    </Button>
                    {move || {
                        let text = missing.get();
                        (!text.is_empty()).then(|| view! {
                            <span class="widget-panel__hint">{format!("Required: {}", text)}</span>
                        })
                    }}
                </Flex>

                {move || submit_error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}
            </Flex>
        </div>
    }
}
