use contracts::shared::kpi::KpiId;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlOptionElement, HtmlSelectElement};

use crate::dashboards::d500_kpi_dashboard::catalog::CatalogView;

fn selected_values(ev: &leptos::ev::Event) -> Vec<String> {
    let Some(select) = ev
        .target()
        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
    else {
        return Vec::new();
    };

    let options = select.selected_options();
    (0..options.length())
        .filter_map(|i| options.item(i))
        .filter_map(|el| el.dyn_into::<HtmlOptionElement>().ok())
        .map(|opt| opt.value())
        .filter(|v| !v.is_empty())
        .collect()
}

/// KPI selector rendering the catalog's loading / error / empty / populated states
#[component]
pub fn CatalogSelect(
    #[prop(into)] catalog: Signal<CatalogView>,
    #[prop(into)] selected: Signal<Vec<KpiId>>,
    on_change: Callback<Vec<KpiId>>,
    #[prop(optional)] multiple: bool,
) -> impl IntoView {
    move || match catalog.get() {
        CatalogView::Idle => view! {
            <div class="catalog-select catalog-select--idle">"Select a site to load its KPIs"</div>
        }
        .into_any(),
        CatalogView::Loading => view! {
            <Flex gap=FlexGap::Small class="catalog-select catalog-select--loading">
                <Spinner />
                <span>"Loading KPIs..."</span>
            </Flex>
        }
        .into_any(),
        CatalogView::Failed(msg) => view! {
            <div class="catalog-select catalog-select--error">
                <strong>"Error loading KPIs: "</strong>
                {msg}
            </div>
        }
        .into_any(),
        CatalogView::Empty => view! {
            <div class="catalog-select catalog-select--empty">"No KPIs available for this site"</div>
        }
        .into_any(),
        CatalogView::Populated(items) => {
            let current = selected.get();
            view! {
                <select
                    class="catalog-select"
                    multiple=multiple
                    on:change=move |ev| {
                        let ids = selected_values(&ev).iter().map(|v| KpiId::new(v)).collect();
                        on_change.run(ids);
                    }
                >
                    {(!multiple).then(|| view! { <option value="">"-- Select KPI --"</option> })}
                    {items
                        .into_iter()
                        .map(|kpi| {
                            let is_selected = current.contains(&kpi.id);
                            view! {
                                <option value=kpi.id.0.clone() selected=is_selected>
                                    {kpi.name}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                {multiple.then(|| view! { <small>"Press ctrl to select multiple"</small> })}
            }
            .into_any()
        }
    }
}
