use leptos::prelude::*;
use thaw::*;

use crate::dashboards::d500_kpi_dashboard::registry::{Widget, WidgetId, WidgetStatus};
use crate::shared::components::series_chart::SeriesChart;
use crate::shared::date_utils::format_range;

fn describe(widget: &Widget) -> String {
    let query = &widget.query;
    let operation = query.operation.map(|op| op.display_name()).unwrap_or("—");
    let granularity = query
        .granularity
        .map(|g| g.display_name())
        .unwrap_or("—");
    format!(
        "{} · {} · {}",
        format_range(query.start_date, query.end_date),
        operation,
        granularity
    )
}

/// One ad-hoc widget; its error state never leaks outside the card
#[component]
pub fn WidgetCard(
    #[prop(into)] widget: Signal<Option<Widget>>,
    on_remove: Callback<WidgetId>,
) -> impl IntoView {
    move || {
        widget.get().map(|w| {
            let id = w.id;
            let title = format!("{} · Site {}", w.query.kpi_id, w.query.site.display());
            let meta = describe(&w);

            let body = match w.status {
                WidgetStatus::Loading => view! {
                    <Flex gap=FlexGap::Small class="widget-card__loading">
                        <Spinner />
                        <span>"Loading..."</span>
                    </Flex>
                }
                .into_any(),
                WidgetStatus::Ready(series) => view! { <SeriesChart series=series /> }.into_any(),
                WidgetStatus::Failed(msg) => view! {
                    <div class="widget-card__error">
                        <strong>"⚠ "</strong>
                        {msg}
                    </div>
                }
                .into_any(),
            };

            view! {
                <div class="widget-card">
                    <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                        <strong class="widget-card__title">{title}</strong>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| on_remove.run(id)
                        >
                            "✕"
                        </Button>
                    </Flex>
                    <div class="widget-card__meta">{meta}</div>
                    {body}
                </div>
            }
        })
    }
}
