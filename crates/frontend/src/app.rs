use crate::dashboards::{KpiDashboard, ReportPage};
use crate::shared::config::{load_config, ClientConfig};
use crate::system::session::context::SessionProvider;
use crate::system::session::storage;
use leptos::prelude::*;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppTab {
    Dashboard,
    Report,
}

#[component]
pub fn App() -> impl IntoView {
    let config = load_config(storage::get_api_base_override()).unwrap_or_else(|e| {
        log::error!("Failed to load configuration: {}", e);
        ClientConfig::default()
    });

    let tab = RwSignal::new(AppTab::Dashboard);

    view! {
        <SessionProvider config=config>
            <div class="app-shell">
                <Flex class="app-shell__tabs" gap=FlexGap::Small>
                    <Button
                        appearance=move || if tab.get() == AppTab::Dashboard { ButtonAppearance::Primary } else { ButtonAppearance::Subtle }
                        on_click=move |_| tab.set(AppTab::Dashboard)
                    >
                        "Dashboard"
                    </Button>
                    <Button
                        appearance=move || if tab.get() == AppTab::Report { ButtonAppearance::Primary } else { ButtonAppearance::Subtle }
                        on_click=move |_| tab.set(AppTab::Report)
                    >
                        "Reports"
                    </Button>
                </Flex>
                {move || match tab.get() {
                    AppTab::Dashboard => view! { <KpiDashboard /> }.into_any(),
                    AppTab::Report => view! { <ReportPage /> }.into_any(),
                }}
            </div>
        </SessionProvider>
    }
}
