use contracts::system::session::Session;
use leptos::prelude::*;

use super::storage;
use crate::shared::api_utils::GlooTransport;
use crate::shared::config::ClientConfig;

/// Everything the dashboard pages need from the surrounding app
#[derive(Clone)]
pub struct SessionContext {
    pub session: Session,
    pub config: ClientConfig,
    pub transport: GlooTransport,
}

impl SessionContext {
    pub fn new(session: Session, config: ClientConfig) -> Self {
        let transport = GlooTransport::new(&config.api.base_url);
        Self {
            session,
            config,
            transport,
        }
    }

    /// Token to attach to a request issued right now.
    ///
    /// Persisted storage wins so a token rotated by the login flow is picked up.
    pub fn request_token(&self) -> Option<String> {
        storage::get_token().or_else(|| self.session.token().map(str::to_string))
    }
}

/// Provides `SessionContext` to children, or a notice when no session is stored
#[component]
pub fn SessionProvider(config: ClientConfig, children: ChildrenFn) -> impl IntoView {
    let session = match storage::load_session() {
        Ok(session) => {
            log::info!(
                "Session restored: role={} site={:?}",
                session.role(),
                session.site().map(|s| s.display())
            );
            Some(session)
        }
        Err(e) => {
            log::warn!("No usable session: {}", e);
            None
        }
    };

    match session {
        Some(session) => {
            provide_context(SessionContext::new(session, config));
            children().into_any()
        }
        None => view! {
            <div class="session-missing">"Not authenticated. Please login."</div>
        }
        .into_any(),
    }
}

/// Hook to access the session context
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionProvider not found in component tree")
}
