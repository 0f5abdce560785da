use contracts::enums::role::Role;
use contracts::system::session::{Session, SiteId};
use web_sys::window;

const ROLE_KEY: &str = "session_role";
const SITE_KEY: &str = "session_site";
const TOKEN_KEY: &str = "session_token";
const API_BASE_KEY: &str = "kpi_api_base_url";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn get_item(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

/// Bearer token as currently persisted
pub fn get_token() -> Option<String> {
    get_item(TOKEN_KEY).filter(|t| !t.trim().is_empty())
}

/// API base URL override, if any
pub fn get_api_base_override() -> Option<String> {
    get_item(API_BASE_KEY)
}

/// Restore the session written by the login flow
pub fn load_session() -> Result<Session, String> {
    let role_code = get_item(ROLE_KEY).ok_or_else(|| "No session role stored".to_string())?;
    let role = Role::from_code(&role_code).ok_or_else(|| format!("Unknown role: {}", role_code))?;

    let site = match get_item(SITE_KEY).filter(|s| !s.trim().is_empty() && s != "null") {
        Some(raw) => {
            let parsed = raw
                .trim()
                .parse::<u8>()
                .map_err(|e| format!("Invalid stored site '{}': {}", raw, e))?;
            Some(SiteId::new(parsed)?)
        }
        None => None,
    };

    Session::from_parts(role, site, get_token())
}
