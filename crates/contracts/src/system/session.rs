use crate::enums::role::Role;
use serde::{Deserialize, Serialize};

/// Number of manufacturing sites known to the API
pub const SITE_COUNT: u8 = 3;

/// Internal, 0-based site identifier
///
/// Selectors show sites 1-based: label `1` is `SiteId(0)`, label `3` is `SiteId(2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SiteId(u8);

impl SiteId {
    pub fn new(raw: u8) -> Result<Self, String> {
        if raw < SITE_COUNT {
            Ok(Self(raw))
        } else {
            Err(format!(
                "Unknown site {}: expected 0..={}",
                raw,
                SITE_COUNT - 1
            ))
        }
    }

    /// Every site the API knows about, in index order
    pub fn all() -> Vec<SiteId> {
        (0..SITE_COUNT).map(SiteId).collect()
    }

    /// Convert a 1-based selector label into the internal id
    pub fn from_display(label: u8) -> Result<Self, String> {
        match label.checked_sub(1) {
            Some(raw) => Self::new(raw),
            None => Err("Site labels start at 1".to_string()),
        }
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    /// 1-based label shown in selectors
    pub fn display(&self) -> u8 {
        self.0 + 1
    }
}

impl TryFrom<u8> for SiteId {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        SiteId::new(raw)
    }
}

impl From<SiteId> for u8 {
    fn from(value: SiteId) -> Self {
        value.0
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who is looking at the dashboard
///
/// Fixed for the duration of a visit. `Role::Smo` sessions never carry a site,
/// `Role::Ffm` sessions always do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    role: Role,
    site: Option<SiteId>,
    token: Option<String>,
}

impl Session {
    pub fn ffm(site: SiteId, token: impl Into<String>) -> Self {
        Self {
            role: Role::Ffm,
            site: Some(site),
            token: Some(token.into()),
        }
    }

    pub fn smo(token: impl Into<String>) -> Self {
        Self {
            role: Role::Smo,
            site: None,
            token: Some(token.into()),
        }
    }

    /// Build a session from loosely typed parts, enforcing the role/site pairing
    pub fn from_parts(
        role: Role,
        site: Option<SiteId>,
        token: Option<String>,
    ) -> Result<Self, String> {
        match (role, site) {
            (Role::Ffm, None) => Err("FFM session requires a site".to_string()),
            (Role::Smo, Some(site)) => Err(format!(
                "SMO session must not be bound to a site (got {})",
                site
            )),
            _ => Ok(Self { role, site, token }),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn site(&self) -> Option<SiteId> {
        self.site
    }

    /// Bearer credential, `None` when absent or blank
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn is_supervisor(&self) -> bool {
        self.role.is_multi_site()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_display_mapping() {
        let site = SiteId::from_display(1).unwrap();
        assert_eq!(site.index(), 0);
        assert_eq!(site.display(), 1);
        assert_eq!(SiteId::from_display(3).unwrap().index(), 2);
        assert!(SiteId::from_display(0).is_err());
        assert!(SiteId::from_display(4).is_err());
    }

    #[test]
    fn test_site_range() {
        assert!(SiteId::new(2).is_ok());
        assert!(SiteId::new(3).is_err());
        let all: Vec<u8> = SiteId::all().iter().map(|s| s.index()).collect();
        assert_eq!(all, vec![0, 1, 2]);
    }

    #[test]
    fn test_site_serde_as_integer() {
        let site: SiteId = serde_json::from_str("1").unwrap();
        assert_eq!(site.index(), 1);
        assert_eq!(serde_json::to_string(&site).unwrap(), "1");
        assert!(serde_json::from_str::<SiteId>("7").is_err());
    }

    #[test]
    fn test_session_role_site_pairing() {
        let site = SiteId::new(1).unwrap();
        let ffm = Session::from_parts(Role::Ffm, Some(site), None).unwrap();
        assert!(!ffm.is_supervisor());
        assert!(Session::from_parts(Role::Ffm, None, None).is_err());
        assert!(Session::from_parts(Role::Smo, Some(site), None).is_err());

        let smo = Session::from_parts(Role::Smo, None, Some("t".into())).unwrap();
        assert!(smo.is_supervisor());
        assert_eq!(smo.site(), None);
    }

    #[test]
    fn test_blank_token_is_absent() {
        let site = SiteId::new(0).unwrap();
        assert_eq!(Session::ffm(site, "   ").token(), None);
        assert_eq!(Session::ffm(site, "abc").token(), Some("abc"));
        let no_token = Session::from_parts(Role::Smo, None, None).unwrap();
        assert_eq!(no_token.token(), None);
    }
}
