use serde::{Deserialize, Serialize};

/// Session role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Single-site operator, always bound to one site
    #[serde(rename = "FFM")]
    Ffm,
    /// Multi-site supervisor, not bound to any site
    #[serde(rename = "SMO")]
    Smo,
}

impl Role {
    pub fn code(&self) -> &'static str {
        match self {
            Role::Ffm => "FFM",
            Role::Smo => "SMO",
        }
    }

    /// Parse from the role claim; matching is case-insensitive
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "FFM" => Some(Role::Ffm),
            "SMO" => Some(Role::Smo),
            _ => None,
        }
    }

    pub fn is_multi_site(&self) -> bool {
        matches!(self, Role::Smo)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
