use serde::{Deserialize, Serialize};

/// How a supervisor widget picks its data scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScopeMode {
    ByCategory,
    #[default]
    BySite,
}

impl ScopeMode {
    pub fn code(&self) -> &'static str {
        match self {
            ScopeMode::ByCategory => "byCategory",
            ScopeMode::BySite => "bySite",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ScopeMode::ByCategory => "By category",
            ScopeMode::BySite => "By site",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "byCategory" => Some(ScopeMode::ByCategory),
            "bySite" => Some(ScopeMode::BySite),
            _ => None,
        }
    }
}
