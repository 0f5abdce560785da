use serde::{Deserialize, Serialize};

/// Language a generated report is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLanguage {
    Ita,
    Eng,
    Fr,
}

impl ReportLanguage {
    pub fn code(&self) -> &'static str {
        match self {
            ReportLanguage::Ita => "ita",
            ReportLanguage::Eng => "eng",
            ReportLanguage::Fr => "fr",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReportLanguage::Ita => "Italian",
            ReportLanguage::Eng => "English",
            ReportLanguage::Fr => "French",
        }
    }

    pub fn all() -> Vec<ReportLanguage> {
        vec![ReportLanguage::Ita, ReportLanguage::Eng, ReportLanguage::Fr]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ita" => Some(ReportLanguage::Ita),
            "eng" => Some(ReportLanguage::Eng),
            "fr" => Some(ReportLanguage::Fr),
            _ => None,
        }
    }
}
