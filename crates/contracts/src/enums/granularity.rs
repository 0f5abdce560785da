use serde::{Deserialize, Serialize};

/// Bucket size, in days, for the compute endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn days(&self) -> u32 {
        match self {
            Granularity::Daily => 1,
            Granularity::Weekly => 7,
            Granularity::Monthly => 30,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Granularity::Daily => "1 day",
            Granularity::Weekly => "7 days",
            Granularity::Monthly => "30 days",
        }
    }

    pub fn all() -> Vec<Granularity> {
        vec![Granularity::Daily, Granularity::Weekly, Granularity::Monthly]
    }

    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            1 => Some(Granularity::Daily),
            7 => Some(Granularity::Weekly),
            30 => Some(Granularity::Monthly),
            _ => None,
        }
    }
}

impl TryFrom<u32> for Granularity {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Granularity::from_days(days).ok_or_else(|| format!("Unsupported granularity: {} days", days))
    }
}

impl From<Granularity> for u32 {
    fn from(value: Granularity) -> Self {
        value.days()
    }
}
