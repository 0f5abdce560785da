use serde::{Deserialize, Serialize};

/// Aggregation operator applied by the compute endpoint to each bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationOp {
    Avg,
    Min,
    Max,
    Sum,
}

impl AggregationOp {
    /// Value sent as `granularity_op` / `operation` query parameter
    pub fn code(&self) -> &'static str {
        match self {
            AggregationOp::Avg => "avg",
            AggregationOp::Min => "min",
            AggregationOp::Max => "max",
            AggregationOp::Sum => "sum",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AggregationOp::Avg => "Average",
            AggregationOp::Min => "Min",
            AggregationOp::Max => "Max",
            AggregationOp::Sum => "Summary",
        }
    }

    pub fn all() -> Vec<AggregationOp> {
        vec![
            AggregationOp::Avg,
            AggregationOp::Min,
            AggregationOp::Max,
            AggregationOp::Sum,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "avg" => Some(AggregationOp::Avg),
            "min" => Some(AggregationOp::Min),
            "max" => Some(AggregationOp::Max),
            "sum" => Some(AggregationOp::Sum),
            _ => None,
        }
    }
}

impl std::fmt::Display for AggregationOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
