pub mod aggregation_op;
pub mod granularity;
pub mod report_language;
pub mod role;
pub mod scope_mode;
