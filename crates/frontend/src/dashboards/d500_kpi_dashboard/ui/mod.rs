pub mod base_chart;
pub mod dashboard;
pub mod widget_card;
pub mod widget_panel;

pub use dashboard::KpiDashboard;
