pub mod d500_kpi_dashboard;
pub mod d501_kpi_report;

pub use d500_kpi_dashboard::ui::KpiDashboard;
pub use d501_kpi_report::ui::ReportPage;
