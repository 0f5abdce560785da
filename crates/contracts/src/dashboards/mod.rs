pub mod d501_kpi_report;
