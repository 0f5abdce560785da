pub mod catalog_select;
pub mod series_chart;
