pub mod page;

pub use page::ReportPage;
