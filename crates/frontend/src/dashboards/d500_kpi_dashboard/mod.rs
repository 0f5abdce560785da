pub mod api;
pub mod catalog;
pub mod composer;
pub mod fetcher;
pub mod panel;
pub mod query_builder;
pub mod registry;
pub mod ui;
