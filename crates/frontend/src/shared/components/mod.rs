pub mod filter_panel;
pub mod multi_select;
pub mod pagination_controls;
pub mod saved_filters;
pub mod ui;
