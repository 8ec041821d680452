pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod filter_engine;
pub mod icons;
pub mod list_controls;
pub mod list_utils;
