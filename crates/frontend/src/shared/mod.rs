pub mod advanced_filter;
pub mod api_utils;
pub mod browser;
pub mod clipboard;
pub mod components;
pub mod config;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod notices;
