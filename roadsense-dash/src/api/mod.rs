//! HTTP API handlers for roadsense-dash

pub mod buildinfo;
pub mod error;
pub mod events;
pub mod health;
pub mod map;
pub mod ui;

pub use buildinfo::get_build_info;
pub use error::ApiError;
pub use events::{get_date_range, get_events, refresh};
pub use health::health_routes;
pub use map::{get_legend, get_map_config};
pub use ui::{serve_app_js, serve_index};
