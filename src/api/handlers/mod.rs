//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod deactivate;
pub mod health;
pub mod info;
pub mod redirect;
pub mod shorten;
pub mod users;

pub use deactivate::deactivate_handler;
pub use health::health_handler;
pub use info::{my_stats_handler, stats_handler, url_list_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use users::{login_handler, logout_handler, register_handler};
