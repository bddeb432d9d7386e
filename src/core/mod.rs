pub mod auth;
pub mod backup;
pub mod config;
pub mod error;
pub mod filter;
pub mod forms;
pub mod model;
pub mod seed;
pub mod stats;
pub mod store;
pub mod template;
pub mod toast;
