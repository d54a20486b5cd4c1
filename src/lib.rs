pub mod api;
pub mod config;
pub mod detail;
pub mod errors;
pub mod models;
pub mod phases;
pub mod tasks;
pub mod ui;
