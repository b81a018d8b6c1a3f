pub mod app;
pub mod config;
pub mod controller;
mod effects;
pub mod logging;
pub mod ui;
