pub mod action;
pub mod activity;
pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod logging;
pub mod shutdown;
pub mod system;
pub mod ui;
