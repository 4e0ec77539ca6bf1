// Library root: re-exports all modules so integration tests can `use photopoet::*`.

pub mod action;
pub mod api;
pub mod app;
pub mod components;
pub mod composer;
pub mod config;
pub mod logging;
pub mod photo;
pub mod platform;
pub mod theme;
pub mod tui;
pub mod ui;
