pub mod action;
pub mod app;
pub mod commands;
pub mod config;
pub mod domain;
pub mod event;
pub mod store;
pub mod theme;
pub mod tui;
pub mod widgets;
pub mod worker;
