//! Core functionality shared by the CLI and embedding callers

pub mod averages;
pub mod config;
pub mod export;
pub mod models;
pub mod organizer;
pub mod overview;
pub mod store;
pub mod validation;

