pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod youtube;
