pub mod changelog;
pub mod config;
pub mod domain;
pub mod error;
pub mod history;
pub mod patch;
pub mod publish;
pub mod report;
pub mod ui;
pub mod warning;
pub mod workflow;

pub use error::{Result, UpdateVersionError};
