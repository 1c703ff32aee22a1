pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod menu;
pub mod models;
pub mod prompt;

pub use error::{Result, TodoError};
pub use models::*;
