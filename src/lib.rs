//! Configuration-driven records admin client.
//!
//! Entities are described once in [`schema`]; tables, forms and REST
//! calls are all derived from those descriptions.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod schema;
pub mod ui;
pub mod view;
