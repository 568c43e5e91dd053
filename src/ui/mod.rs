//! Terminal front end: entity tabs, the records table, the add/edit form
//! and the delete confirmation, driven by [`controller::ViewController`].

pub mod app;
pub mod controller;
pub mod dialog;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod panel;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::run;
