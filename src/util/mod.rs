//! Utility helpers shared across pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards and display formatting are kept out of the page models so
//! every front-end renders amounts and redirects the same way.

pub mod auth;
pub mod format;
