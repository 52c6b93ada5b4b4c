//! Bilingual (English/Chinese) conference website server.
//!
//! The engineering core is the i18n layer in [`i18n`]: locale-aware path
//! routing, translation lookup with fallback, and language-switch
//! preference handling. [`server`] wraps it in a thin axum serving layer.

pub mod config;
pub mod i18n;
pub mod server;
