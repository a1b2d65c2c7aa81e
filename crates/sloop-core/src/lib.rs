//! Core library for Swagger Sloop.
//!
//! Contains the doc page renderer, the placeholder template parser, HTML
//! escaping, the bundled and on-disk asset sources, the write-once asset
//! cache, and the settings types. This crate knows nothing about HTTP; the
//! `sloop-server` crate wires it into an Axum router.

pub mod assets;
pub mod clock;
pub mod config;
pub mod error;
pub mod escape;
pub mod render;
pub mod template;
