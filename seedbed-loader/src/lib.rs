//! # seedbed-loader
//!
//! The seedbed load engine.
//!
//! This crate ties fixture resolution to a database backend:
//!
//! ```text
//! ┌──────────────┐     ┌────────────────┐     ┌─────────────┐
//! │ Fixture Doc  │────▶│ Dep. Graph     │────▶│ Topo Sort   │
//! └──────────────┘     └────────────────┘     └─────────────┘
//!                                                    │
//!                                                    ▼
//!                      ┌────────────────┐     ┌─────────────┐
//!                      │ Backend (SQL)  │◀────│ Loader      │
//!                      └────────────────┘     └─────────────┘
//! ```
//!
//! [`Loader::load`] resolves a document, extracts the foreign-key
//! dependency graph from the live catalog, sorts the fixture's tables,
//! and applies truncate / insert / reset-sequence inside one transaction.
//! Backends implement the [`Backend`] trait; one implementation exists
//! per SQL dialect (see `seedbed-postgres` and `seedbed-mysql`).

pub mod backend;
pub mod error;
pub mod graph;
pub mod loader;

// Re-exports
pub use backend::Backend;
pub use error::{LoadError, LoadResult};
pub use graph::DependencyGraph;
pub use loader::{LoadOptions, LoadReport, Loader};
