//! # seedbed-fixture
//!
//! Fixture document model and resolver for seedbed.
//!
//! A fixture document is a YAML mapping with three kinds of top-level keys:
//!
//! - `include` — a path (or ordered list of paths) to other documents whose
//!   content is merged before this document's own content;
//! - `templates` — a list of named, per-table field maps that rows can
//!   inherit from via `extends`;
//! - everything else — a table name mapping to a list of rows.
//!
//! ```yaml
//! include: common.yml
//!
//! templates:
//!   - table: public.users
//!     name: base
//!     fields:
//!       active: true
//!       created_at: $eval(SELECT NOW())
//!
//! public.users:
//!   - id: 1
//!     extends: base
//!     email: admin@example.com
//! ```
//!
//! [`resolve`](resolver::resolve) turns a document tree into a single
//! [`Dataset`]: includes are resolved depth-first in declaration order,
//! templates are flattened into each row, and rows from different sources
//! are merged by their `id` value (the most recently merged row wins).

pub mod document;
pub mod error;
pub mod resolver;
pub mod table;
pub mod template;
pub mod value;

// Re-exports
pub use document::{Dataset, Row};
pub use error::{FixtureError, FixtureResult};
pub use resolver::{ResolveOptions, resolve};
pub use table::TableRef;
pub use template::{Template, TemplateRegistry};
pub use value::Value;
