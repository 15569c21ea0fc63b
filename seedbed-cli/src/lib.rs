//! seedbed CLI - command-line interface for the seedbed fixture loader.
//!
//! This crate provides the `seedbed` binary: loading fixture documents
//! into a database in dependency-safe order, with dry-run previews.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
