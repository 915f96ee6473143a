#![no_std]

//! A streaming decoder for quoted, comma-delimited row data.
//!
//! Swather splits a document into rows of fields in a single pass, holding no
//! more than the row in progress. The dialect it accepts is the loose one
//! served by line-oriented HTTP APIs rather than strict CSV: a quoted region
//! may sit anywhere inside a field, a backslash inside quotes is retained
//! verbatim along with the byte it precedes, and rows may end in `\n`,
//! `\r\n`, or a bare `\r`.
//!
//! Most users should begin with the functions, traits, and derive macro in
//! the [`avec`] module. If these prove insufficient, consider driving the
//! scanner directly as described in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader-based decoder (default).

extern crate alloc;

pub mod avec;
pub mod sans;
