//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module are suited to decoding rows from readers and
//! data slices, publishing to the [`FromRows`] and [`FromRow`] traits.
//!
//! In many cases (when rows have a fixed column layout), [`FromRow`] can be
//! derived. See the [`FromRow`](macro@FromRow) macro for details.

use alloc::{boxed::Box, string::String, vec::Vec};

use thiserror::Error;

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

/// Derive [`FromRow`] for a struct built from the fields of a row.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// To fill a struct field from a column, add the `field(N)` attribute, where
/// `N` is the zero-based index of the column. The column's text is converted
/// with `FromStr`; a missing column reports [`RowError::Missing`], and a
/// failed conversion [`RowError::Invalid`]. Struct fields without an
/// attribute are filled from their type's `Default`.
///
/// ```
/// #[derive(Debug, Default, FromRow)]
/// struct Illust {
///     #[field(0)]
///     id: u32,
///     #[field(3)]
///     title: String,
///     #[field(17)]
///     views: u32,
/// }
/// ```
///
/// To convert through something other than `FromStr`, supply a converter
/// closure taking the column's text and returning a `Result`. Any error type
/// may be returned; it is boxed into [`RowError::Invalid`].
///
/// ```
/// #[derive(Debug, Default, FromRow)]
/// struct Illust {
///     #[field(13, |s: &str| Ok::<_, Infallible>(s.split(' ').map(String::from).collect()))]
///     tags: Vec<String>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use swather_derive::FromRow;

/// Receive the rows of a document.
///
/// The default use is publishing into a `Vec` of a type implementing
/// [`FromRow`]; implement this trait directly to receive rows without
/// building values, or to route fields somewhere other than a collection.
pub trait FromRows {
    /// Receive the fields of one row.
    ///
    /// Called once per row, in document order. The fields are borrowed for
    /// the duration of the call; an implementation retaining data must copy
    /// it out. Returning an error marks the row as skipped without ending
    /// the decode.
    fn add_row(&mut self, fields: &[String]) -> Result<(), RowError>;
}

/// Build a value from the fields of one row, indexed positionally.
///
/// See the [`FromRow`](macro@FromRow) derive macro for an automatic
/// implementation of this trait.
pub trait FromRow: Sized {
    /// Build a value from the fields of one row.
    fn from_row(fields: &[String]) -> Result<Self, RowError>;
}

/// Collect every row that converts, in document order.
impl<T: FromRow> FromRows for Vec<T> {
    fn add_row(&mut self, fields: &[String]) -> Result<(), RowError> {
        self.push(T::from_row(fields)?);
        Ok(())
    }
}

/// Errors building a value from the fields of a row.
#[derive(Debug, Error)]
pub enum RowError {
    /// The row has no field at a required index.
    #[error("Missing field at index {0}.")]
    Missing(usize),
    /// A field's text failed to convert to its target.
    #[error("Invalid field at index {0}: {1}.")]
    Invalid(usize, Box<dyn core::error::Error + Send + Sync>),
}

impl RowError {
    /// Wrap a conversion failure with the index of the field it occurred at.
    pub fn invalid(
        index: usize,
        source: impl core::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Invalid(index, Box::new(source))
    }
}

/// A row rejected by its receiver during a decode call.
///
/// Rejections are collected and returned once the scan completes; they never
/// interrupt it.
#[derive(Debug)]
pub struct Skipped {
    /// Zero-based index of the row in the document.
    pub row: usize,
    /// The failure the receiver reported.
    pub error: RowError,
}
