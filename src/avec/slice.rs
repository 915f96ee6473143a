//! Slice-based decoder implementation.

use alloc::vec::Vec;

use crate::sans::{Row, Scanner, Step};

use super::{FromRows, Skipped};

/// Decode rows from a slice of a document, publishing to a receiver.
///
/// Returns the rows the receiver rejected. Reaching the end of the slice
/// ends the decode, discarding an unterminated trailing row.
///
/// This method is also re-exported as `swather::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl FromRows) -> Vec<Skipped> {
    let mut skipped = Vec::new();

    for (i, row) in rows(r).enumerate() {
        if let Err(error) = o.add_row(&row) {
            skipped.push(Skipped { row: i, error });
        }
    }

    skipped
}

/// Iterate over the rows of a document in a slice.
pub fn rows(r: &[u8]) -> Rows<'_> {
    Rows {
        slice: r,
        index: 0,
        scanner: Scanner::new(),
    }
}

/// Iterator over the rows of a document in a slice.
pub struct Rows<'a> {
    slice: &'a [u8],
    index: usize,
    scanner: Scanner,
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        while let Some(&byte) = self.slice.get(self.index) {
            self.index += 1;

            match self.scanner.advance(byte) {
                Step::Continue => {}
                Step::Row(row) => return Some(row),
                Step::Unread(row) => {
                    // Step back one byte so the next call re-scans it.
                    self.index -= 1;
                    return Some(row);
                }
            }
        }

        None
    }
}
