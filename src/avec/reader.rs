//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::{self, BufReader, ErrorKind, Read};

use alloc::vec::Vec;

use thiserror::Error;

use crate::sans::{Row, Scanner, Step};

use super::{FromRows, Skipped};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Decode rows from a reader of a document, publishing to a receiver.
///
/// Returns the rows the receiver rejected. A failure of the reader itself
/// ends the decode; rows published before the failure stay delivered.
///
/// This method is also re-exported as `swather::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, o: &mut impl FromRows) -> Result<Vec<Skipped>, Error> {
    let mut skipped = Vec::new();

    for (i, row) in rows(r).enumerate() {
        let row = row?;

        if let Err(error) = o.add_row(&row) {
            skipped.push(Skipped { row: i, error });
        }
    }

    Ok(skipped)
}

/// Iterate over the rows of a document read from a reader.
///
/// The iterator is finite and not restartable: it ends at the reader's end
/// of input, discarding an unterminated trailing row, and after yielding a
/// read failure it yields nothing further.
///
/// _Requires Cargo feature `std`._
pub fn rows<R: Read>(r: R) -> Rows<R> {
    Rows {
        reader: BufReader::new(r),
        unread: None,
        scanner: Scanner::new(),
        failed: false,
    }
}

/// Iterator over the rows of a document read from a reader.
pub struct Rows<R: Read> {
    reader: BufReader<R>,
    unread: Option<u8>,
    scanner: Scanner,
    failed: bool,
}

impl<R: Read> Iterator for Rows<R> {
    type Item = Result<Row, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let byte = match self.take() {
                Ok(Some(byte)) => byte,
                Ok(None) => return None,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err.into()));
                }
            };

            match self.scanner.advance(byte) {
                Step::Continue => {}
                Step::Row(row) => return Some(Ok(row)),
                Step::Unread(row) => {
                    self.unread = Some(byte);
                    return Some(Ok(row));
                }
            }
        }
    }
}

impl<R: Read> Rows<R> {
    /// Take one byte from the reader, preferring the unread byte.
    fn take(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.unread.take() {
            return Ok(Some(byte));
        }

        let mut buf = [0; 1];

        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}
