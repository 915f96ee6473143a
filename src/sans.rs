//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for advanced applications that need fine control
//! over decoder internals. See [`crate::avec`] for implementations covering
//! common decoding patterns.
//!
//! # Architecture
//!
//! The machine is held by a [`Scanner`], which owns the scan mode, the bytes
//! of the field being accumulated, and the fields of the row in progress.
//! Feed it the document one byte at a time, in order, with [`Scanner::advance`];
//! each call returns a [`Step`] describing whether the byte completed a row.
//!
//! The scanner performs no reading of its own, and some areas of the decoding
//! process are left to the driver:
//!
//! - Reading bytes from the correct place in the document, in order, each
//! byte exactly once.
//!
//! - Unreading the byte after a [`Step::Unread`], so the next call to
//! `advance` sees it fresh. One byte of lookahead is all that is ever
//! required.
//!
//! - Ending decoding at end of input. There is no terminal state: the driver
//! simply stops, and a partially accumulated trailing row is discarded.
//!
//! Implementers are recommended to begin by studying and modifying a decoder
//! from the [`crate::avec`] module.

use alloc::{string::String, vec::Vec};
use core::mem;

/// A completed row: its fields, in document order.
pub type Row = Vec<String>;

const QUOTE: u8 = b'"';
const COMMA: u8 = b',';
const ESCAPE: u8 = b'\\';
const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// How the last-consumed byte conditions the interpretation of the next.
#[derive(Debug)]
enum State {
    /// Between quoted regions; delimiters are significant.
    Default,
    /// Inside a quoted region; commas and newlines are ordinary text.
    Quoted,
    /// Immediately after an escape inside a quoted region.
    Escaped,
    /// Immediately after a carriage return, awaiting a possible line feed.
    CarriageReturn,
}

/// Outcome of advancing the scanner by one byte.
#[derive(Debug)]
pub enum Step {
    /// The byte was consumed without completing a row.
    Continue,
    /// The byte was consumed and completed a row.
    Row(Row),
    /// A row was completed, and the byte must be unread and scanned again.
    ///
    /// Produced when a bare carriage return turns out to be a row terminator:
    /// the byte that disambiguated it belongs to the next row.
    Unread(Row),
}

/// Entrypoint to the finite-state machine.
#[derive(Debug)]
pub struct Scanner {
    state: State,
    field: Vec<u8>,
    row: Row,
}

impl Scanner {
    /// Create a scanner positioned at the start of a document.
    pub fn new() -> Self {
        Self {
            state: State::Default,
            field: Vec::new(),
            row: Vec::new(),
        }
    }

    /// Advance the machine by one byte.
    ///
    /// Closing a quote does not close the field: a field may interleave
    /// quoted and unquoted regions, so `ab"cd"ef` accumulates as `abcdef`.
    /// Only a comma or a row terminator ends a field.
    pub fn advance(&mut self, byte: u8) -> Step {
        match self.state {
            State::Default => match byte {
                QUOTE => {
                    self.state = State::Quoted;
                    Step::Continue
                }
                COMMA => {
                    self.close_field();
                    Step::Continue
                }
                CR => {
                    self.state = State::CarriageReturn;
                    Step::Continue
                }
                LF => Step::Row(self.close_row()),
                _ => {
                    self.field.push(byte);
                    Step::Continue
                }
            },
            State::Quoted => match byte {
                QUOTE => {
                    self.state = State::Default;
                    Step::Continue
                }
                ESCAPE => {
                    self.state = State::Escaped;
                    Step::Continue
                }
                _ => {
                    self.field.push(byte);
                    Step::Continue
                }
            },
            State::Escaped => {
                // Escapes are never decoded; the pair is kept as received.
                self.field.push(ESCAPE);
                self.field.push(byte);
                self.state = State::Quoted;
                Step::Continue
            }
            State::CarriageReturn => {
                self.state = State::Default;

                if byte == LF {
                    Step::Row(self.close_row())
                } else {
                    Step::Unread(self.close_row())
                }
            }
        }
    }

    /// Append the accumulated field to the row in progress.
    ///
    /// Field bytes become text here, substituting malformed UTF-8. Delimiters
    /// are ASCII and cannot occur inside a multi-byte sequence, so a field
    /// boundary never lands mid-character.
    fn close_field(&mut self) {
        let field = String::from_utf8_lossy(&self.field).into_owned();
        self.row.push(field);
        self.field.clear();
    }

    /// Close the accumulated field and take the row in progress.
    fn close_row(&mut self) -> Row {
        self.close_field();
        mem::take(&mut self.row)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
