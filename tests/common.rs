#![cfg(feature = "std")]

use std::io::{self, Read};

use csv::ReaderBuilder;
use swather::avec::{self, FromRows, RowError};

#[test]
fn splits_fields_at_commas() {
    let expected = [row(&["a", "b", "c"])];

    assert_eq!(scan_slice(b"a,b,c\n"), expected);
    assert_eq!(scan_reader(b"a,b,c\n"), expected);
}

#[test]
fn keeps_quoted_delimiters_in_field() {
    assert_eq!(scan_slice(b"\"a,b\",c\n"), [row(&["a,b", "c"])]);
    assert_eq!(scan_slice(b"\"a\nb\",c\n"), [row(&["a\nb", "c"])]);
    assert_eq!(scan_slice(b"\"a\r\nb\",c\n"), [row(&["a\r\nb", "c"])]);
}

#[test]
fn concatenates_quoted_and_unquoted_regions() {
    assert_eq!(scan_slice(b"ab\"cd\"ef,g\n"), [row(&["abcdef", "g"])]);
}

#[test]
fn retains_escapes_verbatim() {
    assert_eq!(scan_slice(b"\"a\\\"b\",c\n"), [row(&["a\\\"b", "c"])]);
}

#[test]
fn treats_line_endings_equivalently() {
    let expected = [row(&["x", "y"])];

    assert_eq!(scan_slice(b"x,y\n"), expected);
    assert_eq!(scan_slice(b"x,y\r\n"), expected);

    // A bare carriage return also terminates the row, and the byte that
    // disambiguated it opens the next one.
    let expected = [row(&["x", "y"]), row(&["z"])];

    assert_eq!(scan_slice(b"x,y\rz\n"), expected);
    assert_eq!(scan_reader(b"x,y\rz\n"), expected);
}

#[test]
fn drops_unterminated_trailing_row() {
    assert!(scan_slice(b"").is_empty());
    assert!(scan_slice(b"a,b,c").is_empty());
    assert!(scan_reader(b"a,b,c").is_empty());

    // A document ending mid-quote ends the same way, as does one ending on
    // a carriage return that never received its disambiguating byte.
    assert!(scan_slice(b"\"a,b").is_empty());
    assert!(scan_slice(b"a,b\r").is_empty());
}

#[test]
fn emits_one_empty_field_per_empty_line() {
    assert_eq!(scan_slice(b"\n\n"), [row(&[""]), row(&[""])]);
}

#[test]
fn publishes_rows_in_document_order() {
    let mut document = Vec::new();
    for i in 0..100 {
        document.extend_from_slice(format!("{i},{}\n", i * 2).as_bytes());
    }

    let expected: Vec<Vec<String>> = (0..100)
        .map(|i| row(&[&i.to_string(), &(i * 2).to_string()]))
        .collect();

    assert_eq!(scan_slice(&document), expected);
    assert_eq!(scan_reader(&document), expected);

    let mut transcript = Transcript(Vec::new());
    let skipped = avec::decode_slice(&document, &mut transcript);
    assert!(skipped.is_empty());
    assert_eq!(transcript.0, expected);
}

#[test]
fn decodes_mixed_document() {
    let expected = [row(&["1", "2", "a,b"]), row(&["3", "4", "c"])];

    assert_eq!(scan_slice(b"1,2,\"a,b\"\n3,4,c\n"), expected);
    assert_eq!(scan_reader(b"1,2,\"a,b\"\n3,4,c\n"), expected);
}

#[test]
fn collects_receiver_rejections() {
    let document = b"17,seventeen\nx,unknown\n23,twenty-three\n";

    let mut ids = Identifiers(Vec::new());
    let skipped = avec::decode_slice(document, &mut ids);

    assert_eq!(ids.0, [17, 23]);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].row, 1);
    assert!(matches!(skipped[0].error, RowError::Invalid(0, _)));
}

#[test]
fn propagates_read_failure() {
    let mut transcript = Transcript(Vec::new());
    let result = avec::decode_reader(&mut Failing(b"1,one\n2,two\n3,thr"), &mut transcript);

    // The failure surfaces, and rows published before it stay delivered.
    assert!(result.is_err());
    assert_eq!(transcript.0, [row(&["1", "one"]), row(&["2", "two"])]);
}

#[test]
fn read_failure_ends_iteration() {
    let mut rows = avec::reader::rows(Failing(b"1,one\n"));

    assert_eq!(rows.next().unwrap().unwrap(), row(&["1", "one"]));
    assert!(rows.next().unwrap().is_err());
    assert!(rows.next().is_none());
}

#[test]
fn decode_matches_csv_reference() {
    const PATH: &str = "fixtures/new-illusts.csv";

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(PATH)
        .unwrap();

    let expected: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
        .collect();

    let data = std::fs::read(PATH).unwrap();
    assert_eq!(scan_slice(&data), expected);

    let mut file = std::fs::File::open(PATH).unwrap();
    let mut transcript = Transcript(Vec::new());
    let skipped = avec::decode_reader(&mut file, &mut transcript).unwrap();
    assert!(skipped.is_empty());
    assert_eq!(transcript.0, expected);
}

fn scan_slice(document: &[u8]) -> Vec<Vec<String>> {
    avec::slice::rows(document).collect()
}

fn scan_reader(document: &[u8]) -> Vec<Vec<String>> {
    avec::reader::rows(document).map(|row| row.unwrap()).collect()
}

fn row(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

/// Receiver recording every row it is handed.
struct Transcript(Vec<Vec<String>>);

impl FromRows for Transcript {
    fn add_row(&mut self, fields: &[String]) -> Result<(), RowError> {
        self.0.push(fields.to_vec());
        Ok(())
    }
}

/// Receiver keeping the first field of each row, as a number.
struct Identifiers(Vec<u32>);

impl FromRows for Identifiers {
    fn add_row(&mut self, fields: &[String]) -> Result<(), RowError> {
        let id = fields.first().ok_or(RowError::Missing(0))?;
        self.0.push(id.parse().map_err(|err| RowError::invalid(0, err))?);
        Ok(())
    }
}

/// Reader failing once its prefix is exhausted.
struct Failing<'a>(&'a [u8]);

impl Read for Failing<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.0.is_empty() {
            return Err(io::Error::other("connection reset"));
        }

        let n = self.0.len().min(buf.len());
        buf[..n].copy_from_slice(&self.0[..n]);
        self.0 = &self.0[n..];

        Ok(n)
    }
}
