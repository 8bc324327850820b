//! FASTA input for canonical sequences.
//!
//! Reads the first record of a FASTA document; the header is ignored. The
//! typical producer is an externally downloaded per-chain FASTA file whose
//! single record carries the reference numbering.

use std::io::Cursor;
use std::path::Path;

use aurelia_core::{AureliaError, Result};
use needletail::{parse_fastx_file, parse_fastx_reader};

use crate::sequence::CanonicalSequence;

/// Parse the first FASTA record from in-memory text.
///
/// # Errors
///
/// Returns an error if the input holds no parseable record or the sequence
/// contains invalid residue codes.
pub fn parse_fasta(data: impl AsRef<[u8]>) -> Result<CanonicalSequence> {
    let cursor = Cursor::new(data.as_ref().to_vec());
    let mut reader =
        parse_fastx_reader(cursor).map_err(|e| AureliaError::Parse(e.to_string()))?;

    match reader.next() {
        Some(record) => {
            let record = record.map_err(|e| AureliaError::Parse(e.to_string()))?;
            CanonicalSequence::new(record.seq().as_ref())
        }
        None => Err(AureliaError::Parse("no FASTA record found".into())),
    }
}

/// Parse the first FASTA record from a file.
pub fn parse_fasta_file(path: impl AsRef<Path>) -> Result<CanonicalSequence> {
    let mut reader =
        parse_fastx_file(path.as_ref()).map_err(|e| AureliaError::Parse(e.to_string()))?;

    match reader.next() {
        Some(record) => {
            let record = record.map_err(|e| AureliaError::Parse(e.to_string()))?;
            CanonicalSequence::new(record.seq().as_ref())
        }
        None => Err(AureliaError::Parse("no FASTA record found".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurelia_core::Sequence;

    #[test]
    fn parses_first_record() {
        let seq = parse_fasta(">1abc_A mol:protein\nMKVTAE\nLLGH\n").unwrap();
        assert_eq!(seq.as_bytes(), b"MKVTAELLGH");
    }

    #[test]
    fn header_is_ignored() {
        let seq = parse_fasta(">anything | goes | here\nMKVT\n").unwrap();
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn multi_record_takes_first() {
        let seq = parse_fasta(">a\nMKVT\n>b\nGGGG\n").unwrap();
        assert_eq!(seq.as_bytes(), b"MKVT");
    }

    #[test]
    fn empty_input_errors() {
        assert!(parse_fasta("").is_err());
    }

    #[test]
    fn file_roundtrip() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">2j9c_A").unwrap();
        writeln!(file, "MKVTAELLGH").unwrap();
        file.flush().unwrap();

        let seq = parse_fasta_file(file.path()).unwrap();
        assert_eq!(seq.len(), 10);
    }

    #[test]
    fn missing_file_errors() {
        assert!(parse_fasta_file("/nonexistent/file.fasta").is_err());
    }
}
