//! PEM block scanning.
//!
//! Certificate and key files are often not a single clean PEM block: OpenSSL
//! writes `EC PARAMETERS` in front of EC keys, bundles carry `Bag Attributes`
//! preambles, and full chains hold several certificates. [`PemBlocks`] walks a
//! buffer from the start and yields every block that decodes, in order.
//!
//! Text outside of blocks is skipped. A begin marker only counts at the start
//! of a line; one preceded by other text on its line is ignored. A block that fails to decode (bad
//! base64, missing end line, non-UTF-8 bytes) is skipped too and scanning
//! resumes after its begin marker, so each step consumes input and the scan
//! always terminates.

use log::trace;
use x509_parser::pem::{parse_x509_pem, Pem};

use crate::config::PEM_BEGIN_MARKER;

/// Iterator over the decodable PEM blocks of a buffer.
pub struct PemBlocks<'a> {
    rest: &'a [u8],
    // Whether `rest` begins at the start of a line.
    at_line_start: bool,
}

impl<'a> PemBlocks<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            rest: data,
            at_line_start: true,
        }
    }

    fn starts_line(&self, offset: usize) -> bool {
        match offset {
            0 => self.at_line_start,
            _ => self.rest[offset - 1] == b'\n',
        }
    }

    fn skip_marker_at(&mut self, offset: usize) {
        self.rest = &self.rest[offset + PEM_BEGIN_MARKER.len()..];
        self.at_line_start = false;
    }
}

impl Iterator for PemBlocks<'_> {
    type Item = Pem;

    fn next(&mut self) -> Option<Pem> {
        loop {
            let start = find_subslice(self.rest, PEM_BEGIN_MARKER)?;
            if !self.starts_line(start) {
                trace!("Ignoring begin marker in the middle of a line at offset {start}");
                self.skip_marker_at(start);
                continue;
            }
            let candidate = &self.rest[start..];
            match parse_x509_pem(candidate) {
                Ok((rest, pem)) => {
                    trace!(
                        "Decoded PEM block '{}' ({} bytes)",
                        pem.label,
                        pem.contents.len()
                    );
                    self.rest = rest;
                    self.at_line_start = true;
                    return Some(pem);
                }
                Err(e) => {
                    trace!("Skipping undecodable PEM block at offset {start}: {e}");
                    self.skip_marker_at(start);
                }
            }
        }
    }
}

/// Returns the first decodable PEM block of `data`, ignoring everything after it.
pub fn first_block(data: &[u8]) -> Option<Pem> {
    PemBlocks::new(data).next()
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
