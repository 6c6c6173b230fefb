//! Input and output plumbing
//!
//! Opens local operon tables (plain, gzip or bzip2) as buffered byte
//! sources for the scanner, and creates buffered text sinks.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Default buffer size for readers and writers (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Plain text (uncompressed)
    #[default]
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression format from file path and/or content
///
/// The extension wins; otherwise gzip (`1f 8b`) and bzip2 (`BZh`) magic
/// bytes are checked.
pub fn detect_compression<P: AsRef<Path>>(path: P) -> io::Result<Compression> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => return Ok(Compression::Gzip),
        Some("bz2") => return Ok(Compression::Bzip2),
        _ => {}
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[..2] == [0x1f, 0x8b] {
        return Ok(Compression::Gzip);
    }
    if bytes_read >= 3 && &magic == b"BZh" {
        return Ok(Compression::Bzip2);
    }
    Ok(Compression::Plain)
}

/// Open an input file as a buffered byte source, decompressing if needed
pub fn open_input<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let compression = detect_compression(path)?;
    let file = File::open(path)?;

    log::debug!("Opening {} as {:?}", path.display(), compression);

    let reader: Box<dyn BufRead> = match compression {
        Compression::Gzip => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            flate2::read::MultiGzDecoder::new(file),
        )),
        Compression::Bzip2 => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            bzip2::read::BzDecoder::new(file),
        )),
        Compression::Plain => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
    };
    Ok(reader)
}

/// Create a buffered text sink: the given file, or stdout when `None`
pub fn create_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            Ok(Box::new(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file)))
        }
        None => Ok(Box::new(BufWriter::with_capacity(
            DEFAULT_BUFFER_SIZE,
            io::stdout().lock(),
        ))),
    }
}
