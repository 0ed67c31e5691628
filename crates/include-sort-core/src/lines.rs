//! Reading and writing source files as line buffers.
//!
//! Files that are not valid UTF-8 are read byte-for-byte (each byte mapped
//! to the char of the same value) and written back the same way, so legacy
//! encodings survive a sort unchanged.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// How a file's bytes were turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    /// One char per byte (ISO-8859-1)
    Latin1,
}

/// Lines of a source file, without their terminators.
#[derive(Debug, Clone, Default)]
pub struct SourceLines {
    pub lines: Vec<String>,
    pub encoding: Encoding,
}

/// Read a file into lines.
pub fn read_lines(path: &Path) -> Result<SourceLines> {
    let bytes = fs::read(path)?;
    let (content, encoding) = match String::from_utf8(bytes) {
        Ok(text) => (text, Encoding::Utf8),
        Err(e) => {
            let text = e.into_bytes().into_iter().map(char::from).collect();
            (text, Encoding::Latin1)
        }
    };

    Ok(SourceLines {
        lines: content.lines().map(str::to_string).collect(),
        encoding,
    })
}

/// Write lines back, each followed by [`LINE_ENDING`].
pub fn write_lines(path: &Path, lines: &[String], encoding: Encoding) -> Result<()> {
    let mut writer = BufWriter::new(fs::File::create(path)?);
    for line in lines {
        match encoding {
            Encoding::Utf8 => writer.write_all(line.as_bytes())?,
            Encoding::Latin1 => {
                let bytes: Vec<u8> = line
                    .chars()
                    .map(|c| u8::try_from(c).unwrap_or(b'?'))
                    .collect();
                writer.write_all(&bytes)?;
            }
        }
        writer.write_all(LINE_ENDING.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
