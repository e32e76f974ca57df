use crate::error::{Error, Result};
use std::io::BufRead;

/// Physical lines of `reader` as raw bytes with the line ending removed,
/// paired with their 1-based line number.
pub fn raw_lines<'a, R: BufRead + 'a>(reader: R, source_name: &'a str) -> impl Iterator<Item = Result<(usize, Vec<u8>)>> + 'a {
    reader.split(b'\n').enumerate().map(move |(idx, line)| {
        let mut bytes = line.map_err(|e| Error::io(source_name, e))?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        Ok((idx + 1, bytes))
    })
}

/// Decode a line as UTF-8; failures are parse errors carrying the lossy text.
pub fn decode(bytes: Vec<u8>, source_name: &str, line: usize) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        let content = String::from_utf8_lossy(e.as_bytes()).into_owned();
        Error::parse(source_name, line, &content, "invalid UTF-8")
    })
}
