use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::source::{SourceError, Uplink, UplinkSource};

use super::error::JsonlSourceError;
use super::reader::parse_line;

pub struct JsonLinesSource<R = BufReader<File>> {
    reader: R,
    line: usize,
    buf: String,
}

impl JsonLinesSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(SourceError::from)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> UplinkSource for JsonLinesSource<R> {
    fn next_uplink(&mut self) -> Result<Option<Uplink>, SourceError> {
        next_uplink(self).map_err(SourceError::from)
    }
}

fn next_uplink<R: BufRead>(
    source: &mut JsonLinesSource<R>,
) -> Result<Option<Uplink>, JsonlSourceError> {
    loop {
        source.buf.clear();
        if source.reader.read_line(&mut source.buf)? == 0 {
            return Ok(None);
        }
        source.line += 1;
        let text = source.buf.trim();
        if text.is_empty() {
            continue;
        }
        return parse_line(source.line, text).map(Some);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::JsonLinesSource;
    use crate::source::{SourceError, UplinkSource};

    #[test]
    fn reads_records_and_skips_blank_lines() {
        let input = "{\"port\":1,\"hex\":\"012c0000\"}\n\n  \n{\"port\":2,\"bytes\":[64]}\n";
        let mut source = JsonLinesSource::from_reader(Cursor::new(input));

        let first = source.next_uplink().unwrap().unwrap();
        assert_eq!(first.line, 1);
        let second = source.next_uplink().unwrap().unwrap();
        assert_eq!(second.line, 4);
        assert_eq!(second.payload, vec![0x40]);
        assert!(source.next_uplink().unwrap().is_none());
    }

    #[test]
    fn reports_line_of_invalid_record() {
        let input = "{\"port\":1,\"hex\":\"00\"}\nnot json\n";
        let mut source = JsonLinesSource::from_reader(Cursor::new(input));
        source.next_uplink().unwrap();
        let err = source.next_uplink().unwrap_err();
        assert!(matches!(err, SourceError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn accepts_missing_trailing_newline() {
        let mut source = JsonLinesSource::from_reader(Cursor::new("{\"port\":5,\"hex\":\"\"}"));
        let uplink = source.next_uplink().unwrap().unwrap();
        assert_eq!(uplink.port, 5);
        assert!(uplink.payload.is_empty());
    }
}
