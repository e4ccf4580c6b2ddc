//! Binary routing table stream framing.
//!
//! A stream is a concatenation of per-chip table records:
//!
//! | offset | size | field |
//! |--------|------|-------|
//! | 0      | 1    | chip x coordinate |
//! | 1      | 1    | chip y coordinate |
//! | 2      | 2    | entry count, host byte order |
//! | 4      | 16·N | entries |
//!
//! Each entry is `key`, `mask`, `source`, `route` as consecutive `u32`s
//! in host byte order. There is no delimiter beyond the length prefix;
//! readers consume records until the stream ends.

use crate::error::{StreamError, StreamResult};
use mesh_types::{RouteEntry, RoutingTable};
use std::io::{self, Read, Write};

/// Bytes per serialised entry.
pub const ENTRY_BYTES: usize = 16;

/// One chip's routing table as framed on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRecord {
    pub x: u8,
    pub y: u8,
    pub table: RoutingTable,
}

/// Reads the next table record, or `Ok(None)` at a clean end of stream.
pub fn read_record<R: Read>(reader: &mut R) -> StreamResult<Option<TableRecord>> {
    let mut header = [0u8; 4];
    let mut got = 0;
    while got < header.len() {
        let n = reader.read(&mut header[got..])?;
        if n == 0 {
            break;
        }
        got += n;
    }
    if got == 0 {
        return Ok(None);
    }
    if got < header.len() {
        return Err(StreamError::TruncatedHeader { got });
    }

    let x = header[0];
    let y = header[1];
    let length = u16::from_ne_bytes([header[2], header[3]]) as usize;

    let mut payload = vec![0u8; length * ENTRY_BYTES];
    reader.read_exact(&mut payload).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            StreamError::TruncatedRecord {
                x,
                y,
                expected: length,
            }
        } else {
            StreamError::Io(err)
        }
    })?;

    let table = payload
        .chunks_exact(ENTRY_BYTES)
        .map(|chunk| {
            let word = |i: usize| {
                u32::from_ne_bytes([chunk[i], chunk[i + 1], chunk[i + 2], chunk[i + 3]])
            };
            RouteEntry::new(word(0), word(4), word(8), word(12))
        })
        .collect();

    Ok(Some(TableRecord { x, y, table }))
}

/// Writes one table record in the same framing `read_record` accepts.
pub fn write_record<W: Write>(writer: &mut W, record: &TableRecord) -> StreamResult<()> {
    let length = record.table.len() as u16;
    writer.write_all(&[record.x, record.y])?;
    writer.write_all(&length.to_ne_bytes())?;

    for entry in &record.table {
        writer.write_all(&entry.keymask.key().to_ne_bytes())?;
        writer.write_all(&entry.keymask.mask().to_ne_bytes())?;
        writer.write_all(&entry.source.to_ne_bytes())?;
        writer.write_all(&entry.route.to_ne_bytes())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn sample_record() -> TableRecord {
        TableRecord {
            x: 3,
            y: 7,
            table: vec![
                RouteEntry::new(0x0000_1001, 0xffff_ffff, 0b010, 0b001),
                RouteEntry::new(0x0000_1000, 0xffff_f000, 0b001, 0b100),
            ],
        }
    }

    #[test]
    fn test_round_trip_single_record() {
        let record = sample_record();
        let mut buffer = Vec::new();
        write_record(&mut buffer, &record).unwrap();
        assert_eq!(buffer.len(), 4 + 2 * ENTRY_BYTES);

        let mut cursor = Cursor::new(buffer);
        assert_eq!(read_record(&mut cursor).unwrap(), Some(record));
        assert_eq!(read_record(&mut cursor).unwrap(), None);
    }

    #[test]
    fn test_round_trip_concatenated_records() {
        let first = sample_record();
        let second = TableRecord {
            x: 0,
            y: 1,
            table: Vec::new(),
        };

        let mut buffer = Vec::new();
        write_record(&mut buffer, &first).unwrap();
        write_record(&mut buffer, &second).unwrap();

        let mut cursor = Cursor::new(buffer);
        assert_eq!(read_record(&mut cursor).unwrap(), Some(first));
        assert_eq!(read_record(&mut cursor).unwrap(), Some(second));
        assert_eq!(read_record(&mut cursor).unwrap(), None);
    }

    #[test]
    fn test_empty_stream() {
        let mut cursor = Cursor::new(Vec::new());
        assert_eq!(read_record(&mut cursor).unwrap(), None);
    }

    #[test]
    fn test_truncated_header() {
        let mut cursor = Cursor::new(vec![3u8, 7]);
        match read_record(&mut cursor) {
            Err(StreamError::TruncatedHeader { got: 2 }) => {}
            other => panic!("expected truncated header, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_entries() {
        let mut buffer = Vec::new();
        write_record(&mut buffer, &sample_record()).unwrap();
        buffer.truncate(buffer.len() - 1);

        let mut cursor = Cursor::new(buffer);
        match read_record(&mut cursor) {
            Err(StreamError::TruncatedRecord { x: 3, y: 7, expected: 2 }) => {}
            other => panic!("expected truncated record, got {:?}", other),
        }
    }

    #[test]
    fn test_reader_normalises_keys() {
        // Key bits under wildcard mask positions are cleared on read.
        let mut buffer = vec![0u8, 0];
        buffer.extend_from_slice(&1u16.to_ne_bytes());
        buffer.extend_from_slice(&0xffff_ffffu32.to_ne_bytes()); // key
        buffer.extend_from_slice(&0x0000_00ffu32.to_ne_bytes()); // mask
        buffer.extend_from_slice(&0u32.to_ne_bytes());
        buffer.extend_from_slice(&0u32.to_ne_bytes());

        let record = read_record(&mut Cursor::new(buffer)).unwrap().unwrap();
        assert_eq!(record.table[0].keymask.key(), 0xff);
    }
}
