//! Incremental framing of the reply body into records.
//!
//! Chunks arrive with arbitrary boundaries: a record, its `\n\n` delimiter or
//! a multi-byte character may be split across any number of chunks. The
//! decoder buffers raw bytes and only decodes a record once its delimiter has
//! been seen, so splits never corrupt text. Bytes that are not valid UTF-8
//! decode to U+FFFD and the record is kept.

use super::payload::StreamPayload;
use thiserror::Error;

/// Terminates one record.
pub const RECORD_DELIMITER: &[u8] = b"\n\n";

/// Field prefix every meaningful record starts with.
pub const DATA_PREFIX: &[u8] = b"data: ";

/// Why a single record could not be decoded. Never fatal to the stream.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("record payload is not valid JSON: {source}")]
    InvalidJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One complete record taken off the stream
#[derive(Debug)]
pub enum SseRecord {
    /// A text fragment (`content` is present).
    Fragment(StreamPayload),
    /// `content` absent or null: a control frame, nothing to merge.
    Heartbeat,
    /// Record without the `data: ` prefix.
    Ignored,
    /// Record whose payload failed to decode.
    Malformed(RecordError),
}

/// Owns the partial-record buffer of one response stream.
///
/// Construct one per stream and drop it (via [`finish`](Self::finish)) when
/// the stream ends.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    /// Leading bytes of `buffer` already known to hold no delimiter.
    scanned: usize,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer `chunk` and return every record completed by it, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseRecord> {
        self.buffer.extend_from_slice(chunk);

        let mut records = Vec::new();
        let mut start = 0;
        // a delimiter may straddle the previous chunk's last byte
        let mut from = self.scanned.saturating_sub(RECORD_DELIMITER.len() - 1);
        while let Some(offset) = find_delimiter(&self.buffer[from..]) {
            let end = from + offset;
            records.push(parse_record(&self.buffer[start..end]));
            start = end + RECORD_DELIMITER.len();
            from = start;
        }
        self.buffer.drain(..start);
        self.scanned = self.buffer.len();

        records
    }

    /// Bytes held back waiting for a delimiter.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// End of stream. Returns the number of trailing bytes that never formed
    /// a complete record; they are dropped.
    pub fn finish(self) -> usize {
        self.buffer.len()
    }
}

fn find_delimiter(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(RECORD_DELIMITER.len())
        .position(|window| window == RECORD_DELIMITER)
}

/// Decode one complete record (delimiter already stripped).
pub fn parse_record(record: &[u8]) -> SseRecord {
    let Some(payload) = record.strip_prefix(DATA_PREFIX) else {
        return SseRecord::Ignored;
    };

    let text = String::from_utf8_lossy(payload);
    match serde_json::from_str::<StreamPayload>(&text) {
        Ok(payload) if payload.is_heartbeat() => SseRecord::Heartbeat,
        Ok(payload) => SseRecord::Fragment(payload),
        Err(source) => SseRecord::Malformed(RecordError::InvalidJson {
            raw: text.into_owned(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(records: &[SseRecord]) -> Vec<String> {
        records
            .iter()
            .filter_map(|r| match r {
                SseRecord::Fragment(p) => p.content.clone(),
                _ => None,
            })
            .collect()
    }

    const BODY: &str = "data: {\"content\": \"Hel\"}\n\n\
                        data: {\"content\": \"lo \", \"meta\": {\"node\": \"assistant\"}}\n\n\
                        data: {\"content\": \"world\"} \n\n";

    #[test]
    fn test_whole_body_in_one_chunk() {
        let mut decoder = SseDecoder::new();
        let records = decoder.feed(BODY.as_bytes());
        assert_eq!(fragments(&records), vec!["Hel", "lo ", "world"]);
        assert_eq!(decoder.finish(), 0);
    }

    #[test]
    fn test_any_split_point_yields_same_records() {
        let bytes = BODY.as_bytes();
        for split in 0..=bytes.len() {
            let mut decoder = SseDecoder::new();
            let mut records = decoder.feed(&bytes[..split]);
            records.extend(decoder.feed(&bytes[split..]));
            assert_eq!(
                fragments(&records),
                vec!["Hel", "lo ", "world"],
                "split at {split}"
            );
        }
    }

    #[test]
    fn test_one_byte_at_a_time() {
        let mut decoder = SseDecoder::new();
        let mut records = Vec::new();
        for byte in BODY.as_bytes() {
            records.extend(decoder.feed(std::slice::from_ref(byte)));
        }
        assert_eq!(fragments(&records), vec!["Hel", "lo ", "world"]);
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let body = "data: {\"content\": \"Démoniste ⚔\"}\n\n".as_bytes();
        // split inside the 3-byte sword
        let cut = body.len() - 6;
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(&body[..cut]).is_empty());
        let records = decoder.feed(&body[cut..]);
        assert_eq!(fragments(&records), vec!["Démoniste ⚔"]);
    }

    #[test]
    fn test_null_content_is_heartbeat() {
        let mut decoder = SseDecoder::new();
        let records = decoder.feed(b"data: {\"content\": null, \"meta\": {}}\n\ndata: {}\n\n");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| matches!(r, SseRecord::Heartbeat)));
    }

    #[test]
    fn test_records_without_data_prefix_are_ignored() {
        let mut decoder = SseDecoder::new();
        let records =
            decoder.feed(b"event: ping\n\n: comment\n\n\n\ndata:{\"content\":\"x\"}\n\n");
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| matches!(r, SseRecord::Ignored)));
    }

    #[test]
    fn test_bad_json_does_not_stop_following_records() {
        let mut decoder = SseDecoder::new();
        let records = decoder.feed(b"data: {bad json}\n\ndata: {\"content\":\"ok\"}\n\n");
        assert_eq!(records.len(), 2);
        match &records[0] {
            SseRecord::Malformed(RecordError::InvalidJson { raw, .. }) => {
                assert_eq!(raw, "{bad json}");
            }
            other => panic!("expected malformed record, got {other:?}"),
        }
        assert_eq!(fragments(&records), vec!["ok"]);
    }

    #[test]
    fn test_invalid_utf8_becomes_replacement_char() {
        let mut decoder = SseDecoder::new();
        let records = decoder.feed(b"data: {\"content\": \"st \xff mage\"}\n\n");
        assert_eq!(fragments(&records), vec!["st \u{FFFD} mage"]);
    }

    #[test]
    fn test_long_record_in_small_chunks() {
        let text = "Frost ".repeat(2_000);
        let body = format!(
            "data: {}\n\ndata: {{\"content\":\"!\"}}\n\n",
            serde_json::json!({ "content": &text })
        );
        let mut decoder = SseDecoder::new();
        let mut records = Vec::new();
        for chunk in body.as_bytes().chunks(7) {
            records.extend(decoder.feed(chunk));
        }
        assert_eq!(fragments(&records), vec![text, "!".to_string()]);
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_incomplete_trailing_record_is_discarded() {
        let mut decoder = SseDecoder::new();
        let records = decoder.feed(b"data: {\"content\":\"a\"}\n\ndata: {\"content\":\"x\"");
        assert_eq!(fragments(&records), vec!["a"]);
        assert_eq!(decoder.finish(), "data: {\"content\":\"x\"".len());
    }

    #[test]
    fn test_crlf_delimiter_is_not_a_record_boundary() {
        let mut decoder = SseDecoder::new();
        let body = b"data: {\"content\":\"x\"}\r\n\r\n";
        assert!(decoder.feed(body).is_empty());
        assert_eq!(decoder.pending(), body.len());
    }
}
