//! Record type - the opaque payload of one leaf

use serde::{Deserialize, Serialize};
use std::fmt;

/// One leaf's payload. Usually short UTF-8 text, but treated as raw bytes.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record(Vec<u8>);

impl Record {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Record(data.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lossy UTF-8 view for display
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({:?})", self.to_text())
    }
}

impl AsRef<[u8]> for Record {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Record {
    fn from(s: &str) -> Self {
        Record(s.as_bytes().to_vec())
    }
}

impl From<String> for Record {
    fn from(s: String) -> Self {
        Record(s.into_bytes())
    }
}

impl From<&String> for Record {
    fn from(s: &String) -> Self {
        Record(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Record {
    fn from(bytes: Vec<u8>) -> Self {
        Record(bytes)
    }
}

impl From<&[u8]> for Record {
    fn from(bytes: &[u8]) -> Self {
        Record(bytes.to_vec())
    }
}

/// Convert a list of strings into records, preserving order
pub fn records_from<I, S>(items: I) -> Vec<Record>
where
    I: IntoIterator<Item = S>,
    S: Into<Record>,
{
    items.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_text() {
        let r = Record::from("hello");
        assert_eq!(r.as_bytes(), b"hello");
        assert_eq!(r.len(), 5);
        assert_eq!(r.to_string(), "hello");
    }

    #[test]
    fn test_records_from_preserves_order() {
        let records = records_from(["A", "B", "C"]);
        let texts: Vec<_> = records.iter().map(Record::to_text).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_record_lossy_display() {
        let r = Record::new(vec![0x66, 0x6f, 0xff]);
        assert_eq!(r.to_text(), "fo\u{fffd}");
    }
}
