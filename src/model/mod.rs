//! Core data model types for merkle_primer

mod digest;
mod record;

pub use digest::{Digest, DIGEST_LEN};
pub use record::{records_from, Record};
