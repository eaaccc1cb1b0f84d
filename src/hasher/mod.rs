//! Pluggable digest functions

mod blake;
mod toy;
mod traits;

pub use blake::Blake3;
pub use toy::ToyChecksum;
pub use traits::DigestFn;

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects a built-in digest function by name
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    /// The demo's rolling checksum (not cryptographic)
    #[default]
    Toy,
    /// BLAKE3
    Blake3,
}

impl HasherKind {
    /// Instantiate the selected digest function
    pub fn build(self) -> Box<dyn DigestFn> {
        match self {
            HasherKind::Toy => Box::new(ToyChecksum),
            HasherKind::Blake3 => Box::new(Blake3),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HasherKind::Toy => "toy",
            HasherKind::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HasherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HasherKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toy" | "toy-checksum" => Ok(HasherKind::Toy),
            "blake3" => Ok(HasherKind::Blake3),
            other => Err(Error::UnknownHasher(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("toy".parse::<HasherKind>().unwrap(), HasherKind::Toy);
        assert_eq!("BLAKE3".parse::<HasherKind>().unwrap(), HasherKind::Blake3);
        assert!("sha256".parse::<HasherKind>().is_err());
    }

    #[test]
    fn test_kind_builds_named_hasher() {
        assert_eq!(HasherKind::Toy.build().name(), "toy-checksum");
        assert_eq!(HasherKind::Blake3.build().name(), "blake3");
    }

    #[test]
    fn test_kinds_disagree() {
        let toy = HasherKind::Toy.build();
        let blake = HasherKind::Blake3.build();
        assert_ne!(toy.digest(b"A"), blake.digest(b"A"));
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&HasherKind::Blake3).unwrap();
        assert_eq!(json, "\"blake3\"");
    }
}
