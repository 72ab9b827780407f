use std::fmt;

use sha2::{Digest, Sha256};

use crate::enums::SourceName;

/// A deterministic record identifier derived from a row's natural key.
///
/// Uses the first 16 bytes of SHA-256 over the source name plus the
/// natural-key parts, rendered as lowercase hex. The same source row always
/// hashes to the same id, which is what makes sink writes idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId([u8; 16]);

impl RecordId {
    /// Derive an id from the source and the ordered natural-key parts.
    ///
    /// Parts are joined with a 0x1f separator before hashing so that
    /// `["ab", "c"]` and `["a", "bc"]` produce distinct ids.
    pub fn from_natural_key(source: SourceName, parts: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(source.as_str().as_bytes());
        for part in parts {
            hasher.update([0x1f]);
            hasher.update(part.trim().as_bytes());
        }
        let digest: [u8; 32] = hasher.finalize().into();
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest[..16]);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl serde::Serialize for RecordId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        if bytes.len() != 16 {
            return Err(serde::de::Error::custom("RecordId must be 16 bytes"));
        }
        let mut out = [0u8; 16];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_same_id() {
        let a = RecordId::from_natural_key(SourceName::Nycha, &["WO-123"]);
        let b = RecordId::from_natural_key(SourceName::Nycha, &["WO-123"]);
        assert_eq!(a, b);
    }

    #[test]
    fn source_participates_in_hash() {
        let a = RecordId::from_natural_key(SourceName::Nycha, &["123"]);
        let b = RecordId::from_natural_key(SourceName::GsaCalc, &["123"]);
        assert_ne!(a, b);
    }

    #[test]
    fn part_boundaries_are_preserved() {
        let a = RecordId::from_natural_key(SourceName::Usaspending, &["ab", "c"]);
        let b = RecordId::from_natural_key(SourceName::Usaspending, &["a", "bc"]);
        assert_ne!(a, b);
    }

    #[test]
    fn hex_round_trip() {
        let id = RecordId::from_natural_key(SourceName::Nycha, &["WO-9"]);
        let json = serde_json::to_string(&id).expect("serialize id");
        let round: RecordId = serde_json::from_str(&json).expect("deserialize id");
        assert_eq!(id, round);
        assert_eq!(id.to_hex().len(), 32);
    }
}
