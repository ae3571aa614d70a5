use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Identifier of a transaction.
///
/// A `TxId` is the domain-separated BLAKE3 hash of the encoded transaction
/// body. Text formats carry it as 64 hex characters; binary formats carry the
/// raw 32 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxId([u8; 32]);

impl TxId {
    /// Create a `TxId` from a pre-computed hash.
    pub const fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        decode_hash32(s).map(Self)
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self.short_hex())
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for TxId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for TxId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for TxId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Self)
        }
    }
}

/// Hash of a datum, used as the key of the datum table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatumHash([u8; 32]);

impl DatumHash {
    pub const fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        decode_hash32(s).map(Self)
    }
}

impl fmt::Debug for DatumHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatumHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for DatumHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for DatumHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for DatumHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Self)
        }
    }
}

/// Reference to a transaction output: the unique key of a UTxO.
///
/// Ordering is by transaction id, then by output index. The canonical text
/// form is `<txid-hex>#<index>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxOutRef {
    pub tx_id: TxId,
    pub index: u32,
}

impl TxOutRef {
    pub fn new(tx_id: TxId, index: u32) -> Self {
        Self { tx_id, index }
    }
}

impl fmt::Debug for TxOutRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxOutRef({}#{})", self.tx_id.short_hex(), self.index)
    }
}

impl fmt::Display for TxOutRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.tx_id, self.index)
    }
}

impl FromStr for TxOutRef {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, index) = s
            .split_once('#')
            .ok_or_else(|| TypeError::InvalidOutRef(s.to_string()))?;
        let index = index
            .parse::<u32>()
            .map_err(|_| TypeError::InvalidOutRef(s.to_string()))?;
        Ok(Self::new(TxId::from_hex(id)?, index))
    }
}

impl Serialize for TxOutRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            (self.tx_id, self.index).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for TxOutRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            let (tx_id, index) = <(TxId, u32)>::deserialize(deserializer)?;
            Ok(Self::new(tx_id, index))
        }
    }
}

fn decode_hash32(s: &str) -> Result<[u8; 32], TypeError> {
    let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
    if bytes.len() != 32 {
        return Err(TypeError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        });
    }
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_ref_text_form() {
        let r = TxOutRef::new(TxId::from_hash([0xab; 32]), 3);
        let text = r.to_string();
        assert!(text.ends_with("#3"));
        assert_eq!(text.len(), 64 + 2);
        assert_eq!(text.parse::<TxOutRef>().unwrap(), r);
    }

    #[test]
    fn out_ref_rejects_missing_index() {
        let err = "abcd".parse::<TxOutRef>().unwrap_err();
        assert_eq!(err, TypeError::InvalidOutRef("abcd".into()));
    }

    #[test]
    fn out_ref_rejects_short_hash() {
        let err = "abcd#0".parse::<TxOutRef>().unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn out_refs_order_by_tx_then_index() {
        let a = TxOutRef::new(TxId::from_hash([1; 32]), 9);
        let b = TxOutRef::new(TxId::from_hash([2; 32]), 0);
        let c = TxOutRef::new(TxId::from_hash([2; 32]), 1);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn json_uses_text_forms() {
        let r = TxOutRef::new(TxId::from_hash([7; 32]), 1);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, format!("\"{}#1\"", "07".repeat(32)));
        let parsed: TxOutRef = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, r);
    }

    #[test]
    fn binary_uses_raw_bytes() {
        let r = TxOutRef::new(TxId::from_hash([7; 32]), 1);
        let bytes = bincode::serialize(&r).unwrap();
        assert_eq!(bytes.len(), 32 + 4);
        let parsed: TxOutRef = bincode::deserialize(&bytes).unwrap();
        assert_eq!(parsed, r);
    }

    #[test]
    fn datum_hash_hex_roundtrip() {
        let h = DatumHash::from_hash([0x5a; 32]);
        assert_eq!(DatumHash::from_hex(&h.to_hex()).unwrap(), h);
    }
}
