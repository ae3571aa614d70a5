use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::address::Address;
use crate::hash::ContentHasher;
use crate::ids::{DatumHash, TxOutRef};
use crate::value::Value;

/// Opaque datum bytes attached to an output or carried as a witness.
///
/// Script evaluation is external to the emulator, so datums are never
/// decoded; they are stored and returned verbatim.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Datum(pub Vec<u8>);

impl Datum {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Hash under which the datum is recorded in the datum table.
    pub fn hash(&self) -> DatumHash {
        DatumHash::from_hash(ContentHasher::DATUM.hash(&self.0))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Datum({} bytes)", self.0.len())
    }
}

/// Opaque reference-script bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ScriptRef(pub Vec<u8>);

impl fmt::Debug for ScriptRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScriptRef({} bytes)", self.0.len())
    }
}

macro_rules! hex_bytes_serde {
    ($ty:ident) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&hex::encode(&self.0))
                } else {
                    self.0.serialize(serializer)
                }
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                if deserializer.is_human_readable() {
                    let s = String::deserialize(deserializer)?;
                    hex::decode(&s).map(Self).map_err(serde::de::Error::custom)
                } else {
                    Vec::<u8>::deserialize(deserializer).map(Self)
                }
            }
        }
    };
}

hex_bytes_serde!(Datum);
hex_bytes_serde!(ScriptRef);

/// Datum attached to an output: either its hash or the datum itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatumOption {
    Hash(DatumHash),
    Inline(Datum),
}

impl DatumOption {
    /// The hash identifying this datum, computing it for inline datums.
    pub fn hash(&self) -> DatumHash {
        match self {
            Self::Hash(h) => *h,
            Self::Inline(d) => d.hash(),
        }
    }
}

/// Resolved payload of a transaction output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub address: Address,
    pub value: Value,
    #[serde(default)]
    pub datum: Option<DatumOption>,
    #[serde(default)]
    pub script_ref: Option<ScriptRef>,
}

impl TxOutput {
    pub fn new(address: impl Into<Address>, value: Value) -> Self {
        Self {
            address: address.into(),
            value,
            datum: None,
            script_ref: None,
        }
    }

    pub fn with_inline_datum(mut self, datum: Datum) -> Self {
        self.datum = Some(DatumOption::Inline(datum));
        self
    }

    pub fn with_datum_hash(mut self, hash: DatumHash) -> Self {
        self.datum = Some(DatumOption::Hash(hash));
        self
    }

    pub fn with_script_ref(mut self, script: ScriptRef) -> Self {
        self.script_ref = Some(script);
        self
    }

    /// Base-currency amount held by this output.
    pub fn coin(&self) -> u64 {
        self.value.coin
    }
}

/// An unspent output: reference plus resolved payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub out_ref: TxOutRef,
    pub output: TxOutput,
}

impl Utxo {
    pub fn new(out_ref: TxOutRef, output: TxOutput) -> Self {
        Self { out_ref, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TxId;

    #[test]
    fn datum_hash_is_content_addressed() {
        let a = Datum::new(vec![0xd8, 0x79, 0x80]);
        let b = Datum::new(vec![0xd8, 0x79, 0x80]);
        assert_eq!(a.hash(), b.hash());
        assert_ne!(a.hash(), Datum::new(vec![0x00]).hash());
    }

    #[test]
    fn inline_datum_option_hashes_its_datum() {
        let datum = Datum::new(b"42".to_vec());
        let option = DatumOption::Inline(datum.clone());
        assert_eq!(option.hash(), datum.hash());
        assert_eq!(DatumOption::Hash(datum.hash()).hash(), datum.hash());
    }

    #[test]
    fn output_toml_shape() {
        let output = TxOutput::new("addr_a", Value::coin(10))
            .with_inline_datum(Datum::new(vec![0xca, 0xfe]));
        let text = toml::to_string(&output).unwrap();
        assert!(text.contains("inline = \"cafe\""));
        let parsed: TxOutput = toml::from_str(&text).unwrap();
        assert_eq!(parsed, output);
    }

    #[test]
    fn utxo_binary_roundtrip_keeps_datum_and_script() {
        let utxo = Utxo::new(
            TxOutRef::new(TxId::from_hash([3; 32]), 0),
            TxOutput::new("addr_b", Value::coin(5).with_asset("p", "t", 1))
                .with_datum_hash(Datum::new(vec![1]).hash())
                .with_script_ref(ScriptRef(vec![9, 9])),
        );
        let bytes = bincode::serialize(&utxo).unwrap();
        let parsed: Utxo = bincode::deserialize(&bytes).unwrap();
        assert_eq!(parsed, utxo);
    }
}
