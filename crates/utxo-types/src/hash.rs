/// Domain-separated BLAKE3 hasher.
///
/// Each hasher carries a domain tag that is prepended to every hash
/// computation, so a datum and a transaction body with identical bytes never
/// share an identifier.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for encoded transaction bodies.
    pub const TX_BODY: Self = Self {
        domain: "utxo-tx-body-v1",
    };
    /// Hasher for datum bytes.
    pub const DATUM: Self = Self {
        domain: "utxo-datum-v1",
    };
    /// Hasher for the pseudo transaction that funds the initial UTxO set.
    pub const GENESIS: Self = Self {
        domain: "utxo-genesis-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        *hasher.finalize().as_bytes()
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}
