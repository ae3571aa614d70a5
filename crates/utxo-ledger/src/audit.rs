use std::fmt;

use utxo_types::{Address, TxOutRef};

use crate::state::LedgerState;

/// Result of an address-index audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditReport {
    pub utxo_count: usize,
    pub address_count: usize,
    pub violations: Vec<IndexViolation>,
}

impl AuditReport {
    /// Returns `true` if the index matches the UTxO set exactly.
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A single disagreement between the UTxO set and the address index.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct IndexViolation {
    pub address: Address,
    pub out_ref: Option<TxOutRef>,
    pub kind: ViolationKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ViolationKind {
    /// A live UTxO is missing from its address's set.
    Unindexed,
    /// The index lists a reference that is not live.
    StaleEntry,
    /// The index lists a live reference under an address that does not own it.
    WrongAddress,
    /// An address maps to an empty set.
    EmptyEntry,
}

impl fmt::Display for IndexViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.out_ref) {
            (ViolationKind::Unindexed, Some(r)) => {
                write!(f, "{r} is live but not indexed under {}", self.address)
            }
            (ViolationKind::StaleEntry, Some(r)) => {
                write!(f, "{r} is indexed under {} but not live", self.address)
            }
            (ViolationKind::WrongAddress, Some(r)) => {
                write!(f, "{r} is indexed under {} but owned elsewhere", self.address)
            }
            (ViolationKind::EmptyEntry, _) | (_, None) => {
                write!(f, "address {} has an empty index entry", self.address)
            }
        }
    }
}

/// Cross-checks the address index against the UTxO set.
pub struct IndexAuditor;

impl IndexAuditor {
    /// Collect every violation, in address/reference order.
    pub fn audit(state: &LedgerState) -> AuditReport {
        let mut violations = Vec::new();

        for (out_ref, output) in &state.utxos {
            let indexed = state
                .addresses
                .get(&output.address)
                .is_some_and(|refs| refs.contains(out_ref));
            if !indexed {
                violations.push(IndexViolation {
                    address: output.address.clone(),
                    out_ref: Some(*out_ref),
                    kind: ViolationKind::Unindexed,
                });
            }
        }

        for (address, refs) in &state.addresses {
            if refs.is_empty() {
                violations.push(IndexViolation {
                    address: address.clone(),
                    out_ref: None,
                    kind: ViolationKind::EmptyEntry,
                });
            }
            for out_ref in refs {
                let kind = match state.utxos.get(out_ref) {
                    None => ViolationKind::StaleEntry,
                    Some(output) if output.address != *address => ViolationKind::WrongAddress,
                    Some(_) => continue,
                };
                violations.push(IndexViolation {
                    address: address.clone(),
                    out_ref: Some(*out_ref),
                    kind,
                });
            }
        }

        violations.sort();
        AuditReport {
            utxo_count: state.utxos.len(),
            address_count: state.addresses.len(),
            violations,
        }
    }
}
