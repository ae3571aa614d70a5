use std::collections::VecDeque;

use utxo_types::{Transaction, TxId};

/// A transaction admitted to the mempool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MempoolEntry {
    pub tx_id: TxId,
    pub tx: Transaction,
    /// Serialized size, in bytes, measured at admission.
    pub size: u64,
    /// Slot at which the transaction was admitted.
    pub admitted_slot: u64,
}

/// Strict FIFO queue of admitted transactions.
///
/// No priority, no reordering and no de-duplication: entries leave in the
/// order they arrived, each exactly once.
#[derive(Debug, Default)]
pub struct Mempool {
    queue: VecDeque<MempoolEntry>,
}

impl Mempool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, entry: MempoolEntry) {
        self.queue.push_back(entry);
    }

    pub fn dequeue(&mut self) -> Option<MempoolEntry> {
        self.queue.pop_front()
    }

    pub fn peek(&self) -> Option<&MempoolEntry> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Entries from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &MempoolEntry> {
        self.queue.iter()
    }

    /// Combined size of every queued transaction.
    pub fn total_size(&self) -> u64 {
        self.queue.iter().map(|e| e.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use utxo_types::TxBody;

    use super::*;

    fn entry(fee: u64) -> MempoolEntry {
        let tx = Transaction::new(TxBody {
            fee,
            ..Default::default()
        });
        MempoolEntry {
            tx_id: tx.id().unwrap(),
            size: tx.serialized_size().unwrap(),
            tx,
            admitted_slot: 0,
        }
    }

    #[test]
    fn fifo_order() {
        let mut mempool = Mempool::new();
        for fee in 1..=3 {
            mempool.enqueue(entry(fee));
        }
        assert_eq!(mempool.len(), 3);
        assert_eq!(mempool.peek().unwrap().tx.body.fee, 1);

        let fees: Vec<u64> = mempool.iter().map(|e| e.tx.body.fee).collect();
        assert_eq!(fees, vec![1, 2, 3]);

        assert_eq!(mempool.dequeue().unwrap().tx.body.fee, 1);
        assert_eq!(mempool.dequeue().unwrap().tx.body.fee, 2);
        assert_eq!(mempool.peek().unwrap().tx.body.fee, 3);
        assert_eq!(mempool.len(), 1);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut mempool = Mempool::new();
        mempool.enqueue(entry(7));
        mempool.enqueue(entry(7));
        assert_eq!(mempool.len(), 2);
        assert_eq!(mempool.total_size(), 2 * entry(7).size);
    }

    #[test]
    fn empty_queue() {
        let mut mempool = Mempool::new();
        assert!(mempool.is_empty());
        assert!(mempool.peek().is_none());
        assert!(mempool.dequeue().is_none());
        assert_eq!(mempool.total_size(), 0);
    }
}
