// log.rs — Bounded, concurrent ring buffer of audit records.
//
// The log is a fixed array of slots plus an atomic sequence counter. An
// append claims the next sequence id with a single fetch_add and writes the
// record into slot `(seq - 1) % capacity`, which is exactly the slot holding
// the record `capacity` appends older. That makes eviction FIFO by sequence
// id without any global lock: unrelated appends only contend when they land
// on the same slot.
//
// Each slot has its own mutex, held only long enough to move a record in or
// clone one out. A slot is only ever overwritten by a higher sequence id, so
// a writer that stalls between claiming its id and taking the slot lock can
// never clobber newer history. Readers copy records out one slot at a time
// and sort afterwards; they never wait on more than one short critical
// section.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::error::AuditError;
use crate::record::{ActorFilter, Attributed, AuditRecord};

/// Default number of records kept in memory.
pub const DEFAULT_CAPACITY: usize = 200;

/// A bounded, concurrency-safe FIFO of audit records keyed by sequence id.
pub struct AuditLog<T> {
    slots: Box<[Mutex<Option<AuditRecord<T>>>]>,
    /// Next sequence id to hand out. Starts at 1.
    next_seq: AtomicU64,
}

impl<T: Attributed + Clone> AuditLog<T> {
    /// Create an empty log holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Result<Self, AuditError> {
        if capacity == 0 {
            return Err(AuditError::ZeroCapacity);
        }
        let slots = (0..capacity).map(|_| Mutex::new(None)).collect();
        Ok(Self {
            slots,
            next_seq: AtomicU64::new(1),
        })
    }

    /// Append an entry, returning the sequence id assigned to it.
    ///
    /// When the log is full the record with the lowest surviving sequence
    /// id is evicted. The record is either stored whole or not at all.
    pub fn append(&self, entry: T) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let mut slot = self.slots[self.slot_index(seq)].lock();

        match slot.as_ref() {
            // Lapped by `capacity` newer appends while waiting for the lock:
            // this record is already older than everything the log retains.
            Some(existing) if existing.seq > seq => {
                tracing::trace!(seq, newer = existing.seq, "audit record evicted on arrival");
            }
            _ => *slot = Some(AuditRecord { seq, entry }),
        }

        seq
    }

    /// Return up to `limit` records matching `filter`, most recent first.
    pub fn recent(&self, limit: usize, filter: &ActorFilter) -> Vec<AuditRecord<T>> {
        let mut records: Vec<AuditRecord<T>> = self
            .slots
            .iter()
            .filter_map(|slot| {
                slot.lock()
                    .as_ref()
                    .filter(|record| filter.matches(&record.entry))
                    .cloned()
            })
            .collect();

        records.sort_unstable_by(|a, b| b.seq.cmp(&a.seq));
        records.truncate(limit);
        records
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of records held before eviction starts.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The most recently assigned sequence id, or 0 if nothing was appended.
    pub fn last_seq(&self) -> u64 {
        self.next_seq.load(Ordering::Relaxed) - 1
    }

    fn slot_index(&self, seq: u64) -> usize {
        ((seq - 1) % self.slots.len() as u64) as usize
    }
}
