use std::fmt::Write as _;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngCore;

use crate::block::BlockId;

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> BlockId;
}

impl<F> IdGenerator for F
where
    F: Fn() -> BlockId + Send + Sync,
{
    fn next_id(&self) -> BlockId {
        self()
    }
}

/// 12-byte ids rendered as 24 lowercase hex chars: a 4-byte timestamp, five
/// process-random bytes and a 3-byte counter.
pub struct ObjectIdGenerator {
    process: [u8; 5],
    counter: AtomicU32,
}

impl ObjectIdGenerator {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let mut process = [0u8; 5];
        rng.fill_bytes(&mut process);
        Self {
            process,
            counter: AtomicU32::new(rng.next_u32()),
        }
    }
}

impl Default for ObjectIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for ObjectIdGenerator {
    fn next_id(&self) -> BlockId {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or_default();
        let counter = self.counter.fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&self.process);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);

        bytes.iter().fold(String::with_capacity(24), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
    }
}

/// Hands out a fixed list of ids in order, then falls back to object ids.
pub struct SequenceIdGenerator {
    ids: Vec<BlockId>,
    next: AtomicUsize,
    fallback: Mutex<Option<ObjectIdGenerator>>,
}

impl SequenceIdGenerator {
    pub fn from_slice<S: AsRef<str>>(ids: &[S]) -> Self {
        Self {
            ids: ids.iter().map(|id| id.as_ref().to_string()).collect(),
            next: AtomicUsize::new(0),
            fallback: Mutex::new(None),
        }
    }

    pub fn remaining(&self) -> usize {
        self.ids
            .len()
            .saturating_sub(self.next.load(Ordering::Relaxed))
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> BlockId {
        let ix = self.next.fetch_add(1, Ordering::Relaxed);
        if let Some(id) = self.ids.get(ix) {
            return id.clone();
        }
        let mut fallback = match self.fallback.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        fallback
            .get_or_insert_with(ObjectIdGenerator::new)
            .next_id()
    }
}
