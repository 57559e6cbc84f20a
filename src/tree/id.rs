//! Node id generation

use crate::types::{NodeId, NodeKind};
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic id source, one per store.
///
/// Ids look like `doc-17` or `folder-18`. The counter is shared between kinds,
/// so two ids from the same generator never collide even for rapid calls.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Next id for `kind` that `taken` does not already report as used.
    ///
    /// `taken` lets the caller skip ids that came from seeded or restored
    /// forests.
    pub fn next_id(&self, kind: NodeKind, taken: impl Fn(&NodeId) -> bool) -> NodeId {
        loop {
            let n = self.next.fetch_add(1, Ordering::Relaxed);
            let id = NodeId::new(format!("{}-{}", kind.id_prefix(), n));
            if !taken(&id) {
                return id;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
