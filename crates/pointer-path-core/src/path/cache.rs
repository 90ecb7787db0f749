//! Bounded cache of single-segment pointers
//!
//! Wildcard and descent traversal address each child through a one-segment
//! pointer. The cache memoizes those by segment, evicting the oldest-inserted
//! entry once the capacity is exceeded. It is shared behind an `Arc` and is
//! safe to use from concurrent traversals.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::path::{Pointer, Segment};

pub const DEFAULT_CACHE_CAPACITY: usize = 200;

static GLOBAL_CACHE: OnceLock<Arc<PointerCache>> = OnceLock::new();

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<Segment, Arc<Pointer>>,
    order: VecDeque<Segment>,
}

#[derive(Debug)]
pub struct PointerCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl PointerCache {
    /// A cache holding at most `capacity` pointers (minimum one)
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(CacheState::default()),
        }
    }

    /// The process-wide cache used by default compilers
    pub fn global() -> Arc<PointerCache> {
        Arc::clone(GLOBAL_CACHE.get_or_init(|| Arc::new(PointerCache::new(DEFAULT_CACHE_CAPACITY))))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the pointer for one segment, compiling and caching it on a miss
    pub fn get(&self, segment: &Segment) -> Arc<Pointer> {
        let mut state = self.lock();
        if let Some(pointer) = state.entries.get(segment) {
            return Arc::clone(pointer);
        }

        let pointer = Arc::new(Pointer::from_segments(vec![segment.clone()]));
        state.entries.insert(segment.clone(), Arc::clone(&pointer));
        state.order.push_back(segment.clone());

        while state.order.len() > self.capacity {
            if let Some(oldest) = state.order.pop_front() {
                state.entries.remove(&oldest);
                tracing::trace!(segment = %oldest, "evicted cached pointer");
            }
        }
        pointer
    }

    pub fn contains(&self, segment: &Segment) -> bool {
        self.lock().entries.contains_key(segment)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.order.clear();
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // The state is a plain map and queue; a panic mid-update cannot leave
        // an entry that points at the wrong segment.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PointerCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
