//! Generic resource pooling
//!
//! A [`ResourcePool`] hands out reusable handles to expensive payloads so the
//! host avoids repeated allocation and teardown. Released slots are reused in
//! FIFO order; an exhausted pool grows by one instead of failing, and never
//! shrinks on its own.
//!
//! The pool never touches the payload beyond calling [`Reusable::reset`] when
//! a slot is returned. What a payload *is* (a display surface, a particle, a
//! network buffer) stays opaque here.

use slotmap::SlotMap;
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

slotmap::new_key_type! {
    /// Stable identity for a pooled slot
    ///
    /// Handles stay valid for the lifetime of the pool; releasing a slot does
    /// not invalidate its handle, it only changes which set the slot sits in.
    pub struct SlotHandle;
}

/// Pool errors
#[derive(Debug, Error)]
pub enum PoolError {
    /// The pool has no factory and cannot create slots
    #[error("pool has no slot factory configured")]
    NotConfigured,
}

/// Configuration for a resource pool
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of slots to pre-create at construction
    pub initial_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { initial_size: 5 }
    }
}

/// Read-only pool counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Slots waiting for reuse
    pub available: usize,
    /// Slots currently handed out
    pub active: usize,
    /// Total slots ever created (available + active)
    pub total: usize,
}

/// Payloads that can be returned to a neutral state for reuse
pub trait Reusable {
    /// Reset to a neutral state: stop timers, clear displayed content
    fn reset(&mut self);
}

struct Slot<T> {
    payload: T,
    active: bool,
}

/// Reusable set of handles to expensive payloads
///
/// Two disjoint sets back the pool: an ordered `available` queue (FIFO reuse,
/// so `acquire` always yields the least-recently-released slot) and an
/// unordered `active` set. Every slot is in exactly one of the two at all
/// times.
pub struct ResourcePool<T> {
    slots: SlotMap<SlotHandle, Slot<T>>,
    available: VecDeque<SlotHandle>,
    active: HashSet<SlotHandle>,
    factory: Option<Box<dyn FnMut() -> T>>,
}

impl<T> ResourcePool<T> {
    /// Create a pool and pre-create `config.initial_size` inactive slots
    pub fn new<F>(config: PoolConfig, factory: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        let mut pool = Self {
            slots: SlotMap::with_capacity_and_key(config.initial_size),
            available: VecDeque::with_capacity(config.initial_size),
            active: HashSet::new(),
            factory: Some(Box::new(factory)),
        };
        for _ in 0..config.initial_size {
            // Factory was installed just above, so this cannot fail
            if let Ok(handle) = pool.create_slot() {
                pool.available.push_back(handle);
            }
        }
        log::info!("ResourcePool initialized with {} slots", config.initial_size);
        pool
    }

    /// Create a pool with no slot factory
    ///
    /// Models a host that failed to provide the prefab/factory at startup:
    /// the error is reported once here, the pool stays empty but operable,
    /// and [`ResourcePool::set_factory`] makes it functional later.
    pub fn unconfigured() -> Self {
        log::error!("ResourcePool created without a slot factory; acquire will fail until one is set");
        Self {
            slots: SlotMap::with_key(),
            available: VecDeque::new(),
            active: HashSet::new(),
            factory: None,
        }
    }

    /// Install or replace the slot factory
    pub fn set_factory<F>(&mut self, factory: F)
    where
        F: FnMut() -> T + 'static,
    {
        self.factory = Some(Box::new(factory));
        log::info!("ResourcePool factory configured");
    }

    /// Whether a slot factory is installed
    pub fn is_configured(&self) -> bool {
        self.factory.is_some()
    }

    /// Pre-create `count` additional inactive slots
    ///
    /// # Errors
    /// Returns [`PoolError::NotConfigured`] if no factory is installed.
    pub fn warm(&mut self, count: usize) -> Result<(), PoolError> {
        for _ in 0..count {
            let handle = self.create_slot()?;
            self.available.push_back(handle);
        }
        log::debug!("ResourcePool warmed with {} extra slots", count);
        Ok(())
    }

    /// Take a slot from the pool, growing it if none are available
    ///
    /// Reuses the least-recently-released slot when one exists (FIFO);
    /// otherwise creates a new slot via the factory. Never fails on
    /// exhaustion.
    ///
    /// # Errors
    /// Returns [`PoolError::NotConfigured`] if no factory is installed.
    pub fn acquire(&mut self) -> Result<SlotHandle, PoolError> {
        let handle = if let Some(handle) = self.available.pop_front() {
            handle
        } else {
            let handle = self.create_slot()?;
            log::debug!("ResourcePool expanded to {} slots", self.slots.len());
            handle
        };
        // Queue membership implies the slot exists
        self.slots[handle].active = true;
        self.active.insert(handle);
        Ok(handle)
    }

    /// Borrow a slot payload
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        self.slots.get(handle).map(|slot| &slot.payload)
    }

    /// Mutably borrow a slot payload
    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        self.slots.get_mut(handle).map(|slot| &mut slot.payload)
    }

    /// Whether `handle` names a slot that is currently handed out
    pub fn is_active(&self, handle: SlotHandle) -> bool {
        self.slots.get(handle).is_some_and(|slot| slot.active)
    }

    /// Current pool counters, O(1)
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            available: self.available.len(),
            active: self.active.len(),
            total: self.slots.len(),
        }
    }

    /// Log pool counters at info level
    pub fn log_stats(&self) {
        let stats = self.stats();
        log::info!(
            "ResourcePool stats: available={} active={} total={}",
            stats.available,
            stats.active,
            stats.total
        );
    }

    fn create_slot(&mut self) -> Result<SlotHandle, PoolError> {
        let factory = self.factory.as_mut().ok_or(PoolError::NotConfigured)?;
        let payload = factory();
        Ok(self.slots.insert(Slot {
            payload,
            active: false,
        }))
    }
}

impl<T: Reusable> ResourcePool<T> {
    /// Return a slot to the pool
    ///
    /// Resets the payload to its neutral state and appends the slot to the
    /// back of the available queue. Releasing a foreign/stale handle or an
    /// already-inactive slot is a logged no-op, never an error.
    pub fn release(&mut self, handle: SlotHandle) {
        let Some(slot) = self.slots.get_mut(handle) else {
            log::warn!("release ignored: {handle:?} does not belong to this pool");
            return;
        };
        if !slot.active {
            log::warn!("release ignored: {handle:?} is already inactive");
            return;
        }
        slot.payload.reset();
        slot.active = false;
        self.active.remove(&handle);
        self.available.push_back(handle);
    }

    /// Return every active slot to the pool
    ///
    /// The active set is snapshotted first so releases during iteration
    /// cannot skip or repeat slots.
    pub fn release_all(&mut self) {
        let handles: Vec<SlotHandle> = self.active.iter().copied().collect();
        for handle in handles {
            self.release(handle);
        }
        log::debug!("all active slots returned to pool");
    }
}

impl<T> std::fmt::Debug for ResourcePool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("ResourcePool")
            .field("available", &stats.available)
            .field("active", &stats.active)
            .field("total", &stats.total)
            .field("configured", &self.is_configured())
            .finish()
    }
}
