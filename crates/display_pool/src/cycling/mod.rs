//! Tick-driven display cycling
//!
//! The [`CyclingController`] time-multiplexes a sequence of texture keys onto
//! pooled display slots. It owns the slot pool; the texture cache is passed
//! into each operation so hosts keep a single cache shared across
//! controllers. All timing comes from [`CyclingController::on_tick`] — the
//! controller never reads a clock, never suspends, and finishes every
//! transition synchronously within the tick that triggered it.

use crate::cache::{ResourceCache, ResourceLoader};
use crate::display::DisplaySlot;
use crate::foundation::time::Countdown;
use crate::pool::{PoolConfig, PoolError, PoolStats, ResourcePool, SlotHandle};
use crate::texture::TextureData;

/// Which state the cycling machine is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// Nothing scheduled
    Idle,
    /// One key shown until its countdown expires
    Displaying,
    /// Rotating through a key list, wrapping at the end
    Cycling,
    /// Rotating through a key list once, then idle
    Sequence,
}

enum Mode {
    Idle,
    Displaying {
        handle: SlotHandle,
        key: String,
        countdown: Countdown,
    },
    Cycling {
        handle: SlotHandle,
        keys: Vec<String>,
        index: usize,
        interval: f32,
        countdown: Countdown,
    },
    Sequence {
        handle: SlotHandle,
        keys: Vec<String>,
        index: usize,
        interval: f32,
        countdown: Countdown,
    },
}

struct OneShot {
    handle: SlotHandle,
    countdown: Countdown,
}

/// Drives pooled display slots through timed key rotations
pub struct CyclingController {
    pool: ResourcePool<DisplaySlot>,
    mode: Mode,
    one_shots: Vec<OneShot>,
}

impl CyclingController {
    /// Create a controller with its own display-slot pool
    pub fn new<F>(config: PoolConfig, factory: F) -> Self
    where
        F: FnMut() -> DisplaySlot + 'static,
    {
        Self::with_pool(ResourcePool::new(config, factory))
    }

    /// Create a controller around an existing pool
    ///
    /// Accepts an unconfigured pool; operations then fail with
    /// [`PoolError::NotConfigured`] until a factory is installed.
    pub fn with_pool(pool: ResourcePool<DisplaySlot>) -> Self {
        Self {
            pool,
            mode: Mode::Idle,
            one_shots: Vec::new(),
        }
    }

    /// Begin rotating through `keys`, one every `interval` seconds
    ///
    /// Shows `keys[0]` immediately and wraps at the end of the list. Any
    /// previous cycling or single display is stopped first. An empty key
    /// list is a logged no-op.
    ///
    /// # Errors
    /// Returns [`PoolError::NotConfigured`] when no slot can be acquired.
    pub fn start_cycling<L>(
        &mut self,
        keys: &[String],
        interval: f32,
        cache: &mut ResourceCache<L>,
    ) -> Result<(), PoolError>
    where
        L: ResourceLoader<Resource = TextureData>,
    {
        if keys.is_empty() {
            log::error!("no texture keys provided for cycling");
            return Ok(());
        }
        self.stop();
        let handle = self.pool.acquire()?;
        show_key(&mut self.pool, handle, &keys[0], cache);
        self.mode = Mode::Cycling {
            handle,
            keys: keys.to_vec(),
            index: 0,
            interval,
            countdown: Countdown::new(interval),
        };
        log::info!(
            "cycling through {} keys ({interval}s per key)",
            keys.len()
        );
        Ok(())
    }

    /// Show the keys once in order, then go idle
    ///
    /// Like [`CyclingController::start_cycling`] but without wrapping: after
    /// the last key's interval expires the slot is cleared and released.
    ///
    /// # Errors
    /// Returns [`PoolError::NotConfigured`] when no slot can be acquired.
    pub fn display_sequence<L>(
        &mut self,
        keys: &[String],
        interval: f32,
        cache: &mut ResourceCache<L>,
    ) -> Result<(), PoolError>
    where
        L: ResourceLoader<Resource = TextureData>,
    {
        if keys.is_empty() {
            log::error!("no texture keys provided for sequence");
            return Ok(());
        }
        self.stop();
        let handle = self.pool.acquire()?;
        show_key(&mut self.pool, handle, &keys[0], cache);
        self.mode = Mode::Sequence {
            handle,
            keys: keys.to_vec(),
            index: 0,
            interval,
            countdown: Countdown::new(interval),
        };
        log::info!("sequencing {} keys ({interval}s per key)", keys.len());
        Ok(())
    }

    /// Show a single key for `duration` seconds, then go idle
    ///
    /// Stops any cycling in progress.
    ///
    /// # Errors
    /// Returns [`PoolError::NotConfigured`] when no slot can be acquired.
    pub fn display_one<L>(
        &mut self,
        key: &str,
        duration: f32,
        cache: &mut ResourceCache<L>,
    ) -> Result<SlotHandle, PoolError>
    where
        L: ResourceLoader<Resource = TextureData>,
    {
        self.stop();
        let handle = self.pool.acquire()?;
        show_key(&mut self.pool, handle, key, cache);
        self.mode = Mode::Displaying {
            handle,
            key: key.to_string(),
            countdown: Countdown::new(duration),
        };
        Ok(handle)
    }

    /// Show several keys simultaneously, one slot each, for a shared duration
    ///
    /// Runs alongside the cycling state machine; each slot is released when
    /// its countdown expires.
    ///
    /// # Errors
    /// Returns [`PoolError::NotConfigured`] when a slot cannot be acquired.
    pub fn display_multiple<L>(
        &mut self,
        keys: &[String],
        duration: f32,
        cache: &mut ResourceCache<L>,
    ) -> Result<Vec<SlotHandle>, PoolError>
    where
        L: ResourceLoader<Resource = TextureData>,
    {
        let mut handles = Vec::with_capacity(keys.len());
        for key in keys {
            let handle = self.pool.acquire()?;
            show_key(&mut self.pool, handle, key, cache);
            self.one_shots.push(OneShot {
                handle,
                countdown: Countdown::new(duration),
            });
            handles.push(handle);
        }
        log::info!("displaying {} keys simultaneously", handles.len());
        Ok(handles)
    }

    /// Advance all timers by `delta` seconds
    ///
    /// Everything here is synchronous: expired one-shots are released,
    /// cycling advances and reloads, an expired single display clears its
    /// slot and the machine returns to idle.
    pub fn on_tick<L>(&mut self, delta: f32, cache: &mut ResourceCache<L>)
    where
        L: ResourceLoader<Resource = TextureData>,
    {
        // One-shot displays tick independently of the main machine
        let mut expired = Vec::new();
        for shot in &mut self.one_shots {
            if shot.countdown.tick(delta) {
                expired.push(shot.handle);
            }
        }
        self.one_shots.retain(|shot| shot.countdown.is_running());
        for handle in expired {
            self.pool.release(handle);
        }

        enum Advance {
            None,
            EndDisplay(SlotHandle),
            Show(SlotHandle, String),
            EndSequence(SlotHandle),
        }

        let advance = match &mut self.mode {
            Mode::Idle => Advance::None,
            Mode::Displaying {
                handle, countdown, ..
            } => {
                if countdown.tick(delta) {
                    Advance::EndDisplay(*handle)
                } else {
                    Advance::None
                }
            }
            Mode::Cycling {
                handle,
                keys,
                index,
                interval,
                countdown,
            } => {
                if countdown.tick(delta) {
                    *index = (*index + 1) % keys.len();
                    countdown.reset(*interval);
                    log::debug!("cycling advanced to {}/{}", *index + 1, keys.len());
                    Advance::Show(*handle, keys[*index].clone())
                } else {
                    Advance::None
                }
            }
            Mode::Sequence {
                handle,
                keys,
                index,
                interval,
                countdown,
            } => {
                if countdown.tick(delta) {
                    *index += 1;
                    if *index < keys.len() {
                        countdown.reset(*interval);
                        Advance::Show(*handle, keys[*index].clone())
                    } else {
                        Advance::EndSequence(*handle)
                    }
                } else {
                    Advance::None
                }
            }
        };

        match advance {
            Advance::None => {}
            Advance::Show(handle, key) => show_key(&mut self.pool, handle, &key, cache),
            Advance::EndDisplay(handle) | Advance::EndSequence(handle) => {
                self.pool.release(handle);
                self.mode = Mode::Idle;
                log::debug!("display finished, slot returned to pool");
            }
        }
    }

    /// Stop cycling or displaying and return to idle
    ///
    /// Idempotent; simultaneous one-shot displays keep running (use
    /// [`CyclingController::release_all`] to drop those too).
    pub fn stop(&mut self) {
        match std::mem::replace(&mut self.mode, Mode::Idle) {
            Mode::Idle => {}
            Mode::Displaying { handle, .. }
            | Mode::Cycling { handle, .. }
            | Mode::Sequence { handle, .. } => {
                self.pool.release(handle);
                log::info!("cycling stopped");
            }
        }
    }

    /// Stop everything and return every active slot to the pool
    pub fn release_all(&mut self) {
        self.mode = Mode::Idle;
        self.one_shots.clear();
        self.pool.release_all();
        log::info!("all displays cleared and returned to pool");
    }

    /// Current state of the cycling machine
    pub fn state(&self) -> CycleState {
        match self.mode {
            Mode::Idle => CycleState::Idle,
            Mode::Displaying { .. } => CycleState::Displaying,
            Mode::Cycling { .. } => CycleState::Cycling,
            Mode::Sequence { .. } => CycleState::Sequence,
        }
    }

    /// Key the cycling machine is currently showing, if any
    pub fn current_key(&self) -> Option<&str> {
        match &self.mode {
            Mode::Idle => None,
            Mode::Displaying { key, .. } => Some(key),
            Mode::Cycling { keys, index, .. } | Mode::Sequence { keys, index, .. } => {
                keys.get(*index).map(String::as_str)
            }
        }
    }

    /// Access the underlying slot pool
    pub fn pool(&self) -> &ResourcePool<DisplaySlot> {
        &self.pool
    }

    /// Mutable access to the underlying slot pool
    pub fn pool_mut(&mut self) -> &mut ResourcePool<DisplaySlot> {
        &mut self.pool
    }

    /// Counters of the underlying slot pool
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }
}

/// Load `key` and push it onto the slot behind `handle`
///
/// A failed load is logged and the slot still transitions, showing the key
/// as unresolved; cache misses are never fatal here.
fn show_key<L>(
    pool: &mut ResourcePool<DisplaySlot>,
    handle: SlotHandle,
    key: &str,
    cache: &mut ResourceCache<L>,
) where
    L: ResourceLoader<Resource = TextureData>,
{
    let dimensions = cache.load(key).map(|tex| (tex.width, tex.height));
    let Some(slot) = pool.get_mut(handle) else {
        log::warn!("show ignored: {handle:?} does not belong to this pool");
        return;
    };
    match dimensions {
        Ok((width, height)) => slot.show(key, width, height),
        Err(e) => {
            log::warn!("failed to load '{key}': {e}");
            slot.show_unresolved(key);
        }
    }
}
