//! # Display Pool
//!
//! Texture caching and display-slot pooling with a tick-driven cycling
//! controller.
//!
//! ## Features
//!
//! - **Resource Pooling**: Reusable handles with FIFO reuse and on-demand growth
//! - **Resource Caching**: Key-based cache with hit/load statistics
//! - **Cycling Controller**: Time-multiplexed rotation through resource keys
//! - **Tick-Driven**: All timing comes from the host via `on_tick(delta)`,
//!   so tests can advance a virtual clock deterministically
//! - **No Engine Bindings**: Rendering, input, and scene lifecycle stay on the
//!   host side behind loader callbacks
//!
//! ## Quick Start
//!
//! ```rust
//! use display_pool::prelude::*;
//!
//! struct SolidLoader;
//!
//! impl ResourceLoader for SolidLoader {
//!     type Resource = TextureData;
//!
//!     fn load(&mut self, key: &str) -> Result<TextureData, LoadError> {
//!         let _ = key;
//!         Ok(TextureData::solid_color(64, 64, [255, 255, 255, 255]))
//!     }
//! }
//!
//! let mut cache = ResourceCache::new(SolidLoader);
//! let mut controller = CyclingController::new(
//!     PoolConfig { initial_size: 3 },
//!     DisplaySlot::default,
//! );
//!
//! controller
//!     .start_cycling(&["intro".to_string(), "title".to_string()], 3.0, &mut cache)
//!     .unwrap();
//! controller.on_tick(3.0, &mut cache); // advances to "title"
//! controller.stop();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;

pub mod cache;
pub mod config;
pub mod cycling;
pub mod display;
pub mod monitor;
pub mod pool;
pub mod texture;

#[cfg(test)]
mod test_slideshow_flow;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        cache::{CacheError, CacheStats, LoadError, ResourceCache, ResourceLoader, ResourceSize},
        config::{CacheSettings, Config, ConfigError, DisplayConfig, PoolSettings},
        cycling::{CycleState, CyclingController},
        display::DisplaySlot,
        foundation::time::{Countdown, TickClock},
        monitor::StatsMonitor,
        pool::{PoolConfig, PoolError, PoolStats, ResourcePool, Reusable, SlotHandle},
        texture::{TextureData, TextureLoader},
    };
}
