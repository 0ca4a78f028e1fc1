//! Slideshow demo application
//!
//! Simulates a host driving the display pool: a few cache warm-up passes,
//! a cycling slideshow advanced on a virtual tick loop, a burst of
//! simultaneous displays, and periodic monitor reports. A synthetic loader
//! stands in for disk assets so the demo runs anywhere.

use display_pool::prelude::*;

/// Keys the original test scene cycles through
const TEXTURE_KEYS: [&str; 5] = [
    "Wakfu Yugo",
    "Wakfu Lokus",
    "Raptor Shop Qurtet",
    "Velkhana",
    "Monster hunter logo",
];

/// Virtual seconds per host tick
const TICK_STEP: f32 = 0.5;

/// Loader fabricating a solid-color texture per key
///
/// The color is derived from the key so repeated loads are reproducible;
/// a real host would plug in [`TextureLoader`] here instead.
struct SyntheticLoader;

impl ResourceLoader for SyntheticLoader {
    type Resource = TextureData;

    fn load(&mut self, key: &str) -> Result<TextureData, LoadError> {
        let seed = key.bytes().fold(0u8, u8::wrapping_add);
        let color = [seed, seed.wrapping_mul(3), seed.wrapping_mul(7), 255];
        log::info!("synthesizing texture for '{key}'");
        Ok(TextureData::solid_color(256, 256, color))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = DisplayConfig::default();
    let keys: Vec<String> = TEXTURE_KEYS.iter().map(|s| (*s).to_string()).collect();

    let mut cache = ResourceCache::new(SyntheticLoader);
    let mut controller = CyclingController::new(
        PoolConfig {
            initial_size: config.pool.initial_size,
        },
        DisplaySlot::default,
    );
    let mut monitor = StatsMonitor::new(2.0);

    // Warm-up passes from the original tester: 5 loads, then 10 hits
    log::info!("starting resource cache test...");
    for pass in 1..=3 {
        log::info!("--- load pass {pass} ---");
        for key in &keys {
            if let Err(e) = cache.load(key) {
                log::error!("load failed: {e}");
            }
        }
    }
    cache.log_stats();

    // Cycle the slideshow for two full wraps of the key list
    controller.start_cycling(&keys, config.display_duration, &mut cache)?;
    let ticks = (keys.len() as f32 * config.display_duration * 2.0 / TICK_STEP) as u32;
    for _ in 0..ticks {
        controller.on_tick(TICK_STEP, &mut cache);
        if let Some(report) = monitor.on_tick(TICK_STEP, controller.pool_stats(), &cache) {
            println!("{report}\n");
        }
    }
    if let Some(key) = controller.current_key() {
        log::info!("slideshow stopped while showing '{key}'");
    }
    controller.stop();

    // Show everything at once, let the shared countdown expire
    controller.display_multiple(&keys, config.display_duration, &mut cache)?;
    log::info!(
        "displaying all {} keys: pool grew to {} slots",
        keys.len(),
        controller.pool_stats().total
    );
    let mut remaining = config.display_duration;
    while remaining > 0.0 {
        controller.on_tick(TICK_STEP, &mut cache);
        monitor.on_tick(TICK_STEP, controller.pool_stats(), &cache);
        remaining -= TICK_STEP;
    }

    // Teardown mirrors the original key bindings: unload one, clear the rest
    cache.unload(&keys[0]);
    cache.log_stats();
    controller.release_all();
    cache.clear();

    controller.pool().log_stats();
    cache.log_stats();
    log::info!("slideshow demo finished after {:.1}s of virtual time", monitor.uptime());
    Ok(())
}
