//! End-to-end slideshow flow tests
//!
//! Drives the cache, pool, controller, and monitor together over a virtual
//! tick loop, the way a host would.

#[cfg(test)]
mod tests {
    use crate::cache::{LoadError, ResourceCache, ResourceLoader};
    use crate::config::CacheSettings;
    use crate::cycling::{CycleState, CyclingController};
    use crate::display::DisplaySlot;
    use crate::monitor::StatsMonitor;
    use crate::pool::PoolConfig;
    use crate::texture::{TextureData, TextureLoader};

    struct SolidLoader;

    impl ResourceLoader for SolidLoader {
        type Resource = TextureData;

        fn load(&mut self, key: &str) -> Result<TextureData, LoadError> {
            let _ = key;
            Ok(TextureData::solid_color(16, 16, [128, 128, 128, 255]))
        }
    }

    fn keys() -> Vec<String> {
        ["Wakfu Yugo", "Wakfu Lokus", "Raptor Shop Qurtet", "Velkhana", "Monster hunter logo"]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    #[test]
    fn full_slideshow_session() {
        let keys = keys();
        let mut cache = ResourceCache::new(SolidLoader);
        let mut controller =
            CyclingController::new(PoolConfig { initial_size: 5 }, DisplaySlot::default);
        let mut monitor = StatsMonitor::new(2.0);

        // Warm-up: three passes over five keys
        for _ in 0..3 {
            for key in &keys {
                cache.load(key).unwrap();
            }
        }
        assert_eq!(cache.load_count(), 5);
        assert_eq!(cache.hit_count(), 10);

        // One full wrap of the slideshow in 0.5s steps
        controller.start_cycling(&keys, 3.0, &mut cache).unwrap();
        let mut reports = 0;
        for _ in 0..30 {
            controller.on_tick(0.5, &mut cache);
            if monitor
                .on_tick(0.5, controller.pool_stats(), &cache)
                .is_some()
            {
                reports += 1;
            }
        }
        // 15s of virtual time: back at the first key, monitor fired 7 times
        assert_eq!(controller.current_key(), Some("Wakfu Yugo"));
        assert_eq!(reports, 7);

        // Cycling reuses cached textures, no further loads
        assert_eq!(cache.load_count(), 5);

        controller.release_all();
        cache.clear();
        assert_eq!(controller.pool_stats().active, 0);
        assert_eq!(cache.cached_count(), 0);
        assert_eq!(controller.state(), CycleState::Idle);
    }

    #[test]
    fn texture_loader_round_trip() {
        let dir = std::env::temp_dir().join("display_pool_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let tex = TextureData::solid_color(4, 4, [10, 20, 30, 255]);
        image::save_buffer(
            dir.join("checker.png"),
            &tex.pixels,
            tex.width,
            tex.height,
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();

        let settings = CacheSettings {
            search_paths: vec![dir.to_string_lossy().into_owned()],
            extensions: vec!["png".to_string()],
        };
        let mut cache = ResourceCache::new(TextureLoader::new(&settings));

        let loaded = cache.load("checker").unwrap();
        assert_eq!((loaded.width, loaded.height), (4, 4));
        assert_eq!(&loaded.pixels[0..4], &[10, 20, 30, 255]);
        assert_eq!(cache.total_bytes(), 4 * 4 * 4);

        assert!(cache.load("absent").is_err());
    }
}
