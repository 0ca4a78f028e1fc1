//! Texture payloads and file-backed loading
//!
//! [`TextureData`] is the decoded payload the cache stores; [`TextureLoader`]
//! resolves bare keys (`"Velkhana"`) against configured search paths and
//! extensions, the way hosts address textures by name rather than by path.
//! What happens to the pixels afterwards (upload, drawing) is host business.

use crate::cache::{LoadError, ResourceLoader, ResourceSize};
use crate::config::CacheSettings;
use std::path::{Path, PathBuf};

/// Decoded texture ready for host-side use
#[derive(Debug, Clone)]
pub struct TextureData {
    /// Raw RGBA pixel data
    pub pixels: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl TextureData {
    /// Decode a texture from a file path
    ///
    /// # Errors
    /// Returns [`LoadError::InvalidData`] when the file cannot be decoded.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        log::debug!("decoding texture from {path:?}");
        let img = image::open(path)
            .map_err(|e| LoadError::InvalidData(format!("{}: {e}", path.display())))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("decoded {width}x{height} texture from {path:?}");
        Ok(Self {
            pixels: rgba.into_raw(),
            width,
            height,
        })
    }

    /// Decode a texture from in-memory bytes (embedded resources)
    ///
    /// # Errors
    /// Returns [`LoadError::InvalidData`] when the bytes cannot be decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| LoadError::InvalidData(e.to_string()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("decoded {width}x{height} texture from memory");
        Ok(Self {
            pixels: rgba.into_raw(),
            width,
            height,
        })
    }

    /// Build a solid-color texture (tests, placeholders)
    pub fn solid_color(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut pixels = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Size of the pixel data in bytes
    pub fn size_bytes(&self) -> usize {
        self.pixels.len()
    }

    /// Whether both dimensions are powers of two
    pub fn is_power_of_two(&self) -> bool {
        self.width.is_power_of_two() && self.height.is_power_of_two()
    }
}

impl ResourceSize for TextureData {
    fn size_bytes(&self) -> usize {
        self.pixels.len()
    }
}

/// Loader resolving texture keys against search paths
///
/// A key like `"Monster hunter logo"` is tried as
/// `<search_path>/<key>.<extension>` for every configured combination, in
/// order, and the first existing file wins. No fallback search beyond that
/// list; an unresolvable key is a [`LoadError::NotFound`].
#[derive(Debug, Clone)]
pub struct TextureLoader {
    search_paths: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl TextureLoader {
    /// Create a loader from cache settings
    pub fn new(settings: &CacheSettings) -> Self {
        Self {
            search_paths: settings.search_paths.iter().map(PathBuf::from).collect(),
            extensions: settings.extensions.clone(),
        }
    }

    /// Resolve `key` to the first matching file on disk
    pub fn resolve(&self, key: &str) -> Option<PathBuf> {
        for search_path in &self.search_paths {
            for extension in &self.extensions {
                let candidate = search_path.join(format!("{key}.{extension}"));
                if candidate.exists() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

impl ResourceLoader for TextureLoader {
    type Resource = TextureData;

    fn load(&mut self, key: &str) -> Result<TextureData, LoadError> {
        let path = self
            .resolve(key)
            .ok_or_else(|| LoadError::NotFound(key.to_string()))?;
        TextureData::from_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_color_texture() {
        let tex = TextureData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(tex.width, 4);
        assert_eq!(tex.height, 4);
        assert_eq!(tex.size_bytes(), 4 * 4 * 4);
        assert_eq!(&tex.pixels[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn power_of_two_check() {
        assert!(TextureData::solid_color(256, 256, [0; 4]).is_power_of_two());
        assert!(!TextureData::solid_color(100, 100, [0; 4]).is_power_of_two());
    }

    #[test]
    fn from_bytes_rejects_garbage() {
        let err = TextureData::from_bytes(&[0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, LoadError::InvalidData(_)));
    }

    #[test]
    fn unresolvable_key_is_not_found() {
        let settings = CacheSettings {
            search_paths: vec!["does/not/exist".to_string()],
            extensions: vec!["png".to_string()],
        };
        let mut loader = TextureLoader::new(&settings);
        let err = loader.load("nothing").unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }
}
