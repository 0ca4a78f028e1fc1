//! Display slot payloads
//!
//! A [`DisplaySlot`] records what one pooled handle is currently showing.
//! The actual visual surface (a quad, a UI image, a terminal cell) lives on
//! the host; the slot only carries the key, dimensions, and a caption the
//! host can render.

use crate::pool::Reusable;

/// What one pooled display handle is showing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplaySlot {
    current_key: Option<String>,
    caption: Option<String>,
    dimensions: Option<(u32, u32)>,
}

impl DisplaySlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the texture behind `key` with its pixel dimensions
    pub fn show(&mut self, key: &str, width: u32, height: u32) {
        self.caption = Some(format!("Now showing: {key} ({width}x{height})"));
        self.current_key = Some(key.to_string());
        self.dimensions = Some((width, height));
        log::debug!("slot showing '{key}' ({width}x{height})");
    }

    /// Mark the slot as showing `key` with no dimension information
    ///
    /// Used when the texture itself failed to load but the transition still
    /// happens; the host decides what a missing texture looks like.
    pub fn show_unresolved(&mut self, key: &str) {
        self.caption = Some(format!("Now showing: {key} (unavailable)"));
        self.current_key = Some(key.to_string());
        self.dimensions = None;
    }

    /// Clear everything the slot is showing
    pub fn clear(&mut self) {
        self.current_key = None;
        self.caption = None;
        self.dimensions = None;
    }

    /// Whether the slot is showing anything
    pub fn is_showing(&self) -> bool {
        self.current_key.is_some()
    }

    /// Key currently shown, if any
    pub fn current_key(&self) -> Option<&str> {
        self.current_key.as_deref()
    }

    /// Caption text for the host UI, if any
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Pixel dimensions of the shown texture, if known
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }
}

impl Reusable for DisplaySlot {
    fn reset(&mut self) {
        self.clear();
    }
}
