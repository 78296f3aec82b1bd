//! Decoder seam used by the thumbnail worker.

use crate::error::{Result, ViewfinderError};
use crate::thumbnail::protocol::{MediaItem, MediaKind, Thumbnail};
use async_trait::async_trait;

/// Turns a media item into a thumbnail no larger than `side` on either edge.
///
/// Implementations own their image buffers; the worker only moves the result.
#[async_trait]
pub trait ThumbnailDecoder: Send + Sync {
    /// `Ok(None)` means the item has no thumbnail (e.g. unsupported kind).
    async fn decode(&self, item: &MediaItem, side: u32) -> Result<Option<Thumbnail>>;
}

/// Scale `(width, height)` so the longer edge equals `side`, preserving aspect ratio.
pub fn fit_within(width: u32, height: u32, side: u32) -> (u32, u32) {
    if width == 0 || height == 0 || side == 0 {
        return (0, 0);
    }
    let ratio = (width as f64 / side as f64).max(height as f64 / side as f64);
    let scaled = |edge: u32| ((edge as f64 / ratio) as u32).max(1);
    (scaled(width), scaled(height))
}

/// Renders a flat RGBA frame of a fixed source size instead of reading media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderDecoder {
    pub source_width: u32,
    pub source_height: u32,
}

impl Default for PlaceholderDecoder {
    fn default() -> Self {
        Self {
            source_width: 1920,
            source_height: 1080,
        }
    }
}

#[async_trait]
impl ThumbnailDecoder for PlaceholderDecoder {
    async fn decode(&self, item: &MediaItem, side: u32) -> Result<Option<Thumbnail>> {
        let shade = match item.kind {
            MediaKind::Image => 0x80,
            MediaKind::Video => 0x40,
            MediaKind::Other => return Ok(None),
        };
        let (width, height) = fit_within(self.source_width, self.source_height, side);
        if width == 0 || height == 0 {
            return Err(ViewfinderError::decode(&item.uri, "empty source frame"));
        }
        let pixels = vec![shade; width as usize * height as usize * 4];
        Ok(Some(Thumbnail::new(width, height, pixels)))
    }
}
