//! Messages exchanged with the thumbnail worker.

use std::sync::Arc;

/// Identifier attached to decode requests so responses can be correlated.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

/// The "last captured item". Equality is identity for staleness checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaItem {
    pub uri: String,
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn new(uri: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            uri: uri.into(),
            kind,
        }
    }
}

/// Decoded RGBA thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl Thumbnail {
    pub fn new(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }
}

/// Commands sent from the event loop to the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum ThumbnailCommand {
    Decode {
        request_id: RequestId,
        item: MediaItem,
        side: u32,
    },
    Shutdown,
}

/// Result posted back to the event loop. `thumbnail` is `None` when nothing could be
/// decoded; failures never travel further than this.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailResponse {
    pub request_id: RequestId,
    pub item: MediaItem,
    pub thumbnail: Option<Thumbnail>,
}
