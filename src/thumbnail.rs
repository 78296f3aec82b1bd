//! Last-captured-item thumbnail: background decoding with stale-result suppression.

pub mod decoder;
pub mod protocol;
pub mod slot;
pub mod worker;

pub use decoder::{fit_within, PlaceholderDecoder, ThumbnailDecoder};
pub use protocol::{
    MediaItem, MediaKind, RequestId, Thumbnail, ThumbnailCommand, ThumbnailResponse,
};
pub use slot::ThumbnailSlot;
pub use worker::thumbnail_worker_loop;
