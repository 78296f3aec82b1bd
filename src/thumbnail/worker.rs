//! Background thumbnail decoding with an LRU cache of finished thumbnails.

use crate::thumbnail::decoder::ThumbnailDecoder;
use crate::thumbnail::protocol::{
    MediaItem, MediaKind, RequestId, Thumbnail, ThumbnailCommand, ThumbnailResponse,
};
use log::debug;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

/// Run the single thumbnail worker, decoding requests in arrival order.
///
/// Stops on `Shutdown`, when the command channel closes, or when the event loop stops
/// listening for responses.
pub async fn thumbnail_worker_loop(
    mut rx: Receiver<ThumbnailCommand>,
    tx: Sender<ThumbnailResponse>,
    decoder: Arc<dyn ThumbnailDecoder>,
    cache_capacity: usize,
) {
    let mut state = WorkerState::new(decoder, cache_capacity);

    while let Some(cmd) = rx.recv().await {
        let outcome = state.handle_command(cmd).await;
        if let Some(response) = outcome.response {
            if tx.send(response).await.is_err() {
                break;
            }
        }

        if outcome.done {
            break;
        }
    }
}

struct WorkerState {
    decoder: Arc<dyn ThumbnailDecoder>,
    cache: LruCache<(MediaItem, u32), Thumbnail>,
}

impl WorkerState {
    fn new(decoder: Arc<dyn ThumbnailDecoder>, cache_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            decoder,
            cache: LruCache::new(capacity),
        }
    }

    async fn handle_command(&mut self, cmd: ThumbnailCommand) -> HandlerOutcome {
        match cmd {
            ThumbnailCommand::Decode {
                request_id,
                item,
                side,
            } => HandlerOutcome::respond(self.decode(request_id, item, side).await),
            ThumbnailCommand::Shutdown => HandlerOutcome::exit(),
        }
    }

    async fn decode(
        &mut self,
        request_id: RequestId,
        item: MediaItem,
        side: u32,
    ) -> ThumbnailResponse {
        let key = (item, side);
        let thumbnail = match self.cache.get(&key).cloned() {
            Some(cached) => Some(cached),
            None => {
                let decoded = self.decode_uncached(&key.0, side).await;
                if let Some(thumbnail) = decoded.as_ref() {
                    self.cache.put(key.clone(), thumbnail.clone());
                }
                decoded
            }
        };

        ThumbnailResponse {
            request_id,
            item: key.0,
            thumbnail,
        }
    }

    async fn decode_uncached(&self, item: &MediaItem, side: u32) -> Option<Thumbnail> {
        if item.kind == MediaKind::Other {
            return None;
        }
        match self.decoder.decode(item, side).await {
            Ok(thumbnail) => thumbnail,
            Err(err) => {
                debug!("unable to update preview: {err}");
                None
            }
        }
    }
}

struct HandlerOutcome {
    response: Option<ThumbnailResponse>,
    done: bool,
}

impl HandlerOutcome {
    fn respond(response: ThumbnailResponse) -> Self {
        Self {
            response: Some(response),
            done: false,
        }
    }

    fn exit() -> Self {
        Self {
            response: None,
            done: true,
        }
    }
}
