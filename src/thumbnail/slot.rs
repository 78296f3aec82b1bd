//! Displayed-thumbnail bookkeeping on the event loop side.
//!
//! Decodes finish whenever the worker gets to them. A finished decode is only shown if
//! the host is still started and the "current item" is the one that was decoded.

use crate::protocol::ControllerEvent;
use crate::thumbnail::protocol::{MediaItem, RequestId, Thumbnail, ThumbnailResponse};
use log::debug;

pub struct ThumbnailSlot {
    side: u32,
    current: Option<MediaItem>,
    displayed: Option<Thumbnail>,
    next_request_id: RequestId,
}

impl ThumbnailSlot {
    pub fn new(side: u32) -> Self {
        Self {
            side,
            current: None,
            displayed: None,
            next_request_id: 1,
        }
    }

    pub fn current(&self) -> Option<&MediaItem> {
        self.current.as_ref()
    }

    pub fn displayed(&self) -> Option<&Thumbnail> {
        self.displayed.as_ref()
    }

    /// Switch the current item: clear what is shown and, when started, ask for a decode.
    pub fn show(
        &mut self,
        item: Option<MediaItem>,
        started: bool,
        out: &mut Vec<ControllerEvent>,
    ) {
        self.current = item;
        self.refresh(started, out);
    }

    /// Clear and re-request the current item.
    pub fn refresh(&mut self, started: bool, out: &mut Vec<ControllerEvent>) {
        self.displayed = None;
        out.push(ControllerEvent::ThumbnailCleared);

        let Some(item) = self.current.clone() else {
            return;
        };
        if !started {
            return;
        }
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        out.push(ControllerEvent::ThumbnailDecodeRequested {
            request_id,
            item,
            side: self.side,
        });
    }

    /// Apply a posted decode, discarding it if it went stale.
    pub fn apply(
        &mut self,
        response: ThumbnailResponse,
        started: bool,
        out: &mut Vec<ControllerEvent>,
    ) {
        if !started {
            debug!("discarding thumbnail #{}: not started", response.request_id);
            return;
        }
        if self.current.as_ref() != Some(&response.item) {
            debug!(
                "discarding thumbnail #{}: item changed since decode began",
                response.request_id
            );
            return;
        }
        let Some(thumbnail) = response.thumbnail else {
            return;
        };
        self.displayed = Some(thumbnail.clone());
        out.push(ControllerEvent::ThumbnailUpdated {
            item: response.item,
            thumbnail,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thumbnail::protocol::MediaKind;

    fn item(uri: &str) -> MediaItem {
        MediaItem::new(uri, MediaKind::Image)
    }

    fn decoded(request_id: RequestId, uri: &str) -> ThumbnailResponse {
        ThumbnailResponse {
            request_id,
            item: item(uri),
            thumbnail: Some(Thumbnail::new(1, 1, vec![0u8, 0, 0, 255])),
        }
    }

    #[test]
    fn show_clears_then_requests_decode() {
        let mut slot = ThumbnailSlot::new(96);
        let mut out = Vec::new();
        slot.show(Some(item("a.jpg")), true, &mut out);

        assert_eq!(
            out,
            vec![
                ControllerEvent::ThumbnailCleared,
                ControllerEvent::ThumbnailDecodeRequested {
                    request_id: 1,
                    item: item("a.jpg"),
                    side: 96,
                },
            ]
        );
    }

    #[test]
    fn result_for_replaced_item_is_discarded() {
        let mut slot = ThumbnailSlot::new(96);
        let mut out = Vec::new();
        slot.show(Some(item("a.jpg")), true, &mut out);
        slot.show(Some(item("b.jpg")), true, &mut out);
        out.clear();

        slot.apply(decoded(1, "a.jpg"), true, &mut out);

        assert!(out.is_empty());
        assert_eq!(slot.displayed(), None);
    }

    #[test]
    fn stale_result_leaves_displayed_thumbnail_unchanged() {
        let mut slot = ThumbnailSlot::new(96);
        let mut out = Vec::new();
        slot.show(Some(item("b.jpg")), true, &mut out);
        slot.apply(decoded(2, "b.jpg"), true, &mut out);
        let before = slot.displayed().cloned();

        out.clear();
        slot.apply(decoded(1, "a.jpg"), true, &mut out);

        assert!(out.is_empty());
        assert_eq!(slot.displayed().cloned(), before);
    }

    #[test]
    fn result_after_stop_is_discarded() {
        let mut slot = ThumbnailSlot::new(96);
        let mut out = Vec::new();
        slot.show(Some(item("a.jpg")), true, &mut out);
        out.clear();
        slot.apply(decoded(1, "a.jpg"), false, &mut out);
        assert!(out.is_empty());
        assert_eq!(slot.displayed(), None);
    }

    #[test]
    fn missing_thumbnail_is_not_an_error() {
        let mut slot = ThumbnailSlot::new(96);
        let mut out = Vec::new();
        slot.show(Some(item("a.jpg")), true, &mut out);
        out.clear();
        slot.apply(
            ThumbnailResponse {
                request_id: 1,
                item: item("a.jpg"),
                thumbnail: None,
            },
            true,
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn stopped_slot_defers_decode() {
        let mut slot = ThumbnailSlot::new(96);
        let mut out = Vec::new();
        slot.show(Some(item("a.jpg")), false, &mut out);
        assert_eq!(out, vec![ControllerEvent::ThumbnailCleared]);
        assert_eq!(slot.current(), Some(&item("a.jpg")));
    }
}
