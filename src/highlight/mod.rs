//! Visual highlighting of a single element on host request.
//!
//! The responder is a two-state machine (*idle* / *highlighting*). A
//! request removes any existing overlay, resolves the selector and, when it
//! matches, places a fresh overlay over the element, scrolls it into view
//! and schedules the overlay's removal after the dwell. Every overlay
//! carries a generation token; a removal only takes down the overlay of its
//! own generation, so a timer left over from a superseded request is a
//! no-op.
//!
//! `dom_query` documents are `!Send`, so the responder shares the host
//! through `Rc<RefCell<_>>` and schedules removals with
//! [`tokio::task::spawn_local`]. It must run inside a
//! [`tokio::task::LocalSet`].

mod host;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

pub use host::{
    AttributeLayout, DocumentHost, Layout, Overlay, PageHost, Rect, ScrollBehavior, ScrollBlock,
    ScrollOptions, TOKEN_ATTRIBUTE,
};

use crate::messaging::{Ack, Command, MessageHandler};
use crate::Options;

/// Responder state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HighlightState {
    /// No overlay is shown.
    #[default]
    Idle,
    /// The overlay of generation `token` is shown.
    Highlighting {
        /// Overlay generation.
        token: u64,
    },
}

/// Places and times highlight overlays on a [`PageHost`].
pub struct HighlightResponder<H> {
    host: Rc<RefCell<H>>,
    state: Rc<Cell<HighlightState>>,
    generation: Cell<u64>,
    overlay_id: Rc<str>,
    dwell: Duration,
}

impl<H: PageHost + 'static> HighlightResponder<H> {
    /// Responder over a shared host, with the dwell and overlay id from
    /// `options`.
    #[must_use]
    pub fn new(host: Rc<RefCell<H>>, options: &Options) -> Self {
        Self {
            host,
            state: Rc::new(Cell::new(HighlightState::Idle)),
            generation: Cell::new(0),
            overlay_id: Rc::from(options.overlay_id.as_str()),
            dwell: options.highlight_dwell,
        }
    }

    /// The shared host.
    #[must_use]
    pub fn host(&self) -> &Rc<RefCell<H>> {
        &self.host
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> HighlightState {
        self.state.get()
    }

    /// Highlight the first element matching `selector`.
    ///
    /// Always acknowledges, whether or not the selector matched.
    ///
    /// # Panics
    ///
    /// Panics when called outside a [`tokio::task::LocalSet`], since the
    /// removal is scheduled with [`tokio::task::spawn_local`].
    pub fn highlight(&self, selector: &str) -> Ack {
        let mut host = self.host.borrow_mut();
        host.remove_overlay(&self.overlay_id, None);

        let Some(rect) = host.bounding_box(selector) else {
            log::trace!("highlight: {selector:?} did not resolve");
            self.state.set(HighlightState::Idle);
            return Ack::ok();
        };

        let token = self.generation.get() + 1;
        self.generation.set(token);

        let inserted = host.insert_overlay(&Overlay {
            id: self.overlay_id.to_string(),
            token,
            rect,
        });
        if !inserted {
            self.state.set(HighlightState::Idle);
            return Ack::ok();
        }
        host.scroll_into_view(selector, ScrollOptions::default());
        drop(host);

        self.state.set(HighlightState::Highlighting { token });
        log::trace!("highlight: overlay #{token} over {selector:?}");

        self.schedule_removal(token);
        Ack::ok()
    }

    fn schedule_removal(&self, token: u64) {
        let host = Rc::clone(&self.host);
        let state = Rc::clone(&self.state);
        let overlay_id = Rc::clone(&self.overlay_id);
        let dwell = self.dwell;

        tokio::task::spawn_local(async move {
            tokio::time::sleep(dwell).await;

            let removed = host.borrow_mut().remove_overlay(&overlay_id, Some(token));
            if state.get() == (HighlightState::Highlighting { token }) {
                state.set(HighlightState::Idle);
            }
            log::trace!("highlight: dwell for overlay #{token} elapsed, removed: {removed}");
        });
    }
}

#[async_trait(?Send)]
impl<H: PageHost + 'static> MessageHandler for HighlightResponder<H> {
    async fn handle(&self, command: &Command) -> Option<Ack> {
        match command {
            Command::HighlightElement { selector } if !selector.is_empty() => {
                Some(self.highlight(selector))
            }
            Command::HighlightElement { .. } => None,
        }
    }
}
