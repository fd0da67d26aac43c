//! Host message decoding and dispatch.
//!
//! The host sends JSON commands such as
//! `{"action": "highlightElement", "selector": "#main"}` and expects
//! `{"success": true}` for commands it handled. Commands nobody handles get
//! no reply at all.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A decoded host command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    /// Highlight the element matching `selector`.
    HighlightElement {
        /// Locator produced by the selector synthesizer.
        selector: String,
    },
}

/// Reply to a handled command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// Always true for a handled command.
    pub success: bool,
}

impl Ack {
    /// A successful acknowledgement.
    #[must_use]
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Something that reacts to host commands.
///
/// Handlers run on the page's thread, so neither the trait nor its futures
/// need to be `Send`.
#[async_trait(?Send)]
pub trait MessageHandler {
    /// Handle `command`, or return `None` to leave it to other handlers.
    async fn handle(&self, command: &Command) -> Option<Ack>;
}

/// Routes commands to registered handlers in registration order.
#[derive(Default)]
pub struct MessageDispatcher {
    handlers: Vec<Box<dyn MessageHandler>>,
}

impl MessageDispatcher {
    /// Empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    pub fn register(&mut self, handler: Box<dyn MessageHandler>) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    /// Offer `command` to each handler until one acknowledges it.
    pub async fn dispatch(&self, command: &Command) -> Option<Ack> {
        for handler in &self.handlers {
            if let Some(ack) = handler.handle(command).await {
                return Some(ack);
            }
        }
        log::debug!("dispatch: unhandled command {command:?}");
        None
    }

    /// Decode and dispatch a raw JSON message.
    ///
    /// Malformed JSON is an error. Well-formed messages that are not a known
    /// command (unknown `action`, missing `selector`) are ignored and yield
    /// `Ok(None)`.
    pub async fn dispatch_json(&self, message: &str) -> Result<Option<Ack>> {
        let value: Value = serde_json::from_str(message)?;
        match serde_json::from_value::<Command>(value) {
            Ok(command) => Ok(self.dispatch(&command).await),
            Err(e) => {
                log::debug!("dispatch: ignoring message: {e}");
                Ok(None)
            }
        }
    }
}
