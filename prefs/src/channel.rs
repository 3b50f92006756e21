//! Cross-tab sync messages and the publish seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser the channel is a `BroadcastChannel` named
//! [`crate::SYNC_CHANNEL_NAME`]; delivery goes to every other tab, never back
//! to the sender. [`LocalBus`] reproduces those semantics in-process so
//! multi-tab behavior can be tested without a browser.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::ChannelError;
use crate::preference::{Language, Theme};

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

/// Message broadcast after a local toggle.
///
/// Wire shape: `{ "type": "language" | "theme", "value": "<code>" }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SyncMessage {
    Language(Language),
    Theme(Theme),
}

impl SyncMessage {
    /// Serialize to the JSON wire shape.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Encode`] if serialization fails.
    pub fn encode(&self) -> Result<String, ChannelError> {
        serde_json::to_string(self).map_err(|e| ChannelError::Encode(e.to_string()))
    }

    /// Parse the JSON wire shape. Unknown kinds or values are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Decode`] for malformed or foreign payloads.
    pub fn decode(raw: &str) -> Result<Self, ChannelError> {
        serde_json::from_str(raw).map_err(|e| ChannelError::Decode(e.to_string()))
    }
}

/// Outbound half of the cross-tab channel.
pub trait SyncChannel {
    /// Deliver `message` to every other subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the message cannot be posted.
    fn publish(&self, message: &SyncMessage) -> Result<(), ChannelError>;
}

impl<C: SyncChannel + ?Sized> SyncChannel for Rc<C> {
    fn publish(&self, message: &SyncMessage) -> Result<(), ChannelError> {
        (**self).publish(message)
    }
}

type Inbox = Rc<RefCell<VecDeque<SyncMessage>>>;

#[derive(Debug, Default)]
struct BusInner {
    next_id: usize,
    published: usize,
    inboxes: Vec<(usize, Inbox)>,
}

/// In-process broadcast hub. Each [`BusEndpoint`] plays one tab.
#[derive(Clone, Debug, Default)]
pub struct LocalBus {
    inner: Rc<RefCell<BusInner>>,
}

impl LocalBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new endpoint on the bus.
    #[must_use]
    pub fn join(&self) -> BusEndpoint {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let inbox = Inbox::default();
        inner.inboxes.push((id, Rc::clone(&inbox)));
        BusEndpoint { id, bus: self.clone(), inbox }
    }

    /// Total number of messages published by all endpoints.
    #[must_use]
    pub fn published(&self) -> usize {
        self.inner.borrow().published
    }
}

/// One subscriber on a [`LocalBus`]. Dropping it unsubscribes.
#[derive(Debug)]
pub struct BusEndpoint {
    id: usize,
    bus: LocalBus,
    inbox: Inbox,
}

impl BusEndpoint {
    /// Take every message delivered so far, in send order.
    #[must_use]
    pub fn drain(&self) -> Vec<SyncMessage> {
        self.inbox.borrow_mut().drain(..).collect()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.inbox.borrow().len()
    }
}

impl SyncChannel for BusEndpoint {
    fn publish(&self, message: &SyncMessage) -> Result<(), ChannelError> {
        let mut inner = self.bus.inner.borrow_mut();
        inner.published += 1;
        for (id, inbox) in &inner.inboxes {
            if *id != self.id {
                inbox.borrow_mut().push_back(*message);
            }
        }
        Ok(())
    }
}

impl Drop for BusEndpoint {
    fn drop(&mut self) {
        self.bus.inner.borrow_mut().inboxes.retain(|(id, _)| *id != self.id);
    }
}
