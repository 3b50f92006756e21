//! `BroadcastChannel` transport for sync messages.
//!
//! Messages travel as plain JS objects (`{type, value}`), so they are
//! converted through `JSON` on both ends. The `onmessage` closure is owned
//! by the channel wrapper and lives as long as the page runtime.

use prefs::error::ChannelError;
use prefs::{SyncChannel, SyncMessage};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{BroadcastChannel, MessageEvent};

use super::js_error;

pub struct WebBroadcast {
    channel: BroadcastChannel,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
}

impl WebBroadcast {
    /// Open `name` and forward every inbound payload, as JSON text, to
    /// `on_message`. Returns `None` when the browser lacks the API.
    pub fn open(name: &str, on_message: impl Fn(String) + 'static) -> Option<Self> {
        let channel = match BroadcastChannel::new(name) {
            Ok(channel) => channel,
            Err(e) => {
                log::warn!("cross-tab sync disabled: {}", js_error(&e));
                return None;
            }
        };

        let handler = Closure::wrap(Box::new(move |event: MessageEvent| {
            match js_sys::JSON::stringify(&event.data()) {
                Ok(raw) => on_message(String::from(raw)),
                Err(e) => log::warn!("unreadable sync payload: {}", js_error(&e)),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        channel.set_onmessage(Some(handler.as_ref().unchecked_ref()));

        Some(Self { channel, _on_message: handler })
    }
}

impl SyncChannel for WebBroadcast {
    fn publish(&self, message: &SyncMessage) -> Result<(), ChannelError> {
        let raw = message.encode()?;
        let value = js_sys::JSON::parse(&raw).map_err(|e| ChannelError::Encode(js_error(&e)))?;
        self.channel.post_message(&value).map_err(|e| ChannelError::Post(js_error(&e)))
    }
}
