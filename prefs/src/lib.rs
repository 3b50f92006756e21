//! Language and theme preference synchronization for the EduPath site.
//!
//! This crate holds everything that does not need a browser: resolving the
//! preference from URL, store and defaults; applying it to a document tree;
//! rewriting outbound links; and reacting to toggles and cross-tab messages.
//! The `edupath` crate adapts `web-sys` objects to the traits defined here.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`preference`] | `Language`, `Theme`, `Preference` and the fixed keys/names |
//! | [`sync`] | [`sync::Synchronizer`], the single init/toggle/receive entry point |
//! | [`apply`] | Pure functions writing a preference into a [`tree::DocumentTree`] |
//! | [`links`] | Page location parsing and the link rewriting rule |
//! | [`store`] | Persistent store trait plus in-memory and unavailable stores |
//! | [`channel`] | Sync message wire shape, publish trait, in-process bus |
//! | [`tree`] | Document tree and control binder traits |
//! | [`memory`] | Arena document used off-browser |
//! | [`error`] | Error enums for each collaborator |

pub mod apply;
pub mod channel;
pub mod error;
pub mod links;
pub mod memory;
pub mod preference;
pub mod store;
pub mod sync;
pub mod tree;

pub use channel::{SyncChannel, SyncMessage};
pub use preference::{Language, Preference, SYNC_CHANNEL_NAME, Theme};
pub use store::PreferenceStore;
pub use sync::{Activation, Synchronizer};
pub use tree::{Control, ControlBinder, DocumentTree};
