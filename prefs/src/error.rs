//! Error types for the synchronizer's collaborators.
//!
//! ERROR HANDLING
//! ==============
//! None of these are fatal to a page. The synchronizer logs them and keeps
//! going with whatever state it already applied.

/// Failure reading or writing the persistent store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store cannot be reached in this execution context.
    #[error("persistent store unavailable")]
    Unavailable,
    /// The store rejected the operation (quota, security policy, ...).
    #[error("persistent store rejected {op} for key {key}: {reason}")]
    Rejected { op: &'static str, key: String, reason: String },
}

/// Failure publishing on the cross-tab channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    #[error("failed to encode sync message: {0}")]
    Encode(String),
    #[error("failed to decode sync message: {0}")]
    Decode(String),
    #[error("channel post failed: {0}")]
    Post(String),
}

/// Failure mutating the document tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("document has no {0} element")]
    Missing(&'static str),
    #[error("failed to set {name} on element: {reason}")]
    Attribute { name: String, reason: String },
    #[error("failed to replace element content: {0}")]
    Content(String),
    #[error("failed to bind handler to #{id}: {reason}")]
    Bind { id: String, reason: String },
}

/// Error surfaced by a single synchronizer step before it is absorbed and
/// logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Channel(#[from] ChannelError),
    #[error(transparent)]
    Tree(#[from] TreeError),
}
