//! Network access to the hosted backend.

pub mod api;
