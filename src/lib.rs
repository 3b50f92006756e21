//! `EduPath` site runtime.
//!
//! Browser-side behavior for the static site: language and theme preference
//! sync (built on the [`prefs`] crate) and the enrollment form.
//!
//! | Module    | Role                                                |
//! |-----------|-----------------------------------------------------|
//! | `config`  | Build-time backend settings                         |
//! | `enroll`  | Enrollment submit flow, localized messages          |
//! | `net`     | REST insert into the hosted enrollments table       |
//! | `web`     | Browser boundary, wasm entry point (`hydrate` only) |

pub mod config;
pub mod enroll;
pub mod net;
#[cfg(feature = "hydrate")]
pub mod web;

pub use prefs;
