//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` is the read-only snapshot components render from; `session` is the
//! store that owns and mutates it.

pub mod auth;
pub mod session;
