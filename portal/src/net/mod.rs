//! Networking modules for the portal REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls and the `AuthApi` seam used by the session store,
//! and `types` defines the shared wire schema.

pub mod api;
pub mod types;
