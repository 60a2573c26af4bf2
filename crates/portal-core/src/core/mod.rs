// crates/portal-core/src/core/mod.rs
// ============================================================================
// Module: Portal Core Domain
// Description: Domain records for catalog items, services, and sessions.
// Purpose: Group the portal's shared data model under one namespace.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! The domain model mirrors the records served by the backing API: object
//! metadata with label/annotation maps, catalog items, resource claims,
//! workshops, and the session context. Records are deserialized from JSON and
//! treated as read-only by the engines; mutation happens through the client
//! traits in [`crate::interfaces`].

pub mod catalog;
pub mod metadata;
pub mod service;
pub mod session;
pub mod time;
