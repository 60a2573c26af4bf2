// crates/portal-core/src/lib.rs
// ============================================================================
// Module: Portal Core
// Description: Domain model and client contracts for the self-service catalog portal.
// Purpose: Provide shared types consumed by the form, catalog, and service engines.
// Dependencies: serde, serde_json, thiserror, time, async-trait, url
// ============================================================================

//! ## Overview
//! Portal Core defines the domain records the portal operates on: catalog
//! items with their order-time parameter specifications, provisioned resource
//! claims, workshops and their provisions, and the session context describing
//! the current user. The `interfaces` module defines the asynchronous client
//! traits through which the engines reach the backing API; the engines
//! themselves never speak a wire protocol.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use crate::core::catalog::AccessControl;
pub use crate::core::catalog::CatalogItem;
pub use crate::core::catalog::CatalogItemSpec;
pub use crate::core::catalog::CatalogItemSpecParameter;
pub use crate::core::catalog::OpsStatus;
pub use crate::core::catalog::OpsStatusId;
pub use crate::core::catalog::ParameterSchema;
pub use crate::core::metadata::ANNOTATION_DISPLAY_NAME;
pub use crate::core::metadata::ANNOTATION_KEYWORDS;
pub use crate::core::metadata::ANNOTATION_OPS;
pub use crate::core::metadata::ANNOTATION_SAFE_DESCRIPTION;
pub use crate::core::metadata::LABEL_ASSET_UUID;
pub use crate::core::metadata::LABEL_CATEGORY;
pub use crate::core::metadata::LABEL_FEATURED_SCORE;
pub use crate::core::metadata::LABEL_PRODUCT;
pub use crate::core::metadata::LABEL_PRODUCT_FAMILY;
pub use crate::core::metadata::LABEL_PROVIDER;
pub use crate::core::metadata::LABEL_RATING;
pub use crate::core::metadata::LABEL_SALES_PLAY;
pub use crate::core::metadata::LABEL_STAGE;
pub use crate::core::metadata::LABEL_WORKSHOP;
pub use crate::core::metadata::ObjectMeta;
pub use crate::core::metadata::PORTAL_DOMAIN;
pub use crate::core::metadata::Stage;
pub use crate::core::metadata::domain_key;
pub use crate::core::service::ActionSchedule;
pub use crate::core::service::Lifespan;
pub use crate::core::service::ResourceClaim;
pub use crate::core::service::ResourceClaimStatus;
pub use crate::core::service::ResourceStatusEntry;
pub use crate::core::service::ResourceSummary;
pub use crate::core::service::Service;
pub use crate::core::service::Workshop;
pub use crate::core::service::WorkshopProvision;
pub use crate::core::service::WorkshopProvisionSpec;
pub use crate::core::service::WorkshopSpec;
pub use crate::core::service::WorkshopStatus;
pub use crate::core::session::ServiceNamespace;
pub use crate::core::session::SessionContext;
pub use crate::core::time::Timestamp;
