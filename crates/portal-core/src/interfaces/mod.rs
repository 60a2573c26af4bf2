// crates/portal-core/src/interfaces/mod.rs
// ============================================================================
// Module: Portal Interfaces
// Description: Backend-agnostic client contracts for the portal engines.
// Purpose: Define the asynchronous operations the engines consume.
// Dependencies: async-trait, serde, serde_json, thiserror, crate::core
// ============================================================================

//! ## Overview
//! The engines never speak a wire protocol; they consume these traits. List
//! operations are paged and callers concatenate pages through the fetch-all
//! helpers. Deletion reports [`LifecycleError::NotFound`] distinctly so the
//! bulk orchestrator can treat an already-absent record as success.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::catalog::CatalogItem;
use crate::core::metadata::Stage;
use crate::core::service::ResourceClaim;
use crate::core::service::Service;
use crate::core::service::Workshop;
use crate::core::service::WorkshopProvision;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Catalog Client
// ============================================================================

/// One page of catalog items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemPage {
    /// Items in this page.
    pub items: Vec<CatalogItem>,
    /// Opaque continuation token; absent on the final page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,
}

/// Catalog fetch errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Backend reported a fetch failure.
    #[error("catalog fetch failed: {0}")]
    Backend(String),
}

/// Paged catalog item source.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetches one page of catalog items, optionally scoped to a namespace.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the page cannot be fetched.
    async fn list_catalog_items(
        &self,
        namespace: Option<&str>,
        continue_token: Option<&str>,
    ) -> Result<CatalogItemPage, CatalogError>;
}

/// Fetches every catalog item page and concatenates the results.
///
/// # Errors
///
/// Returns [`CatalogError`] when any page fetch fails.
pub async fn fetch_all_catalog_items(
    client: &dyn CatalogClient,
    namespace: Option<&str>,
) -> Result<Vec<CatalogItem>, CatalogError> {
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = client.list_catalog_items(namespace, token.as_deref()).await?;
        items.extend(page.items);
        match page.continue_token {
            Some(next) => token = Some(next),
            None => return Ok(items),
        }
    }
}

// ============================================================================
// SECTION: Service Listing
// ============================================================================

/// One page of services.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePage {
    /// Services in this page.
    pub items: Vec<Service>,
    /// Opaque continuation token; absent on the final page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,
}

/// One page of resource claims.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceClaimPage {
    /// Claims in this page.
    pub items: Vec<ResourceClaim>,
    /// Opaque continuation token; absent on the final page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,
}

/// Service listing errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ServiceListError {
    /// Backend reported a fetch failure.
    #[error("service fetch failed: {0}")]
    Backend(String),
}

/// Paged source of provisioned services.
#[async_trait]
pub trait ServiceLister: Send + Sync {
    /// Fetches one page of services in a namespace.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceListError`] when the page cannot be fetched.
    async fn list_services(
        &self,
        namespace: &str,
        continue_token: Option<&str>,
    ) -> Result<ServicePage, ServiceListError>;

    /// Fetches one page of a workshop's member claims via the label join.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceListError`] when the page cannot be fetched.
    async fn list_workshop_members(
        &self,
        namespace: &str,
        workshop_name: &str,
        continue_token: Option<&str>,
    ) -> Result<ResourceClaimPage, ServiceListError>;
}

/// Fetches every service page in a namespace and concatenates the results.
///
/// # Errors
///
/// Returns [`ServiceListError`] when any page fetch fails.
pub async fn fetch_all_services(
    client: &dyn ServiceLister,
    namespace: &str,
) -> Result<Vec<Service>, ServiceListError> {
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = client.list_services(namespace, token.as_deref()).await?;
        items.extend(page.items);
        match page.continue_token {
            Some(next) => token = Some(next),
            None => return Ok(items),
        }
    }
}

/// Fetches every member claim of a workshop and concatenates the results.
///
/// # Errors
///
/// Returns [`ServiceListError`] when any page fetch fails.
pub async fn fetch_all_workshop_members(
    client: &dyn ServiceLister,
    namespace: &str,
    workshop_name: &str,
) -> Result<Vec<ResourceClaim>, ServiceListError> {
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = client.list_workshop_members(namespace, workshop_name, token.as_deref()).await?;
        items.extend(page.items);
        match page.continue_token {
            Some(next) => token = Some(next),
            None => return Ok(items),
        }
    }
}

// ============================================================================
// SECTION: Order Client
// ============================================================================

/// Payload for a standard service order.
///
/// # Invariants
/// - `parameter_values` holds only submit-eligible parameters plus the
///   injected purpose and sales fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestOrder {
    /// Catalog item being ordered.
    pub catalog_item_name: String,
    /// Namespace of the catalog item.
    pub catalog_item_namespace: String,
    /// Namespace the order is created in.
    pub service_namespace: String,
    /// Parameter values keyed by parameter name.
    pub parameter_values: BTreeMap<String, Value>,
    /// Requested start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    /// Requested auto-stop time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Timestamp>,
    /// Requested end of life.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
    /// Prefer pool-backed instances when available.
    #[serde(default)]
    pub use_pool_if_available: bool,
    /// Detach instances from the pool once claimed.
    #[serde(default)]
    pub use_auto_detach: bool,
    /// Marks the order for white-glove handling.
    #[serde(default)]
    pub white_gloved: bool,
}

/// Payload for workshop creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopOrder {
    /// Catalog item being ordered.
    pub catalog_item_name: String,
    /// Namespace of the catalog item.
    pub catalog_item_namespace: String,
    /// Namespace the workshop is created in.
    pub service_namespace: String,
    /// Display name shown to attendees.
    pub display_name: String,
    /// Attendee access password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_password: Option<String>,
    /// Whether attendees may self-register.
    pub open_registration: bool,
    /// Attendee-facing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Requested start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    /// Requested end of life.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
    /// Marks the order for white-glove handling.
    #[serde(default)]
    pub white_gloved: bool,
}

/// Payload for workshop provision creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopProvisionOrder {
    /// Name of the workshop the provision belongs to.
    pub workshop_name: String,
    /// Namespace of the workshop.
    pub workshop_namespace: String,
    /// Catalog item being provisioned.
    pub catalog_item_name: String,
    /// Namespace of the catalog item.
    pub catalog_item_namespace: String,
    /// Number of instances to provision.
    pub count: u32,
    /// Maximum concurrent provisioning operations.
    pub concurrency: u32,
    /// Delay in seconds before provisioning begins.
    pub start_delay: u32,
    /// Parameter values applied to every instance.
    pub parameter_values: BTreeMap<String, Value>,
    /// Prefer pool-backed instances when available.
    #[serde(default)]
    pub use_pool_if_available: bool,
    /// Detach instances from the pool once claimed.
    #[serde(default)]
    pub use_auto_detach: bool,
}

/// Audit record written when a user follows an external-link item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalItemRequest {
    /// Asset UUID of the catalog item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_uuid: Option<String>,
    /// Requester email from the session.
    pub requester: String,
    /// Stage tag of the catalog item.
    pub stage: Stage,
    /// Selected ordering purpose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Selected purpose activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_activity: Option<String>,
    /// Free-text purpose explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_explanation: Option<String>,
    /// Supplied Salesforce identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salesforce_id: Option<String>,
    /// Classification of the Salesforce identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_type: Option<String>,
}

/// Order creation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Backend rejected or failed the creation call.
    #[error("order creation failed: {0}")]
    Backend(String),
}

/// Creation operations invoked by the submission builder.
#[async_trait]
pub trait OrderClient: Send + Sync {
    /// Creates a resource claim for a standard service order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] when creation fails.
    async fn create_service_request(
        &self,
        order: &ServiceRequestOrder,
    ) -> Result<ResourceClaim, OrderError>;

    /// Creates a workshop entity.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] when creation fails.
    async fn create_workshop(&self, order: &WorkshopOrder) -> Result<Workshop, OrderError>;

    /// Creates a provision referencing an existing workshop.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] when creation fails.
    async fn create_workshop_provision(
        &self,
        order: &WorkshopProvisionOrder,
    ) -> Result<WorkshopProvision, OrderError>;

    /// Records the audit entry for an external-link item.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] when the audit write fails.
    async fn record_external_item_request(
        &self,
        request: &ExternalItemRequest,
    ) -> Result<(), OrderError>;
}

// ============================================================================
// SECTION: Lifecycle Client
// ============================================================================

/// Lifecycle mutation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling; deletion of an absent
///   record reports [`LifecycleError::NotFound`].
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,
    /// Backend reported a mutation failure.
    #[error("lifecycle mutation failed: {0}")]
    Backend(String),
}

/// Lifecycle mutations invoked by the bulk orchestrator.
#[async_trait]
pub trait LifecycleClient: Send + Sync {
    /// Schedules a start on a pool-backed claim.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the mutation fails.
    async fn schedule_start(
        &self,
        claim: &ResourceClaim,
        at: Timestamp,
    ) -> Result<ResourceClaim, LifecycleError>;

    /// Schedules a stop on a pool-backed claim.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the mutation fails.
    async fn schedule_stop(
        &self,
        claim: &ResourceClaim,
        at: Timestamp,
    ) -> Result<ResourceClaim, LifecycleError>;

    /// Starts every resource of a directly-managed claim.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the mutation fails.
    async fn start_all_resources(
        &self,
        claim: &ResourceClaim,
    ) -> Result<ResourceClaim, LifecycleError>;

    /// Stops every resource of a directly-managed claim.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the mutation fails.
    async fn stop_all_resources(
        &self,
        claim: &ResourceClaim,
    ) -> Result<ResourceClaim, LifecycleError>;

    /// Writes a future stop time onto every resource of a directly-managed
    /// claim.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the mutation fails.
    async fn set_stop_time_all_resources(
        &self,
        claim: &ResourceClaim,
        at: Timestamp,
    ) -> Result<ResourceClaim, LifecycleError>;

    /// Starts a workshop; member claims cascade server-side.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the mutation fails.
    async fn start_workshop(&self, workshop: &Workshop) -> Result<Workshop, LifecycleError>;

    /// Stops a workshop; member claims cascade server-side.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the mutation fails.
    async fn stop_workshop(&self, workshop: &Workshop) -> Result<Workshop, LifecycleError>;

    /// Sets the end-of-life time on a claim.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the mutation fails.
    async fn set_lifespan_end(
        &self,
        claim: &ResourceClaim,
        end: Timestamp,
    ) -> Result<ResourceClaim, LifecycleError>;

    /// Sets the end-of-life time on a workshop.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the mutation fails.
    async fn set_workshop_lifespan_end(
        &self,
        workshop: &Workshop,
        end: Timestamp,
    ) -> Result<Workshop, LifecycleError>;

    /// Deletes a resource claim.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotFound`] when the record is already gone;
    /// callers treat that as success.
    async fn delete_resource_claim(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), LifecycleError>;

    /// Deletes a workshop.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotFound`] when the record is already gone;
    /// callers treat that as success.
    async fn delete_workshop(&self, namespace: &str, name: &str) -> Result<(), LifecycleError>;
}

// ============================================================================
// SECTION: External Identifier Verification
// ============================================================================

/// External identifier verification errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// Verification backend was unreachable or failed.
    #[error("external id verification failed: {0}")]
    Backend(String),
}

/// Asynchronous external identifier lookup.
///
/// Backs both the `check_external_id` condition call-form and Salesforce
/// identifier verification on the order form.
#[async_trait]
pub trait ExternalIdVerifier: Send + Sync {
    /// Returns whether the identifier is valid for the given sales type.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError`] when the lookup cannot be performed.
    async fn check(&self, id: &str, sales_type: Option<&str>) -> Result<bool, VerificationError>;
}

// ============================================================================
// SECTION: Rating Client
// ============================================================================

/// Rating payload submitted alongside a delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Star rating; absent when only a comment was provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<u8>,
    /// Free-text comment.
    #[serde(default)]
    pub comment: String,
    /// Perceived usefulness answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub useful: Option<String>,
}

impl Rating {
    /// Returns whether the payload carries anything worth submitting.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.rate.is_some() || !self.comment.trim().is_empty()
    }
}

/// Rating submission errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum RatingError {
    /// Backend reported a submission failure.
    #[error("rating submission failed: {0}")]
    Backend(String),
}

/// Rating submission endpoint.
#[async_trait]
pub trait RatingClient: Send + Sync {
    /// Submits a rating for the claim with the given uid.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError`] when submission fails.
    async fn set_rating(&self, claim_uid: &str, rating: &Rating) -> Result<(), RatingError>;
}
