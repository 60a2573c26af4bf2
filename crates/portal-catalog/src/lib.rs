// crates/portal-catalog/src/lib.rs
// ============================================================================
// Module: Portal Catalog
// Description: Catalog filtering, search, sorting, and export modeling.
// Purpose: Turn the raw catalog item list into the ordered display sequence.
// Dependencies: portal-core, serde
// ============================================================================

//! ## Overview
//! The catalog engine applies a fixed pipeline to the fetched item list:
//! access-control filtering, enrichment (HTML stripping and incident
//! attachment), category and label facet removal, the admin status facet,
//! then either relevance ranking from the weighted search index or the sort
//! comparator, and finally the operational-before-disabled partition. The
//! export module derives the column/row model for CSV download; text
//! encoding stays with the caller.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod enrich;
pub mod export;
pub mod facets;
pub mod pipeline;
pub mod search;
pub mod sort;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use enrich::ActiveIncident;
pub use enrich::CatalogEntry;
pub use enrich::enrich_catalog_items;
pub use enrich::strip_tags;
pub use export::ExportModel;
pub use export::build_export_model;
pub use facets::matches_admin_statuses;
pub use facets::matches_category;
pub use facets::matches_label_facets;
pub use pipeline::CatalogFilter;
pub use pipeline::filter_catalog;
pub use search::SearchIndex;
pub use sort::SortMode;
pub use sort::compare_entries;
