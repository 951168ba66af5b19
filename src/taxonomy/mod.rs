//! Category taxonomy wiring.
//!
//! This module wraps the taxonomy document (`schema/taxonomy.json`) so callers
//! can resolve a leaf category slug to its parent group, color, localized name
//! and badge icon. `CategoryRegistry` is the validated lookup surface; the
//! `model` types mirror the document for loading and serialization.

pub mod identity;
pub mod model;
pub mod registry;

pub use identity::{CategoryIcon, CategorySlug, ColorToken, GroupKey, Locale};
pub use model::{AccessTables, CategoryGroup, LocalizedText, TaxonomyDocument};
pub use registry::CategoryRegistry;

pub use model::load_taxonomy_from_path;
