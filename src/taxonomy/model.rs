//! Deserializable representation of `schema/taxonomy.json`.
//!
//! The types mirror the taxonomy schema so the registry and access policy can
//! be built without ad-hoc JSON handling. `CategoryRegistry` and `AccessPolicy`
//! own the validated, indexed views; use these structs when the raw document
//! surface is needed.

use crate::taxonomy::identity::{CategoryIcon, CategorySlug, ColorToken, GroupKey, Locale};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Full taxonomy document as stored on disk or embedded in the binary.
pub struct TaxonomyDocument {
    pub schema_version: String,
    pub groups: Vec<CategoryGroup>,
    #[serde(default)]
    pub icons: BTreeMap<CategorySlug, CategoryIcon>,
    pub access: AccessTables,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
/// One parent group and its ordered member slugs.
pub struct CategoryGroup {
    pub key: GroupKey,
    pub display_name: LocalizedText,
    pub color: ColorToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<CategoryIcon>,
    pub members: Vec<CategorySlug>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
/// A string present in every supported locale.
pub struct LocalizedText {
    pub en: String,
    pub am: String,
}

impl LocalizedText {
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Am => &self.am,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Seller-contact gating tables plus the localized sign-in prompt.
pub struct AccessTables {
    #[serde(default)]
    pub restricted: Vec<CategorySlug>,
    #[serde(default)]
    pub public: Vec<CategorySlug>,
    pub messages: LocalizedText,
}

/// Read and parse a taxonomy document from disk without additional validation.
pub fn load_taxonomy_from_path(path: &Path) -> Result<TaxonomyDocument> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_taxonomy(&data).with_context(|| format!("parsing {}", path.display()))
}

pub(crate) fn parse_taxonomy(data: &str) -> Result<TaxonomyDocument> {
    let document: TaxonomyDocument = serde_json::from_str(data)?;
    Ok(document)
}
