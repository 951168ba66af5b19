//! Seller-contact gating.
//!
//! Decides whether contacting a seller in a category requires the buyer to be
//! signed in. Public slugs are checked first, then restricted slugs; anything
//! neither table mentions is `ContactAccess::Unknown`, which requires sign-in.

use crate::taxonomy::{AccessTables, CategoryRegistry, CategorySlug, Locale, LocalizedText};
use anyhow::{Result, bail};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Placeholder replaced with the category label in sign-in prompts.
pub const CATEGORY_PLACEHOLDER: &str = "{category}";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
/// How a slug is classified by the access tables.
pub enum ContactAccess {
    /// Listed as public (documents, tenders and other B2B listings).
    Public,
    /// Listed as peer-to-peer; seller details are protected.
    Restricted,
    /// In neither table, e.g. a category added upstream after this build.
    Unknown,
}

impl ContactAccess {
    pub fn requires_auth(self) -> bool {
        match self {
            ContactAccess::Public => false,
            ContactAccess::Restricted => true,
            ContactAccess::Unknown => true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AccessPolicy {
    restricted: BTreeSet<CategorySlug>,
    public: BTreeSet<CategorySlug>,
    messages: LocalizedText,
    labels: BTreeMap<CategorySlug, LocalizedText>,
}

impl AccessPolicy {
    /// Build the policy from the document tables.
    ///
    /// Rejects slugs listed as both public and restricted. Group names from
    /// `registry` label the sign-in prompt for grouped slugs.
    pub fn from_tables(tables: &AccessTables, registry: &CategoryRegistry) -> Result<Self> {
        let restricted = collect_slugs(&tables.restricted, "restricted")?;
        let public = collect_slugs(&tables.public, "public")?;

        let overlap: Vec<&str> = public
            .intersection(&restricted)
            .map(CategorySlug::as_str)
            .collect();
        if !overlap.is_empty() {
            bail!(
                "slugs listed as both public and restricted: {}",
                overlap.join(", ")
            );
        }

        for locale in [Locale::En, Locale::Am] {
            if !tables.messages.get(locale).contains(CATEGORY_PLACEHOLDER) {
                bail!(
                    "sign-in message for locale {} is missing the {} placeholder",
                    locale.code(),
                    CATEGORY_PLACEHOLDER
                );
            }
        }

        let labels = registry
            .slugs()
            .filter_map(|slug| {
                registry
                    .group_label(slug.as_str())
                    .map(|label| (slug.clone(), label.clone()))
            })
            .collect();

        Ok(Self {
            restricted,
            public,
            messages: tables.messages.clone(),
            labels,
        })
    }

    pub fn classify(&self, slug: &str) -> ContactAccess {
        if self.public.contains(slug) {
            ContactAccess::Public
        } else if self.restricted.contains(slug) {
            ContactAccess::Restricted
        } else {
            tracing::debug!(slug, "category not in access tables; requiring sign-in");
            ContactAccess::Unknown
        }
    }

    pub fn requires_auth_for_contact(&self, slug: &str) -> bool {
        self.classify(slug).requires_auth()
    }

    /// Membership in the public table only.
    pub fn is_public_category(&self, slug: &str) -> bool {
        self.public.contains(slug)
    }

    /// Localized sign-in prompt for contacting a seller in `slug`.
    ///
    /// The label is the owning group's name, or the slug itself for
    /// ungrouped categories. Unsupported locales fall back to `en`.
    pub fn auth_required_message(&self, slug: &str, locale: &str) -> String {
        let locale = Locale::resolve(locale);
        let label = self
            .labels
            .get(slug)
            .map(|label| label.get(locale))
            .unwrap_or(slug);
        self.messages
            .get(locale)
            .replace(CATEGORY_PLACEHOLDER, label)
    }

    pub fn public_slugs(&self) -> impl Iterator<Item = &CategorySlug> {
        self.public.iter()
    }

    pub fn restricted_slugs(&self) -> impl Iterator<Item = &CategorySlug> {
        self.restricted.iter()
    }
}

fn collect_slugs(slugs: &[CategorySlug], table: &str) -> Result<BTreeSet<CategorySlug>> {
    let mut set = BTreeSet::new();
    for slug in slugs {
        if slug.0.trim().is_empty() {
            bail!("{table} table contains an empty slug");
        }
        if !set.insert(slug.clone()) {
            bail!("slug '{slug}' is listed twice in the {table} table");
        }
    }
    Ok(set)
}
