//! Category taxonomy and seller-contact policy for the classifieds marketplace.
//!
//! The crate answers three questions about a leaf category slug coming from
//! the listings service: which group it belongs to (for breadcrumbs, badges and
//! icons), how that group is presented, and whether contacting a seller in it
//! must be gated behind sign-in. Everything is a pure lookup over tables that
//! are validated once and never mutated.

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub mod policy;
pub mod schema;
pub mod taxonomy;

pub use policy::{AccessPolicy, CATEGORY_PLACEHOLDER, ContactAccess};
pub use schema::TAXONOMY_SCHEMA_VERSION;
pub use taxonomy::{
    AccessTables, CategoryGroup, CategoryIcon, CategoryRegistry, CategorySlug, ColorToken,
    GroupKey, Locale, LocalizedText, TaxonomyDocument, load_taxonomy_from_path,
};

/// Environment variable naming a taxonomy document that replaces the builtin one.
pub const TAXONOMY_ENV: &str = "CLASSIFIEDS_TAXONOMY";

const BUILTIN_TAXONOMY: &str = include_str!("../schema/taxonomy.json");

#[derive(Clone, Debug)]
/// Validated registry and access policy built from one document.
pub struct Taxonomy {
    document: TaxonomyDocument,
    registry: CategoryRegistry,
    policy: AccessPolicy,
}

#[derive(Clone, Debug, Serialize)]
/// Everything presentation code needs to render one category.
pub struct CategoryDescription {
    pub slug: CategorySlug,
    pub group: Option<GroupKey>,
    pub group_name: Option<String>,
    pub color: Option<ColorToken>,
    pub icon: CategoryIcon,
    pub access: ContactAccess,
    pub requires_auth: bool,
}

impl Taxonomy {
    /// Process-wide taxonomy compiled into the binary.
    ///
    /// Parsed and validated on first use; later calls return the same instance.
    pub fn builtin() -> Result<&'static Taxonomy> {
        static BUILTIN: OnceLock<Result<Taxonomy, String>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                Taxonomy::from_json_str(BUILTIN_TAXONOMY, "builtin")
                    .map_err(|err| format!("{err:#}"))
            })
            .as_ref()
            .map_err(|msg| anyhow!("builtin taxonomy is invalid: {msg}"))
    }

    /// Load the taxonomy named by `CLASSIFIEDS_TAXONOMY`, or the builtin one.
    pub fn load_configured() -> Result<Taxonomy> {
        match configured_taxonomy_path() {
            Some(path) => Taxonomy::load(&path),
            None => Taxonomy::builtin().cloned(),
        }
    }

    /// Load and validate a taxonomy document from disk.
    pub fn load(path: &Path) -> Result<Taxonomy> {
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Taxonomy::from_json_str(&data, &path.display().to_string())
    }

    /// Validate `data` against the taxonomy schema and build the indexes.
    ///
    /// `origin` names the document in error messages.
    pub fn from_json_str(data: &str, origin: &str) -> Result<Taxonomy> {
        let value: Value =
            serde_json::from_str(data).with_context(|| format!("parsing taxonomy {origin}"))?;
        schema::validate_document(&value, origin)?;
        let document: TaxonomyDocument = serde_json::from_value(value)
            .with_context(|| format!("decoding taxonomy {origin}"))?;
        Taxonomy::from_document(&document).with_context(|| format!("validating taxonomy {origin}"))
    }

    /// Build from an already-decoded document. Schema validation is the
    /// caller's concern here; the partition rules are always enforced.
    pub fn from_document(document: &TaxonomyDocument) -> Result<Taxonomy> {
        schema::validate_schema_version(&document.schema_version)?;
        let registry = CategoryRegistry::from_document(document)?;
        let policy = AccessPolicy::from_tables(&document.access, &registry)?;
        tracing::debug!(
            schema_version = %document.schema_version,
            groups = document.groups.len(),
            grouped_slugs = registry.slugs().count(),
            public = document.access.public.len(),
            restricted = document.access.restricted.len(),
            "loaded category taxonomy"
        );
        Ok(Taxonomy {
            document: document.clone(),
            registry,
            policy,
        })
    }

    pub fn schema_version(&self) -> &str {
        &self.document.schema_version
    }

    /// The document this taxonomy was built from.
    pub fn document(&self) -> &TaxonomyDocument {
        &self.document
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn resolve_group(&self, slug: &str) -> Option<GroupKey> {
        self.registry.resolve_group(slug)
    }

    pub fn color_of(&self, key: GroupKey) -> ColorToken {
        self.registry.color_of(key)
    }

    pub fn display_name(&self, key: GroupKey, locale: &str) -> &str {
        self.registry.display_name(key, locale)
    }

    pub fn icon_for(&self, slug: &str) -> CategoryIcon {
        self.registry.icon_for(slug)
    }

    pub fn requires_auth_for_contact(&self, slug: &str) -> bool {
        self.policy.requires_auth_for_contact(slug)
    }

    pub fn is_public_category(&self, slug: &str) -> bool {
        self.policy.is_public_category(slug)
    }

    pub fn auth_required_message(&self, slug: &str, locale: &str) -> String {
        self.policy.auth_required_message(slug, locale)
    }

    /// Bundle every lookup for `slug` into one serializable record.
    pub fn describe(&self, slug: &str, locale: &str) -> CategoryDescription {
        let group = self.resolve_group(slug);
        let access = self.policy.classify(slug);
        CategoryDescription {
            slug: CategorySlug::from(slug),
            group,
            group_name: group.map(|key| self.display_name(key, locale).to_string()),
            color: group.map(|key| self.color_of(key)),
            icon: self.icon_for(slug),
            access,
            requires_auth: access.requires_auth(),
        }
    }
}

/// Verifies that a `CLASSIFIEDS_TAXONOMY` hint points at a readable file.
fn taxonomy_path_from_hint(hint: &str) -> Option<PathBuf> {
    let trimmed = hint.trim();
    if trimmed.is_empty() {
        return None;
    }
    let path = PathBuf::from(trimmed);
    if !path.is_file() {
        tracing::warn!(
            path = %path.display(),
            "{} does not name a file; using the builtin taxonomy",
            TAXONOMY_ENV
        );
        return None;
    }
    Some(path)
}

/// Taxonomy override path from the environment, if one is configured.
pub fn configured_taxonomy_path() -> Option<PathBuf> {
    env::var(TAXONOMY_ENV)
        .ok()
        .and_then(|hint| taxonomy_path_from_hint(&hint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_is_valid_and_shared() {
        let first = Taxonomy::builtin().expect("builtin taxonomy loads");
        let second = Taxonomy::builtin().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.schema_version(), TAXONOMY_SCHEMA_VERSION);
    }

    #[test]
    fn describe_bundles_group_and_access() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let car = taxonomy.describe("cars", "am");
        assert_eq!(car.group, Some(GroupKey::Vehicles));
        assert_eq!(car.group_name.as_deref(), Some("ተሽከርካሪዎች"));
        assert_eq!(car.color, Some(ColorToken::Blue));
        assert_eq!(car.icon, CategoryIcon::Car);
        assert_eq!(car.access, ContactAccess::Restricted);
        assert!(car.requires_auth);

        let unknown = taxonomy.describe("drones", "en");
        assert_eq!(unknown.group, None);
        assert_eq!(unknown.group_name, None);
        assert_eq!(unknown.color, None);
        assert_eq!(unknown.icon, CategoryIcon::Tag);
        assert_eq!(unknown.access, ContactAccess::Unknown);
        assert!(unknown.requires_auth);
    }

    #[test]
    fn description_serializes_with_lowercase_tokens() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let value = serde_json::to_value(taxonomy.describe("tenders", "en")).unwrap();
        assert_eq!(value["group"], "services");
        assert_eq!(value["color"], "teal");
        assert_eq!(value["icon"], "file_text");
        assert_eq!(value["access"], "public");
        assert_eq!(value["requires_auth"], false);
    }

    #[test]
    fn hint_must_name_an_existing_file() {
        assert_eq!(taxonomy_path_from_hint(""), None);
        assert_eq!(taxonomy_path_from_hint("   "), None);
        assert_eq!(taxonomy_path_from_hint("/definitely/not/here.json"), None);

        let file = NamedTempFile::new().unwrap();
        let hint = file.path().display().to_string();
        assert_eq!(
            taxonomy_path_from_hint(&hint),
            Some(file.path().to_path_buf())
        );
    }

    #[test]
    fn load_reports_schema_failures_with_origin() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"schema_version\": \"classifieds_taxonomy_v1\"}}").unwrap();
        let err = Taxonomy::load(file.path()).unwrap_err();
        let rendered = format!("{err:#}");
        assert!(rendered.contains("failed schema validation"), "{rendered}");
        assert!(
            rendered.contains(&file.path().display().to_string()),
            "{rendered}"
        );
    }

    #[test]
    fn from_document_rejects_unknown_schema_version() {
        let mut document: TaxonomyDocument = serde_json::from_str(BUILTIN_TAXONOMY).unwrap();
        document.schema_version = "classifieds_taxonomy_v0".to_string();
        assert!(Taxonomy::from_document(&document).is_err());
    }
}
