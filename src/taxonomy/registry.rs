//! Indexed view of the category groups in a taxonomy document.
//!
//! The registry is strict at construction time: every `GroupKey` must be
//! defined exactly once and a slug may belong to at most one group. Lookups
//! afterwards never fail; an unknown slug is simply `None`.

use crate::taxonomy::identity::{CategoryIcon, CategorySlug, ColorToken, GroupKey, Locale};
use crate::taxonomy::model::{CategoryGroup, LocalizedText, TaxonomyDocument};
use anyhow::{Result, bail};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
/// Category groups plus derived indexes keyed by group and by member slug.
pub struct CategoryRegistry {
    groups: Vec<CategoryGroup>,
    by_key: BTreeMap<GroupKey, usize>,
    by_slug: BTreeMap<CategorySlug, GroupKey>,
    icons: BTreeMap<CategorySlug, CategoryIcon>,
}

impl CategoryRegistry {
    /// Build the registry, rejecting documents that break the partition rules.
    pub fn from_document(document: &TaxonomyDocument) -> Result<Self> {
        let mut by_key = BTreeMap::new();
        for (position, group) in document.groups.iter().enumerate() {
            if by_key.insert(group.key, position).is_some() {
                bail!("group {} is defined more than once", group.key);
            }
        }
        for key in GroupKey::ALL {
            if !by_key.contains_key(&key) {
                bail!("taxonomy does not define group {key}");
            }
        }

        let by_slug = build_slug_index(&document.groups)?;

        for slug in document.icons.keys() {
            if slug.0.trim().is_empty() {
                bail!("icon table contains an empty slug");
            }
        }

        Ok(Self {
            groups: document.groups.clone(),
            by_key,
            by_slug,
            icons: document.icons.clone(),
        })
    }

    /// Group owning `slug`, or `None` when no group lists it.
    pub fn resolve_group(&self, slug: &str) -> Option<GroupKey> {
        self.by_slug.get(slug).copied()
    }

    /// Full group definition for a key.
    pub fn group(&self, key: GroupKey) -> &CategoryGroup {
        // Construction guarantees an entry for every GroupKey.
        &self.groups[self.by_key[&key]]
    }

    pub fn color_of(&self, key: GroupKey) -> ColorToken {
        self.group(key).color
    }

    /// Localized group name; unsupported locale codes fall back to `en`.
    pub fn display_name(&self, key: GroupKey, locale: &str) -> &str {
        self.display_name_in(key, Locale::resolve(locale))
    }

    pub fn display_name_in(&self, key: GroupKey, locale: Locale) -> &str {
        self.group(key).display_name.get(locale)
    }

    /// Localized names of the group owning `slug`, if any.
    pub fn group_label(&self, slug: &str) -> Option<&LocalizedText> {
        self.resolve_group(slug)
            .map(|key| &self.group(key).display_name)
    }

    /// Badge icon: explicit slug entry, then the owning group's icon, then `Tag`.
    pub fn icon_for(&self, slug: &str) -> CategoryIcon {
        if let Some(icon) = self.icons.get(slug) {
            return *icon;
        }
        self.resolve_group(slug)
            .and_then(|key| self.group(key).icon)
            .unwrap_or_default()
    }

    /// Groups in document order.
    pub fn groups(&self) -> impl Iterator<Item = &CategoryGroup> {
        self.groups.iter()
    }

    /// Ordered member slugs of a group.
    pub fn members(&self, key: GroupKey) -> &[CategorySlug] {
        &self.group(key).members
    }

    /// Every grouped slug in stable order.
    pub fn slugs(&self) -> impl Iterator<Item = &CategorySlug> {
        self.by_slug.keys()
    }
}

fn build_slug_index(groups: &[CategoryGroup]) -> Result<BTreeMap<CategorySlug, GroupKey>> {
    let mut map: BTreeMap<CategorySlug, GroupKey> = BTreeMap::new();
    for group in groups {
        if group.members.is_empty() {
            bail!("group {} has no member categories", group.key);
        }
        for slug in &group.members {
            if slug.0.trim().is_empty() {
                bail!("group {} contains an empty slug", group.key);
            }
            if let Some(owner) = map.get(slug) {
                if *owner == group.key {
                    bail!("slug '{}' is listed twice in group {}", slug, group.key);
                }
                bail!(
                    "slug '{}' belongs to both {} and {}",
                    slug,
                    owner,
                    group.key
                );
            }
            map.insert(slug.clone(), group.key);
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn fixture() -> Value {
        let groups: Vec<Value> = GroupKey::ALL
            .iter()
            .map(|key| {
                json!({
                    "key": key.as_str(),
                    "display_name": {"en": format!("{key} en"), "am": format!("{key} am")},
                    "color": "gray",
                    "members": [format!("{key}-a"), format!("{key}-b")]
                })
            })
            .collect();
        json!({
            "schema_version": "classifieds_taxonomy_v1",
            "groups": groups,
            "access": {"messages": {"en": "{category}", "am": "{category}"}}
        })
    }

    fn registry(value: Value) -> Result<CategoryRegistry> {
        let document: TaxonomyDocument = serde_json::from_value(value)?;
        CategoryRegistry::from_document(&document)
    }

    #[test]
    fn resolves_members_and_misses_unknown_slugs() {
        let registry = registry(fixture()).unwrap();
        assert_eq!(registry.resolve_group("travel-b"), Some(GroupKey::Travel));
        assert_eq!(registry.resolve_group("travel"), None);
        assert_eq!(registry.resolve_group(""), None);
        assert_eq!(registry.members(GroupKey::Jobs).len(), 2);
        assert_eq!(registry.slugs().count(), GroupKey::ALL.len() * 2);
    }

    #[test]
    fn rejects_slug_shared_between_groups() {
        let mut doc = fixture();
        doc["groups"][1]["members"] = json!(["vehicles-a"]);
        let err = registry(doc).unwrap_err().to_string();
        assert!(err.contains("vehicles-a"), "{err}");
        assert!(err.contains("vehicles") && err.contains("property"), "{err}");
    }

    #[test]
    fn rejects_duplicate_slug_within_group() {
        let mut doc = fixture();
        doc["groups"][0]["members"] = json!(["cars", "cars"]);
        let err = registry(doc).unwrap_err().to_string();
        assert!(err.contains("listed twice"), "{err}");
    }

    #[test]
    fn rejects_missing_and_repeated_groups() {
        let mut missing = fixture();
        missing["groups"].as_array_mut().unwrap().pop();
        let err = registry(missing).unwrap_err().to_string();
        assert!(err.contains("does not define group services"), "{err}");

        let mut repeated = fixture();
        let first = repeated["groups"][0].clone();
        repeated["groups"].as_array_mut().unwrap().push(first);
        let err = registry(repeated).unwrap_err().to_string();
        assert!(err.contains("more than once"), "{err}");
    }

    #[test]
    fn rejects_empty_member_list() {
        let mut doc = fixture();
        doc["groups"][2]["members"] = json!([]);
        assert!(registry(doc).is_err());
    }

    #[test]
    fn icon_lookup_prefers_slug_then_group_then_default() {
        let mut doc = fixture();
        doc["groups"][0]["icon"] = json!("car");
        doc["icons"] = json!({"vehicles-b": "truck", "loose-slug": "gem"});
        let registry = registry(doc).unwrap();
        assert_eq!(registry.icon_for("vehicles-b"), CategoryIcon::Truck);
        assert_eq!(registry.icon_for("vehicles-a"), CategoryIcon::Car);
        assert_eq!(registry.icon_for("loose-slug"), CategoryIcon::Gem);
        assert_eq!(registry.icon_for("property-a"), CategoryIcon::Tag);
        assert_eq!(registry.icon_for("nowhere"), CategoryIcon::Tag);
    }

    #[test]
    fn display_name_falls_back_to_english() {
        let registry = registry(fixture()).unwrap();
        assert_eq!(registry.display_name(GroupKey::Fashion, "am"), "fashion am");
        assert_eq!(
            registry.display_name(GroupKey::Fashion, "fr"),
            registry.display_name(GroupKey::Fashion, "en")
        );
    }
}
