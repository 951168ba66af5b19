use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;

/// Leaf category identifier as supplied by the listings service (e.g. `cars`).
///
/// Slugs are opaque here: the taxonomy only tests them for membership and never
/// normalizes case or whitespace.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySlug(pub String);

impl CategorySlug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategorySlug {
    fn from(value: &str) -> Self {
        CategorySlug(value.to_string())
    }
}

impl Borrow<str> for CategorySlug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parent group of related categories, used for navigation and badges.
///
/// The set is closed: every variant must be defined by a loaded taxonomy, which
/// keeps per-group lookups total.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum GroupKey {
    Vehicles,
    Property,
    Electronics,
    Fashion,
    Travel,
    Jobs,
    Services,
}

impl GroupKey {
    pub const ALL: [GroupKey; 7] = [
        GroupKey::Vehicles,
        GroupKey::Property,
        GroupKey::Electronics,
        GroupKey::Fashion,
        GroupKey::Travel,
        GroupKey::Jobs,
        GroupKey::Services,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GroupKey::Vehicles => "vehicles",
            GroupKey::Property => "property",
            GroupKey::Electronics => "electronics",
            GroupKey::Fashion => "fashion",
            GroupKey::Travel => "travel",
            GroupKey::Jobs => "jobs",
            GroupKey::Services => "services",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        GroupKey::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GroupKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GroupKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        GroupKey::from_name(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown category group '{value}'")))
    }
}

/// Symbolic presentation color attached to a group. Passed through untouched.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Blue,
    Green,
    Purple,
    Pink,
    Orange,
    Indigo,
    Teal,
    Gray,
}

/// Icon asset for a category badge.
///
/// `Tag` is the fallback for slugs with neither an explicit icon nor a group.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CategoryIcon {
    Car,
    Motorcycle,
    Truck,
    Home,
    Building,
    Map,
    Laptop,
    Phone,
    Tv,
    Camera,
    Shirt,
    Shoe,
    Gem,
    Plane,
    Hotel,
    Briefcase,
    Wrench,
    FileText,
    Gavel,
    #[default]
    Tag,
}

impl CategoryIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryIcon::Car => "car",
            CategoryIcon::Motorcycle => "motorcycle",
            CategoryIcon::Truck => "truck",
            CategoryIcon::Home => "home",
            CategoryIcon::Building => "building",
            CategoryIcon::Map => "map",
            CategoryIcon::Laptop => "laptop",
            CategoryIcon::Phone => "phone",
            CategoryIcon::Tv => "tv",
            CategoryIcon::Camera => "camera",
            CategoryIcon::Shirt => "shirt",
            CategoryIcon::Shoe => "shoe",
            CategoryIcon::Gem => "gem",
            CategoryIcon::Plane => "plane",
            CategoryIcon::Hotel => "hotel",
            CategoryIcon::Briefcase => "briefcase",
            CategoryIcon::Wrench => "wrench",
            CategoryIcon::FileText => "file_text",
            CategoryIcon::Gavel => "gavel",
            CategoryIcon::Tag => "tag",
        }
    }

    fn from_name(value: &str) -> Option<Self> {
        let icon = match value {
            "car" => CategoryIcon::Car,
            "motorcycle" => CategoryIcon::Motorcycle,
            "truck" => CategoryIcon::Truck,
            "home" => CategoryIcon::Home,
            "building" => CategoryIcon::Building,
            "map" => CategoryIcon::Map,
            "laptop" => CategoryIcon::Laptop,
            "phone" => CategoryIcon::Phone,
            "tv" => CategoryIcon::Tv,
            "camera" => CategoryIcon::Camera,
            "shirt" => CategoryIcon::Shirt,
            "shoe" => CategoryIcon::Shoe,
            "gem" => CategoryIcon::Gem,
            "plane" => CategoryIcon::Plane,
            "hotel" => CategoryIcon::Hotel,
            "briefcase" => CategoryIcon::Briefcase,
            "wrench" => CategoryIcon::Wrench,
            "file_text" => CategoryIcon::FileText,
            "gavel" => CategoryIcon::Gavel,
            "tag" => CategoryIcon::Tag,
            _ => return None,
        };
        Some(icon)
    }
}

impl Serialize for CategoryIcon {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryIcon {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        CategoryIcon::from_name(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown category icon '{value}'")))
    }
}

/// UI locale with localized taxonomy strings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Am,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Am => "am",
        }
    }

    /// Exact match on a locale code; `None` for anything unsupported.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Locale::En),
            "am" => Some(Locale::Am),
            _ => None,
        }
    }

    /// Resolve a caller-supplied code, falling back to English.
    pub fn resolve(code: &str) -> Self {
        Locale::from_code(code).unwrap_or_default()
    }
}
