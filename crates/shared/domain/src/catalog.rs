//! Option catalog vocabulary: which catalogs exist and what their values look like.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// One of the option catalogs offered to the admin dashboard and public forms.
///
/// The kebab-case slug (`event-type`, `equipment-name`, ...) is used both on the
/// wire and as the `kind` column of persisted entries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CatalogKind {
    EventType,
    Location,
    Client,
    EquipmentName,
    PackageName,
    Amount,
    TimeOption,
    Driver,
}

impl CatalogKind {
    /// Shape of the values held by this catalog.
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            Self::Amount => ValueType::Number,
            _ => ValueType::Text,
        }
    }

    /// Whether reading the merged list requires an authenticated admin.
    ///
    /// Client names, driver names and price points are business data; the
    /// remaining catalogs feed the public inquiry form.
    #[must_use]
    pub const fn is_admin_only(self) -> bool {
        matches!(self, Self::Client | Self::Amount | Self::Driver)
    }

    /// Wire slug of the kind, e.g. `package-name`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        self.into()
    }
}

/// Value shape of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Text,
    Number,
}

/// A single option as presented to callers: a string, or a number for amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Amount(f64),
}

impl OptionValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Amount(_) => None,
        }
    }

    #[must_use]
    pub const fn as_amount(&self) -> Option<f64> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Amount(amount) => write!(f, "{amount}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Amount(value)
    }
}

/// A persisted custom option.
///
/// For equipment names `id` identifies the category document that owns the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CatalogEntry {
    pub id: String,
    pub kind: CatalogKind,
    pub value: OptionValue,
}

/// Equipment category aggregate: a named, ordered list of equipment items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct EquipmentCategory {
    pub id: String,
    pub name: String,
    pub items: Vec<String>,
}

/// Description of a catalog for clients rendering option pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct KindInfo {
    pub kind: CatalogKind,
    pub value_type: ValueType,
    pub admin_only: bool,
}

impl From<CatalogKind> for KindInfo {
    fn from(kind: CatalogKind) -> Self {
        Self { kind, value_type: kind.value_type(), admin_only: kind.is_admin_only() }
    }
}
