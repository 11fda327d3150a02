//! Built-in options shipped with every deployment.
//!
//! Baselines are never persisted. Custom entries are merged after them at read time.

use fxhash::FxHashMap;
use stagehand_domain::catalog::{CatalogKind, OptionValue};
use std::sync::Arc;
use strum::IntoEnumIterator;

const EVENT_TYPES: &[&str] = &[
    "Wedding",
    "Birthday",
    "Debut",
    "Corporate Event",
    "Concert",
    "Christening",
    "Anniversary",
    "School Program",
];

const LOCATIONS: &[&str] = &[
    "Manila",
    "Quezon City",
    "Makati",
    "Pasig",
    "Taguig",
    "Mandaluyong",
    "Pasay",
    "Parañaque",
];

const CLIENTS: &[&str] = &["Walk-in Client"];

const EQUIPMENT_NAMES: &[&str] = &[
    "Line Array Speaker",
    "Subwoofer",
    "Stage Monitor",
    "Digital Mixer",
    "Wireless Microphone",
    "Moving Head Light",
    "LED Par Light",
    "Fog Machine",
];

const PACKAGE_NAMES: &[&str] =
    &["Basic Sound Package", "Standard Lights and Sound", "Premium Concert Package"];

const AMOUNTS: &[f64] = &[5_000.0, 10_000.0, 15_000.0, 20_000.0, 25_000.0, 30_000.0, 50_000.0];

const TIME_OPTIONS: &[&str] = &[
    "6:00 AM", "8:00 AM", "10:00 AM", "12:00 PM", "2:00 PM", "4:00 PM", "6:00 PM", "8:00 PM",
];

const DRIVERS: &[&str] = &[];

/// Ordered baseline values per kind.
#[derive(Debug, Clone)]
pub struct Baselines {
    values: Arc<FxHashMap<CatalogKind, Vec<OptionValue>>>,
}

impl Default for Baselines {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Baselines {
    /// Baselines compiled into the service.
    #[must_use]
    pub fn builtin() -> Self {
        let values: FxHashMap<_, _> = CatalogKind::iter()
            .map(|kind| {
                let values: Vec<OptionValue> = match kind {
                    CatalogKind::Amount => AMOUNTS.iter().copied().map(OptionValue::Amount).collect(),
                    _ => builtin_text(kind).iter().copied().map(OptionValue::from).collect(),
                };
                (kind, values)
            })
            .collect();

        Self { values: Arc::new(values) }
    }

    /// No baseline values for any kind.
    #[must_use]
    pub fn empty() -> Self {
        Self { values: Arc::default() }
    }

    /// Replaces the baseline of a string kind.
    #[must_use]
    pub fn with_text<I, V>(mut self, kind: CatalogKind, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values.into_iter().map(|v| OptionValue::Text(v.into())).collect();
        Arc::make_mut(&mut self.values).insert(kind, values);
        self
    }

    /// Replaces the amount baseline.
    #[must_use]
    pub fn with_amounts(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        let values = values.into_iter().map(OptionValue::Amount).collect();
        Arc::make_mut(&mut self.values).insert(CatalogKind::Amount, values);
        self
    }

    #[must_use]
    pub fn values(&self, kind: CatalogKind) -> &[OptionValue] {
        self.values.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Exact (case-sensitive) match for strings, numeric equality for amounts.
    #[must_use]
    pub fn contains(&self, kind: CatalogKind, value: &OptionValue) -> bool {
        self.values(kind).iter().any(|baseline| same_value(baseline, value))
    }
}

fn builtin_text(kind: CatalogKind) -> &'static [&'static str] {
    match kind {
        CatalogKind::EventType => EVENT_TYPES,
        CatalogKind::Location => LOCATIONS,
        CatalogKind::Client => CLIENTS,
        CatalogKind::EquipmentName => EQUIPMENT_NAMES,
        CatalogKind::PackageName => PACKAGE_NAMES,
        CatalogKind::TimeOption => TIME_OPTIONS,
        CatalogKind::Driver => DRIVERS,
        CatalogKind::Amount => &[],
    }
}

#[allow(clippy::float_cmp)]
fn same_value(a: &OptionValue, b: &OptionValue) -> bool {
    match (a, b) {
        (OptionValue::Text(a), OptionValue::Text(b)) => a == b,
        (OptionValue::Amount(a), OptionValue::Amount(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_kind_with_matching_value_types() {
        let baselines = Baselines::builtin();
        for kind in CatalogKind::iter() {
            for value in baselines.values(kind) {
                assert_eq!(value.as_amount().is_some(), kind == CatalogKind::Amount, "{kind}");
            }
        }
        assert!(baselines.values(CatalogKind::Driver).is_empty());
        assert!(!baselines.values(CatalogKind::Location).is_empty());
    }

    #[test]
    fn contains_is_case_sensitive_and_numeric() {
        let baselines = Baselines::empty()
            .with_text(CatalogKind::Location, ["Manila"])
            .with_amounts([1000.0]);

        assert!(baselines.contains(CatalogKind::Location, &"Manila".into()));
        assert!(!baselines.contains(CatalogKind::Location, &"manila".into()));
        assert!(baselines.contains(CatalogKind::Amount, &1000.0.into()));
        assert!(!baselines.contains(CatalogKind::Amount, &"1000".into()));
        assert!(baselines.values(CatalogKind::Client).is_empty());
    }
}
