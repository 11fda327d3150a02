mod common;

use common::{MemoryStore, admin, candidate, sample};
use stagehand_catalog::{AddOutcome, Baselines, Candidate, CatalogError, CatalogService};
use stagehand_domain::catalog::{CatalogKind, OptionValue, ValueType};
use stagehand_kernel::security::Caller;
use strum::IntoEnumIterator;

fn service(baselines: Baselines) -> (CatalogService<MemoryStore>, MemoryStore) {
    let store = MemoryStore::default();
    (CatalogService::with_baselines(store.clone(), baselines), store)
}

fn texts(values: &[OptionValue]) -> Vec<&str> {
    values.iter().filter_map(OptionValue::as_text).collect()
}

#[tokio::test]
async fn added_location_is_appended_after_baseline() {
    let (service, _) =
        service(Baselines::empty().with_text(CatalogKind::Location, ["Manila", "Quezon City"]));

    let outcome =
        service.add_option(&admin(), CatalogKind::Location, "Makati".into()).await.unwrap();
    assert!(outcome.is_created());
    assert_eq!(outcome.value(), &OptionValue::from("Makati"));

    let options = service.list_options(&Caller::Anonymous, CatalogKind::Location).await.unwrap();
    assert_eq!(texts(&options), ["Manila", "Quezon City", "Makati"]);
}

#[tokio::test]
async fn amounts_are_listed_in_numeric_order() {
    let (service, _) = service(Baselines::empty().with_amounts([1000.0, 2000.0]));

    let outcome = service.add_option(&admin(), CatalogKind::Amount, 1500.0.into()).await.unwrap();
    assert!(outcome.is_created());

    let options = service.list_options(&admin(), CatalogKind::Amount).await.unwrap();
    let amounts: Vec<f64> = options.iter().filter_map(OptionValue::as_amount).collect();
    assert_eq!(amounts, [1000.0, 1500.0, 2000.0]);
}

#[tokio::test]
async fn adding_twice_lists_the_value_once_for_every_kind() {
    let (service, store) = service(Baselines::builtin());

    for kind in CatalogKind::iter() {
        let value = sample(kind);

        let first = service.add_option(&admin(), kind, candidate(&value)).await.unwrap();
        let second = service.add_option(&admin(), kind, candidate(&value)).await.unwrap();
        assert!(first.is_created(), "{kind}");
        assert!(matches!(second, AddOutcome::Existing { .. }), "{kind}");

        let options = service.list_options(&admin(), kind).await.unwrap();
        assert_eq!(options.iter().filter(|o| **o == value).count(), 1, "{kind}");
        assert_eq!(store.persisted(kind), 1, "{kind}");
    }
}

#[tokio::test]
async fn baseline_values_are_never_persisted() {
    let (service, store) = service(
        Baselines::empty().with_text(CatalogKind::EventType, ["Wedding"]).with_amounts([5000.0]),
    );

    let outcome =
        service.add_option(&admin(), CatalogKind::EventType, "  Wedding ".into()).await.unwrap();
    assert_eq!(outcome, AddOutcome::Baseline { value: "Wedding".into() });

    let outcome = service.add_option(&admin(), CatalogKind::Amount, "5000".into()).await.unwrap();
    assert!(matches!(outcome, AddOutcome::Baseline { .. }));

    assert_eq!(store.inserts(), 0);
    assert_eq!(store.persisted(CatalogKind::EventType), 0);
}

#[tokio::test]
async fn baseline_match_is_case_sensitive() {
    let (service, _) =
        service(Baselines::empty().with_text(CatalogKind::EventType, ["Wedding"]));

    let outcome =
        service.add_option(&admin(), CatalogKind::EventType, "wedding".into()).await.unwrap();
    assert!(outcome.is_created());

    let options = service.list_options(&admin(), CatalogKind::EventType).await.unwrap();
    assert_eq!(texts(&options), ["Wedding", "wedding"]);
}

#[tokio::test]
async fn invalid_amounts_are_rejected() {
    let (service, store) = service(Baselines::builtin());

    for candidate in [Candidate::from(-5.0), Candidate::from(0.0), Candidate::from("abc")] {
        let err = service.add_option(&admin(), CatalogKind::Amount, candidate).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput { .. }));
    }
    assert_eq!(store.inserts(), 0);
}

#[tokio::test]
async fn blank_strings_are_rejected_for_every_string_kind() {
    let (service, store) = service(Baselines::builtin());

    for kind in CatalogKind::iter().filter(|k| k.value_type() == ValueType::Text) {
        let err = service.add_option(&admin(), kind, "  ".into()).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput { .. }), "{kind}");
    }
    assert_eq!(store.inserts(), 0);
}

#[tokio::test]
async fn anonymous_callers_cannot_add() {
    let (service, store) = service(Baselines::builtin());

    for kind in CatalogKind::iter() {
        let err =
            service.add_option(&Caller::Anonymous, kind, candidate(&sample(kind))).await.unwrap_err();
        assert!(matches!(err, CatalogError::Unauthorized { .. }), "{kind}");
    }

    let err =
        service.add_option(&Caller::Anonymous, CatalogKind::Location, "  ".into()).await.unwrap_err();
    assert!(matches!(err, CatalogError::Unauthorized { .. }));

    let options = service.list_options(&admin(), CatalogKind::Location).await.unwrap();
    assert!(!options.contains(&sample(CatalogKind::Location)));
    assert_eq!(store.inserts(), 0);
}

#[tokio::test]
async fn admin_only_kinds_require_an_admin_to_list() {
    let (service, _) = service(Baselines::builtin());

    for kind in CatalogKind::iter() {
        let anonymous = service.list_options(&Caller::Anonymous, kind).await;
        if kind.is_admin_only() {
            assert!(matches!(anonymous, Err(CatalogError::Unauthorized { .. })), "{kind}");
        } else {
            assert!(anonymous.is_ok(), "{kind}");
        }
        assert!(service.list_options(&admin(), kind).await.is_ok(), "{kind}");
    }
}

#[tokio::test]
async fn storage_failures_surface_as_unavailable() {
    let (service, store) = service(Baselines::builtin());
    store.set_unavailable(true);

    let err = service.list_options(&admin(), CatalogKind::Location).await.unwrap_err();
    assert!(matches!(err, CatalogError::StorageUnavailable { .. }));

    let err = service.add_option(&admin(), CatalogKind::Location, "Makati 2".into()).await.unwrap_err();
    assert!(matches!(err, CatalogError::StorageUnavailable { .. }));

    let err = service.list_equipment_categories().await.unwrap_err();
    assert!(matches!(err, CatalogError::StorageUnavailable { .. }));
}

#[tokio::test]
async fn lost_insert_race_reports_existing_entry() {
    let (service, store) = service(Baselines::empty());
    store.lose_next_race();

    let outcome =
        service.add_option(&admin(), CatalogKind::Driver, "Mang Jose".into()).await.unwrap();
    match outcome {
        AddOutcome::Existing { entry } => assert_eq!(entry.value, OptionValue::from("Mang Jose")),
        other => panic!("expected existing entry, got {other:?}"),
    }

    let options = service.list_options(&admin(), CatalogKind::Driver).await.unwrap();
    assert_eq!(texts(&options), ["Mang Jose"]);
}

#[tokio::test]
async fn persisted_copies_of_baseline_values_are_not_repeated() {
    let (service, store) =
        service(Baselines::empty().with_text(CatalogKind::PackageName, ["Basic", "Premium"]));
    store.seed(CatalogKind::PackageName, "Premium");
    store.seed(CatalogKind::PackageName, "deluxe");
    store.seed(CatalogKind::PackageName, "Corporate");

    let options = service.list_options(&admin(), CatalogKind::PackageName).await.unwrap();
    assert_eq!(texts(&options), ["Basic", "Premium", "Corporate", "deluxe"]);
}

#[tokio::test]
async fn equipment_names_land_in_the_general_category() {
    let (service, _) = service(Baselines::empty());

    service.add_option(&admin(), CatalogKind::EquipmentName, "Truss Tower".into()).await.unwrap();

    let categories = service.list_equipment_categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "General");
    assert_eq!(categories[0].items, ["Truss Tower"]);

    let options =
        service.list_options(&Caller::Anonymous, CatalogKind::EquipmentName).await.unwrap();
    assert_eq!(texts(&options), ["Truss Tower"]);
}

#[test]
fn kinds_are_described_for_option_pickers() {
    let (service, _) = service(Baselines::builtin());
    let kinds = service.list_kinds();

    assert_eq!(kinds.len(), 8);
    let admin_only: Vec<_> = kinds.iter().filter(|k| k.admin_only).map(|k| k.kind).collect();
    assert_eq!(admin_only, [CatalogKind::Client, CatalogKind::Amount, CatalogKind::Driver]);
}
