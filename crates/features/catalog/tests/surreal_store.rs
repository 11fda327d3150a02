mod common;

use common::admin;
use stagehand_catalog::store::{CatalogStore, InsertOutcome, SurrealCatalogStore};
use stagehand_catalog::{AddOutcome, Baselines, CatalogService, MIGRATIONS};
use stagehand_database::Database;
use stagehand_domain::catalog::{CatalogKind, OptionValue};
use std::sync::Arc;

const WRITERS: usize = 16;

async fn store(database: &str) -> SurrealCatalogStore {
    let db = Database::builder()
        .url("mem://")
        .session("test", database)
        .migrations(MIGRATIONS.iter().copied())
        .init()
        .await
        .expect("in-memory database should start");
    SurrealCatalogStore::new(db)
}

#[tokio::test]
async fn text_options_are_unique_per_kind() {
    let store = store("text").await;

    let created = store.insert(CatalogKind::Location, "Makati".into()).await.unwrap();
    let InsertOutcome::Created(entry) = created else { panic!("expected created entry") };
    assert!(entry.id.starts_with("catalog_option:"));
    assert_eq!(entry.kind, CatalogKind::Location);

    let again = store.insert(CatalogKind::Location, "Makati".into()).await.unwrap();
    assert_eq!(again, InsertOutcome::Duplicate);

    let other_kind = store.insert(CatalogKind::Client, "Makati".into()).await.unwrap();
    assert!(matches!(other_kind, InsertOutcome::Created(_)));

    assert_eq!(store.list(CatalogKind::Location).await.unwrap(), [OptionValue::from("Makati")]);
    let found = store.find(CatalogKind::Location, &"Makati".into()).await.unwrap();
    assert_eq!(found.map(|e| e.id), Some(entry.id));
    assert!(store.find(CatalogKind::Location, &"makati".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn amounts_are_unique_numerically() {
    let store = store("amounts").await;

    let created = store.insert(CatalogKind::Amount, 1500.0.into()).await.unwrap();
    assert!(matches!(created, InsertOutcome::Created(_)));
    let again = store.insert(CatalogKind::Amount, 1500.0.into()).await.unwrap();
    assert_eq!(again, InsertOutcome::Duplicate);

    assert_eq!(store.list(CatalogKind::Amount).await.unwrap(), [OptionValue::Amount(1500.0)]);
    assert!(store.find(CatalogKind::Amount, &1500.0.into()).await.unwrap().is_some());
}

#[tokio::test]
async fn equipment_items_accumulate_in_general_category() {
    let store = store("equipment").await;

    let first = store.insert(CatalogKind::EquipmentName, "Truss Tower".into()).await.unwrap();
    let InsertOutcome::Created(entry) = first else { panic!("expected created entry") };
    assert!(entry.id.starts_with("equipment_category:"));

    store.insert(CatalogKind::EquipmentName, "Hazer".into()).await.unwrap();
    let again = store.insert(CatalogKind::EquipmentName, "Hazer".into()).await.unwrap();
    assert_eq!(again, InsertOutcome::Duplicate);

    let categories = store.equipment_categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "General");
    assert_eq!(categories[0].items, ["Truss Tower", "Hazer"]);

    let mut items = store.list(CatalogKind::EquipmentName).await.unwrap();
    items.sort_by_key(ToString::to_string);
    assert_eq!(items, [OptionValue::from("Hazer"), OptionValue::from("Truss Tower")]);
}

#[tokio::test]
async fn service_round_trip_over_surrealdb() {
    let service = CatalogService::with_baselines(
        store("service").await,
        Baselines::empty().with_text(CatalogKind::TimeOption, ["8:00 AM"]),
    );

    let outcome =
        service.add_option(&admin(), CatalogKind::TimeOption, "7:30 PM".into()).await.unwrap();
    assert!(outcome.is_created());
    let outcome =
        service.add_option(&admin(), CatalogKind::TimeOption, "7:30 PM".into()).await.unwrap();
    assert!(matches!(outcome, AddOutcome::Existing { .. }));

    let options = service.list_options(&admin(), CatalogKind::TimeOption).await.unwrap();
    assert_eq!(options, [OptionValue::from("8:00 AM"), OptionValue::from("7:30 PM")]);
}

/// Issues one admin add per value, all at once, and collects the outcomes.
async fn add_concurrently(
    service: &Arc<CatalogService>,
    kind: CatalogKind,
    values: Vec<String>,
) -> Vec<AddOutcome> {
    let tasks: Vec<_> = values
        .into_iter()
        .map(|value| {
            let service = Arc::clone(service);
            tokio::spawn(async move { service.add_option(&admin(), kind, value.into()).await })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(tasks.len());
    for task in tasks {
        outcomes.push(task.await.expect("add task panicked").expect("add should succeed"));
    }
    outcomes
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_of_one_value_create_it_once() {
    for (database, kind) in
        [("same-location", CatalogKind::Location), ("same-equipment", CatalogKind::EquipmentName)]
    {
        let service =
            Arc::new(CatalogService::with_baselines(store(database).await, Baselines::empty()));

        let outcomes = add_concurrently(&service, kind, vec!["Makati".to_owned(); WRITERS]).await;

        assert_eq!(outcomes.iter().filter(|o| o.is_created()).count(), 1, "{kind}: {outcomes:?}");
        assert!(
            outcomes.iter().all(|o| o.is_created() || matches!(o, AddOutcome::Existing { .. })),
            "{kind}: {outcomes:?}"
        );
        let listed = service.list_options(&admin(), kind).await.unwrap();
        assert_eq!(listed, [OptionValue::from("Makati")], "{kind}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_of_distinct_values_all_persist() {
    for (database, kind) in [
        ("distinct-location", CatalogKind::Location),
        ("distinct-equipment", CatalogKind::EquipmentName),
    ] {
        let service =
            Arc::new(CatalogService::with_baselines(store(database).await, Baselines::empty()));
        let values: Vec<String> = (0..WRITERS).map(|i| format!("Stage {i:02}")).collect();

        let outcomes = add_concurrently(&service, kind, values.clone()).await;

        assert!(outcomes.iter().all(AddOutcome::is_created), "{kind}: {outcomes:?}");
        let listed: Vec<String> = service
            .list_options(&admin(), kind)
            .await
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(listed, values, "{kind}");
    }
}
