use catalog_core::db::open_db_in_memory;
use catalog_core::{
    DuplicateKeyPolicy, EmptyListPolicy, Entity, EntityManager, ErrorKind, InMemoryRepository,
    ManagerError, ManagerPolicy, MissingDeletePolicy, MissingUpdatePolicy, Movie, Product,
    SqliteRepository, Town, TownManager,
};
use std::thread;

fn product(code: &str, price: f64) -> Product {
    Product {
        product_code: code.to_string(),
        product_name: "banana".to_string(),
        origin_country: "Bulgaria".to_string(),
        description: None,
        price,
        quantity: 100,
    }
}

#[test]
fn entity_default_policies() {
    assert_eq!(Product::default_policy(), ManagerPolicy::default());
    assert_eq!(Movie::default_policy(), ManagerPolicy::default());

    let town = Town::default_policy();
    assert_eq!(town.on_duplicate, DuplicateKeyPolicy::KeepExisting);
    assert_eq!(town.on_missing_delete, MissingDeletePolicy::Ignore);
    assert_eq!(town.on_missing_update, MissingUpdatePolicy::Reject);
    assert_eq!(town.on_empty_list, EmptyListPolicy::Strict);
}

#[test]
fn duplicate_add_is_rejected_and_keeps_first_version() {
    let conn = open_db_in_memory().unwrap();
    let manager = EntityManager::new(SqliteRepository::<Product>::try_new(&conn).unwrap());

    manager.add(&product("AB12C", 1.25)).unwrap();
    let err = manager.add(&product("AB12C", 9.99)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Duplicate);
    assert_eq!(
        err.to_string(),
        "Product with product code AB12C already exists."
    );
    assert_eq!(manager.get_specific("AB12C").unwrap().price, 1.25);
}

#[test]
fn missing_delete_is_rejected_the_same_way_every_time() {
    let manager = EntityManager::new(InMemoryRepository::<Product>::new());

    for _ in 0..3 {
        let err = manager.delete("ZZ999").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "No product found with product code: ZZ999");
    }
}

#[test]
fn town_readd_keeps_existing_population() {
    let conn = open_db_in_memory().unwrap();
    let manager: TownManager<_> =
        EntityManager::new(SqliteRepository::<Town>::try_new(&conn).unwrap());

    manager.add(&Town::new("Sofia", 100_000)).unwrap();
    manager.add(&Town::new("Sofia", 200_000)).unwrap();

    let towns = manager.get_all().unwrap();
    assert_eq!(towns, vec![Town::new("Sofia", 100_000)]);
}

#[test]
fn town_missing_delete_is_a_no_op_every_time() {
    let manager: TownManager<_> = EntityManager::new(InMemoryRepository::new());
    manager.add(&Town::new("Plovdiv", 340_000)).unwrap();

    for _ in 0..3 {
        manager.delete("Varna").unwrap();
    }
    assert_eq!(manager.get_all().unwrap().len(), 1);

    manager.delete("Plovdiv").unwrap();
    manager.delete("Plovdiv").unwrap();
    assert_eq!(manager.get_all().unwrap_err().to_string(), "No town found.");
}

#[test]
fn town_rules_report_field_sentences() {
    let manager: TownManager<_> = EntityManager::new(InMemoryRepository::new());

    let err = manager.add(&Town::new("AB", 10)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Invalid town name.");

    let err = manager.add(&Town::new("Sofia", 0)).unwrap_err();
    assert_eq!(err.to_string(), "Population must be a positive number.");

    let err = manager.add(&Town::new("S".repeat(31), 10)).unwrap_err();
    assert_eq!(err.to_string(), "Invalid town name.");
}

#[test]
fn overwrite_policy_from_json_replaces_on_add() {
    let policy = ManagerPolicy::from_json(r#"{"on_duplicate": "overwrite"}"#).unwrap();
    let conn = open_db_in_memory().unwrap();
    let manager =
        EntityManager::with_policy(SqliteRepository::<Product>::try_new(&conn).unwrap(), policy);

    manager.add(&product("AB12C", 1.25)).unwrap();
    manager.add(&product("AB12C", 9.99)).unwrap();

    assert_eq!(manager.policy(), policy);
    assert_eq!(manager.get_all().unwrap(), vec![product("AB12C", 9.99)]);
}

#[test]
fn lenient_listing_returns_empty_collection() {
    let policy = ManagerPolicy {
        on_empty_list: EmptyListPolicy::Lenient,
        ..Movie::default_policy()
    };
    let manager = EntityManager::with_policy(InMemoryRepository::<Movie>::new(), policy);

    assert!(manager.get_all().unwrap().is_empty());
}

#[test]
fn concurrent_duplicate_adds_store_exactly_one() {
    let manager = EntityManager::new(InMemoryRepository::<Product>::new());

    let outcomes: Vec<Result<(), ManagerError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|index| {
                let manager = &manager;
                scope.spawn(move || manager.add(&product("AB12C", 1.0 + index as f64)))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let inserted = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    let duplicates = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, Err(err) if err.kind() == ErrorKind::Duplicate))
        .count();
    assert_eq!(inserted, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(manager.repo().len().unwrap(), 1);
}

#[test]
fn concurrent_deletes_remove_once() {
    let manager = EntityManager::new(InMemoryRepository::<Product>::new());
    manager.add(&product("AB12C", 1.25)).unwrap();

    let not_found = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = &manager;
                scope.spawn(move || manager.delete("AB12C"))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|outcome| matches!(outcome, Err(err) if err.kind() == ErrorKind::NotFound))
            .count()
    });

    assert_eq!(not_found, 7);
    assert!(manager.repo().is_empty().unwrap());
}
