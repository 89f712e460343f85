//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `catalog_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use catalog_core::db::open_db_in_memory;
use catalog_core::{
    default_log_level, init_logging, EntityManager, Product, ProductManager, SqliteRepository,
};
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "CATALOG_LOG_DIR";

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("catalog_cli logging disabled: {err}");
        }
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("catalog_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("catalog_core version={}", catalog_core::core_version());

    let conn = open_db_in_memory()?;
    let repo = SqliteRepository::<Product>::try_new(&conn)?;
    let manager: ProductManager<_> = EntityManager::new(repo);

    manager.add(&Product {
        product_code: "AB12C".to_string(),
        product_name: "banana".to_string(),
        origin_country: "Bulgaria".to_string(),
        description: None,
        price: 1.25,
        quantity: 100,
    })?;
    println!("catalog_core products={}", manager.get_all()?.len());

    if let Err(err) = manager.get_specific("ZZ999") {
        println!("catalog_core lookup kind={:?} message={err}", err.kind());
    }

    log::info!("event=cli_smoke module=cli status=ok");
    Ok(())
}
