//! Embedded PostgreSQL helpers shared by the Diesel adapter suites.
//!
//! Each test gets its own database cloned from a template that already has
//! every migration applied. The template name carries a hash of the
//! migrations directory so schema edits produce a fresh template.

// Each suite compiles this module separately and uses a subset of it.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use uuid::Uuid;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const TEMPLATE_NAME_PREFIX: &str = "recipes_template";
const RETRIES: usize = 5;
const RETRY_DELAY: Duration = Duration::from_millis(500);

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when `SKIP_TEST_CLUSTER` is set, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Process-wide embedded cluster, started on first use.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= RETRIES => {
                return Err(format!("start shared cluster: {error:?}"));
            }
            Err(_) => {
                std::thread::sleep(RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// A reused data directory keeps the password from its first `initdb`.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster library spawns threads and the
        // shared handle serialises its own initialisation.
        unsafe {
            std::env::set_var("PG_PASSWORD", "recipes_embedded_test");
        }
    }
}

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Apply every migration to the database at `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        migrate_schema(&cluster.connection().database_url(&template_name))?;
    }
    Ok(template_name)
}

/// Clone a fresh, fully migrated database for one test.
pub fn provision_template_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::from("create database from template: exhausted retries");
    for attempt in 1..=RETRIES {
        let result = ensure_template_database(cluster).and_then(|template| {
            let db_name = format!("test_{}", Uuid::new_v4().simple());
            cluster
                .temporary_database_from_template(db_name.as_str(), template.as_str())
                .map_err(|err| format!("create database from template: {err:?}"))
        });
        match result {
            Ok(database) => return Ok(database),
            Err(error) => last_error = format!("attempt {attempt}/{RETRIES}: {error}"),
        }
        if attempt < RETRIES {
            std::thread::sleep(RETRY_DELAY);
        }
    }
    Err(last_error)
}
