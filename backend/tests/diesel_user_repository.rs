//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.

use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

use recipe_backend::domain::ports::{UserRepository, UserRepositoryError};
use recipe_backend::domain::{DisplayName, Email, PasswordHash, User, UserId};
use recipe_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};

mod support;

use support::{handle_cluster_setup_failure, provision_template_database, shared_cluster};

struct TestContext {
    runtime: Runtime,
    repository: DieselUserRepository,
    _database: TemporaryDatabase,
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let temp_db = provision_template_database(cluster)?;

    let config = PoolConfig::new(temp_db.url())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselUserRepository::new(pool),
        _database: temp_db,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn user(email: &str) -> User {
    User::new(
        UserId::random(),
        Email::new(email).expect("valid email"),
        DisplayName::new("Diesel Cook").expect("valid name"),
    )
}

fn hash() -> PasswordHash {
    PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
}

#[rstest]
fn created_users_are_found_by_id_and_email(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: created_users_are_found_by_id_and_email skipped");
        return;
    };
    let cook = user("cook@example.com");
    ctx.runtime
        .block_on(ctx.repository.create(&cook, &hash()))
        .expect("create user");

    let by_id = ctx
        .runtime
        .block_on(ctx.repository.find_by_id(cook.id()))
        .expect("lookup by id");
    assert_eq!(by_id, Some(cook.clone()));

    let stored = ctx
        .runtime
        .block_on(ctx.repository.find_credentials(cook.email()))
        .expect("lookup by email")
        .expect("credentials exist");
    assert_eq!(stored.user, cook);
    assert_eq!(stored.password_hash, hash());
}

#[rstest]
fn unknown_users_read_as_none(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_users_read_as_none skipped");
        return;
    };
    let by_id = ctx
        .runtime
        .block_on(ctx.repository.find_by_id(&UserId::random()))
        .expect("lookup by id");
    let email = Email::new("nobody@example.com").expect("valid email");
    let by_email = ctx
        .runtime
        .block_on(ctx.repository.find_credentials(&email))
        .expect("lookup by email");

    assert!(by_id.is_none());
    assert!(by_email.is_none());
}

#[rstest]
#[case::identical("cook@example.com")]
#[case::domain_case_differs("cook@EXAMPLE.com")]
fn duplicate_emails_map_to_duplicate_email(
    repo_context: Option<TestContext>,
    #[case] second_email: &str,
) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_emails_map_to_duplicate_email skipped");
        return;
    };
    ctx.runtime
        .block_on(ctx.repository.create(&user("cook@example.com"), &hash()))
        .expect("first registration");

    let err = ctx
        .runtime
        .block_on(ctx.repository.create(&user(second_email), &hash()))
        .expect_err("email already taken");

    assert_eq!(err, UserRepositoryError::duplicate_email("cook@example.com"));
}
