//! Integration tests for the Diesel recipe, tag and ingredient adapters.
//!
//! Every test runs against its own database cloned from a migrated template
//! on a shared embedded PostgreSQL cluster. Set `SKIP_TEST_CLUSTER=1` where
//! the cluster cannot start.

use diesel::pg::PgConnection;
use diesel::sql_types::{Nullable, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

use recipe_backend::domain::ports::{
    IngredientRepository, RecipeRepository, RecipeRepositoryError, TagRepository, UserRepository,
};
use recipe_backend::domain::{
    AttributeName, DisplayName, Email, IngredientId, PasswordHash, PreparationMinutes, Recipe,
    RecipeDraft, RecipeId, RecipeLink, RecipeTitle, TagId, User, UserId,
};
use recipe_backend::outbound::persistence::{
    DbPool, DieselIngredientRepository, DieselRecipeRepository, DieselTagRepository,
    DieselUserRepository, PoolConfig,
};

mod support;

use support::{handle_cluster_setup_failure, provision_template_database, shared_cluster};

struct TestContext {
    runtime: Runtime,
    recipes: DieselRecipeRepository,
    tags: DieselTagRepository,
    ingredients: DieselIngredientRepository,
    users: DieselUserRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

impl TestContext {
    /// Register an account so owned rows satisfy their foreign keys.
    fn owner(&self, email: &str) -> UserId {
        let user = User::new(
            UserId::random(),
            Email::new(email).expect("valid email"),
            DisplayName::new("Test Cook").expect("valid name"),
        );
        self.runtime
            .block_on(self.users.create(&user, &PasswordHash::new("$argon2id$stored")))
            .expect("seed owner");
        user.id().clone()
    }

    fn tag(&self, owner: &UserId, raw: &str) -> TagId {
        let name = AttributeName::new(raw).expect("valid name");
        self.runtime
            .block_on(TagRepository::create(&self.tags, owner, &name))
            .expect("create tag")
            .id()
    }

    fn ingredient(&self, owner: &UserId, raw: &str) -> IngredientId {
        let name = AttributeName::new(raw).expect("valid name");
        self.runtime
            .block_on(IngredientRepository::create(&self.ingredients, owner, &name))
            .expect("create ingredient")
            .id()
    }

    fn recipe_ids(&self, owner: &UserId) -> Vec<RecipeId> {
        self.runtime
            .block_on(RecipeRepository::list_for_owner(&self.recipes, owner))
            .expect("list recipes")
            .iter()
            .map(Recipe::id)
            .collect()
    }
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let temp_db = provision_template_database(cluster)?;
    let database_url = temp_db.url().to_string();

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        recipes: DieselRecipeRepository::new(pool.clone()),
        tags: DieselTagRepository::new(pool.clone()),
        ingredients: DieselIngredientRepository::new(pool.clone()),
        users: DieselUserRepository::new(pool),
        database_url,
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

fn draft(title: &str) -> RecipeDraft {
    RecipeDraft::new(
        RecipeTitle::new(title).expect("title"),
        PreparationMinutes::new(25).expect("minutes"),
        "999.99".parse().expect("price"),
        RecipeLink::new("https://example.com/soup").expect("link"),
    )
}

#[rstest]
fn create_stores_scalars_and_associations(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: create_stores_scalars_and_associations skipped");
        return;
    };
    let owner = ctx.owner("cook@example.com");
    let vegan = ctx.tag(&owner, "Vegan");
    let dinner = ctx.tag(&owner, "Dinner");
    let leek = ctx.ingredient(&owner, "Leek");

    let created = ctx
        .runtime
        .block_on(RecipeRepository::create(
            &ctx.recipes,
            &owner,
            &draft("Leek soup")
                .with_tags([dinner, vegan])
                .with_ingredients([leek]),
        ))
        .expect("create recipe");
    let loaded = ctx
        .runtime
        .block_on(RecipeRepository::find_for_owner(
            &ctx.recipes,
            &owner,
            created.id(),
        ))
        .expect("lookup")
        .expect("recipe exists");

    assert_eq!(loaded, created);
    assert_eq!(loaded.title().as_ref(), "Leek soup");
    assert_eq!(loaded.time_minutes().get(), 25);
    assert_eq!(loaded.price().to_string(), "999.99");
    assert_eq!(loaded.link().as_ref(), "https://example.com/soup");
    let tag_ids: Vec<TagId> = loaded.tags().iter().map(|tag| tag.id()).collect();
    assert_eq!(tag_ids, vec![vegan, dinner], "tags ordered by id ascending");
    assert_eq!(loaded.ingredients().len(), 1);
}

#[rstest]
fn create_rolls_back_on_unowned_tags(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: create_rolls_back_on_unowned_tags skipped");
        return;
    };
    let owner = ctx.owner("owner@example.com");
    let stranger = ctx.owner("stranger@example.com");
    let own = ctx.tag(&owner, "Vegan");
    let foreign = ctx.tag(&stranger, "Secret");
    let absent = TagId::new(i64::MAX);

    let err = ctx
        .runtime
        .block_on(RecipeRepository::create(
            &ctx.recipes,
            &owner,
            &draft("Borrowed").with_tags([absent, own, foreign]),
        ))
        .expect_err("foreign tags are rejected");

    assert_eq!(
        err,
        RecipeRepositoryError::unknown_tags(vec![foreign, absent])
    );
    assert!(ctx.recipe_ids(&owner).is_empty(), "nothing persisted");
}

#[rstest]
fn create_rolls_back_on_unowned_ingredients(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: create_rolls_back_on_unowned_ingredients skipped");
        return;
    };
    let owner = ctx.owner("owner@example.com");
    let stranger = ctx.owner("stranger@example.com");
    let tag = ctx.tag(&owner, "Vegan");
    let foreign = ctx.ingredient(&stranger, "Saffron");

    let err = ctx
        .runtime
        .block_on(RecipeRepository::create(
            &ctx.recipes,
            &owner,
            &draft("Borrowed")
                .with_tags([tag])
                .with_ingredients([foreign]),
        ))
        .expect_err("foreign ingredients are rejected");

    assert_eq!(
        err,
        RecipeRepositoryError::unknown_ingredients(vec![foreign])
    );
    assert!(ctx.recipe_ids(&owner).is_empty(), "nothing persisted");
}

#[rstest]
fn recipes_are_listed_newest_first_per_owner(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: recipes_are_listed_newest_first_per_owner skipped");
        return;
    };
    let owner = ctx.owner("owner@example.com");
    let stranger = ctx.owner("stranger@example.com");
    let create = |who: &UserId, title: &str| {
        ctx.runtime
            .block_on(RecipeRepository::create(&ctx.recipes, who, &draft(title)))
            .expect("create recipe")
            .id()
    };
    let first = create(&owner, "First");
    let foreign = create(&stranger, "Foreign");
    let second = create(&owner, "Second");

    assert_eq!(ctx.recipe_ids(&owner), vec![second, first]);
    assert_eq!(ctx.recipe_ids(&stranger), vec![foreign]);
    let hidden = ctx
        .runtime
        .block_on(RecipeRepository::find_for_owner(
            &ctx.recipes,
            &owner,
            foreign,
        ))
        .expect("lookup");
    assert!(hidden.is_none(), "another owner's recipe reads as missing");
}

#[rstest]
fn tags_sort_by_code_point_then_newest(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: tags_sort_by_code_point_then_newest skipped");
        return;
    };
    let owner = ctx.owner("owner@example.com");
    let stranger = ctx.owner("stranger@example.com");
    let first_apple = ctx.tag(&owner, "apple");
    ctx.tag(&owner, "Banana");
    let second_apple = ctx.tag(&owner, "apple");
    ctx.tag(&owner, "Cherry");
    ctx.tag(&stranger, "Zesty");

    let listed = ctx
        .runtime
        .block_on(TagRepository::list_for_owner(&ctx.tags, &owner))
        .expect("list tags");
    let names: Vec<String> = listed.iter().map(|tag| tag.name().to_string()).collect();
    assert_eq!(names, vec!["apple", "apple", "Cherry", "Banana"]);
    assert_eq!(listed[0].id(), second_apple);
    assert_eq!(listed[1].id(), first_apple);
}

#[rstest]
fn ingredients_sort_by_code_point_then_newest(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: ingredients_sort_by_code_point_then_newest skipped");
        return;
    };
    let owner = ctx.owner("owner@example.com");
    let first_salt = ctx.ingredient(&owner, "salt");
    ctx.ingredient(&owner, "Pepper");
    let second_salt = ctx.ingredient(&owner, "salt");

    let listed = ctx
        .runtime
        .block_on(IngredientRepository::list_for_owner(&ctx.ingredients, &owner))
        .expect("list ingredients");
    let ids: Vec<IngredientId> = listed.iter().map(|ingredient| ingredient.id()).collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(&ids[..2], &[second_salt, first_salt]);
    assert_eq!(listed[2].name().as_ref(), "Pepper");
}

#[derive(Debug, PartialEq, Eq, QueryableByName)]
struct ColumnInfo {
    #[diesel(sql_type = Text)]
    table_name: String,
    #[diesel(sql_type = Text)]
    column_name: String,
    #[diesel(sql_type = Text)]
    udt_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    collation_name: Option<String>,
}

fn column(table: &str, name: &str, udt: &str, collation: Option<&str>) -> ColumnInfo {
    ColumnInfo {
        table_name: table.to_owned(),
        column_name: name.to_owned(),
        udt_name: udt.to_owned(),
        collation_name: collation.map(str::to_owned),
    }
}

/// The migrated columns line up with the Diesel table definitions.
#[rstest]
fn migrated_columns_match_table_definitions(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: migrated_columns_match_table_definitions skipped");
        return;
    };
    let mut conn = PgConnection::establish(&ctx.database_url).expect("connect");
    let columns: Vec<ColumnInfo> = diesel::sql_query(
        "SELECT table_name::text AS table_name, column_name::text AS column_name, \
         udt_name::text AS udt_name, collation_name::text AS collation_name \
         FROM information_schema.columns \
         WHERE table_schema = 'public' AND table_name <> '__diesel_schema_migrations' \
         ORDER BY table_name::text COLLATE \"C\", ordinal_position",
    )
    .load(&mut conn)
    .expect("read columns");

    let expected = vec![
        column("ingredients", "id", "int8", None),
        column("ingredients", "user_id", "uuid", None),
        column("ingredients", "name", "varchar", Some("C")),
        column("recipe_ingredients", "recipe_id", "int8", None),
        column("recipe_ingredients", "ingredient_id", "int8", None),
        column("recipe_tags", "recipe_id", "int8", None),
        column("recipe_tags", "tag_id", "int8", None),
        column("recipes", "id", "int8", None),
        column("recipes", "user_id", "uuid", None),
        column("recipes", "title", "varchar", None),
        column("recipes", "time_minutes", "int4", None),
        column("recipes", "price", "numeric", None),
        column("recipes", "link", "varchar", None),
        column("recipes", "created_at", "timestamptz", None),
        column("tags", "id", "int8", None),
        column("tags", "user_id", "uuid", None),
        column("tags", "name", "varchar", Some("C")),
        column("users", "id", "uuid", None),
        column("users", "email", "varchar", None),
        column("users", "name", "varchar", None),
        column("users", "password_hash", "text", None),
        column("users", "created_at", "timestamptz", None),
    ];
    assert_eq!(columns, expected);
}
