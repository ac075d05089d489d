//! Regression coverage for port error constructors.

use super::*;
use crate::domain::{IngredientId, TagId};
use rstest::rstest;

#[rstest]
fn unknown_tags_lists_offending_ids() {
    let err = RecipeRepositoryError::unknown_tags(vec![TagId::new(4), TagId::new(9)]);
    assert_eq!(err.to_string(), "recipe references unknown tags: [TagId(4), TagId(9)]");
}

#[rstest]
fn unknown_ingredients_lists_offending_ids() {
    let err = RecipeRepositoryError::unknown_ingredients(vec![IngredientId::new(2)]);
    assert!(matches!(
        err,
        RecipeRepositoryError::UnknownIngredients { ref ids } if ids == &[IngredientId::new(2)]
    ));
}

#[rstest]
#[case(UserRepositoryError::connection("refused"), "user repository connection failed: refused")]
#[case(UserRepositoryError::duplicate_email("cook@example.com"), "email already registered: cook@example.com")]
fn user_repository_errors_render_context(#[case] err: UserRepositoryError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}
