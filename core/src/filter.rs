//! Visible-subset computation for the recipe list.
//!
//! Steps run in a fixed order: category, favorites, sort, search. Each step
//! is a pure filter or a stable sort, so the order only matters for cost.

use std::cmp::Ordering;

use crate::models::{Recipe, RecipeFilter};

#[must_use]
pub fn apply(recipes: Vec<Recipe>, filter: &RecipeFilter) -> Vec<Recipe> {
    let mut result = by_category(recipes, filter.category);
    if filter.favorites_only {
        result = favorites_only(result);
    }
    if filter.sort_alpha {
        sort_by_title(&mut result);
    }
    search(result, &filter.search)
}

#[must_use]
pub fn by_category(recipes: Vec<Recipe>, category: Option<i64>) -> Vec<Recipe> {
    match category {
        None => recipes,
        Some(id) => recipes.into_iter().filter(|r| r.has_category(id)).collect(),
    }
}

#[must_use]
pub fn favorites_only(recipes: Vec<Recipe>) -> Vec<Recipe> {
    recipes.into_iter().filter(|r| r.favorite).collect()
}

/// Stable sort by [`title_order`].
pub fn sort_by_title(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| title_order(&a.title, &b.title));
}

/// Case-insensitive comparison, ties broken by the raw title bytes.
#[must_use]
pub fn title_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Case-insensitive substring match against the search string.
/// A blank query keeps everything.
#[must_use]
pub fn search(recipes: Vec<Recipe>, query: &str) -> Vec<Recipe> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return recipes;
    }
    recipes
        .into_iter()
        .filter(|r| r.search_string.to_lowercase().contains(&needle))
        .collect()
}
