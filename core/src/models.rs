use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Lightweight category reference embedded in a [`Recipe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub uuid: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: i64,
    pub uuid: String,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub search_string: String,
    pub date: NaiveDate,
    pub time_required: String,
    pub servings: u32,
    pub difficulty: String,
    pub calories_per_serving: f64,
    pub favorite: bool,
    pub general_notes: String,
    pub categories: Vec<CategoryRef>,
    pub created_at: String,
    pub updated_at: String,
}

impl Recipe {
    #[must_use]
    pub fn has_category(&self, category_id: i64) -> bool {
        self.categories.iter().any(|c| c.id == category_id)
    }

    #[must_use]
    pub fn category_ids(&self) -> Vec<i64> {
        self.categories.iter().map(|c| c.id).collect()
    }

    /// Ingredients as individual items, split on commas.
    #[must_use]
    pub fn ingredient_list(&self) -> Vec<&str> {
        split_items(&self.ingredients)
    }

    /// Instructions as 1-based numbered steps, split on commas.
    #[must_use]
    pub fn instruction_steps(&self) -> Vec<(usize, &str)> {
        split_items(&self.instructions)
            .into_iter()
            .enumerate()
            .map(|(i, step)| (i + 1, step))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: i64,
    pub uuid: String,
    pub name: String,
    /// Derived from the recipe/category edges, in recipe id order.
    pub recipe_ids: Vec<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Form payload for creating or overwriting a recipe.
#[derive(Debug, Clone)]
pub struct RecipeFields {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub date: NaiveDate,
    pub time_required: String,
    pub servings: u32,
    pub difficulty: String,
    pub calories_per_serving: f64,
    pub favorite: bool,
    pub general_notes: String,
    pub category_ids: Vec<i64>,
}

impl RecipeFields {
    /// Required fields only; everything else takes the form defaults.
    pub fn new(
        title: impl Into<String>,
        ingredients: impl Into<String>,
        instructions: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            ingredients: ingredients.into(),
            instructions: instructions.into(),
            date,
            time_required: String::new(),
            servings: 1,
            difficulty: String::new(),
            calories_per_serving: 0.0,
            favorite: false,
            general_notes: String::new(),
            category_ids: Vec::new(),
        }
    }

    /// Load the current values of an existing recipe, as the edit form does.
    #[must_use]
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            date: recipe.date,
            time_required: recipe.time_required.clone(),
            servings: recipe.servings,
            difficulty: recipe.difficulty.clone(),
            calories_per_serving: recipe.calories_per_serving,
            favorite: recipe.favorite,
            general_notes: recipe.general_notes.clone(),
            category_ids: recipe.category_ids(),
        }
    }

    #[must_use]
    pub fn search_string(&self) -> String {
        build_search_string(&self.title, &self.ingredients, &self.instructions)
    }

    /// Category ids with repeats removed, first occurrence wins.
    #[must_use]
    pub fn unique_category_ids(&self) -> Vec<i64> {
        let mut seen = Vec::with_capacity(self.category_ids.len());
        for id in &self.category_ids {
            if !seen.contains(id) {
                seen.push(*id);
            }
        }
        seen
    }
}

/// Visible-subset query over the recipe collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeFilter {
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub favorites_only: bool,
    #[serde(default)]
    pub sort_alpha: bool,
    #[serde(default)]
    pub search: String,
}

// --- Export / Import types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportCategory {
    pub uuid: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRecipe {
    pub uuid: String,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub date: String,
    #[serde(default)]
    pub time_required: String,
    pub servings: u32,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub calories_per_serving: f64,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub general_notes: String,
    #[serde(default)]
    pub category_uuids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogExport {
    pub version: i64,
    pub exported_at: String,
    pub categories: Vec<ExportCategory>,
    pub recipes: Vec<ExportRecipe>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub categories_imported: i64,
    pub recipes_imported: i64,
}

pub const EXPORT_VERSION: i64 = 1;

#[must_use]
pub fn build_search_string(title: &str, ingredients: &str, instructions: &str) -> String {
    [title, ingredients, instructions].join(" ")
}

fn split_items(text: &str) -> Vec<&str> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Reject a form before anything is written.
pub fn validate_recipe_fields(fields: &RecipeFields) -> Result<()> {
    if fields.title.trim().is_empty() {
        return Err(CatalogError::validation("Title must not be empty").into());
    }
    if fields.ingredients.trim().is_empty() {
        return Err(CatalogError::validation("Ingredients must not be empty").into());
    }
    if fields.instructions.trim().is_empty() {
        return Err(CatalogError::validation("Instructions must not be empty").into());
    }
    if fields.servings == 0 {
        return Err(CatalogError::validation("Servings must be at least 1").into());
    }
    if !fields.calories_per_serving.is_finite() || fields.calories_per_serving < 0.0 {
        return Err(
            CatalogError::validation("Calories per serving must be a non-negative number").into(),
        );
    }
    Ok(())
}

pub fn validate_category_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::validation("Category name must not be empty").into());
    }
    Ok(trimmed.to_string())
}

/// Validate an imported recipe: same rules as the form plus a parseable date.
pub fn validate_export_recipe(recipe: &ExportRecipe) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(&recipe.date, "%Y-%m-%d").map_err(|_| {
        CatalogError::validation(format!(
            "Invalid recipe date '{}'. Must be YYYY-MM-DD",
            recipe.date
        ))
    })?;
    let fields = RecipeFields {
        title: recipe.title.clone(),
        ingredients: recipe.ingredients.clone(),
        instructions: recipe.instructions.clone(),
        date,
        time_required: recipe.time_required.clone(),
        servings: recipe.servings,
        difficulty: recipe.difficulty.clone(),
        calories_per_serving: recipe.calories_per_serving,
        favorite: recipe.favorite,
        general_notes: recipe.general_notes.clone(),
        category_ids: Vec::new(),
    };
    validate_recipe_fields(&fields)?;
    Ok(date)
}
