use anyhow::{Context, Result};
use clap::Args;
use std::process;

use recipebox_core::models::{Recipe, RecipeFields, RecipeFilter};
use recipebox_core::service::RecipeCatalog;

use super::helpers::{
    category_names, parse_date, parse_servings, print_recipe_table, resolve_categories,
    resolve_category,
};

/// Recipe form fields shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub(crate) struct RecipeArgs {
    /// Recipe title
    #[arg(long)]
    pub title: Option<String>,
    /// Ingredients, comma separated
    #[arg(long)]
    pub ingredients: Option<String>,
    /// Instructions, comma separated steps
    #[arg(long)]
    pub instructions: Option<String>,
    /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Time required (free text, e.g. "45 minutes")
    #[arg(long)]
    pub time: Option<String>,
    /// Number of servings
    #[arg(long)]
    pub servings: Option<String>,
    /// Difficulty (free text, e.g. "Easy")
    #[arg(long)]
    pub difficulty: Option<String>,
    /// Calories per serving
    #[arg(long)]
    pub calories: Option<f64>,
    /// Favorite flag; bare `--favorite` means true, `--favorite false` clears it
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub favorite: Option<bool>,
    /// General notes
    #[arg(long)]
    pub notes: Option<String>,
    /// Category name or ID (repeatable)
    #[arg(long)]
    pub category: Vec<String>,
}

impl RecipeArgs {
    /// Overlay the given flags on `fields`. Categories are only touched when
    /// at least one `--category` was passed.
    fn apply(self, catalog: &RecipeCatalog, fields: &mut RecipeFields) -> Result<()> {
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(ingredients) = self.ingredients {
            fields.ingredients = ingredients;
        }
        if let Some(instructions) = self.instructions {
            fields.instructions = instructions;
        }
        if self.date.is_some() {
            fields.date = parse_date(self.date)?;
        }
        if let Some(time) = self.time {
            fields.time_required = time;
        }
        if let Some(servings) = self.servings {
            fields.servings = parse_servings(&servings)?;
        }
        if let Some(difficulty) = self.difficulty {
            fields.difficulty = difficulty;
        }
        if let Some(calories) = self.calories {
            fields.calories_per_serving = calories;
        }
        if let Some(favorite) = self.favorite {
            fields.favorite = favorite;
        }
        if let Some(notes) = self.notes {
            fields.general_notes = notes;
        }
        if !self.category.is_empty() {
            fields.category_ids = resolve_categories(catalog, &self.category)?;
        }
        Ok(())
    }
}

pub(crate) fn cmd_list(
    catalog: &RecipeCatalog,
    category: Option<&str>,
    favorites: bool,
    sort: bool,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let category = category
        .map(|c| resolve_category(catalog, c))
        .transpose()?;
    let filter = RecipeFilter {
        category: category.as_ref().map(|c| c.id),
        favorites_only: favorites,
        sort_alpha: sort,
        search: search.unwrap_or_default().to_string(),
    };

    let recipes = catalog.list_recipes(&filter)?;
    if recipes.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No recipes found");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
        return Ok(());
    }

    if let Some(c) = &category {
        println!("Category: {}", c.name);
    }
    print_recipe_table(&recipes);
    Ok(())
}

pub(crate) fn cmd_show(catalog: &RecipeCatalog, id: i64, json: bool) -> Result<()> {
    let recipe = catalog.get_recipe(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
        return Ok(());
    }

    print_recipe_detail(&recipe);
    Ok(())
}

fn print_recipe_detail(recipe: &Recipe) {
    let star = if recipe.favorite { " ★" } else { "" };
    println!("=== {}{star} ===", recipe.title);
    println!(
        "  Date: {}  |  Time: {}  |  Serves: {}  |  Difficulty: {}  |  {:.0} kcal/serving",
        recipe.date.format("%Y-%m-%d"),
        or_dash(&recipe.time_required),
        recipe.servings,
        or_dash(&recipe.difficulty),
        recipe.calories_per_serving,
    );
    let categories = category_names(recipe);
    println!("  Categories: {}\n", or_dash(&categories));

    println!("  INGREDIENTS:");
    for item in recipe.ingredient_list() {
        println!("    - {item}");
    }

    println!("\n  INSTRUCTIONS:");
    for (n, step) in recipe.instruction_steps() {
        println!("    {n}. {step}");
    }

    if !recipe.general_notes.trim().is_empty() {
        println!("\n  NOTES:");
        println!("    {}", recipe.general_notes.trim());
    }
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() { "-" } else { s }
}

pub(crate) fn cmd_add(catalog: &RecipeCatalog, args: RecipeArgs, json: bool) -> Result<()> {
    let title = args.title.clone().context("--title is required")?;
    let ingredients = args
        .ingredients
        .clone()
        .context("--ingredients is required")?;
    let instructions = args
        .instructions
        .clone()
        .context("--instructions is required")?;
    let date = parse_date(args.date.clone())?;

    let mut fields = RecipeFields::new(title, ingredients, instructions, date);
    args.apply(catalog, &mut fields)?;

    let recipe = catalog.create_recipe(&fields)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        println!("Created recipe: {} (id: {})", recipe.title, recipe.id);
        if !recipe.categories.is_empty() {
            println!("  Categories: {}", category_names(&recipe));
        }
    }
    Ok(())
}

pub(crate) fn cmd_edit(
    catalog: &RecipeCatalog,
    id: i64,
    args: RecipeArgs,
    clear_categories: bool,
    json: bool,
) -> Result<()> {
    let current = catalog.get_recipe(id)?;
    let mut fields = RecipeFields::from_recipe(&current);
    args.apply(catalog, &mut fields)?;
    if clear_categories {
        fields.category_ids.clear();
    }

    let recipe = catalog.update_recipe(id, &fields)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        println!("Updated recipe: {} (id: {})", recipe.title, recipe.id);
        println!("  Categories: {}", or_dash(&category_names(&recipe)));
    }
    Ok(())
}

pub(crate) fn cmd_delete(catalog: &RecipeCatalog, id: i64, json: bool) -> Result<()> {
    let recipe = catalog.get_recipe(id)?;
    catalog.delete_recipe(id)?;
    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!("Deleted recipe {id}: {}", recipe.title);
    }
    Ok(())
}

pub(crate) fn cmd_fav(catalog: &RecipeCatalog, id: i64, json: bool) -> Result<()> {
    let recipe = catalog.toggle_favorite(id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else if recipe.favorite {
        println!("★ {} is now a favorite", recipe.title);
    } else {
        println!("{} is no longer a favorite", recipe.title);
    }
    Ok(())
}
