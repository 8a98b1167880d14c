use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use recipebox_core::models::{CatalogExport, RecipeFilter};
use recipebox_core::service::RecipeCatalog;

pub(crate) fn cmd_seed(catalog: &RecipeCatalog, json: bool) -> Result<()> {
    let seeded = catalog.seed_sample_data(Local::now().date_naive())?;
    if json {
        println!("{}", serde_json::json!({ "seeded": seeded }));
    } else if seeded {
        let recipes = catalog.list_recipes(&RecipeFilter::default())?.len();
        let categories = catalog.list_categories()?.len();
        println!("Loaded sample catalog: {recipes} recipes in {categories} categories");
    } else {
        eprintln!("Catalog is not empty; sample data not loaded.");
    }
    Ok(())
}

pub(crate) fn cmd_export(catalog: &RecipeCatalog, path: Option<&Path>) -> Result<()> {
    let export = catalog.export_catalog()?;
    let body = serde_json::to_string_pretty(&export)?;
    match path {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            eprintln!(
                "Exported {} recipes and {} categories to {}",
                export.recipes.len(),
                export.categories.len(),
                path.display()
            );
        }
        None => println!("{body}"),
    }
    Ok(())
}

pub(crate) fn cmd_import(catalog: &RecipeCatalog, path: &Path, json: bool) -> Result<()> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let data: CatalogExport = serde_json::from_str(&body)
        .with_context(|| format!("Invalid catalog file: {}", path.display()))?;

    let summary = catalog.import_catalog(&data)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Import complete.\n");
        println!("  Categories: {}", summary.categories_imported);
        println!("  Recipes:    {}", summary.recipes_imported);
    }
    Ok(())
}
