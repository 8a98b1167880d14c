use anyhow::{Result, bail};
use std::process;

use recipebox_core::service::RecipeCatalog;

use super::helpers::{
    category_names, find_category, json_error, print_category_table, resolve_category,
};

pub(crate) fn cmd_category_list(catalog: &RecipeCatalog, json: bool) -> Result<()> {
    let categories = catalog.list_categories()?;
    if categories.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No categories found");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        print_category_table(&categories);
    }
    Ok(())
}

pub(crate) fn cmd_category_add(catalog: &RecipeCatalog, name: &str, json: bool) -> Result<()> {
    let category = catalog.create_category(name)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&category)?);
    } else {
        println!("Created category: {} (id: {})", category.name, category.id);
    }
    Ok(())
}

pub(crate) fn cmd_category_rename(
    catalog: &RecipeCatalog,
    category: &str,
    name: &str,
    json: bool,
) -> Result<()> {
    let current = resolve_category(catalog, category)?;
    let renamed = catalog.rename_category(current.id, name)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&renamed)?);
    } else {
        println!("Renamed category {}: {} → {}", renamed.id, current.name, renamed.name);
    }
    Ok(())
}

pub(crate) fn cmd_category_delete(catalog: &RecipeCatalog, category: &str, json: bool) -> Result<()> {
    let current = resolve_category(catalog, category)?;
    catalog.delete_category(current.id)?;
    if json {
        println!("{}", serde_json::json!({ "deleted": current.id }));
    } else {
        let n = current.recipe_ids.len();
        println!(
            "Deleted category {}: {} ({n} recipe(s) unassigned)",
            current.id, current.name
        );
    }
    Ok(())
}

pub(crate) fn cmd_category_assign(
    catalog: &RecipeCatalog,
    recipe_id: i64,
    category: &str,
    create: bool,
    json: bool,
) -> Result<()> {
    let recipe = match find_category(catalog, category)? {
        Some(c) => catalog.add_category_to_recipe(recipe_id, c.id)?,
        None if create => {
            catalog.create_category_for_recipe(recipe_id, category)?;
            catalog.get_recipe(recipe_id)?
        }
        None => bail!("No category named '{}'", category.trim()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        println!("{}: {}", recipe.title, category_names(&recipe));
    }
    Ok(())
}

pub(crate) fn cmd_category_unassign(
    catalog: &RecipeCatalog,
    recipe_id: i64,
    category: &str,
    json: bool,
) -> Result<()> {
    let target = resolve_category(catalog, category)?;
    let recipe = catalog.get_recipe(recipe_id)?;
    if !recipe.has_category(target.id) {
        let message = format!("Recipe {recipe_id} is not in category '{}'", target.name);
        if json {
            println!("{}", json_error(&message));
        } else {
            eprintln!("{message}");
        }
        process::exit(2);
    }

    let recipe = catalog.remove_category_from_recipe(recipe_id, target.id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        println!("Removed {} from {}", target.name, recipe.title);
    }
    Ok(())
}
