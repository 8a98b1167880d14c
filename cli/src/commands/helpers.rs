use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use recipebox_core::error::is_not_found;
use recipebox_core::models::{Category, Recipe};
use recipebox_core::service::RecipeCatalog;

pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Local::now().date_naive()),
        Some(s) => match s.as_str() {
            "today" => Ok(Local::now().date_naive()),
            "yesterday" => Ok(Local::now().date_naive() - chrono::Duration::days(1)),
            "tomorrow" => Ok(Local::now().date_naive() + chrono::Duration::days(1)),
            _ => NaiveDate::parse_from_str(&s, "%Y-%m-%d").with_context(|| {
                format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday/tomorrow")
            }),
        },
    }
}

/// Look up a category argument: a numeric ID if one exists, otherwise a
/// case-insensitive name (lowest ID wins on duplicates). Storage errors
/// propagate; a miss is `None`.
pub(crate) fn find_category(catalog: &RecipeCatalog, arg: &str) -> Result<Option<Category>> {
    if let Ok(id) = arg.trim().parse::<i64>() {
        match catalog.get_category(id) {
            Ok(category) => return Ok(Some(category)),
            Err(e) if is_not_found(&e) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(catalog.find_categories_by_name(arg)?.into_iter().next())
}

pub(crate) fn resolve_category(catalog: &RecipeCatalog, arg: &str) -> Result<Category> {
    find_category(catalog, arg)?.with_context(|| format!("No category named '{}'", arg.trim()))
}

pub(crate) fn resolve_categories(catalog: &RecipeCatalog, args: &[String]) -> Result<Vec<i64>> {
    args.iter()
        .map(|a| resolve_category(catalog, a).map(|c| c.id))
        .collect()
}

pub(crate) fn parse_servings(s: &str) -> Result<u32> {
    let value: u32 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid servings: '{s}'. Use a whole number like '4'"))?;
    if value == 0 {
        bail!("Servings must be at least 1");
    }
    Ok(value)
}

pub(crate) fn print_recipe_table(recipes: &[Recipe]) {
    #[derive(Tabled)]
    struct RecipeRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "★")]
        favorite: &'static str,
        #[tabled(rename = "Title")]
        title: String,
        #[tabled(rename = "Categories")]
        categories: String,
        #[tabled(rename = "Time")]
        time: String,
        #[tabled(rename = "Serves")]
        servings: u32,
        #[tabled(rename = "Cal/serving")]
        calories: String,
    }

    let rows: Vec<RecipeRow> = recipes
        .iter()
        .map(|r| RecipeRow {
            id: r.id,
            favorite: if r.favorite { "★" } else { "" },
            title: truncate(&r.title, 35),
            categories: truncate(&category_names(r), 30),
            time: truncate(&r.time_required, 15),
            servings: r.servings,
            calories: format!("{:.0}", r.calories_per_serving),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(5..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn print_category_table(categories: &[Category]) {
    #[derive(Tabled)]
    struct CategoryRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Recipes")]
        recipes: usize,
    }

    let rows: Vec<CategoryRow> = categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id,
            name: truncate(&c.name, 30),
            recipes: c.recipe_ids.len(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn category_names(recipe: &Recipe) -> String {
    recipe
        .categories
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipebox_core::models::RecipeFields;

    fn catalog_with_categories() -> RecipeCatalog {
        let catalog = RecipeCatalog::new_in_memory().unwrap();
        catalog.create_category("Dessert").unwrap();
        catalog.create_category("Quick Meals").unwrap();
        catalog
    }

    #[test]
    fn test_parse_date_none() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date(None).unwrap(), today);
    }

    #[test]
    fn test_parse_date_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date(Some("today".to_string())).unwrap(), today);
        assert_eq!(
            parse_date(Some("yesterday".to_string())).unwrap(),
            today - chrono::Duration::days(1)
        );
        assert_eq!(
            parse_date(Some("tomorrow".to_string())).unwrap(),
            today + chrono::Duration::days(1)
        );
    }

    #[test]
    fn test_parse_date_iso() {
        let date = parse_date(Some("2024-01-15".to_string())).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date(Some("nope".to_string())).is_err());
    }

    #[test]
    fn test_parse_servings() {
        assert_eq!(parse_servings("4").unwrap(), 4);
        assert_eq!(parse_servings(" 12 ").unwrap(), 12);
        assert!(parse_servings("0").is_err());
        assert!(parse_servings("-2").is_err());
        assert!(parse_servings("two").is_err());
    }

    #[test]
    fn test_resolve_category_by_name_and_id() {
        let catalog = catalog_with_categories();
        let dessert = resolve_category(&catalog, "dessert").unwrap();
        assert_eq!(dessert.name, "Dessert");
        let by_id = resolve_category(&catalog, &dessert.id.to_string()).unwrap();
        assert_eq!(by_id.id, dessert.id);
        assert_eq!(
            resolve_category(&catalog, "  QUICK meals ").unwrap().name,
            "Quick Meals"
        );
    }

    #[test]
    fn test_resolve_category_numeric_name_falls_back() {
        let catalog = catalog_with_categories();
        let named = catalog.create_category("2024").unwrap();
        assert_eq!(resolve_category(&catalog, "2024").unwrap().id, named.id);
    }

    #[test]
    fn test_find_category_miss_is_none() {
        let catalog = catalog_with_categories();
        assert!(find_category(&catalog, "Brunch").unwrap().is_none());
        assert!(find_category(&catalog, "999").unwrap().is_none());
        assert!(find_category(&catalog, "dessert").unwrap().is_some());
    }

    #[test]
    fn test_resolve_category_missing() {
        let catalog = catalog_with_categories();
        let err = resolve_category(&catalog, "Brunch").unwrap_err();
        assert_eq!(err.to_string(), "No category named 'Brunch'");
    }

    #[test]
    fn test_resolve_categories_preserves_order() {
        let catalog = catalog_with_categories();
        let ids = resolve_categories(
            &catalog,
            &["Quick Meals".to_string(), "Dessert".to_string()],
        )
        .unwrap();
        let quick = resolve_category(&catalog, "Quick Meals").unwrap();
        let dessert = resolve_category(&catalog, "Dessert").unwrap();
        assert_eq!(ids, vec![quick.id, dessert.id]);
    }

    #[test]
    fn test_category_names() {
        let catalog = catalog_with_categories();
        let ids = resolve_categories(&catalog, &["Dessert".to_string(), "Quick Meals".to_string()])
            .unwrap();
        let mut fields = RecipeFields::new(
            "Cake",
            "Flour",
            "Bake",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        fields.category_ids = ids;
        let recipe = catalog.create_recipe(&fields).unwrap();
        assert_eq!(category_names(&recipe), "Dessert, Quick Meals");
    }

    #[test]
    fn test_json_error() {
        assert_eq!(json_error("boom"), r#"{"error":"boom"}"#);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world this is long", 10), "hello w...");
    }

    #[test]
    fn test_truncate_utf8() {
        // Should not panic on multi-byte characters
        assert_eq!(truncate("Crème brûlée", 10), "Crème b...");
        assert_eq!(truncate("Müsli", 10), "Müsli");
        assert_eq!(truncate("日清カップヌードル", 8), "日清カップ...");
    }
}
