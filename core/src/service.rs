use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::db::Database;
use crate::filter;
use crate::models::{CatalogExport, Category, ImportSummary, Recipe, RecipeFields, RecipeFilter};
use crate::seed;

/// A committed change to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEvent {
    RecipeCreated(i64),
    RecipeUpdated(i64),
    RecipeDeleted(i64),
    CategoryCreated(i64),
    CategoryUpdated(i64),
    CategoryDeleted(i64),
    CatalogImported,
}

/// Presentation-side hook for refreshing views after a mutation.
///
/// Called once per successful mutation, after the write is committed.
/// Failed operations notify nobody.
pub trait CatalogObserver {
    fn on_change(&self, event: &CatalogEvent);
}

impl<F: Fn(&CatalogEvent)> CatalogObserver for F {
    fn on_change(&self, event: &CatalogEvent) {
        self(event);
    }
}

pub struct RecipeCatalog {
    db: Database,
    observers: Vec<Box<dyn CatalogObserver>>,
}

impl RecipeCatalog {
    pub fn new(db_path: &Path) -> Result<Self> {
        let db = Database::open(db_path)?;
        Ok(Self::with_database(db))
    }

    pub fn new_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self::with_database(db))
    }

    #[must_use]
    pub fn with_database(db: Database) -> Self {
        Self {
            db,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl CatalogObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&self, event: CatalogEvent) {
        debug!(?event, observers = self.observers.len(), "catalog changed");
        for observer in &self.observers {
            observer.on_change(&event);
        }
    }

    // --- Queries ---

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        self.db.list_categories()
    }

    pub fn get_category(&self, id: i64) -> Result<Category> {
        self.db.get_category(id)
    }

    pub fn find_categories_by_name(&self, name: &str) -> Result<Vec<Category>> {
        self.db.find_categories_by_name(name)
    }

    pub fn category_recipes(&self, category_id: i64) -> Result<Vec<Recipe>> {
        self.db.recipes_in_category(category_id)
    }

    /// Categories that can still be assigned to the recipe.
    pub fn available_categories(&self, recipe_id: i64) -> Result<Vec<Category>> {
        let recipe = self.db.get_recipe(recipe_id)?;
        Ok(self
            .db
            .list_categories()?
            .into_iter()
            .filter(|c| !recipe.has_category(c.id))
            .collect())
    }

    pub fn list_recipes(&self, query: &RecipeFilter) -> Result<Vec<Recipe>> {
        let all = self.db.list_recipes()?;
        let total = all.len();
        let visible = filter::apply(all, query);
        debug!(total, visible = visible.len(), ?query, "listed recipes");
        Ok(visible)
    }

    pub fn get_recipe(&self, id: i64) -> Result<Recipe> {
        self.db.get_recipe(id)
    }

    // --- Recipe mutations ---

    pub fn create_recipe(&self, fields: &RecipeFields) -> Result<Recipe> {
        let recipe = self.db.insert_recipe(fields)?;
        info!(recipe_id = recipe.id, title = %recipe.title, "created recipe");
        self.notify(CatalogEvent::RecipeCreated(recipe.id));
        Ok(recipe)
    }

    pub fn update_recipe(&self, id: i64, fields: &RecipeFields) -> Result<Recipe> {
        let recipe = self.db.update_recipe(id, fields)?;
        info!(
            recipe_id = id,
            categories = recipe.categories.len(),
            "updated recipe"
        );
        self.notify(CatalogEvent::RecipeUpdated(id));
        Ok(recipe)
    }

    pub fn delete_recipe(&self, id: i64) -> Result<()> {
        self.db.delete_recipe(id)?;
        info!(recipe_id = id, "deleted recipe");
        self.notify(CatalogEvent::RecipeDeleted(id));
        Ok(())
    }

    pub fn toggle_favorite(&self, id: i64) -> Result<Recipe> {
        let recipe = self.db.toggle_favorite(id)?;
        info!(recipe_id = id, favorite = recipe.favorite, "toggled favorite");
        self.notify(CatalogEvent::RecipeUpdated(id));
        Ok(recipe)
    }

    // --- Category mutations ---

    pub fn create_category(&self, name: &str) -> Result<Category> {
        let category = self.db.insert_category(name)?;
        info!(category_id = category.id, name = %category.name, "created category");
        self.notify(CatalogEvent::CategoryCreated(category.id));
        Ok(category)
    }

    /// Create a category and assign it to the recipe being edited.
    /// Emits `CategoryCreated` followed by `RecipeUpdated`.
    pub fn create_category_for_recipe(&self, recipe_id: i64, name: &str) -> Result<Category> {
        let category = self.db.create_category_for_recipe(recipe_id, name)?;
        info!(
            category_id = category.id,
            recipe_id,
            name = %category.name,
            "created category for recipe"
        );
        self.notify(CatalogEvent::CategoryCreated(category.id));
        self.notify(CatalogEvent::RecipeUpdated(recipe_id));
        Ok(category)
    }

    pub fn add_category_to_recipe(&self, recipe_id: i64, category_id: i64) -> Result<Recipe> {
        if self.db.add_recipe_category(recipe_id, category_id)? {
            info!(recipe_id, category_id, "assigned category");
            self.notify(CatalogEvent::RecipeUpdated(recipe_id));
        }
        self.db.get_recipe(recipe_id)
    }

    pub fn remove_category_from_recipe(&self, recipe_id: i64, category_id: i64) -> Result<Recipe> {
        if self.db.remove_recipe_category(recipe_id, category_id)? {
            info!(recipe_id, category_id, "unassigned category");
            self.notify(CatalogEvent::RecipeUpdated(recipe_id));
        }
        self.db.get_recipe(recipe_id)
    }

    pub fn rename_category(&self, id: i64, name: &str) -> Result<Category> {
        let category = self.db.rename_category(id, name)?;
        info!(category_id = id, name = %category.name, "renamed category");
        self.notify(CatalogEvent::CategoryUpdated(id));
        Ok(category)
    }

    pub fn delete_category(&self, id: i64) -> Result<()> {
        self.db.delete_category(id)?;
        info!(category_id = id, "deleted category");
        self.notify(CatalogEvent::CategoryDeleted(id));
        Ok(())
    }

    // --- Bulk ---

    /// Load the starter catalog when both collections are empty.
    /// Returns whether anything was written.
    pub fn seed_sample_data(&self, date: NaiveDate) -> Result<bool> {
        if self.db.recipe_count()? > 0 || self.db.category_count()? > 0 {
            debug!("catalog not empty, skipping sample data");
            return Ok(false);
        }
        let summary = self.db.import_all(&seed::sample_catalog(date))?;
        info!(
            recipes = summary.recipes_imported,
            categories = summary.categories_imported,
            "seeded sample catalog"
        );
        self.notify(CatalogEvent::CatalogImported);
        Ok(true)
    }

    pub fn export_catalog(&self) -> Result<CatalogExport> {
        self.db.export_all()
    }

    pub fn import_catalog(&self, data: &CatalogExport) -> Result<ImportSummary> {
        let summary = self.db.import_all(data)?;
        info!(
            recipes = summary.recipes_imported,
            categories = summary.categories_imported,
            "imported catalog"
        );
        self.notify(CatalogEvent::CatalogImported);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::{CatalogError, is_not_found, is_validation};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 27).unwrap()
    }

    fn fields(title: &str, category_ids: Vec<i64>) -> RecipeFields {
        let mut f = RecipeFields::new(
            title,
            "Flour, sugar, eggs",
            "Mix, bake, cool",
            today(),
        );
        f.category_ids = category_ids;
        f
    }

    fn titles(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.title.as_str()).collect()
    }

    fn by_category(id: i64) -> RecipeFilter {
        RecipeFilter {
            category: Some(id),
            ..RecipeFilter::default()
        }
    }

    fn assert_relationship_consistent(svc: &RecipeCatalog) {
        let recipes = svc.list_recipes(&RecipeFilter::default()).unwrap();
        for category in svc.list_categories().unwrap() {
            let expected: Vec<i64> = recipes
                .iter()
                .filter(|r| r.has_category(category.id))
                .map(|r| r.id)
                .collect();
            assert_eq!(category.recipe_ids, expected);
        }
    }

    fn recorder(svc: &mut RecipeCatalog) -> Rc<RefCell<Vec<CatalogEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        svc.subscribe(move |e: &CatalogEvent| sink.borrow_mut().push(*e));
        events
    }

    #[test]
    fn test_dessert_cake_walkthrough() {
        let svc = RecipeCatalog::new_in_memory().unwrap();
        let dessert = svc.create_category("Dessert").unwrap();
        let cake = svc.create_recipe(&fields("Cake", vec![dessert.id])).unwrap();

        let listed = svc.list_recipes(&by_category(dessert.id)).unwrap();
        assert_eq!(titles(&listed), vec!["Cake"]);

        svc.toggle_favorite(cake.id).unwrap();
        let favorites = svc
            .list_recipes(&RecipeFilter {
                favorites_only: true,
                ..by_category(dessert.id)
            })
            .unwrap();
        assert_eq!(titles(&favorites), vec!["Cake"]);

        svc.delete_recipe(cake.id).unwrap();
        assert!(svc.list_recipes(&by_category(dessert.id)).unwrap().is_empty());
        assert!(svc.get_category(dessert.id).unwrap().recipe_ids.is_empty());
    }

    #[test]
    fn test_update_moves_recipe_between_categories() {
        let svc = RecipeCatalog::new_in_memory().unwrap();
        let dessert = svc.create_category("Dessert").unwrap();
        let quick = svc.create_category("Quick Meals").unwrap();
        let cake = svc.create_recipe(&fields("Cake", vec![dessert.id])).unwrap();

        let mut edit = RecipeFields::from_recipe(&cake);
        edit.category_ids = vec![quick.id];
        svc.update_recipe(cake.id, &edit).unwrap();

        assert!(!svc.get_category(dessert.id).unwrap().recipe_ids.contains(&cake.id));
        assert!(svc.get_category(quick.id).unwrap().recipe_ids.contains(&cake.id));
        assert_eq!(titles(&svc.category_recipes(quick.id).unwrap()), vec!["Cake"]);
        assert_relationship_consistent(&svc);
    }

    #[test]
    fn test_invariant_holds_across_mixed_mutations() {
        let svc = RecipeCatalog::new_in_memory().unwrap();
        let a = svc.create_category("A").unwrap();
        let b = svc.create_category("B").unwrap();
        let c = svc.create_category("C").unwrap();

        let r1 = svc.create_recipe(&fields("One", vec![a.id, b.id])).unwrap();
        let r2 = svc.create_recipe(&fields("Two", vec![b.id])).unwrap();
        let r3 = svc.create_recipe(&fields("Three", vec![])).unwrap();
        assert_relationship_consistent(&svc);

        svc.add_category_to_recipe(r3.id, c.id).unwrap();
        svc.remove_category_from_recipe(r1.id, b.id).unwrap();
        let mut edit = RecipeFields::from_recipe(&r2);
        edit.category_ids = vec![c.id, a.id];
        svc.update_recipe(r2.id, &edit).unwrap();
        assert_relationship_consistent(&svc);

        svc.create_category_for_recipe(r1.id, "D").unwrap();
        svc.delete_recipe(r3.id).unwrap();
        svc.delete_category(a.id).unwrap();
        assert_relationship_consistent(&svc);

        let r2 = svc.get_recipe(r2.id).unwrap();
        assert_eq!(r2.category_ids(), vec![c.id]);
    }

    #[test]
    fn test_list_recipes_all_filters_disabled_in_storage_order() {
        let svc = RecipeCatalog::new_in_memory().unwrap();
        svc.create_recipe(&fields("Zucchini Bread", vec![])).unwrap();
        svc.create_recipe(&fields("Apple Pie", vec![])).unwrap();
        svc.create_recipe(&fields("Muffins", vec![])).unwrap();

        let all = svc.list_recipes(&RecipeFilter::default()).unwrap();
        assert_eq!(titles(&all), vec!["Zucchini Bread", "Apple Pie", "Muffins"]);

        let sorted = svc
            .list_recipes(&RecipeFilter {
                sort_alpha: true,
                ..RecipeFilter::default()
            })
            .unwrap();
        assert_eq!(titles(&sorted), vec!["Apple Pie", "Muffins", "Zucchini Bread"]);
    }

    #[test]
    fn test_search_after_update_uses_new_text() {
        let svc = RecipeCatalog::new_in_memory().unwrap();
        let cake = svc.create_recipe(&fields("Cake", vec![])).unwrap();
        let search = |q: &str| RecipeFilter {
            search: q.to_string(),
            ..RecipeFilter::default()
        };
        assert_eq!(svc.list_recipes(&search("EGGS")).unwrap().len(), 1);

        let mut edit = RecipeFields::from_recipe(&cake);
        edit.ingredients = "Oats, honey".to_string();
        svc.update_recipe(cake.id, &edit).unwrap();

        assert!(svc.list_recipes(&search("eggs")).unwrap().is_empty());
        assert_eq!(svc.list_recipes(&search("honey")).unwrap().len(), 1);
    }

    #[test]
    fn test_not_found_surfaces() {
        let svc = RecipeCatalog::new_in_memory().unwrap();
        let err = svc.update_recipe(5, &fields("Cake", vec![])).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CatalogError>(),
            Some(&CatalogError::recipe_not_found(5))
        );
        assert!(is_not_found(&svc.delete_recipe(5).unwrap_err()));
        assert!(is_not_found(&svc.toggle_favorite(5).unwrap_err()));
        assert!(is_not_found(&svc.get_category(5).unwrap_err()));
        assert!(is_not_found(&svc.available_categories(5).unwrap_err()));
    }

    #[test]
    fn test_validation_rejected_without_events() {
        let mut svc = RecipeCatalog::new_in_memory().unwrap();
        let events = recorder(&mut svc);

        assert!(is_validation(&svc.create_recipe(&fields(" ", vec![])).unwrap_err()));
        assert!(is_validation(&svc.create_category("").unwrap_err()));
        assert!(events.borrow().is_empty());
        assert!(svc.list_recipes(&RecipeFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn test_create_category_for_recipe_events() {
        let mut svc = RecipeCatalog::new_in_memory().unwrap();
        let cake = svc.create_recipe(&fields("Cake", vec![])).unwrap();
        let events = recorder(&mut svc);

        let baking = svc.create_category_for_recipe(cake.id, "Baking").unwrap();
        assert_eq!(
            *events.borrow(),
            vec![
                CatalogEvent::CategoryCreated(baking.id),
                CatalogEvent::RecipeUpdated(cake.id),
            ]
        );
        assert_eq!(svc.get_recipe(cake.id).unwrap().category_ids(), vec![baking.id]);
    }

    #[test]
    fn test_failed_mutations_emit_nothing() {
        let mut svc = RecipeCatalog::new_in_memory().unwrap();
        let dessert = svc.create_category("Dessert").unwrap();
        let cake = svc.create_recipe(&fields("Cake", vec![])).unwrap();
        let events = recorder(&mut svc);

        assert!(is_not_found(&svc.update_recipe(99, &fields("Pie", vec![])).unwrap_err()));
        assert!(is_not_found(&svc.delete_recipe(99).unwrap_err()));
        assert!(is_not_found(&svc.toggle_favorite(99).unwrap_err()));
        assert!(is_not_found(&svc.create_category_for_recipe(99, "Baking").unwrap_err()));
        assert!(is_not_found(&svc.add_category_to_recipe(cake.id, 99).unwrap_err()));
        assert!(is_not_found(&svc.rename_category(99, "Sweets").unwrap_err()));
        assert!(is_not_found(&svc.delete_category(99).unwrap_err()));

        let mut export = svc.export_catalog().unwrap();
        export.recipes[0].category_uuids = vec!["missing".to_string()];
        assert!(is_validation(&svc.import_catalog(&export).unwrap_err()));

        // Removing an edge that was never there changes nothing
        svc.remove_category_from_recipe(cake.id, dessert.id).unwrap();

        assert!(events.borrow().is_empty());
        assert_eq!(svc.list_categories().unwrap().len(), 1);
        assert!(svc.get_recipe(cake.id).unwrap().categories.is_empty());
    }

    #[test]
    fn test_observer_receives_events_in_order() {
        let mut svc = RecipeCatalog::new_in_memory().unwrap();
        let events = recorder(&mut svc);

        let dessert = svc.create_category("Dessert").unwrap();
        let cake = svc.create_recipe(&fields("Cake", vec![])).unwrap();
        svc.add_category_to_recipe(cake.id, dessert.id).unwrap();
        // Re-adding is a no-op and stays silent
        svc.add_category_to_recipe(cake.id, dessert.id).unwrap();
        svc.toggle_favorite(cake.id).unwrap();
        svc.rename_category(dessert.id, "Sweets").unwrap();
        svc.delete_recipe(cake.id).unwrap();
        svc.delete_category(dessert.id).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                CatalogEvent::CategoryCreated(dessert.id),
                CatalogEvent::RecipeCreated(cake.id),
                CatalogEvent::RecipeUpdated(cake.id),
                CatalogEvent::RecipeUpdated(cake.id),
                CatalogEvent::CategoryUpdated(dessert.id),
                CatalogEvent::RecipeDeleted(cake.id),
                CatalogEvent::CategoryDeleted(dessert.id),
            ]
        );
    }

    #[test]
    fn test_available_categories_excludes_assigned() {
        let svc = RecipeCatalog::new_in_memory().unwrap();
        let dessert = svc.create_category("Dessert").unwrap();
        let dinner = svc.create_category("Dinner").unwrap();
        let cake = svc.create_recipe(&fields("Cake", vec![dessert.id])).unwrap();

        let available = svc.available_categories(cake.id).unwrap();
        assert_eq!(
            available.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![dinner.id]
        );
    }

    #[test]
    fn test_toggle_favorite_double_toggle_restores() {
        let svc = RecipeCatalog::new_in_memory().unwrap();
        let cake = svc.create_recipe(&fields("Cake", vec![])).unwrap();
        svc.toggle_favorite(cake.id).unwrap();
        let back = svc.toggle_favorite(cake.id).unwrap();
        assert_eq!(back.favorite, cake.favorite);
        assert_eq!(back.title, cake.title);
        assert_eq!(back.servings, cake.servings);
    }

    #[test]
    fn test_seed_sample_data_only_when_empty() {
        let mut svc = RecipeCatalog::new_in_memory().unwrap();
        let events = recorder(&mut svc);

        assert!(svc.seed_sample_data(today()).unwrap());
        assert_eq!(svc.list_categories().unwrap().len(), 4);
        assert_eq!(
            svc.list_recipes(&RecipeFilter::default()).unwrap().len(),
            8
        );
        assert_eq!(*events.borrow(), vec![CatalogEvent::CatalogImported]);

        assert!(!svc.seed_sample_data(today()).unwrap());
        assert_eq!(
            svc.list_recipes(&RecipeFilter::default()).unwrap().len(),
            8
        );

        let quick = svc.find_categories_by_name("quick meals").unwrap();
        let in_quick = svc.list_recipes(&by_category(quick[0].id)).unwrap();
        assert_eq!(
            titles(&in_quick),
            vec!["Avocado Toast", "Grilled Chicken Salad", "Vegetable Stir Fry"]
        );
        let favorites = svc
            .list_recipes(&RecipeFilter {
                favorites_only: true,
                sort_alpha: true,
                ..RecipeFilter::default()
            })
            .unwrap();
        assert_eq!(
            titles(&favorites),
            vec![
                "Chocolate Chip Cookies",
                "Grilled Salmon with Vegetables",
                "Spaghetti Bolognese"
            ]
        );
        assert_relationship_consistent(&svc);
    }

    #[test]
    fn test_seed_skipped_when_only_categories_exist() {
        let svc = RecipeCatalog::new_in_memory().unwrap();
        svc.create_category("Mine").unwrap();
        assert!(!svc.seed_sample_data(today()).unwrap());
    }

    #[test]
    fn test_export_import_between_catalogs() {
        let src = RecipeCatalog::new_in_memory().unwrap();
        src.seed_sample_data(today()).unwrap();
        let export = src.export_catalog().unwrap();

        let mut dst = RecipeCatalog::new_in_memory().unwrap();
        let events = recorder(&mut dst);
        let summary = dst.import_catalog(&export).unwrap();
        assert_eq!(summary.recipes_imported, 8);
        assert_eq!(summary.categories_imported, 4);
        assert_eq!(*events.borrow(), vec![CatalogEvent::CatalogImported]);

        // Importing the same document again updates in place
        dst.import_catalog(&export).unwrap();
        assert_eq!(
            dst.list_recipes(&RecipeFilter::default()).unwrap().len(),
            8
        );
        assert_relationship_consistent(&dst);
    }
}
