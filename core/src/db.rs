use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::models::{
    CatalogExport, Category, CategoryRef, EXPORT_VERSION, ExportCategory, ExportRecipe,
    ImportSummary, Recipe, RecipeFields, validate_category_name, validate_export_recipe,
    validate_recipe_fields,
};

const RECIPE_COLUMNS: &str = "id, uuid, title, ingredients, instructions, search_string, date,
     time_required, servings, difficulty, calories_per_serving, favorite, general_notes,
     created_at, updated_at";

const CATEGORY_COLUMNS: &str = "id, uuid, name, created_at, updated_at";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        // Per-connection setting, not persisted in the file
        self.conn.pragma_update(None, "foreign_keys", true)?;

        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            tracing::debug!(from = version, to = 1, "migrating catalog schema");
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS categories (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT NOT NULL UNIQUE,
                    name TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS recipes (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT NOT NULL UNIQUE,
                    title TEXT NOT NULL,
                    ingredients TEXT NOT NULL,
                    instructions TEXT NOT NULL,
                    search_string TEXT NOT NULL,
                    date TEXT NOT NULL,
                    time_required TEXT NOT NULL DEFAULT '',
                    servings INTEGER NOT NULL CHECK (servings >= 1),
                    difficulty TEXT NOT NULL DEFAULT '',
                    calories_per_serving REAL NOT NULL DEFAULT 0,
                    favorite INTEGER NOT NULL DEFAULT 0,
                    general_notes TEXT NOT NULL DEFAULT '',
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS recipe_categories (
                    recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                    category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
                    position INTEGER NOT NULL,
                    PRIMARY KEY (recipe_id, category_id)
                );

                CREATE INDEX IF NOT EXISTS idx_recipe_categories_category
                    ON recipe_categories(category_id);

                PRAGMA user_version = 1;",
            )?;
        }

        Ok(())
    }

    // --- Row mapping helpers ---

    // Expects RECIPE_COLUMNS order. Categories are attached by the caller.
    fn recipe_from_row(row: &rusqlite::Row) -> rusqlite::Result<Recipe> {
        let date_str: String = row.get(6)?;
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;
        Ok(Recipe {
            id: row.get(0)?,
            uuid: row.get(1)?,
            title: row.get(2)?,
            ingredients: row.get(3)?,
            instructions: row.get(4)?,
            search_string: row.get(5)?,
            date,
            time_required: row.get(7)?,
            servings: row.get(8)?,
            difficulty: row.get(9)?,
            calories_per_serving: row.get(10)?,
            favorite: row.get(11)?,
            general_notes: row.get(12)?,
            categories: Vec::new(),
            created_at: row.get(13)?,
            updated_at: row.get(14)?,
        })
    }

    fn category_from_row(row: &rusqlite::Row) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            uuid: row.get(1)?,
            name: row.get(2)?,
            recipe_ids: Vec::new(),
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }

    // --- Recipes ---

    pub fn insert_recipe(&self, fields: &RecipeFields) -> Result<Recipe> {
        validate_recipe_fields(fields)?;
        let category_ids = fields.unique_category_ids();
        self.ensure_categories_exist(&category_ids)?;

        let now = Local::now().to_rfc3339();
        let uuid = Uuid::new_v4().to_string();
        let tx = self.conn.unchecked_transaction()?;
        self.conn.execute(
            "INSERT INTO recipes (uuid, title, ingredients, instructions, search_string, date,
                                  time_required, servings, difficulty, calories_per_serving,
                                  favorite, general_notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                uuid,
                fields.title,
                fields.ingredients,
                fields.instructions,
                fields.search_string(),
                fields.date.format("%Y-%m-%d").to_string(),
                fields.time_required,
                fields.servings,
                fields.difficulty,
                fields.calories_per_serving,
                fields.favorite,
                fields.general_notes,
                now,
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.replace_recipe_categories(id, &category_ids)?;
        tx.commit()?;
        self.get_recipe(id)
    }

    pub fn get_recipe(&self, id: i64) -> Result<Recipe> {
        let recipe = self
            .conn
            .query_row(
                &format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?1"),
                params![id],
                Self::recipe_from_row,
            )
            .optional()?;
        let Some(mut recipe) = recipe else {
            return Err(CatalogError::recipe_not_found(id).into());
        };
        recipe.categories = self.get_recipe_categories(id)?;
        Ok(recipe)
    }

    /// Every recipe in storage order (ascending id).
    pub fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY id"))?;
        let mut recipes = stmt
            .query_map([], Self::recipe_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut by_recipe = self.all_recipe_categories()?;
        for recipe in &mut recipes {
            recipe.categories = by_recipe.remove(&recipe.id).unwrap_or_default();
        }
        Ok(recipes)
    }

    /// Overwrite every field and replace the whole category list.
    pub fn update_recipe(&self, id: i64, fields: &RecipeFields) -> Result<Recipe> {
        validate_recipe_fields(fields)?;
        self.ensure_recipe_exists(id)?;
        let category_ids = fields.unique_category_ids();
        self.ensure_categories_exist(&category_ids)?;

        let now = Local::now().to_rfc3339();
        let tx = self.conn.unchecked_transaction()?;
        self.conn.execute(
            "UPDATE recipes SET title = ?1, ingredients = ?2, instructions = ?3,
                    search_string = ?4, date = ?5, time_required = ?6, servings = ?7,
                    difficulty = ?8, calories_per_serving = ?9, favorite = ?10,
                    general_notes = ?11, updated_at = ?12
             WHERE id = ?13",
            params![
                fields.title,
                fields.ingredients,
                fields.instructions,
                fields.search_string(),
                fields.date.format("%Y-%m-%d").to_string(),
                fields.time_required,
                fields.servings,
                fields.difficulty,
                fields.calories_per_serving,
                fields.favorite,
                fields.general_notes,
                now,
                id,
            ],
        )?;
        self.replace_recipe_categories(id, &category_ids)?;
        tx.commit()?;
        self.get_recipe(id)
    }

    pub fn delete_recipe(&self, id: i64) -> Result<()> {
        // Edges go with the recipe via ON DELETE CASCADE
        let rows = self
            .conn
            .execute("DELETE FROM recipes WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(CatalogError::recipe_not_found(id).into());
        }
        Ok(())
    }

    pub fn toggle_favorite(&self, id: i64) -> Result<Recipe> {
        let now = Local::now().to_rfc3339();
        let rows = self.conn.execute(
            "UPDATE recipes SET favorite = NOT favorite, updated_at = ?1 WHERE id = ?2",
            params![now, id],
        )?;
        if rows == 0 {
            return Err(CatalogError::recipe_not_found(id).into());
        }
        self.get_recipe(id)
    }

    pub fn recipe_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?)
    }

    fn ensure_recipe_exists(&self, id: i64) -> Result<()> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM recipes WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(CatalogError::recipe_not_found(id).into());
        }
        Ok(())
    }

    // --- Categories ---

    pub fn insert_category(&self, name: &str) -> Result<Category> {
        let name = validate_category_name(name)?;
        let id = self.insert_category_row(&Uuid::new_v4().to_string(), &name)?;
        self.get_category(id)
    }

    fn insert_category_row(&self, uuid: &str, name: &str) -> Result<i64> {
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO categories (uuid, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![uuid, name, now, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_category(&self, id: i64) -> Result<Category> {
        let category = self
            .conn
            .query_row(
                &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?1"),
                params![id],
                Self::category_from_row,
            )
            .optional()?;
        let Some(mut category) = category else {
            return Err(CatalogError::category_not_found(id).into());
        };
        category.recipe_ids = self.get_category_recipe_ids(id)?;
        Ok(category)
    }

    /// Categories ordered by name (case-insensitive), then id.
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name COLLATE NOCASE, id"
        ))?;
        let mut categories = stmt
            .query_map([], Self::category_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT category_id, recipe_id FROM recipe_categories ORDER BY category_id, recipe_id",
        )?;
        let mut by_category: HashMap<i64, Vec<i64>> = HashMap::new();
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;
        for row in rows {
            let (category_id, recipe_id) = row?;
            by_category.entry(category_id).or_default().push(recipe_id);
        }
        for category in &mut categories {
            category.recipe_ids = by_category.remove(&category.id).unwrap_or_default();
        }
        Ok(categories)
    }

    /// Case-insensitive exact name match, in id order.
    pub fn find_categories_by_name(&self, name: &str) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id FROM categories WHERE name = ?1 COLLATE NOCASE ORDER BY id",
        )?;
        let ids = stmt
            .query_map(params![name.trim()], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        ids.into_iter().map(|id| self.get_category(id)).collect()
    }

    pub fn get_category_by_uuid(&self, uuid: &str) -> Result<Option<Category>> {
        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM categories WHERE uuid = ?1",
                params![uuid],
                |row| row.get(0),
            )
            .optional()?;
        id.map(|id| self.get_category(id)).transpose()
    }

    pub fn rename_category(&self, id: i64, name: &str) -> Result<Category> {
        let name = validate_category_name(name)?;
        let now = Local::now().to_rfc3339();
        let rows = self.conn.execute(
            "UPDATE categories SET name = ?1, updated_at = ?2 WHERE id = ?3",
            params![name, now, id],
        )?;
        if rows == 0 {
            return Err(CatalogError::category_not_found(id).into());
        }
        self.get_category(id)
    }

    pub fn delete_category(&self, id: i64) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(CatalogError::category_not_found(id).into());
        }
        Ok(())
    }

    pub fn category_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?)
    }

    /// Recipes assigned to the category, in storage order.
    pub fn recipes_in_category(&self, category_id: i64) -> Result<Vec<Recipe>> {
        let ids = self.get_category(category_id)?.recipe_ids;
        ids.into_iter().map(|id| self.get_recipe(id)).collect()
    }

    fn ensure_categories_exist(&self, ids: &[i64]) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare("SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)")?;
        for id in ids {
            let exists: bool = stmt.query_row(params![id], |row| row.get(0))?;
            if !exists {
                return Err(CatalogError::category_not_found(*id).into());
            }
        }
        Ok(())
    }

    // --- Recipe <-> Category edges ---

    /// Returns `false` when the category was already assigned.
    pub fn add_recipe_category(&self, recipe_id: i64, category_id: i64) -> Result<bool> {
        self.ensure_recipe_exists(recipe_id)?;
        self.ensure_categories_exist(&[category_id])?;
        self.insert_edge(recipe_id, category_id)
    }

    /// Returns `false` when the category was not assigned.
    pub fn remove_recipe_category(&self, recipe_id: i64, category_id: i64) -> Result<bool> {
        self.ensure_recipe_exists(recipe_id)?;
        self.ensure_categories_exist(&[category_id])?;
        let rows = self.conn.execute(
            "DELETE FROM recipe_categories WHERE recipe_id = ?1 AND category_id = ?2",
            params![recipe_id, category_id],
        )?;
        Ok(rows > 0)
    }

    /// Create a category and assign it to the recipe in one step.
    pub fn create_category_for_recipe(&self, recipe_id: i64, name: &str) -> Result<Category> {
        let name = validate_category_name(name)?;
        self.ensure_recipe_exists(recipe_id)?;

        let tx = self.conn.unchecked_transaction()?;
        let id = self.insert_category_row(&Uuid::new_v4().to_string(), &name)?;
        self.insert_edge(recipe_id, id)?;
        tx.commit()?;
        self.get_category(id)
    }

    fn insert_edge(&self, recipe_id: i64, category_id: i64) -> Result<bool> {
        let rows = self.conn.execute(
            "INSERT OR IGNORE INTO recipe_categories (recipe_id, category_id, position)
             SELECT ?1, ?2, COALESCE(MAX(position) + 1, 0)
             FROM recipe_categories WHERE recipe_id = ?1",
            params![recipe_id, category_id],
        )?;
        Ok(rows > 0)
    }

    // Caller holds the transaction.
    fn replace_recipe_categories(&self, recipe_id: i64, category_ids: &[i64]) -> Result<()> {
        self.conn.execute(
            "DELETE FROM recipe_categories WHERE recipe_id = ?1",
            params![recipe_id],
        )?;
        let mut stmt = self.conn.prepare(
            "INSERT OR IGNORE INTO recipe_categories (recipe_id, category_id, position)
             VALUES (?1, ?2, ?3)",
        )?;
        for (position, category_id) in category_ids.iter().enumerate() {
            let position = i64::try_from(position)?;
            stmt.execute(params![recipe_id, category_id, position])?;
        }
        Ok(())
    }

    fn get_recipe_categories(&self, recipe_id: i64) -> Result<Vec<CategoryRef>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.uuid, c.name
             FROM recipe_categories rc
             JOIN categories c ON rc.category_id = c.id
             WHERE rc.recipe_id = ?1
             ORDER BY rc.position",
        )?;
        let refs = stmt
            .query_map(params![recipe_id], |row| {
                Ok(CategoryRef {
                    id: row.get(0)?,
                    uuid: row.get(1)?,
                    name: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(refs)
    }

    fn all_recipe_categories(&self) -> Result<HashMap<i64, Vec<CategoryRef>>> {
        let mut stmt = self.conn.prepare(
            "SELECT rc.recipe_id, c.id, c.uuid, c.name
             FROM recipe_categories rc
             JOIN categories c ON rc.category_id = c.id
             ORDER BY rc.recipe_id, rc.position",
        )?;
        let mut map: HashMap<i64, Vec<CategoryRef>> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                CategoryRef {
                    id: row.get(1)?,
                    uuid: row.get(2)?,
                    name: row.get(3)?,
                },
            ))
        })?;
        for row in rows {
            let (recipe_id, category) = row?;
            map.entry(recipe_id).or_default().push(category);
        }
        Ok(map)
    }

    fn get_category_recipe_ids(&self, category_id: i64) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT recipe_id FROM recipe_categories WHERE category_id = ?1 ORDER BY recipe_id",
        )?;
        let ids = stmt
            .query_map(params![category_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    // --- Export / Import ---

    pub fn export_all(&self) -> Result<CatalogExport> {
        let categories = self
            .list_categories()?
            .into_iter()
            .map(|c| ExportCategory {
                uuid: c.uuid,
                name: c.name,
            })
            .collect();
        let recipes = self
            .list_recipes()?
            .into_iter()
            .map(|r| ExportRecipe {
                uuid: r.uuid,
                title: r.title,
                ingredients: r.ingredients,
                instructions: r.instructions,
                date: r.date.format("%Y-%m-%d").to_string(),
                time_required: r.time_required,
                servings: r.servings,
                difficulty: r.difficulty,
                calories_per_serving: r.calories_per_serving,
                favorite: r.favorite,
                general_notes: r.general_notes,
                category_uuids: r.categories.into_iter().map(|c| c.uuid).collect(),
            })
            .collect();

        Ok(CatalogExport {
            version: EXPORT_VERSION,
            exported_at: Local::now().to_rfc3339(),
            categories,
            recipes,
        })
    }

    /// Upsert categories then recipes by uuid. Everything is validated before
    /// the first write and the whole import runs in one transaction. A uuid
    /// may appear at most once per collection.
    pub fn import_all(&self, data: &CatalogExport) -> Result<ImportSummary> {
        if data.version > EXPORT_VERSION {
            return Err(CatalogError::validation(format!(
                "Unsupported export version {} (expected at most {EXPORT_VERSION})",
                data.version
            ))
            .into());
        }

        let mut known_category_uuids: Vec<&str> = Vec::new();
        for category in &data.categories {
            if category.uuid.trim().is_empty() {
                return Err(CatalogError::validation("Category uuid must not be empty").into());
            }
            if known_category_uuids.contains(&category.uuid.as_str()) {
                return Err(CatalogError::validation(format!(
                    "Duplicate category uuid {}",
                    category.uuid
                ))
                .into());
            }
            validate_category_name(&category.name)?;
            known_category_uuids.push(&category.uuid);
        }
        let mut seen_recipe_uuids: Vec<&str> = Vec::with_capacity(data.recipes.len());
        let mut dates = Vec::with_capacity(data.recipes.len());
        for recipe in &data.recipes {
            if recipe.uuid.trim().is_empty() {
                return Err(CatalogError::validation("Recipe uuid must not be empty").into());
            }
            if seen_recipe_uuids.contains(&recipe.uuid.as_str()) {
                return Err(CatalogError::validation(format!(
                    "Duplicate recipe uuid {}",
                    recipe.uuid
                ))
                .into());
            }
            seen_recipe_uuids.push(&recipe.uuid);
            dates.push(validate_export_recipe(recipe)?);
            for uuid in &recipe.category_uuids {
                if !known_category_uuids.contains(&uuid.as_str())
                    && self.get_category_by_uuid(uuid)?.is_none()
                {
                    return Err(CatalogError::validation(format!(
                        "Recipe '{}' references unknown category {uuid}",
                        recipe.title
                    ))
                    .into());
                }
            }
        }

        let tx = self.conn.unchecked_transaction()?;
        let now = Local::now().to_rfc3339();
        let mut summary = ImportSummary::default();

        for category in &data.categories {
            let name = validate_category_name(&category.name)?;
            let updated = self.conn.execute(
                "UPDATE categories SET name = ?1, updated_at = ?2 WHERE uuid = ?3",
                params![name, now, category.uuid],
            )?;
            if updated == 0 {
                self.insert_category_row(&category.uuid, &name)?;
            }
            summary.categories_imported += 1;
        }

        for (recipe, date) in data.recipes.iter().zip(dates) {
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
            let date_str = date.format("%Y-%m-%d").to_string();
            let existing: Option<i64> = self
                .conn
                .query_row(
                    "SELECT id FROM recipes WHERE uuid = ?1",
                    params![recipe.uuid],
                    |row| row.get(0),
                )
                .optional()?;
            let recipe_id = if let Some(id) = existing {
                self.conn.execute(
                    "UPDATE recipes SET title = ?1, ingredients = ?2, instructions = ?3,
                            search_string = ?4, date = ?5, time_required = ?6, servings = ?7,
                            difficulty = ?8, calories_per_serving = ?9, favorite = ?10,
                            general_notes = ?11, updated_at = ?12
                     WHERE id = ?13",
                    params![
                        fields.title,
                        fields.ingredients,
                        fields.instructions,
                        fields.search_string(),
                        date_str,
                        fields.time_required,
                        fields.servings,
                        fields.difficulty,
                        fields.calories_per_serving,
                        fields.favorite,
                        fields.general_notes,
                        now,
                        id,
                    ],
                )?;
                id
            } else {
                self.conn.execute(
                    "INSERT INTO recipes (uuid, title, ingredients, instructions, search_string,
                                          date, time_required, servings, difficulty,
                                          calories_per_serving, favorite, general_notes,
                                          created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                    params![
                        recipe.uuid,
                        fields.title,
                        fields.ingredients,
                        fields.instructions,
                        fields.search_string(),
                        date_str,
                        fields.time_required,
                        fields.servings,
                        fields.difficulty,
                        fields.calories_per_serving,
                        fields.favorite,
                        fields.general_notes,
                        now,
                        now,
                    ],
                )?;
                self.conn.last_insert_rowid()
            };

            let mut category_ids = Vec::with_capacity(recipe.category_uuids.len());
            for uuid in &recipe.category_uuids {
                let id: i64 = self.conn.query_row(
                    "SELECT id FROM categories WHERE uuid = ?1",
                    params![uuid],
                    |row| row.get(0),
                )?;
                if !category_ids.contains(&id) {
                    category_ids.push(id);
                }
            }
            self.replace_recipe_categories(recipe_id, &category_ids)?;
            summary.recipes_imported += 1;
        }

        tx.commit()?;
        Ok(summary)
    }
}
