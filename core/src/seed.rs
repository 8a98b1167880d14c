//! Starter catalog used to populate an empty database.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{CatalogExport, EXPORT_VERSION, ExportCategory, ExportRecipe};

const CATEGORIES: &[&str] = &["Dinner", "Dessert", "Healthy", "Quick Meals"];

struct SampleRecipe {
    title: &'static str,
    ingredients: &'static str,
    instructions: &'static str,
    time_required: &'static str,
    servings: u32,
    difficulty: &'static str,
    calories_per_serving: f64,
    favorite: bool,
    general_notes: &'static str,
    category: &'static str,
}

const RECIPES: &[SampleRecipe] = &[
    SampleRecipe {
        title: "Spaghetti Bolognese",
        ingredients: "Spaghetti, minced beef, tomato sauce, onion, garlic, olive oil",
        instructions: "Cook pasta, sauté onion and garlic, add minced beef, mix with sauce.",
        time_required: "45 minutes",
        servings: 4,
        difficulty: "Easy",
        calories_per_serving: 450.0,
        favorite: true,
        general_notes: "A classic Italian dish",
        category: "Dinner",
    },
    SampleRecipe {
        title: "Chocolate Cake",
        ingredients: "Flour, sugar, cocoa powder, eggs, butter, milk",
        instructions: "Mix dry and wet ingredients, bake at 350°F for 30 minutes.",
        time_required: "1 hour",
        servings: 8,
        difficulty: "Medium",
        calories_per_serving: 350.0,
        favorite: false,
        general_notes: "Great for celebrations",
        category: "Dessert",
    },
    SampleRecipe {
        title: "Grilled Salmon with Vegetables",
        ingredients: "Salmon, broccoli, carrots, olive oil, garlic, lemon",
        instructions: "Grill salmon, steam vegetables, serve together.",
        time_required: "30 minutes",
        servings: 2,
        difficulty: "Easy",
        calories_per_serving: 250.0,
        favorite: true,
        general_notes: "A healthy and light option",
        category: "Healthy",
    },
    SampleRecipe {
        title: "Avocado Toast",
        ingredients: "Bread, avocado, salt, pepper, olive oil",
        instructions: "Toast bread, mash avocado, spread on toast, season with salt and pepper.",
        time_required: "10 minutes",
        servings: 1,
        difficulty: "Easy",
        calories_per_serving: 200.0,
        favorite: false,
        general_notes: "A quick and nutritious snack",
        category: "Quick Meals",
    },
    SampleRecipe {
        title: "Spaghetti Carbonara",
        ingredients: "Spaghetti, eggs, Parmesan cheese, pancetta, black pepper",
        instructions: "Cook spaghetti, whisk eggs and cheese, cook pancetta, combine all with pasta and season with black pepper.",
        time_required: "25 minutes",
        servings: 4,
        difficulty: "Medium",
        calories_per_serving: 400.0,
        favorite: false,
        general_notes: "A classic Italian pasta dish that's creamy and flavorful.",
        category: "Healthy",
    },
    SampleRecipe {
        title: "Grilled Chicken Salad",
        ingredients: "Chicken breast, mixed greens, cherry tomatoes, cucumber, olive oil, lemon juice",
        instructions: "Grill chicken, chop vegetables, toss with olive oil and lemon juice, top with sliced chicken.",
        time_required: "20 minutes",
        servings: 2,
        difficulty: "Easy",
        calories_per_serving: 250.0,
        favorite: false,
        general_notes: "A light and healthy meal packed with protein.",
        category: "Quick Meals",
    },
    SampleRecipe {
        title: "Chocolate Chip Cookies",
        ingredients: "Flour, butter, sugar, brown sugar, eggs, vanilla extract, chocolate chips, baking soda, salt",
        instructions: "Mix dry ingredients, cream butter and sugars, add eggs and vanilla, combine, stir in chocolate chips, bake at 350°F for 10-12 minutes.",
        time_required: "30 minutes",
        servings: 24,
        difficulty: "Medium",
        calories_per_serving: 150.0,
        favorite: true,
        general_notes: "Soft and chewy cookies perfect for any occasion.",
        category: "Dessert",
    },
    SampleRecipe {
        title: "Vegetable Stir Fry",
        ingredients: "Mixed vegetables, soy sauce, garlic, ginger, sesame oil, rice (optional)",
        instructions: "Chop vegetables, sauté in sesame oil, add garlic and ginger, stir in soy sauce, serve with rice if desired.",
        time_required: "15 minutes",
        servings: 3,
        difficulty: "Easy",
        calories_per_serving: 200.0,
        favorite: false,
        general_notes: "A versatile dish that can be customized with your favorite vegetables.",
        category: "Quick Meals",
    },
];

/// The starter catalog as an import document dated `date`.
#[must_use]
pub fn sample_catalog(date: NaiveDate) -> CatalogExport {
    let categories: Vec<ExportCategory> = CATEGORIES
        .iter()
        .map(|name| ExportCategory {
            uuid: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
        })
        .collect();

    let date = date.format("%Y-%m-%d").to_string();
    let recipes = RECIPES
        .iter()
        .map(|s| ExportRecipe {
            uuid: Uuid::new_v4().to_string(),
            title: s.title.to_string(),
            ingredients: s.ingredients.to_string(),
            instructions: s.instructions.to_string(),
            date: date.clone(),
            time_required: s.time_required.to_string(),
            servings: s.servings,
            difficulty: s.difficulty.to_string(),
            calories_per_serving: s.calories_per_serving,
            favorite: s.favorite,
            general_notes: s.general_notes.to_string(),
            category_uuids: categories
                .iter()
                .filter(|c| c.name == s.category)
                .map(|c| c.uuid.clone())
                .collect(),
        })
        .collect();

    CatalogExport {
        version: EXPORT_VERSION,
        exported_at: String::new(),
        categories,
        recipes,
    }
}
