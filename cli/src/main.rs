mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use crate::commands::{
    RecipeArgs, cmd_add, cmd_category_add, cmd_category_assign, cmd_category_delete,
    cmd_category_list, cmd_category_rename, cmd_category_unassign, cmd_delete, cmd_edit,
    cmd_export, cmd_fav, cmd_import, cmd_list, cmd_seed, cmd_show,
};
use crate::config::Config;
use recipebox_core::service::RecipeCatalog;

#[derive(Parser)]
#[command(
    name = "recipebox",
    version,
    about = "A simple recipe catalog CLI",
    long_about = "A simple recipe catalog CLI.\n\nRecipes belong to any number of categories. \
                  Filter by category, favorites, or free text, and sort by title."
)]
struct Cli {
    /// Database file (default: per-user data directory)
    #[arg(long, global = true, env = "RECIPEBOX_DB", value_name = "PATH")]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipes, optionally filtered and sorted
    List {
        /// Only recipes in this category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
        /// Only favorite recipes
        #[arg(short, long)]
        favorites: bool,
        /// Sort alphabetically by title
        #[arg(short, long)]
        sort: bool,
        /// Free-text search over title, ingredients and instructions
        #[arg(long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a recipe in full
    Show {
        /// Recipe ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a new recipe
    Add {
        #[command(flatten)]
        args: RecipeArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing recipe; unspecified fields keep their value
    Edit {
        /// Recipe ID
        id: i64,
        #[command(flatten)]
        args: RecipeArgs,
        /// Remove every category from the recipe
        #[arg(long, conflicts_with = "category")]
        clear_categories: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a recipe
    Delete {
        /// Recipe ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a recipe's favorite flag
    Fav {
        /// Recipe ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Load the sample catalog into an empty database
    Seed {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the whole catalog as JSON
    Export {
        /// Output file (default: stdout)
        file: Option<PathBuf>,
    },
    /// Import a catalog previously written by `export`
    Import {
        /// Path to the JSON file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List categories with their recipe counts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a category
    Add {
        /// Category name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rename a category
    Rename {
        /// Category (name or ID)
        category: String,
        /// New name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a category; its recipes are kept
    Delete {
        /// Category (name or ID)
        category: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Assign a category to a recipe
    Assign {
        /// Recipe ID
        recipe_id: i64,
        /// Category (name or ID)
        category: String,
        /// Create the category if no such name exists
        #[arg(long)]
        create: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a category from a recipe
    Unassign {
        /// Recipe ID
        recipe_id: i64,
        /// Category (name or ID)
        category: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.db.as_deref())?;
    tracing::debug!(db = %config.db_path.display(), "opening catalog");
    let catalog = RecipeCatalog::new(&config.db_path)?;

    match cli.command {
        Commands::List {
            category,
            favorites,
            sort,
            search,
            json,
        } => cmd_list(
            &catalog,
            category.as_deref(),
            favorites,
            sort,
            search.as_deref(),
            json,
        ),
        Commands::Show { id, json } => cmd_show(&catalog, id, json),
        Commands::Add { args, json } => cmd_add(&catalog, args, json),
        Commands::Edit {
            id,
            args,
            clear_categories,
            json,
        } => cmd_edit(&catalog, id, args, clear_categories, json),
        Commands::Delete { id, json } => cmd_delete(&catalog, id, json),
        Commands::Fav { id, json } => cmd_fav(&catalog, id, json),
        Commands::Category { command } => match command {
            CategoryCommands::List { json } => cmd_category_list(&catalog, json),
            CategoryCommands::Add { name, json } => cmd_category_add(&catalog, &name, json),
            CategoryCommands::Rename {
                category,
                name,
                json,
            } => cmd_category_rename(&catalog, &category, &name, json),
            CategoryCommands::Delete { category, json } => {
                cmd_category_delete(&catalog, &category, json)
            }
            CategoryCommands::Assign {
                recipe_id,
                category,
                create,
                json,
            } => cmd_category_assign(&catalog, recipe_id, &category, create, json),
            CategoryCommands::Unassign {
                recipe_id,
                category,
                json,
            } => cmd_category_unassign(&catalog, recipe_id, &category, json),
        },
        Commands::Seed { json } => cmd_seed(&catalog, json),
        Commands::Export { file } => cmd_export(&catalog, file.as_deref()),
        Commands::Import { file, json } => cmd_import(&catalog, &file, json),
    }
}
