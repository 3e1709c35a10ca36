// ABOUTME: Demo catalogue seeding utility for the Pantry recipe server
// ABOUTME: Inserts a fixed set of recipes so browse and ingredient matching have data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Demo recipe seeder.
//!
//! Usage:
//! ```bash
//! # Seed demo recipes (uses DATABASE_URL from environment)
//! cargo run --bin seed-recipes
//!
//! # Override database URL
//! cargo run --bin seed-recipes -- --database-url sqlite:./data/recipes.db
//!
//! # Force re-seed (skip existing check)
//! cargo run --bin seed-recipes -- --force
//!
//! # Validate the catalogue against in-memory stores only
//! cargo run --bin seed-recipes -- --dry-run -v
//! ```

use std::env;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use pantry_core::constants::defaults;
use pantry_core::models::{CreateRecipeRequest, NewRecipe};
use pantry_recipes::{
    config::DatabaseUrl,
    database::{repositories::MemoryRecipeStore, Database},
    retrieval::LifecycleManager,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-recipes",
    about = "Pantry Demo Recipe Seeder",
    long_about = "Insert the demo recipe catalogue used by the web client"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Force re-seed even if recipes already exist
    #[arg(long)]
    force: bool,

    /// Seed into in-memory stores and report, without touching the database
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Demo recipe definition
struct DemoRecipe {
    title: &'static str,
    description: &'static str,
    ingredients: &'static [&'static str],
}

/// The demo catalogue
const DEMO_RECIPES: &[DemoRecipe] = &[
    DemoRecipe {
        title: "Classic Beef Burger",
        description: "Juicy pan-fried patties on toasted buns with crisp salad",
        ingredients: &["ground beef", "breadcrumbs", "egg", "lettuce", "tomato", "burger bun"],
    },
    DemoRecipe {
        title: "Sweet Chili Burger",
        description: "Beef burger glazed with thai chili sauce",
        ingredients: &["ground beef", "egg", "thai chili sauce", "lettuce", "burger bun"],
    },
    DemoRecipe {
        title: "Peppercorn Steak",
        description: "Seared sirloin with a creamy black peppercorn sauce",
        ingredients: &["sirloin steak", "black peppercorns", "cream", "garlic", "butter", "olive oil"],
    },
    DemoRecipe {
        title: "Cheesy Chicken Enchiladas",
        description: "Rolled tortillas baked in enchilada sauce",
        ingredients: &["chicken breast", "tortilla", "enchilada sauce", "cheddar cheese", "sour cream", "bell pepper"],
    },
    DemoRecipe {
        title: "Garlic Butter Chicken",
        description: "Pan-roasted chicken breast with thyme and garlic butter",
        ingredients: &["chicken breast", "garlic", "butter", "thyme", "garlic powder", "olive oil"],
    },
    DemoRecipe {
        title: "Hoisin Pork Lettuce Wraps",
        description: "Sticky ground pork in crisp lettuce cups",
        ingredients: &["ground pork", "hoisin sauce", "lettuce", "cucumber", "scallions", "ginger"],
    },
    DemoRecipe {
        title: "Mediterranean Couscous Bowl",
        description: "Couscous with hummus, olives and feta",
        ingredients: &["couscous", "hummus", "olive", "feta cheese", "cucumber", "tomato", "lemon juice"],
    },
    DemoRecipe {
        title: "Spaghetti Aglio e Olio",
        description: "Spaghetti tossed in garlic, chili flakes and olive oil",
        ingredients: &["spaghetti", "garlic", "olive oil", "chili flakes", "parsley", "parmesan cheese"],
    },
    DemoRecipe {
        title: "Margherita Pizza",
        description: "Thin crust pizza with mozzarella and basil",
        ingredients: &["pizza dough", "tomato sauce", "mozzarella cheese", "basil", "olive oil"],
    },
    DemoRecipe {
        title: "Seared Scallops with Ravioli",
        description: "Butter-seared scallops over cheese ravioli",
        ingredients: &["scallops", "ravioli", "butter", "garlic", "parsley", "lemon juice"],
    },
    DemoRecipe {
        title: "Mushroom Bacon Risotto",
        description: "Creamy arborio rice with bacon and mushrooms",
        ingredients: &["arborio rice", "bacon", "mushrooms", "onion", "beef stock", "parmesan cheese", "butter"],
    },
    DemoRecipe {
        title: "White Cheddar Mac Bake",
        description: "Baked pasta with white cheddar and crispy onions",
        ingredients: &["white cheddar", "crispy onions", "cream", "butter", "flour"],
    },
    DemoRecipe {
        title: "Spiced Lentil Soup",
        description: "Lentils simmered with carrots, cumin and coriander",
        ingredients: &["lentils", "carrots", "onion", "cumin", "coriander", "chili powder", "garlic"],
    },
    DemoRecipe {
        title: "Ginger Soy Chicken Tenders",
        description: "Chicken tenders glazed with soy sauce, ginger and brown sugar",
        ingredients: &["chicken tenders", "soy sauce", "ginger", "brown sugar", "sesame seeds", "scallions"],
    },
    DemoRecipe {
        title: "Gochujang Chicken Thighs",
        description: "Sticky Korean-style chicken thighs over rice",
        ingredients: &["chicken thighs", "gochujang", "soy sauce", "garlic", "rice", "sesame seeds"],
    },
    DemoRecipe {
        title: "Smoky Paprika Zucchini",
        description: "Roasted zucchini with paprika and garlic",
        ingredients: &["zucchini", "paprika", "garlic", "olive oil", "parsley"],
    },
    DemoRecipe {
        title: "Cauliflower Chickpea Curry",
        description: "Curry powder and coconut milk with cauliflower and chickpeas",
        ingredients: &["cauliflower", "chickpeas", "curry powder", "coconut milk", "onion", "cilantro", "rice"],
    },
    DemoRecipe {
        title: "Thai Green Curry Tofu",
        description: "Tofu and spinach in a coconut curry with lime",
        ingredients: &["tofu", "curry paste", "coconut milk", "spinach", "lime", "chili", "rice"],
    },
    DemoRecipe {
        title: "Beef Chili",
        description: "Slow simmered ground beef with tomatoes and chili",
        ingredients: &["ground beef", "onion", "tomato", "chili powder", "cumin", "garlic", "bell pepper"],
    },
    DemoRecipe {
        title: "Crispy Chicken Flautas",
        description: "Fried tortillas filled with shredded chicken and cheese",
        ingredients: &["chicken breast", "tortilla", "cheese", "sour cream", "cilantro", "lime"],
    },
];

impl DemoRecipe {
    fn to_new_recipe(&self) -> Result<NewRecipe> {
        let request = CreateRecipeRequest {
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            thumbnail: None,
            source_url: None,
            ingredients: self.ingredients.iter().map(|&i| i.to_owned()).collect(),
        };
        Ok(NewRecipe::try_from(request)?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Pantry Demo Recipe Seeder ===");

    if args.dry_run {
        let lifecycle = LifecycleManager::new(Arc::new(MemoryRecipeStore::new()));
        let seeded = seed_catalogue(&lifecycle).await?;
        info!("Dry run complete: {seeded} recipes validated, nothing written");
        return Ok(());
    }

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| defaults::DATABASE_URL.into());
    let database_url = DatabaseUrl::parse_url(&database_url)?;

    info!("Connecting to database: {database_url}");
    let database = Database::connect(&database_url).await?;

    let existing_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(database.pool())
        .await?;

    if existing_count.0 > 0 && !args.force {
        info!(
            "Recipes already seeded ({} recipes found). Use --force to re-seed.",
            existing_count.0
        );
        return Ok(());
    }

    let lifecycle = LifecycleManager::new(database.recipe_store());
    let seeded = seed_catalogue(&lifecycle).await?;

    info!("=== Seeding Complete ===");
    info!("Created {seeded} recipes");
    Ok(())
}

async fn seed_catalogue(lifecycle: &LifecycleManager) -> Result<usize> {
    info!("Seeding {} demo recipes...", DEMO_RECIPES.len());
    for demo in DEMO_RECIPES {
        let recipe = lifecycle.add(demo.to_new_recipe()?).await?;
        info!(
            recipe.id = %recipe.id,
            ingredients = recipe.ingredients.len(),
            "Seeded {}",
            recipe.title
        );
    }
    Ok(DEMO_RECIPES.len())
}
