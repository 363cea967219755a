// ABOUTME: Demo data seeder for the Ladle data layer
// ABOUTME: Populates users, catalog entries, recipes, edges, and short links
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

//! Demo data seeder for Ladle.
//!
//! This binary populates the database with demo data for exercising the
//! stores end to end: a handful of users with subscriptions, the tag and
//! ingredient catalog, generated recipes with favorites and cart entries,
//! and a few short links.
//!
//! Usage:
//! ```bash
//! # Seed with default settings
//! cargo run --bin seed-demo-data
//!
//! # Seed a specific database with more recipes
//! cargo run --bin seed-demo-data -- --database-url sqlite:demo.db --recipes 40
//!
//! # Verbose output
//! cargo run --bin seed-demo-data -- -v
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use ladle::config::ServerConfig;
use ladle::database::Database;
use ladle::logging::LoggingConfig;
use ladle::models::{
    CreateIngredientRequest, CreateRecipeRequest, CreateTagRequest, CreateUserRequest,
    RecipeIngredientSpec,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Fixed seed so repeated runs produce the same demo data
const DEMO_SEED: u64 = 42;

const DEMO_TAGS: &[(&str, &str)] = &[
    ("Breakfast", "breakfast"),
    ("Lunch", "lunch"),
    ("Dinner", "dinner"),
    ("Dessert", "dessert"),
    ("Vegan", "vegan"),
];

const DEMO_INGREDIENTS: &[(&str, &str)] = &[
    ("Salt", "g"),
    ("Sugar", "g"),
    ("Flour", "g"),
    ("Butter", "g"),
    ("Milk", "ml"),
    ("Eggs", "pcs"),
    ("Olive oil", "ml"),
    ("Onion", "pcs"),
    ("Garlic", "cloves"),
    ("Tomatoes", "g"),
];

const DEMO_USERS: &[(&str, &str, &str, &str)] = &[
    ("alice@example.com", "alice", "Alice", "Liddell"),
    ("bob@example.com", "bob", "Bob", "Hart"),
    ("carol@example.com", "carol", "Carol", "Danvers"),
    ("dave@example.com", "dave", "Dave", "Lister"),
];

const DEMO_DISHES: &[&str] = &[
    "Soup", "Stew", "Salad", "Pie", "Omelette", "Risotto", "Curry", "Pancakes",
];

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Ladle Demo Data Seeder",
    long_about = "Populate the database with demo data for exercising the stores"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Number of recipes to generate
    #[arg(long, default_value = "12")]
    recipes: u32,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }
    LoggingConfig::from_env()
        .init()
        .context("failed to initialize logging")?;

    let config = ServerConfig::from_env().context("failed to load configuration")?;
    let database_url = args
        .database_url
        .unwrap_or_else(|| config.database.url.to_connection_string());

    info!(%database_url, "seeding demo data");
    let db = Database::new(&database_url)
        .await
        .context("failed to open database")?;

    let mut rng = StdRng::seed_from_u64(DEMO_SEED);

    // Catalog
    let mut tag_ids = Vec::new();
    for (name, slug) in DEMO_TAGS {
        let tag = db
            .create_tag(&CreateTagRequest {
                name: (*name).into(),
                slug: (*slug).into(),
            })
            .await?;
        tag_ids.push(tag.id);
    }
    let mut ingredient_ids = Vec::new();
    for (name, unit) in DEMO_INGREDIENTS {
        let ingredient = db
            .create_ingredient(&CreateIngredientRequest {
                name: (*name).into(),
                measurement_unit: (*unit).into(),
            })
            .await?;
        ingredient_ids.push(ingredient.id);
    }
    info!(
        tags = tag_ids.len(),
        ingredients = ingredient_ids.len(),
        "catalog seeded"
    );

    // Users, each following the next one
    let mut user_ids = Vec::new();
    for (email, username, first_name, last_name) in DEMO_USERS {
        let user = db
            .create_user(&CreateUserRequest {
                email: (*email).into(),
                username: (*username).into(),
                first_name: (*first_name).into(),
                last_name: (*last_name).into(),
            })
            .await?;
        user_ids.push(user.id);
    }
    for (i, &user_id) in user_ids.iter().enumerate() {
        let author_id = user_ids[(i + 1) % user_ids.len()];
        db.subscribe(user_id, author_id).await?;
    }
    info!(users = user_ids.len(), "users seeded");

    // Recipes with random tags and ingredients, plus favorite/cart edges
    for n in 0..args.recipes {
        let author_id = user_ids[rng.gen_range(0..user_ids.len())];
        let dish = DEMO_DISHES[rng.gen_range(0..DEMO_DISHES.len())];

        let ingredient_count = rng.gen_range(2..=4);
        let mut picks = Vec::new();
        while picks.len() < ingredient_count {
            let id = ingredient_ids[rng.gen_range(0..ingredient_ids.len())];
            if !picks.contains(&id) {
                picks.push(id);
            }
        }
        let ingredients = picks
            .into_iter()
            .map(|ingredient_id| RecipeIngredientSpec {
                ingredient_id,
                amount: rng.gen_range(1..=500),
            })
            .collect();

        let recipe = db
            .create_recipe(
                author_id,
                &CreateRecipeRequest {
                    name: format!("{dish} #{}", n + 1),
                    text: format!("How to make {dish}: combine and cook."),
                    cooking_time: rng.gen_range(5..=120),
                    image: None,
                    tag_ids: vec![tag_ids[rng.gen_range(0..tag_ids.len())]],
                    ingredients,
                },
            )
            .await?;

        // Random non-author picks up the recipe
        let fan_id = user_ids[rng.gen_range(0..user_ids.len())];
        if fan_id != author_id {
            db.add_favorite(fan_id, recipe.id).await?;
            if rng.gen_bool(0.5) {
                db.add_to_cart(fan_id, recipe.id).await?;
            }
        }
    }
    info!(recipes = args.recipes, "recipes seeded");

    // A few short links to recently seeded recipes
    for recipe in db.list_recipes(&Default::default()).await?.iter().take(3) {
        let link = db
            .create_short_link(&format!("https://ladle.example/recipes/{}", recipe.id), &mut rng)
            .await?;
        info!(hash = %link.url_hash, recipe_id = recipe.id, "short link created");
    }

    info!(
        users = db.user_count().await?,
        recipes = db.recipe_count().await?,
        "demo data ready"
    );
    Ok(())
}
