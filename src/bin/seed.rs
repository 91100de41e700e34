// src/bin/seed.rs
// DOCUMENTATION: Populate the store file with cities and users
// PURPOSE: The API only manages places and reviews; their parents are seeded here

use anyhow::Context;
use dotenv::dotenv;
use places_reviews::config::Config;
use places_reviews::models::{City, Entity, Kind, Record, User};
use places_reviews::storage::{FileStorage, Storage};
use std::collections::HashSet;

// --- ANSI colors for the terminal ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// (state id, city name)
const CITIES: [(&str, &str); 6] = [
    ("california", "San Francisco"),
    ("california", "Los Angeles"),
    ("new-york", "New York"),
    ("illinois", "Chicago"),
    ("texas", "Austin"),
    ("washington", "Seattle"),
];

/// (email, first name, last name)
const USERS: [(&str, &str, &str); 3] = [
    ("host@example.com", "Hannah", "Host"),
    ("guest@example.com", "Gus", "Guest"),
    ("critic@example.com", "Cora", "Critic"),
];

#[derive(Debug, Default)]
struct SeedResult {
    created: Vec<Record>,
    skipped: usize,
}

async fn seed_cities(storage: &dyn Storage, result: &mut SeedResult) -> anyhow::Result<()> {
    let existing: HashSet<String> = storage
        .all(Kind::City)
        .await?
        .into_iter()
        .filter_map(City::from_record)
        .map(|city| city.name)
        .collect();

    for (state_id, name) in CITIES {
        if existing.contains(name) {
            result.skipped += 1;
            continue;
        }
        let city = City::new(state_id, name).into_record();
        storage.new(city.clone()).await?;
        result.created.push(city);
    }
    Ok(())
}

async fn seed_users(storage: &dyn Storage, result: &mut SeedResult) -> anyhow::Result<()> {
    let existing: HashSet<String> = storage
        .all(Kind::User)
        .await?
        .into_iter()
        .filter_map(User::from_record)
        .map(|user| user.email)
        .collect();

    for (email, first_name, last_name) in USERS {
        if existing.contains(email) {
            result.skipped += 1;
            continue;
        }
        let user = User::new(email, first_name, last_name).into_record();
        storage.new(user.clone()).await?;
        result.created.push(user);
    }
    Ok(())
}

fn print_summary(result: &SeedResult, storage_path: &str) {
    println!("\n{}📋 Seed Summary ({}){}", BOLD, storage_path, RESET);
    println!("──────────────────────────────────────────────────────────────────────");
    println!("{:<8} {:<38} {}", "Class", "Id", "Label");
    println!("──────────────────────────────────────────────────────────────────────");

    for record in &result.created {
        let label = match record {
            Record::City(city) => city.name.clone(),
            Record::User(user) => user.email.clone(),
            Record::Place(place) => place.name.clone(),
            Record::Review(review) => review.text.clone(),
        };
        println!("{:<8} {:<38} {}", record.kind(), record.id(), label);
    }

    println!("──────────────────────────────────────────────────────────────────────");
    println!("  • Created: {}{}{}", GREEN, result.created.len(), RESET);
    println!("  • Already present: {}{}{}", YELLOW, result.skipped, RESET);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid configuration")?;

    println!("{}🌱 Seeding {}...{}", CYAN, config.storage_path, RESET);

    let storage = FileStorage::open(&config.storage_path)
        .await
        .with_context(|| format!("failed to open {}", config.storage_path))?;

    let mut result = SeedResult::default();
    seed_cities(&storage, &mut result).await?;
    seed_users(&storage, &mut result).await?;
    storage.save().await.context("failed to flush store")?;

    print_summary(&result, &config.storage_path);
    Ok(())
}
