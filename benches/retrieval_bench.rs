// ABOUTME: Criterion benchmarks for the recipe retrieval hot paths
// ABOUTME: Measures ingredient ranking, title pagination and rating aggregation strategies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for retrieval.
//!
//! Ranking and title search run over in-memory catalogues of increasing size.
//! Rating aggregation compares the batched and fan-out fetch strategies.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use std::sync::Arc;

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pantry_recipes::database::repositories::{MemoryRatingStore, RatingStore};
use pantry_recipes::models::{
    Ingredients, LifecycleState, NewRating, Recipe, RecipeId, Score, UserId,
};
use pantry_recipes::pagination::PageRequest;
use pantry_recipes::retrieval::matcher::rank_recipes;
use pantry_recipes::retrieval::ratings::RatingAggregator;
use pantry_recipes::retrieval::title_search::paginate_by_title;
use pantry_recipes::retrieval::{FetchStrategy, IngredientQuery};
use tokio::runtime::Runtime;

const PANTRY: &[&str] = &[
    "egg", "flour", "butter", "garlic", "onion", "tomato", "rice", "basil", "cheese", "lime",
    "ginger", "soy sauce", "chicken breast", "olive oil", "spinach", "tofu",
];

const CATALOGUE_SIZES: &[usize] = &[100, 1_000, 10_000];

fn catalogue(size: usize) -> Vec<Recipe> {
    let now = Utc::now();
    (0..size)
        .map(|n| {
            let ingredients: Vec<&str> = (0..5).map(|k| PANTRY[(n + k * 3) % PANTRY.len()]).collect();
            Recipe {
                id: RecipeId::new(),
                title: format!("Recipe {n}"),
                description: String::new(),
                thumbnail: None,
                source_url: None,
                ingredients: Ingredients::from_raw(ingredients),
                state: LifecycleState::Active,
                created_at: now,
                updated_at: now,
            }
        })
        .collect()
}

fn bench_rank_recipes(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_recipes");
    let query = IngredientQuery::new(["egg", "garlic", "rice", "tofu"]);

    for &size in CATALOGUE_SIZES {
        let recipes = catalogue(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &recipes, |b, recipes| {
            b.iter(|| rank_recipes(black_box(recipes.clone()), black_box(&query)));
        });
    }

    group.finish();
}

fn bench_title_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate_by_title");
    let page = PageRequest::new(Some(3), Some(20));

    for &size in CATALOGUE_SIZES {
        let recipes = catalogue(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &recipes, |b, recipes| {
            b.iter(|| paginate_by_title(black_box(recipes.clone()), black_box("recipe 1"), page));
        });
    }

    group.finish();
}

fn bench_rating_aggregation(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let store = Arc::new(MemoryRatingStore::new());
    let ids: Vec<RecipeId> = (0..50).map(|_| RecipeId::new()).collect();

    runtime.block_on(async {
        for (n, id) in ids.iter().enumerate() {
            let top = i64::try_from(n % 5 + 1).unwrap();
            for score in 1..=top {
                store
                    .insert(NewRating {
                        user_id: UserId::new(),
                        recipe_id: *id,
                        score: Score::try_from(score).unwrap(),
                        comment: None,
                    })
                    .await
                    .unwrap();
            }
        }
    });

    let mut group = c.benchmark_group("rating_aggregation");
    for strategy in [
        FetchStrategy::Batched,
        FetchStrategy::FanOut { concurrency: 8 },
    ] {
        let aggregator = RatingAggregator::new(store.clone(), strategy);
        group.bench_function(strategy.to_string(), |b| {
            b.to_async(&runtime)
                .iter(|| async { aggregator.summarize(black_box(&ids)).await.unwrap() });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_rank_recipes,
    bench_title_search,
    bench_rating_aggregation,
);
criterion_main!(benches);
