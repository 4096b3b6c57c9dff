// Shopping list benchmarks
//
// Run with: cargo bench
// View reports: target/criterion/report/index.html

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use recipe_shopping_list::aggregate::aggregate;
use recipe_shopping_list::format::{format_entries, strip_quantities};
use recipe_shopping_list::model::{Recipe, RecipeId};
use recipe_shopping_list::parse::parse_ingredient;
use std::collections::HashSet;

const LINES: &[&str] = &[
    "200g de farine",
    "1/2 tasse de sucre",
    "2 courgettes",
    "un peu de sel",
    "1,5 kg de pommes",
    "2 gousses d'ail",
    "20cl de crème fraîche",
    "3 oeufs",
];

fn book(recipes: usize) -> Vec<Recipe> {
    (0..recipes)
        .map(|index| {
            let lines = LINES
                .iter()
                .cycle()
                .skip(index % LINES.len())
                .take(12)
                .copied();
            Recipe::new(format!("r{index}"), format!("Recette {index}"), lines)
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(LINES.len() as u64));
    group.bench_function("mixed_lines", |b| {
        b.iter(|| {
            for line in LINES {
                black_box(parse_ingredient(black_box(line)));
            }
        })
    });
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in [5, 50, 500] {
        let recipes = book(size);
        let selected: HashSet<RecipeId> = recipes.iter().map(|r| r.id.clone()).collect();
        group.bench_with_input(BenchmarkId::new("aggregate_format", size), &size, |b, _| {
            b.iter(|| {
                let entries =
                    aggregate(black_box(&recipes), &selected).expect("selection is not empty");
                black_box(strip_quantities(&format_entries(&entries)))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_generate);
criterion_main!(benches);
