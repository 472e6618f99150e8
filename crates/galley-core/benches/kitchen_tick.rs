use criterion::{black_box, criterion_group, criterion_main, Criterion};

use galley_core::generation::{KitchenLayout, StartingItem, StationSpec};
use galley_core::prelude::*;
use galley_logic::ingredient::IngredientType;
use galley_logic::level::LevelConfig;

/// A kitchen with many hobs, all cooking, and orders spawning fast.
fn busy_kitchen(hobs: usize) -> KitchenEngine {
    let mut layout = KitchenLayout::default();
    for _ in 0..hobs {
        layout
            .stations
            .push(StationSpec::new(StationKind::Hob).holding(StartingItem::Pot));
    }
    let level = LevelConfig {
        seed: Some(1),
        duration_seconds: 1_000_000,
        spawn_interval_seconds: 0.5,
        ..LevelConfig::soups()
    };
    let mut engine = KitchenEngine::new(level, &layout);
    engine.start_level();

    for (_, pot) in engine.world.query_mut::<&mut CookingPot>() {
        for _ in 0..3 {
            pot.add_ingredient(Ingredient::processed(IngredientType::Tomato));
        }
    }
    engine
}

fn bench_update(c: &mut Criterion) {
    c.bench_function("update_busy_kitchen_64_hobs", |b| {
        let mut engine = busy_kitchen(64);
        b.iter(|| {
            engine.update(black_box(1.0 / 60.0));
            engine.drain_events();
        })
    });
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
