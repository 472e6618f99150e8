//! Galley Headless Kitchen Harness
//!
//! Plays scripted scenarios against the kitchen engine and checks the
//! timing rules end to end. Runs entirely in-process with no renderer.
//!
//! Usage:
//!   cargo run -p galley-simtest
//!   cargo run -p galley-simtest -- --verbose
//!   cargo run -p galley-simtest -- --json
//!
//! Engine logging is controlled with `RUST_LOG` (default `info`).

use galley_core::config::{load_layout_str, load_level_str};
use galley_core::generation::{KitchenLayout, StartingItem, StationSpec};
use galley_core::prelude::*;
use galley_logic::burn::BurnStage;
use galley_logic::ingredient::{IngredientSpec, IngredientType};
use galley_logic::level::LevelConfig;
use galley_logic::order::{ingredients_match, MatchPolicy, OrderTemplate};
use galley_logic::scoring::star_rating;
use hecs::Entity;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

// ── Level data (same files a front end would ship) ──────────────────────
const SOUP_LEVEL_JSON: &str = include_str!("../../../data/levels/soup_kitchen.json");
const SALAD_LEVEL_JSON: &str = include_str!("../../../data/levels/salad_bar.json");
const LAYOUT_JSON: &str = include_str!("../../../data/layouts/two_chefs.json");

/// Fixed frame step, 60 FPS.
const FRAME: f32 = 1.0 / 60.0;

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed,
            detail: detail.into(),
        }
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    passed: usize,
    failed: usize,
    results: &'a [TestResult],
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let json = std::env::args().any(|a| a == "--json");
    init_tracing();
    if !json {
        println!("=== Galley Kitchen Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Level and layout files
    results.extend(validate_data_files(verbose));

    // 2. Pure rules: matching and stars
    results.extend(validate_rules(verbose));

    // 3. Full soup service, chop to hatch
    results.extend(validate_soup_service(verbose));

    // 4. Burn timeline on a forgotten pot
    results.extend(validate_burning(verbose));

    // 5. Chopping pauses when the chef walks off
    results.extend(validate_chopping_pause(verbose));

    // 6. Sink washing and plate returns
    results.extend(validate_sink(verbose));

    // 7. Order expiry and the level clock
    results.extend(validate_clock(verbose));

    // 8. Snapshot save and restore
    results.extend(validate_snapshot(verbose));

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    if json {
        let summary = Summary {
            passed,
            failed,
            results: &results,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => tracing::error!("Failed to encode results: {}", e),
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed,
            results.len(),
            failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Scenario helpers ────────────────────────────────────────────────────

fn soup_level() -> Option<LevelConfig> {
    match load_level_str(SOUP_LEVEL_JSON) {
        Ok(level) => Some(level),
        Err(e) => {
            tracing::error!("Soup level failed to load: {}", e);
            None
        }
    }
}

/// Step the engine for `seconds` of play, collecting every event raised.
fn run(engine: &mut KitchenEngine, seconds: f32) -> Vec<GameEvent> {
    let frames = (seconds / FRAME).round() as usize;
    let mut events = Vec::new();
    for _ in 0..frames {
        engine.update(FRAME);
        events.extend(engine.drain_events());
    }
    events
}

/// Step until `done` matches an event or `limit` seconds pass.
fn run_until(
    engine: &mut KitchenEngine,
    limit: f32,
    mut done: impl FnMut(&GameEvent) -> bool,
) -> (bool, Vec<GameEvent>) {
    let frames = (limit / FRAME).ceil() as usize;
    let mut events = Vec::new();
    for _ in 0..frames {
        engine.update(FRAME);
        let tick = engine.drain_events();
        let hit = tick.iter().any(&mut done);
        events.extend(tick);
        if hit {
            return (true, events);
        }
    }
    (false, events)
}

/// A chef walks to `station` and presses pick-up/drop.
fn use_station(engine: &mut KitchenEngine, chef: Entity, station: Entity) -> bool {
    engine.apply(chef, ChefCommand::MoveToward(station))
        && engine.apply(chef, ChefCommand::PickUpOrDrop)
}

/// Fetch, chop and pot one ingredient. Returns false at the first refused step.
fn prepare_into_pot(
    engine: &mut KitchenEngine,
    chef: Entity,
    kind: IngredientType,
    hob: Entity,
) -> bool {
    let Some(source) = engine.kitchen.crate_for(&engine.world, kind) else {
        return false;
    };
    let Some(board) = engine.station(StationKind::ChoppingBoard) else {
        return false;
    };
    if !use_station(engine, chef, source) || !use_station(engine, chef, board) {
        return false;
    }
    if !engine.apply(chef, ChefCommand::Interact) {
        return false;
    }
    let (chopped, _) = run_until(engine, 30.0, |e| {
        matches!(e, GameEvent::IngredientChopped { board: b, .. } if *b == board)
    });
    chopped && use_station(engine, chef, board) && use_station(engine, chef, hob)
}

fn pot_on(engine: &KitchenEngine, hob: Entity) -> Option<Entity> {
    engine.world.get::<&Station>(hob).ok().and_then(|s| s.slot)
}

// ── 1. Data Files ───────────────────────────────────────────────────────

fn validate_data_files(verbose: bool) -> Vec<TestResult> {
    println_section("Data Files");
    let mut results = Vec::new();

    match load_level_str(SOUP_LEVEL_JSON) {
        Ok(level) => {
            if verbose {
                println!(
                    "  {}: {} orders, {}s shift, stars at {:?}",
                    level.name,
                    level.orders.len(),
                    level.duration_seconds,
                    level.star_thresholds
                );
            }
            results.push(TestResult::check(
                "soup_level_parses",
                level.orders.iter().all(|o| o.ingredients.len() == 3),
                format!("{} soup orders", level.orders.len()),
            ));
            let mushroom = level.ingredient_spec(IngredientType::Mushroom);
            results.push(TestResult::check(
                "soup_level_ingredient_overrides",
                mushroom.process_time == 1.5 && mushroom.cook_time == 5.0,
                format!(
                    "mushroom chop {}s, cook {}s",
                    mushroom.process_time, mushroom.cook_time
                ),
            ));
        }
        Err(e) => results.push(TestResult::check("soup_level_parses", false, e.to_string())),
    }

    match load_level_str(SALAD_LEVEL_JSON) {
        Ok(level) => results.push(TestResult::check(
            "salad_level_parses",
            level.match_policy == MatchPolicy::Multiset && level.spawn_interval_seconds == 15.0,
            format!("{:?} matching, defaults filled", level.match_policy),
        )),
        Err(e) => results.push(TestResult::check("salad_level_parses", false, e.to_string())),
    }

    match load_layout_str(LAYOUT_JSON) {
        Ok(layout) => results.push(TestResult::check(
            "layout_matches_default_kitchen",
            layout == KitchenLayout::default(),
            format!(
                "{} chefs, {} stations",
                layout.chefs.len(),
                layout.stations.len()
            ),
        )),
        Err(e) => results.push(TestResult::check(
            "layout_matches_default_kitchen",
            false,
            e.to_string(),
        )),
    }

    let broken = load_level_str(r#"{ "orders": [], "star_thresholds": [90, 60, 30] }"#);
    results.push(TestResult::check(
        "invalid_level_rejected",
        broken.is_err(),
        match broken {
            Err(e) => e.to_string(),
            Ok(_) => "accepted a level with no orders".to_string(),
        },
    ));

    results
}

// ── 2. Rules ────────────────────────────────────────────────────────────

fn validate_rules(_verbose: bool) -> Vec<TestResult> {
    println_section("Rules");
    use IngredientType::*;
    let mut results = Vec::new();

    let plate = [Onion, Onion, Tomato];
    let order = [Onion, Tomato, Tomato];
    results.push(TestResult::check(
        "legacy_match_ignores_multiplicity",
        ingredients_match(&plate, &order, MatchPolicy::Legacy),
        "{Onion, Onion, Tomato} serves {Onion, Tomato, Tomato}",
    ));
    results.push(TestResult::check(
        "multiset_match_is_exact",
        !ingredients_match(&plate, &order, MatchPolicy::Multiset)
            && ingredients_match(&[Tomato, Onion], &[Onion, Tomato], MatchPolicy::Multiset),
        "counts must agree, order doesn't matter",
    ));
    results.push(TestResult::check(
        "length_mismatch_never_matches",
        !ingredients_match(&[Onion, Onion], &[Onion, Onion, Onion], MatchPolicy::Legacy),
        "two onions don't serve onion soup",
    ));

    let thresholds = [40, 80, 120];
    let stars: Vec<u8> = [-10, 39, 40, 119, 120]
        .iter()
        .map(|&s| star_rating(s, &thresholds))
        .collect();
    results.push(TestResult::check(
        "star_thresholds",
        stars == vec![0, 0, 1, 2, 3],
        format!("{:?}", stars),
    ));

    results
}

// ── 3. Soup Service ─────────────────────────────────────────────────────

fn validate_soup_service(verbose: bool) -> Vec<TestResult> {
    println_section("Soup Service");
    let mut results = Vec::new();
    let Some(level) = soup_level() else {
        results.push(TestResult::check("soup_service", false, "level failed to load"));
        return results;
    };

    let mut engine = KitchenEngine::new(level, &KitchenLayout::default());
    engine.start_level();
    let opening = engine.drain_events();
    results.push(TestResult::check(
        "first_order_spawns_immediately",
        opening
            .iter()
            .any(|e| matches!(e, GameEvent::OrderSpawned { .. })),
        format!("{} outstanding", engine.orders.outstanding()),
    ));

    let Some(wanted) = engine.orders.orders().first().map(|o| o.ingredients().to_vec()) else {
        results.push(TestResult::check("soup_service", false, "no order to cook"));
        return results;
    };
    let (Some(chef), Some(hob)) = (engine.chef(0), engine.station(StationKind::Hob)) else {
        results.push(TestResult::check("soup_service", false, "kitchen missing chef or hob"));
        return results;
    };
    if verbose {
        println!("  Cooking {:?}", wanted);
    }

    let prepared = wanted
        .iter()
        .all(|&kind| prepare_into_pot(&mut engine, chef, kind, hob));
    results.push(TestResult::check(
        "chop_and_fill_pot",
        prepared,
        format!("{} ingredients potted", wanted.len()),
    ));

    let pot = pot_on(&engine, hob);
    let (cooked, _) = run_until(&mut engine, 30.0, |e| {
        matches!(e, GameEvent::CookFinished { pot: p } if Some(*p) == pot)
    });
    results.push(TestResult::check(
        "soup_cooks",
        cooked,
        format!("cook finished at {:.1}s", engine.sim_time()),
    ));

    let counter = engine.station(StationKind::Countertop);
    let hatch = engine.station(StationKind::DeliverCountertop);
    let (Some(counter), Some(hatch)) = (counter, hatch) else {
        results.push(TestResult::check("soup_service", false, "kitchen missing counter or hatch"));
        return results;
    };
    let score_before = engine.score();
    let plated = use_station(&mut engine, chef, counter) && use_station(&mut engine, chef, hob);
    let plate = engine.held_by(chef);
    let has_soup = plate
        .and_then(|p| engine.world.get::<&Plate>(p).ok().map(|p| p.has_cooked_soup()))
        .unwrap_or(false);
    results.push(TestResult::check(
        "soup_plated",
        plated && has_soup,
        "clean plate scooped the pot",
    ));

    let served = use_station(&mut engine, chef, hatch);
    let events = engine.drain_events();
    let tip = events.iter().find_map(|e| match e {
        GameEvent::OrderDelivered { tip, .. } => Some(*tip),
        _ => None,
    });
    results.push(TestResult::check(
        "order_delivered_with_tip",
        served && tip.is_some() && engine.score() == score_before + 20 + tip.unwrap_or(0) as i32,
        format!("tip {:?}, score {}", tip, engine.score()),
    ));

    let return_time = engine.level.plate_return_seconds + 0.1;
    let returned = run(&mut engine, return_time)
        .iter()
        .any(|e| matches!(e, GameEvent::PlateReturned { .. }));
    let tray_pile = engine
        .station(StationKind::DishTray)
        .and_then(|t| engine.world.get::<&DishTray>(t).ok().map(|t| t.pile.len()))
        .unwrap_or(0);
    results.push(TestResult::check(
        "dirty_plate_returns_to_tray",
        returned && tray_pile == 1,
        format!("{} plate(s) on the tray", tray_pile),
    ));

    results
}

// ── 4. Burning ──────────────────────────────────────────────────────────

fn validate_burning(verbose: bool) -> Vec<TestResult> {
    println_section("Burning");
    use IngredientType::Tomato;
    let mut results = Vec::new();

    let level = LevelConfig {
        orders: vec![OrderTemplate::soup(Tomato)],
        ingredients: vec![IngredientSpec {
            kind: Tomato,
            process_time: 0.5,
            cook_time: 1.0,
        }],
        seed: Some(3),
        ..LevelConfig::default()
    };
    let mut engine = KitchenEngine::new(level, &KitchenLayout::default());
    engine.start_level();
    let (Some(chef), Some(hob)) = (engine.chef(0), engine.station(StationKind::Hob)) else {
        results.push(TestResult::check("burning", false, "kitchen missing chef or hob"));
        return results;
    };

    let filled = (0..3).all(|_| prepare_into_pot(&mut engine, chef, Tomato, hob));
    let pot = pot_on(&engine, hob);
    results.push(TestResult::check("burn_pot_filled", filled, "three tomatoes on the hob"));

    let (burned, events) = run_until(&mut engine, 30.0, |e| {
        matches!(e, GameEvent::PotBurned { pot: p } if Some(*p) == pot)
    });
    let stages: Vec<BurnStage> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::BurnStageChanged { stage, .. } => Some(*stage),
            _ => None,
        })
        .collect();
    let pulses = events
        .iter()
        .filter(|e| matches!(e, GameEvent::BurnWarning { .. }))
        .count();
    if verbose {
        println!("  Stages {:?}, {} warning pulses", stages, pulses);
    }

    results.push(TestResult::check(
        "forgotten_pot_burns",
        burned,
        format!("burned by {:.1}s", engine.sim_time()),
    ));
    results.push(TestResult::check(
        "burn_stages_in_order",
        stages
            == vec![
                BurnStage::Smoking,
                BurnStage::Warning,
                BurnStage::Urgent,
                BurnStage::Critical,
                BurnStage::Scorching,
            ],
        format!("{:?}", stages),
    ));
    results.push(TestResult::check(
        "warning_pulses_fire",
        pulses > 10,
        format!("{} pulses", pulses),
    ));

    // A freshly chopped tomato is fine on its own, so only the burned pot
    // can turn it away.
    let bounced = !prepare_into_pot(&mut engine, chef, Tomato, hob);
    let refuses = bounced
        && engine.held_by(chef).is_some()
        && pot
            .and_then(|p| {
                engine
                    .world
                    .get::<&CookingPot>(p)
                    .ok()
                    .map(|p| p.is_burned() && p.ingredients().len() == 3)
            })
            .unwrap_or(false);
    results.push(TestResult::check(
        "burned_pot_refuses_ingredients",
        refuses,
        "chopped tomato bounced off the burned pot",
    ));

    results
}

// ── 5. Chopping ─────────────────────────────────────────────────────────

fn validate_chopping_pause(_verbose: bool) -> Vec<TestResult> {
    println_section("Chopping");
    use IngredientType::Onion;
    let mut results = Vec::new();

    let level = LevelConfig {
        orders: vec![OrderTemplate::soup(Onion)],
        ingredients: vec![IngredientSpec {
            kind: Onion,
            process_time: 2.0,
            cook_time: 2.0,
        }],
        seed: Some(5),
        ..LevelConfig::default()
    };
    let mut engine = KitchenEngine::new(level, &KitchenLayout::default());
    engine.start_level();
    let chef = engine.chef(0);
    let board = engine.station(StationKind::ChoppingBoard);
    let onions = engine.kitchen.crate_for(&engine.world, Onion);
    let (Some(chef), Some(board), Some(onions)) = (chef, board, onions) else {
        results.push(TestResult::check("chopping", false, "kitchen missing chef, board or crate"));
        return results;
    };

    let started = use_station(&mut engine, chef, onions)
        && use_station(&mut engine, chef, board)
        && engine.apply(chef, ChefCommand::Interact);
    run(&mut engine, 1.0);
    engine.apply(chef, ChefCommand::Leave);
    let idle = run(&mut engine, 5.0);
    let progress = engine
        .world
        .get::<&ChoppingBoard>(board)
        .map(|b| b.progress())
        .unwrap_or(0.0);
    results.push(TestResult::check(
        "chop_pauses_when_chef_leaves",
        started
            && !idle
                .iter()
                .any(|e| matches!(e, GameEvent::IngredientChopped { .. }))
            && (progress - 0.5).abs() < 0.05,
        format!("progress held at {:.2}", progress),
    ));

    let locked = engine.apply(chef, ChefCommand::MoveToward(board))
        && !engine.apply(chef, ChefCommand::PickUpOrDrop);
    results.push(TestResult::check(
        "paused_board_stays_locked",
        locked,
        "half-chopped onion can't be lifted",
    ));

    engine.apply(chef, ChefCommand::Interact);
    let (chopped, _) = run_until(&mut engine, 1.2, |e| {
        matches!(e, GameEvent::IngredientChopped { .. })
    });
    let lifted = use_station(&mut engine, chef, board);
    let processed = engine
        .held_by(chef)
        .and_then(|i| engine.world.get::<&Ingredient>(i).ok().map(|i| i.is_processed()))
        .unwrap_or(false);
    results.push(TestResult::check(
        "chop_resumes_where_it_left_off",
        chopped && lifted && processed,
        format!("finished at {:.1}s of play", engine.sim_time()),
    ));

    results
}

// ── 6. Sink ─────────────────────────────────────────────────────────────

fn validate_sink(_verbose: bool) -> Vec<TestResult> {
    println_section("Sink");
    let mut results = Vec::new();

    let mut layout = KitchenLayout::default();
    layout.stations.extend([
        StationSpec::new(StationKind::Countertop).holding(StartingItem::DirtyPlate),
        StationSpec::new(StationKind::Countertop).holding(StartingItem::DirtyPlate),
    ]);
    let level = LevelConfig {
        sink_cleaning_seconds: 1.0,
        seed: Some(9),
        ..LevelConfig::soups()
    };
    let mut engine = KitchenEngine::new(level, &layout);
    engine.start_level();

    let dirty_counters: Vec<Entity> = engine
        .kitchen
        .stations_of(&engine.world, StationKind::Countertop)
        .into_iter()
        .filter(|&c| {
            engine
                .world
                .get::<&Station>(c)
                .ok()
                .and_then(|s| s.slot)
                .and_then(|p| engine.world.get::<&Plate>(p).ok().map(|p| !p.clean))
                .unwrap_or(false)
        })
        .collect();
    let (Some(chef), Some(sink)) = (engine.chef(1), engine.station(StationKind::Sink)) else {
        results.push(TestResult::check("sink", false, "kitchen missing chef or sink"));
        return results;
    };

    let loaded = dirty_counters.len() == 2
        && dirty_counters
            .iter()
            .all(|&c| use_station(&mut engine, chef, c) && use_station(&mut engine, chef, sink));
    results.push(TestResult::check(
        "dirty_plates_into_sink",
        loaded,
        format!("{} dirty plates found", dirty_counters.len()),
    ));

    engine.apply(chef, ChefCommand::Interact);
    let (first, _) = run_until(&mut engine, 1.2, |e| {
        matches!(e, GameEvent::PlateCleaned { .. })
    });
    let (second, _) = run_until(&mut engine, 1.2, |e| {
        matches!(e, GameEvent::PlateCleaned { .. })
    });
    let clean = engine
        .world
        .get::<&Sink>(sink)
        .map(|s| s.clean.len())
        .unwrap_or(0);
    results.push(TestResult::check(
        "sink_washes_whole_pile",
        first && second && clean == 2,
        format!("{} clean plates waiting", clean),
    ));

    let picked = engine.apply(chef, ChefCommand::PickUpOrDrop);
    let is_clean = engine
        .held_by(chef)
        .and_then(|p| engine.world.get::<&Plate>(p).ok().map(|p| p.clean))
        .unwrap_or(false);
    results.push(TestResult::check(
        "clean_plate_collected",
        picked && is_clean,
        "top clean plate in hand",
    ));

    results
}

// ── 7. Clock ────────────────────────────────────────────────────────────

fn validate_clock(verbose: bool) -> Vec<TestResult> {
    println_section("Clock");
    let mut results = Vec::new();
    let Some(base) = soup_level() else {
        results.push(TestResult::check("clock", false, "level failed to load"));
        return results;
    };

    let level = LevelConfig {
        duration_seconds: 30,
        order_time_limit_seconds: 12.0,
        spawn_interval_seconds: 100.0,
        ..base
    };
    let mut engine = KitchenEngine::new(level, &KitchenLayout::default());
    engine.start_level();

    let events = run(&mut engine, 12.5);
    results.push(TestResult::check(
        "order_alert_before_expiry",
        events.iter().any(|e| matches!(e, GameEvent::OrderAlert { .. })),
        "alert raised in the final seconds",
    ));
    results.push(TestResult::check(
        "expired_order_costs_ten",
        engine.score() == -10 && engine.orders.outstanding() == 1,
        format!(
            "score {}, {} order(s) still outstanding",
            engine.score(),
            engine.orders.outstanding()
        ),
    ));

    engine.pause();
    let frozen = engine.time_remaining();
    run(&mut engine, 10.0);
    let held = engine.time_remaining() == frozen;
    engine.resume();
    results.push(TestResult::check(
        "pause_freezes_clock",
        held,
        format!("{}s left while paused", frozen),
    ));

    let events = run(&mut engine, 20.0);
    let ticks = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CountdownTick { .. }))
        .count();
    if verbose {
        println!("  {} countdown ticks after resume", ticks);
    }
    results.push(TestResult::check(
        "time_over",
        engine.phase() == SessionPhase::TimeOver
            && engine.session.stars == Some(0)
            && engine.orders.outstanding() == 0,
        format!("phase {:?}, final score {}", engine.phase(), engine.score()),
    ));

    results
}

// ── 8. Snapshot ─────────────────────────────────────────────────────────

fn validate_snapshot(_verbose: bool) -> Vec<TestResult> {
    println_section("Snapshot");
    use IngredientType::Onion;
    let mut results = Vec::new();
    let Some(level) = soup_level() else {
        results.push(TestResult::check("snapshot", false, "level failed to load"));
        return results;
    };

    let mut engine = KitchenEngine::new(level, &KitchenLayout::default());
    engine.start_level();
    let (Some(chef), Some(hob)) = (engine.chef(0), engine.station(StationKind::Hob)) else {
        results.push(TestResult::check("snapshot", false, "kitchen missing chef or hob"));
        return results;
    };
    let potted = prepare_into_pot(&mut engine, chef, Onion, hob);
    run(&mut engine, 0.5);

    let mut buffer = Vec::new();
    if let Err(e) = engine.save(&mut buffer) {
        results.push(TestResult::check("snapshot_save", false, e.to_string()));
        return results;
    }
    results.push(TestResult::check(
        "snapshot_save",
        potted && !buffer.is_empty(),
        format!("{} bytes", buffer.len()),
    ));

    let mut restored = KitchenEngine::default();
    if let Err(e) = restored.load(&buffer[..]) {
        results.push(TestResult::check("snapshot_load", false, e.to_string()));
        return results;
    }
    let same_pot = match (pot_on(&engine, hob), pot_on(&restored, hob)) {
        (Some(a), Some(b)) => {
            let a = engine.world.get::<&CookingPot>(a).map(|p| p.current_cook_time());
            let b = restored.world.get::<&CookingPot>(b).map(|p| p.current_cook_time());
            matches!((a, b), (Ok(a), Ok(b)) if (a - b).abs() < 1e-4)
        }
        _ => false,
    };
    results.push(TestResult::check(
        "snapshot_load",
        restored.phase() == SessionPhase::Running
            && restored.score() == engine.score()
            && restored.orders.outstanding() == engine.orders.outstanding()
            && same_pot,
        format!("restored at {:.1}s", restored.sim_time()),
    ));

    let before = restored.sim_time();
    run(&mut restored, 1.0);
    results.push(TestResult::check(
        "restored_kitchen_keeps_running",
        restored.sim_time() > before,
        "clock advances after load",
    ));

    results
}

fn println_section(name: &str) {
    tracing::debug!("section {}", name);
    if !std::env::args().any(|a| a == "--json") {
        println!("--- {} ---", name);
    }
}
