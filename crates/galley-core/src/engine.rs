//! Kitchen engine - main entry point for running a level

use hecs::{Entity, World};

use galley_logic::level::LevelConfig;
use galley_logic::scoring::expiry_points;

use crate::components::*;
use crate::events::{EventQueue, GameEvent};
use crate::generation::{generate_kitchen, KitchenEntities, KitchenLayout};
use crate::session::{GameSession, SessionPhase};
use crate::systems::*;

/// Main kitchen engine
pub struct KitchenEngine {
    /// ECS world containing all entities
    pub world: World,
    pub level: LevelConfig,
    /// Stations and chefs created for this kitchen
    pub kitchen: KitchenEntities,
    pub session: GameSession,
    pub orders: OrderManager,
    /// Served plates on their way back
    pub returns: PlateReturns,
    events: EventQueue,
    /// Seconds of play since the level started
    sim_time: f64,
    time_scale: f32,
}

impl KitchenEngine {
    /// Build a kitchen for a level. The level doesn't start until
    /// [`start_level`](Self::start_level).
    pub fn new(level: LevelConfig, layout: &KitchenLayout) -> Self {
        let mut world = World::new();
        let kitchen = generate_kitchen(&mut world, layout, &level);
        let orders = OrderManager::new(level.seed);
        Self {
            world,
            level,
            kitchen,
            session: GameSession::new(),
            orders,
            returns: PlateReturns::new(),
            events: EventQueue::new(),
            sim_time: 0.0,
            time_scale: 1.0,
        }
    }

    /// The classic soup level in the default two-chef kitchen
    pub fn soup_kitchen() -> Self {
        Self::new(LevelConfig::soups(), &KitchenLayout::default())
    }

    /// Start (or restart) the level clock and order spawning
    pub fn start_level(&mut self) {
        self.sim_time = 0.0;
        self.session
            .start(self.level.duration_seconds, &self.level.name, &mut self.events);
        self.orders.start(&self.level, self.sim_time, &mut self.events);
    }

    pub fn pause(&mut self) -> bool {
        self.session.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.session.resume()
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Update the kitchen by delta_seconds. Nothing moves unless the level
    /// is running.
    pub fn update(&mut self, delta_seconds: f32) {
        if !self.session.is_running() {
            return;
        }
        let dt = delta_seconds * self.time_scale;
        self.sim_time += dt as f64;

        chopping_system(&mut self.world, dt, &mut self.events);
        cooking_system(&mut self.world, dt, &mut self.events);
        cleaning_system(&mut self.world, dt, &mut self.events);
        plate_return_system(&mut self.world, &mut self.returns, dt, &mut self.events);

        let expired = self
            .orders
            .update(dt, self.sim_time, &self.level, &mut self.events);
        for _ in expired {
            self.session.add_score(expiry_points(), &mut self.events);
        }

        if self.session.advance(dt, &mut self.events) {
            self.orders.stop();
            self.session
                .finish(&self.level.star_thresholds, &mut self.events);
        }
    }

    /// Carry out a chef command. Returns false if it was refused or the
    /// level isn't running.
    pub fn apply(&mut self, chef: Entity, command: ChefCommand) -> bool {
        if !self.session.is_running() {
            log::debug!("Ignoring {:?}: level not running", command);
            return false;
        }
        match apply_command(&mut self.world, chef, command, &self.level, &mut self.events) {
            CommandOutcome::Delivered(plate) => {
                deliver_plate(
                    &mut self.world,
                    plate,
                    &mut self.orders,
                    &mut self.session,
                    &mut self.returns,
                    &self.level,
                    &mut self.events,
                );
                true
            }
            outcome => outcome.is_accepted(),
        }
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Set time scale (1.0 = real-time, 2.0 = 2x speed, etc.)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Seconds of play since the level started
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn score(&self) -> i32 {
        self.session.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.session.time_remaining
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    /// Chef entity by layout position
    pub fn chef(&self, index: usize) -> Option<Entity> {
        self.kitchen.chefs.get(index).copied()
    }

    /// What a chef is holding
    pub fn held_by(&self, chef: Entity) -> Option<Entity> {
        self.world.get::<&Chef>(chef).ok().and_then(|c| c.held)
    }

    /// First station of a kind
    pub fn station(&self, kind: StationKind) -> Option<Entity> {
        self.kitchen.station(&self.world, kind)
    }

    /// Save kitchen state to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), crate::persistence::SaveError> {
        crate::persistence::save_kitchen(
            writer,
            &self.world,
            self.sim_time,
            &self.level,
            &self.session,
            &self.orders,
            &self.returns,
            &self.kitchen,
        )
    }

    /// Load kitchen state from a reader
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<(), crate::persistence::SaveError> {
        let loaded = crate::persistence::load_kitchen(reader)?;

        self.world = loaded.world;
        self.sim_time = loaded.sim_time;
        self.level = loaded.level;
        self.session = loaded.session;
        self.orders = loaded.orders;
        self.returns = loaded.returns;
        self.kitchen = loaded.kitchen;
        self.events = EventQueue::new();

        self.orders.reseed(self.level.seed);
        log::info!("Loaded kitchen snapshot at {:.1}s", self.sim_time);
        Ok(())
    }
}

impl Default for KitchenEngine {
    fn default() -> Self {
        Self::soup_kitchen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galley_logic::ingredient::{IngredientSpec, IngredientType};
    use galley_logic::order::OrderTemplate;
    use IngredientType::Onion;

    fn quick_onion_level() -> LevelConfig {
        LevelConfig {
            name: "Quick onions".to_string(),
            orders: vec![OrderTemplate::soup(Onion)],
            ingredients: vec![IngredientSpec {
                kind: Onion,
                process_time: 1.0,
                cook_time: 2.0,
            }],
            seed: Some(11),
            ..LevelConfig::default()
        }
    }

    fn run(engine: &mut KitchenEngine, seconds: f32) {
        let steps = (seconds / 0.5).round() as usize;
        for _ in 0..steps {
            engine.update(0.5);
        }
    }

    /// Chop three onions and drop them into the first hob's pot.
    fn fill_pot(engine: &mut KitchenEngine, chef: Entity) {
        let onions = engine.kitchen.crate_for(&engine.world, Onion).unwrap();
        let board = engine.station(StationKind::ChoppingBoard).unwrap();
        let hob = engine.station(StationKind::Hob).unwrap();

        for _ in 0..3 {
            assert!(engine.apply(chef, ChefCommand::MoveToward(onions)));
            assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));
            assert!(engine.apply(chef, ChefCommand::MoveToward(board)));
            assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));
            assert!(engine.apply(chef, ChefCommand::Interact));
            run(engine, 1.0);
            assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));
            assert!(engine.apply(chef, ChefCommand::MoveToward(hob)));
            assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = KitchenEngine::soup_kitchen();
        assert_eq!(engine.phase(), SessionPhase::NotStarted);
        assert_eq!(engine.sim_time(), 0.0);
        assert_eq!(engine.kitchen.chefs.len(), 2);
    }

    #[test]
    fn test_commands_ignored_until_started() {
        let mut engine = KitchenEngine::soup_kitchen();
        let chef = engine.chef(0).unwrap();
        let hob = engine.station(StationKind::Hob).unwrap();
        assert!(!engine.apply(chef, ChefCommand::MoveToward(hob)));
        engine.update(10.0);
        assert_eq!(engine.sim_time(), 0.0);
    }

    #[test]
    fn test_full_soup_service() {
        let mut engine = KitchenEngine::new(quick_onion_level(), &KitchenLayout::default());
        engine.start_level();
        let chef = engine.chef(0).unwrap();

        fill_pot(&mut engine, chef);
        run(&mut engine, 6.0);
        let events = engine.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::CookFinished { .. })));

        let counter = engine.station(StationKind::Countertop).unwrap();
        let hob = engine.station(StationKind::Hob).unwrap();
        let hatch = engine.station(StationKind::DeliverCountertop).unwrap();
        assert!(engine.apply(chef, ChefCommand::MoveToward(counter)));
        assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));
        let plate = engine.held_by(chef).unwrap();
        assert!(engine.apply(chef, ChefCommand::MoveToward(hob)));
        assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));
        assert_eq!(engine.held_by(chef), Some(plate));
        assert!(engine.apply(chef, ChefCommand::MoveToward(hatch)));
        assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));

        // 9 seconds of a 50 second order: tip 6
        assert_eq!(engine.score(), 26);
        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::ScoreUpdated { score: 26, delta: 26 }));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::OrderDelivered { tip: 6, .. })));

        // The plate comes back dirty
        assert_eq!(engine.returns.len(), 1);
        run(&mut engine, 3.0);
        let tray = engine.station(StationKind::DishTray).unwrap();
        assert_eq!(
            engine.world.get::<&DishTray>(tray).unwrap().pile,
            vec![plate]
        );
    }

    #[test]
    fn test_hand_plated_onions_never_score_as_soup() {
        let mut engine = KitchenEngine::new(quick_onion_level(), &KitchenLayout::default());
        engine.start_level();
        let chef = engine.chef(0).unwrap();
        let onions = engine.kitchen.crate_for(&engine.world, Onion).unwrap();
        let board = engine.station(StationKind::ChoppingBoard).unwrap();
        let counter = engine.station(StationKind::Countertop).unwrap();
        let trash = engine.station(StationKind::Trash).unwrap();
        let hatch = engine.station(StationKind::DeliverCountertop).unwrap();

        for placed in [true, true, false] {
            assert!(engine.apply(chef, ChefCommand::MoveToward(onions)));
            assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));
            assert!(engine.apply(chef, ChefCommand::MoveToward(board)));
            assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));
            assert!(engine.apply(chef, ChefCommand::Interact));
            run(&mut engine, 1.0);
            assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));
            assert!(engine.apply(chef, ChefCommand::MoveToward(counter)));
            assert_eq!(engine.apply(chef, ChefCommand::PickUpOrDrop), placed);
        }

        // Bin the third onion and serve what made it onto the plate
        assert!(engine.apply(chef, ChefCommand::MoveToward(trash)));
        assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));
        assert!(engine.apply(chef, ChefCommand::MoveToward(counter)));
        assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));
        let plate = engine.held_by(chef).unwrap();
        assert_eq!(
            engine.world.get::<&Plate>(plate).unwrap().kinds(),
            vec![Onion, Onion]
        );
        assert!(engine.apply(chef, ChefCommand::MoveToward(hatch)));
        assert!(engine.apply(chef, ChefCommand::PickUpOrDrop));

        assert_eq!(engine.score(), 0);
        assert_eq!(engine.orders.outstanding(), 1);
    }

    #[test]
    fn test_expired_order_costs_points() {
        let mut level = quick_onion_level();
        level.order_time_limit_seconds = 10.0;
        let mut engine = KitchenEngine::new(level, &KitchenLayout::default());
        engine.start_level();

        run(&mut engine, 10.0);
        assert_eq!(engine.score(), -10);
        // Still outstanding, countdown restarted
        assert_eq!(engine.orders.outstanding(), 1);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut engine = KitchenEngine::new(quick_onion_level(), &KitchenLayout::default());
        engine.start_level();
        let chef = engine.chef(0).unwrap();
        let hob = engine.station(StationKind::Hob).unwrap();

        assert!(engine.pause());
        run(&mut engine, 30.0);
        assert_eq!(engine.time_remaining(), 180);
        assert!(!engine.apply(chef, ChefCommand::MoveToward(hob)));

        assert!(engine.resume());
        run(&mut engine, 2.0);
        assert_eq!(engine.time_remaining(), 178);
    }

    #[test]
    fn test_time_over() {
        let mut level = quick_onion_level();
        level.duration_seconds = 5;
        let mut engine = KitchenEngine::new(level, &KitchenLayout::default());
        engine.start_level();
        run(&mut engine, 6.0);

        assert_eq!(engine.phase(), SessionPhase::TimeOver);
        assert_eq!(engine.session.stars, Some(0));
        assert_eq!(engine.orders.outstanding(), 0);
        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::TimeOver { score: 0, stars: 0 }));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::CountdownTick { .. }))
                .count(),
            5
        );
        let chef = engine.chef(0).unwrap();
        assert!(!engine.apply(chef, ChefCommand::Leave));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut engine = KitchenEngine::new(quick_onion_level(), &KitchenLayout::default());
        engine.start_level();
        let chef = engine.chef(0).unwrap();
        fill_pot(&mut engine, chef);
        run(&mut engine, 1.0);

        let mut save_buffer = Vec::new();
        engine.save(&mut save_buffer).expect("Save failed");

        let mut loaded = KitchenEngine::soup_kitchen();
        loaded.load(&save_buffer[..]).expect("Load failed");

        assert!((loaded.sim_time() - engine.sim_time()).abs() < 0.001);
        assert_eq!(loaded.level.name, "Quick onions");
        assert_eq!(loaded.orders.outstanding(), engine.orders.outstanding());
        assert_eq!(loaded.kitchen.chefs, engine.kitchen.chefs);
        let hob = loaded.station(StationKind::Hob).unwrap();
        let pot = loaded.world.get::<&Station>(hob).unwrap().slot.unwrap();
        let pot_state = loaded.world.get::<&CookingPot>(pot).unwrap();
        assert_eq!(pot_state.ingredients().len(), 3);
        assert!(pot_state.is_on_hob());
    }
}
