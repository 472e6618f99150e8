//! Gameplay events.
//!
//! Systems push events while a tick runs; the caller drains them once per
//! frame and fans them out to whatever presentation it has.

use hecs::Entity;

use galley_logic::burn::BurnStage;
use galley_logic::ingredient::IngredientType;
use galley_logic::order::OrderId;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelStarted { name: String, duration_seconds: u32 },
    OrderSpawned { order: OrderId, name: String },
    /// The order entered its final seconds
    OrderAlert { order: OrderId },
    /// The order ran out; its countdown restarts
    OrderExpired { order: OrderId },
    OrderDelivered { order: OrderId, tip: u32 },
    ScoreUpdated { score: i32, delta: i32 },
    /// Whole seconds left on the level clock
    CountdownTick { seconds_left: u32 },
    TimeOver { score: i32, stars: u8 },
    IngredientChopped { board: Entity, kind: IngredientType },
    CookFinished { pot: Entity },
    BurnStageChanged { pot: Entity, stage: BurnStage },
    /// Periodic pulse while a pot is about to burn
    BurnWarning { pot: Entity, intensity: f32 },
    PotBurned { pot: Entity },
    PlateCleaned { sink: Entity, plate: Entity },
    PlateReturned { plate: Entity },
    /// Something other than a plate was put on the serving hatch
    PlateMissing { station: Entity },
}

/// Per-tick event buffer
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
