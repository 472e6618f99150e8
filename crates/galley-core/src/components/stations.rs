//! Station components: counters, hobs, boards, sinks and the rest of the
//! fixed kitchen furniture.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use galley_logic::ingredient::IngredientType;
use galley_logic::timer::ProgressTimer;

/// Station role, deciding how drops and pickups are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationKind {
    /// Holds any one item
    Countertop,
    /// Holds a pot and heats it
    Hob,
    /// Turns a raw ingredient into a processed one
    ChoppingBoard,
    /// Washes dirty plates
    Sink,
    /// Where served plates come back dirty
    DishTray,
    /// Empties pots and plates, destroys ingredients
    Trash,
    /// Hands out fresh ingredients of one type
    IngredientCrate,
    /// Serving hatch
    DeliverCountertop,
}

impl StationKind {
    pub fn name(&self) -> &'static str {
        match self {
            StationKind::Countertop => "Countertop",
            StationKind::Hob => "Hob",
            StationKind::ChoppingBoard => "Chopping Board",
            StationKind::Sink => "Sink",
            StationKind::DishTray => "Dish Tray",
            StationKind::Trash => "Trash",
            StationKind::IngredientCrate => "Ingredient Crate",
            StationKind::DeliverCountertop => "Deliver Countertop",
        }
    }

    /// Stations with a single item slot.
    pub fn has_slot(&self) -> bool {
        matches!(
            self,
            StationKind::Countertop
                | StationKind::Hob
                | StationKind::ChoppingBoard
                | StationKind::IngredientCrate
        )
    }
}

/// Station component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub kind: StationKind,
    /// Item currently sitting on the station
    pub slot: Option<Entity>,
}

impl Station {
    pub fn new(kind: StationKind) -> Self {
        Self { kind, slot: None }
    }
}

/// Chop progress for a chopping board.
///
/// A chop is "underway" from the first interact until it completes; while
/// underway the ingredient can't be taken off the board, even if the chef
/// walked away and the chop is paused.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoppingBoard {
    pub chop: Option<ProgressTimer>,
    pub chopping: bool,
}

impl ChoppingBoard {
    pub fn is_locked(&self) -> bool {
        self.chop.is_some()
    }

    pub fn progress(&self) -> f32 {
        self.chop.map(|t| t.progress()).unwrap_or(0.0)
    }

    /// Start a new chop or resume a paused one. Ignored while already
    /// chopping.
    pub fn start(&mut self, process_time: f32) -> bool {
        if self.chopping {
            return false;
        }
        if self.chop.is_none() {
            self.chop = Some(ProgressTimer::new(process_time));
        }
        self.chopping = true;
        true
    }

    pub fn pause(&mut self) {
        self.chopping = false;
    }

    pub fn finish(&mut self) {
        self.chop = None;
        self.chopping = false;
    }
}

/// Sink with its two plate piles. The top (last) dirty plate is the one
/// being washed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sink {
    pub dirty: Vec<Entity>,
    pub clean: Vec<Entity>,
    pub timer: ProgressTimer,
    pub cleaning: bool,
}

impl Sink {
    pub fn new(cleaning_time: f32) -> Self {
        Self {
            dirty: Vec::new(),
            clean: Vec::new(),
            timer: ProgressTimer::new(cleaning_time),
            cleaning: false,
        }
    }

    /// Start or resume washing. Nothing to do without dirty plates.
    pub fn start(&mut self) -> bool {
        if self.cleaning || self.dirty.is_empty() {
            return false;
        }
        self.cleaning = true;
        true
    }

    pub fn pause(&mut self) {
        self.cleaning = false;
    }
}

/// Pile of returned dirty plates, bottom first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishTray {
    pub pile: Vec<Entity>,
}

/// Endless supply of one ingredient type
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IngredientCrate {
    pub kind: IngredientType,
}
