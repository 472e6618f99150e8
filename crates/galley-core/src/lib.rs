//! Galley Core - Cooperative Kitchen Simulation Engine
//!
//! An ECS-based simulation of a busy restaurant kitchen: chefs chop
//! ingredients, cook soups that burn if forgotten, wash plates and serve
//! customer orders against the clock.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Chefs, stations, ingredients, pots, plates
//! - **Components**: Pure data attached to entities (Station, Plate, Chef, etc.)
//! - **Systems**: Logic that queries and updates components
//!
//! Timing rules (cook times, the burn timeline, order countdowns, tips)
//! live in `galley-logic`; this crate wires them into a world.
//!
//! # Example
//!
//! ```rust,no_run
//! use galley_core::prelude::*;
//!
//! let mut engine = KitchenEngine::soup_kitchen();
//! engine.start_level();
//!
//! let chef = engine.chef(0).unwrap();
//! let board = engine.station(StationKind::ChoppingBoard).unwrap();
//! engine.apply(chef, ChefCommand::MoveToward(board));
//!
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//!     for event in engine.drain_events() {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod events;
pub mod generation;
pub mod persistence;
pub mod session;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::KitchenEngine;
    pub use crate::events::GameEvent;
    pub use crate::session::SessionPhase;
}
