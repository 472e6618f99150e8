//! Component definitions for the kitchen ECS.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior - that lives in systems.

mod chef;
mod items;
mod stations;

pub use chef::*;
pub use items::*;
pub use stations::*;
