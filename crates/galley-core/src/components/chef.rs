//! Chef components and the commands a chef can receive.

use hecs::Entity;
use serde::{Deserialize, Serialize};

/// A chef in the kitchen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chef {
    pub name: String,
    /// Item in hand
    pub held: Option<Entity>,
    /// Station or loose item the chef is facing
    pub focus: Option<Entity>,
}

impl Chef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            held: None,
            focus: None,
        }
    }
}

/// Abstract input delivered once per discrete player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChefCommand {
    /// Face a station or a loose item
    MoveToward(Entity),
    /// Walk away from whatever is in focus
    Leave,
    PickUpOrDrop,
    Interact,
}
