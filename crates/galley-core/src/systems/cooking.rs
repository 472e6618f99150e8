//! Cooking system - heats pots sitting on hobs
//!
//! Pots off the heat are skipped by [`CookingPot::advance`] itself, so the
//! system just ticks every pot and translates what happened into events.

use hecs::World;

use crate::components::CookingPot;
use crate::events::{EventQueue, GameEvent};

/// Advance cooking and burning for every pot by `dt` seconds.
pub fn cooking_system(world: &mut World, dt: f32, events: &mut EventQueue) {
    for (pot, state) in world.query_mut::<&mut CookingPot>() {
        let step = state.advance(dt);

        if step.cook_finished {
            log::debug!("Pot {:?} finished cooking", pot);
            events.push(GameEvent::CookFinished { pot });
        }
        if let Some(stage) = step.burn.entered {
            events.push(GameEvent::BurnStageChanged { pot, stage });
        }
        if let Some(intensity) = step.burn.pulse {
            events.push(GameEvent::BurnWarning { pot, intensity });
        }
        if step.burn.burned {
            log::info!("Pot {:?} burned", pot);
            events.push(GameEvent::PotBurned { pot });
        }
    }
}
