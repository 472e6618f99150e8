//! Cleaning system - sinks washing dirty plates one at a time

use hecs::{Entity, World};

use crate::components::{Plate, Sink};
use crate::events::{EventQueue, GameEvent};

/// Start or resume washing at a sink.
pub fn start_cleaning(world: &mut World, sink: Entity) -> bool {
    match world.get::<&mut Sink>(sink) {
        Ok(mut state) => state.start(),
        Err(_) => false,
    }
}

pub fn pause_cleaning(world: &mut World, sink: Entity) {
    if let Ok(mut state) = world.get::<&mut Sink>(sink) {
        state.pause();
    }
}

/// Advance every washing sink by `dt` seconds. When a plate is done the
/// next dirty one starts straight away.
pub fn cleaning_system(world: &mut World, dt: f32, events: &mut EventQueue) {
    let mut washed = Vec::new();

    for (entity, sink) in world.query_mut::<&mut Sink>() {
        if !sink.cleaning {
            continue;
        }
        if !sink.timer.advance(dt) {
            continue;
        }
        sink.timer.reset();
        if let Some(plate) = sink.dirty.pop() {
            sink.clean.push(plate);
            washed.push((entity, plate));
        }
        if sink.dirty.is_empty() {
            sink.cleaning = false;
        }
    }

    for (sink, plate) in washed {
        if let Ok(mut state) = world.get::<&mut Plate>(plate) {
            state.clean = true;
        }
        events.push(GameEvent::PlateCleaned { sink, plate });
    }
}
