//! Chopping system - turns raw ingredients on boards into processed ones

use hecs::{Entity, World};

use crate::components::{ChoppingBoard, Ingredient, Station};
use crate::events::{EventQueue, GameEvent};

/// Start or resume chopping on a board. Returns false if there's nothing
/// raw on the board or a chop is already running.
pub fn start_chopping(world: &mut World, board: Entity) -> bool {
    let slot = match world.get::<&Station>(board) {
        Ok(station) => station.slot,
        Err(_) => return false,
    };
    let Some(item) = slot else {
        log::debug!("Nothing to chop on board {:?}", board);
        return false;
    };
    let process_time = match world.get::<&Ingredient>(item) {
        Ok(ingredient) if ingredient.is_raw() => ingredient.process_time,
        _ => {
            log::debug!("Board {:?} holds nothing raw", board);
            return false;
        }
    };

    match world.get::<&mut ChoppingBoard>(board) {
        Ok(mut state) => state.start(process_time),
        Err(_) => false,
    }
}

/// Pause a running chop, keeping its progress.
pub fn pause_chopping(world: &mut World, board: Entity) {
    if let Ok(mut state) = world.get::<&mut ChoppingBoard>(board) {
        state.pause();
    }
}

/// Advance every active chop by `dt` seconds.
pub fn chopping_system(world: &mut World, dt: f32, events: &mut EventQueue) {
    let mut finished = Vec::new();

    for (entity, (station, board)) in world.query_mut::<(&Station, &mut ChoppingBoard)>() {
        if !board.chopping {
            continue;
        }
        let done = board.chop.as_mut().map(|t| t.advance(dt)).unwrap_or(true);
        if done {
            board.finish();
            if let Some(item) = station.slot {
                finished.push((entity, item));
            }
        }
    }

    for (board, item) in finished {
        if let Ok(mut ingredient) = world.get::<&mut Ingredient>(item) {
            ingredient.mark_processed();
            log::debug!("Chopped {} on board {:?}", ingredient.kind, board);
            events.push(GameEvent::IngredientChopped {
                board,
                kind: ingredient.kind,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::StationKind;
    use galley_logic::ingredient::{IngredientSpec, IngredientType};

    fn board_with_onion(world: &mut World) -> (Entity, Entity) {
        let mut spec = IngredientSpec::new(IngredientType::Onion);
        spec.process_time = 2.0;
        let onion = world.spawn((Ingredient::raw(spec),));
        let mut station = Station::new(StationKind::ChoppingBoard);
        station.slot = Some(onion);
        let board = world.spawn((station, ChoppingBoard::default()));
        (board, onion)
    }

    #[test]
    fn test_chop_completes() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let (board, onion) = board_with_onion(&mut world);

        // Nothing happens until someone interacts
        chopping_system(&mut world, 5.0, &mut events);
        assert!(world.get::<&Ingredient>(onion).unwrap().is_raw());

        assert!(start_chopping(&mut world, board));
        chopping_system(&mut world, 1.0, &mut events);
        chopping_system(&mut world, 1.0, &mut events);

        assert!(world.get::<&Ingredient>(onion).unwrap().is_processed());
        assert!(!world.get::<&ChoppingBoard>(board).unwrap().is_locked());
        assert_eq!(events.len(), 1);

        // Already processed: interacting again does nothing
        assert!(!start_chopping(&mut world, board));
    }

    #[test]
    fn test_pause_preserves_progress() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let (board, onion) = board_with_onion(&mut world);

        start_chopping(&mut world, board);
        chopping_system(&mut world, 1.5, &mut events);
        pause_chopping(&mut world, board);
        chopping_system(&mut world, 10.0, &mut events);
        {
            let state = world.get::<&ChoppingBoard>(board).unwrap();
            assert_eq!(state.chop.unwrap().elapsed, 1.5);
            assert!(state.is_locked());
        }

        start_chopping(&mut world, board);
        chopping_system(&mut world, 0.5, &mut events);
        assert!(world.get::<&Ingredient>(onion).unwrap().is_processed());
    }
}
