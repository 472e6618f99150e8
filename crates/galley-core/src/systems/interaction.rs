//! Interaction system - chefs picking up, dropping and using things
//!
//! Every action is a synchronous request that a station or item may
//! refuse. A refused action changes nothing.

use hecs::{Entity, World};

use galley_logic::level::LevelConfig;

use crate::components::*;
use crate::events::{EventQueue, GameEvent};
use crate::systems::{pause_chopping, pause_cleaning, start_chopping, start_cleaning};

/// What happened to an item a chef tried to put down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing changed; the chef keeps the item
    Refused,
    /// Contents moved, but the chef keeps the container
    Transferred,
    /// The item now sits on (or in) the station
    Placed,
    /// The item was absorbed into a container or destroyed
    Consumed,
    /// A plate went onto the serving hatch
    Delivered(Entity),
}

impl DropOutcome {
    /// Did the item leave the chef's hands?
    pub fn releases_item(&self) -> bool {
        matches!(
            self,
            DropOutcome::Placed | DropOutcome::Consumed | DropOutcome::Delivered(_)
        )
    }
}

/// Result of a chef command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Ignored,
    Done,
    /// A plate was served and must be matched against orders
    Delivered(Entity),
}

impl CommandOutcome {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, CommandOutcome::Ignored)
    }
}

fn station_state(world: &World, station: Entity) -> Option<(StationKind, Option<Entity>)> {
    world
        .get::<&Station>(station)
        .ok()
        .map(|s| (s.kind, s.slot))
}

fn set_slot(world: &mut World, station: Entity, item: Option<Entity>) {
    if let Ok(mut s) = world.get::<&mut Station>(station) {
        s.slot = item;
    }
}

fn place(world: &mut World, station: Entity, item: Entity) -> DropOutcome {
    set_slot(world, station, Some(item));
    let _ = world.remove_one::<OnFloor>(item);
    DropOutcome::Placed
}

fn refuse(station: Entity, reason: &str) -> DropOutcome {
    log::debug!("Station {:?} refused drop: {}", station, reason);
    DropOutcome::Refused
}

/// Take whatever a station hands out. Requires empty hands.
pub fn pick_up_from_station(
    world: &mut World,
    station: Entity,
    level: &LevelConfig,
) -> Option<Entity> {
    let (kind, slot) = station_state(world, station)?;

    match kind {
        StationKind::Countertop => {
            set_slot(world, station, None);
            slot
        }
        StationKind::Hob => {
            let pot = slot?;
            if let Ok(mut state) = world.get::<&mut CookingPot>(pot) {
                state.set_on_hob(false);
            }
            set_slot(world, station, None);
            Some(pot)
        }
        StationKind::ChoppingBoard => {
            let locked = world
                .get::<&ChoppingBoard>(station)
                .map(|b| b.is_locked())
                .unwrap_or(false);
            if locked {
                log::debug!("Board {:?} is locked while chopping", station);
                return None;
            }
            set_slot(world, station, None);
            slot
        }
        StationKind::IngredientCrate => {
            if slot.is_some() {
                set_slot(world, station, None);
                return slot;
            }
            let crate_kind = world.get::<&IngredientCrate>(station).ok()?.kind;
            let spec = level.ingredient_spec(crate_kind);
            Some(world.spawn((Ingredient::raw(spec),)))
        }
        StationKind::Sink => world.get::<&mut Sink>(station).ok()?.clean.pop(),
        StationKind::DishTray => {
            let mut pile = {
                let mut tray = world.get::<&mut DishTray>(station).ok()?;
                std::mem::take(&mut tray.pile)
            };
            if pile.is_empty() {
                return None;
            }
            let bottom = pile.remove(0);
            if let Ok(mut plate) = world.get::<&mut Plate>(bottom) {
                plate.stack.extend(pile);
            }
            Some(bottom)
        }
        StationKind::Trash | StationKind::DeliverCountertop => None,
    }
}

/// Offer a held item to a station.
pub fn drop_into_station(
    world: &mut World,
    station: Entity,
    item: Entity,
    events: &mut EventQueue,
) -> DropOutcome {
    let Some((kind, slot)) = station_state(world, station) else {
        return DropOutcome::Refused;
    };
    let item_type = item_kind(world, item);

    match kind {
        StationKind::Countertop | StationKind::IngredientCrate => match slot {
            Some(occupant) => drop_onto_item(world, occupant, item),
            None => place(world, station, item),
        },
        StationKind::Hob => match (slot, item_type) {
            (Some(pot), _) => drop_onto_item(world, pot, item),
            (None, Some(ItemKind::Pot)) => {
                if let Ok(mut state) = world.get::<&mut CookingPot>(item) {
                    state.set_on_hob(true);
                }
                place(world, station, item)
            }
            (None, _) => refuse(station, "hobs only take pots"),
        },
        StationKind::ChoppingBoard => {
            if slot.is_some() {
                return refuse(station, "board is occupied");
            }
            let raw = world
                .get::<&Ingredient>(item)
                .map(|i| i.is_raw())
                .unwrap_or(false);
            if !raw {
                return refuse(station, "only raw ingredients can be chopped");
            }
            if let Ok(mut board) = world.get::<&mut ChoppingBoard>(station) {
                board.finish();
            }
            place(world, station, item)
        }
        StationKind::Sink => {
            let pile = match world.get::<&mut Plate>(item) {
                Ok(mut plate) if !plate.clean && plate.is_empty() => std::mem::take(&mut plate.stack),
                _ => return refuse(station, "sinks only take empty dirty plates"),
            };
            if let Ok(mut sink) = world.get::<&mut Sink>(station) {
                sink.dirty.extend(pile.iter().rev().copied());
                sink.dirty.push(item);
            }
            DropOutcome::Placed
        }
        StationKind::DishTray => refuse(station, "dish tray only receives returned plates"),
        StationKind::Trash => trash(world, station, item),
        StationKind::DeliverCountertop => match item_type {
            Some(ItemKind::Plate) => {
                let pile = world
                    .get::<&Plate>(item)
                    .map(|p| !p.stack.is_empty())
                    .unwrap_or(true);
                if pile {
                    return refuse(station, "can't serve a pile of plates");
                }
                DropOutcome::Delivered(item)
            }
            Some(ItemKind::Ingredient) => {
                events.push(GameEvent::PlateMissing { station });
                refuse(station, "ingredients must be served on a plate")
            }
            _ => refuse(station, "only plates can be served"),
        },
    }
}

fn trash(world: &mut World, station: Entity, item: Entity) -> DropOutcome {
    match item_kind(world, item) {
        Some(ItemKind::Ingredient) => {
            let _ = world.despawn(item);
            DropOutcome::Consumed
        }
        Some(ItemKind::Pot) => match world.get::<&mut CookingPot>(item) {
            Ok(mut pot) if !pot.is_empty() => {
                pot.empty();
                DropOutcome::Transferred
            }
            _ => refuse(station, "pot is already empty"),
        },
        Some(ItemKind::Plate) => match world.get::<&mut Plate>(item) {
            Ok(mut plate) if !plate.is_empty() => {
                plate.ingredients.clear();
                DropOutcome::Transferred
            }
            _ => refuse(station, "plate is already empty"),
        },
        None => DropOutcome::Refused,
    }
}

/// Offer a held item to an item sitting on a station (a pot on a hob, a
/// plate on a counter).
pub fn drop_onto_item(world: &mut World, target: Entity, item: Entity) -> DropOutcome {
    match (item_kind(world, target), item_kind(world, item)) {
        (Some(ItemKind::Pot), Some(ItemKind::Ingredient)) => add_to_pot(world, target, item),
        (Some(ItemKind::Pot), Some(ItemKind::Plate)) => transfer_soup(world, item, target),
        (Some(ItemKind::Plate), Some(ItemKind::Pot)) => transfer_soup(world, target, item),
        (Some(ItemKind::Plate), Some(ItemKind::Ingredient)) => add_to_plate(world, target, item),
        (Some(ItemKind::Plate), Some(ItemKind::Plate)) => plate_to_plate(world, item, target),
        _ => {
            log::debug!("{:?} can't go onto {:?}", item, target);
            DropOutcome::Refused
        }
    }
}

fn add_to_pot(world: &mut World, pot: Entity, item: Entity) -> DropOutcome {
    let ingredient = match world.get::<&Ingredient>(item) {
        Ok(i) => *i,
        Err(_) => return DropOutcome::Refused,
    };
    let added = world
        .get::<&mut CookingPot>(pot)
        .map(|mut p| p.add_ingredient(ingredient))
        .unwrap_or(false);
    if !added {
        log::debug!("Pot {:?} refused {:?} {}", pot, ingredient.status, ingredient.kind);
        return DropOutcome::Refused;
    }
    let _ = world.despawn(item);
    DropOutcome::Consumed
}

fn add_to_plate(world: &mut World, plate: Entity, item: Entity) -> DropOutcome {
    let ingredient = match world.get::<&Ingredient>(item) {
        Ok(i) => *i,
        Err(_) => return DropOutcome::Refused,
    };
    let added = match world.get::<&mut Plate>(plate) {
        Ok(mut p) if p.accepts_ingredient(&ingredient) => {
            p.ingredients.push(ingredient);
            true
        }
        _ => false,
    };
    if !added {
        log::debug!("Plate {:?} refused {}", plate, ingredient.kind);
        return DropOutcome::Refused;
    }
    let _ = world.despawn(item);
    DropOutcome::Consumed
}

/// Move soup between a plate and a pot, whichever way makes sense: a
/// cooked soup pours back into an empty pot, a finished pot fills a
/// clean empty plate.
fn transfer_soup(world: &mut World, plate: Entity, pot: Entity) -> DropOutcome {
    let (Ok(mut plate_state), Ok(mut pot_state)) = (
        world.get::<&mut Plate>(plate),
        world.get::<&mut CookingPot>(pot),
    ) else {
        return DropOutcome::Refused;
    };

    if pot_state.is_empty() && plate_state.has_cooked_soup() {
        let soup = std::mem::take(&mut plate_state.ingredients);
        return match pot_state.pour_in_soup(soup) {
            Ok(()) => DropOutcome::Transferred,
            Err(soup) => {
                plate_state.ingredients = soup;
                DropOutcome::Refused
            }
        };
    }

    if !plate_state.is_ready_for_soup() {
        log::debug!("Plate {:?} must be clean and empty for soup", plate);
        return DropOutcome::Refused;
    }
    match pot_state.take_soup() {
        Some(soup) => {
            plate_state.ingredients = soup;
            DropOutcome::Transferred
        }
        None => {
            log::debug!("Pot {:?} has no servable soup", pot);
            DropOutcome::Refused
        }
    }
}

fn plate_to_plate(world: &mut World, from: Entity, to: Entity) -> DropOutcome {
    let contents = match world.get::<&Plate>(from) {
        Ok(p) if !p.is_empty() => p.ingredients.clone(),
        _ => return DropOutcome::Refused,
    };
    match world.get::<&mut Plate>(to) {
        Ok(mut p) if p.is_ready_for_soup() => p.ingredients = contents,
        _ => return DropOutcome::Refused,
    }
    if let Ok(mut p) = world.get::<&mut Plate>(from) {
        p.ingredients.clear();
    }
    DropOutcome::Transferred
}

/// Start the station's timed activity (chopping or washing).
pub fn interact_with_station(world: &mut World, station: Entity) -> bool {
    match station_state(world, station) {
        Some((StationKind::ChoppingBoard, _)) => start_chopping(world, station),
        Some((StationKind::Sink, _)) => start_cleaning(world, station),
        _ => false,
    }
}

fn is_focusable(world: &World, target: Entity) -> bool {
    world
        .entity(target)
        .map(|e| e.has::<Station>() || e.has::<OnFloor>())
        .unwrap_or(false)
}

/// Change a chef's focus, pausing whatever they walked away from unless
/// another chef is still working it.
fn set_focus(world: &mut World, chef: Entity, focus: Option<Entity>) {
    let previous = match world.get::<&mut Chef>(chef) {
        Ok(mut c) => std::mem::replace(&mut c.focus, focus),
        Err(_) => return,
    };
    let Some(old) = previous else { return };
    if Some(old) == focus {
        return;
    }
    let still_worked = world
        .query::<&Chef>()
        .iter()
        .any(|(_, c)| c.focus == Some(old));
    if !still_worked {
        pause_chopping(world, old);
        pause_cleaning(world, old);
    }
}

fn set_held(world: &mut World, chef: Entity, item: Option<Entity>) {
    if let Ok(mut c) = world.get::<&mut Chef>(chef) {
        c.held = item;
    }
}

/// Carry out one chef command.
pub fn apply_command(
    world: &mut World,
    chef: Entity,
    command: ChefCommand,
    level: &LevelConfig,
    events: &mut EventQueue,
) -> CommandOutcome {
    let (held, focus) = match world.get::<&Chef>(chef) {
        Ok(c) => (c.held, c.focus),
        Err(_) => {
            log::warn!("Command {:?} for unknown chef {:?}", command, chef);
            return CommandOutcome::Ignored;
        }
    };

    match command {
        ChefCommand::MoveToward(target) => {
            if !is_focusable(world, target) {
                log::debug!("Chef {:?} can't focus {:?}", chef, target);
                return CommandOutcome::Ignored;
            }
            set_focus(world, chef, Some(target));
            CommandOutcome::Done
        }
        ChefCommand::Leave => {
            set_focus(world, chef, None);
            CommandOutcome::Done
        }
        ChefCommand::Interact => match focus {
            Some(station) if interact_with_station(world, station) => CommandOutcome::Done,
            _ => CommandOutcome::Ignored,
        },
        ChefCommand::PickUpOrDrop => match held {
            None => {
                let picked = match focus {
                    Some(target) if world.get::<&OnFloor>(target).is_ok() => {
                        let _ = world.remove_one::<OnFloor>(target);
                        set_focus(world, chef, None);
                        Some(target)
                    }
                    Some(target) => pick_up_from_station(world, target, level),
                    None => None,
                };
                match picked {
                    Some(item) => {
                        set_held(world, chef, Some(item));
                        CommandOutcome::Done
                    }
                    None => CommandOutcome::Ignored,
                }
            }
            Some(item) => {
                let station = focus.filter(|f| world.get::<&Station>(*f).is_ok());
                let Some(station) = station else {
                    let _ = world.insert_one(item, OnFloor);
                    set_held(world, chef, None);
                    return CommandOutcome::Done;
                };
                let outcome = drop_into_station(world, station, item, events);
                if outcome.releases_item() {
                    set_held(world, chef, None);
                }
                match outcome {
                    DropOutcome::Refused => CommandOutcome::Ignored,
                    DropOutcome::Delivered(plate) => CommandOutcome::Delivered(plate),
                    _ => CommandOutcome::Done,
                }
            }
        },
    }
}
