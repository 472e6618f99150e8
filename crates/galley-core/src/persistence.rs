//! Save/Load functionality for kitchen snapshots
//!
//! Uses bincode for compact binary serialization of the whole kitchen.
//! Entity handles are stored as raw bits and restored with
//! `World::spawn_at`, so every cross-reference between components
//! (held items, station slots, plate piles) survives a round trip.

use hecs::{Entity, EntityBuilder, World};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use thiserror::Error;

use galley_logic::level::LevelConfig;

use crate::components::*;
use crate::generation::KitchenEntities;
use crate::session::GameSession;
use crate::systems::{OrderManager, PlateReturns};

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the kitchen
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Seconds since the level started
    pub sim_time: f64,
    pub level: LevelConfig,
    pub session: GameSession,
    pub orders: OrderManager,
    pub returns: PlateReturns,
    pub kitchen: KitchenEntities,
    /// All entities with their components
    pub entities: Vec<SerializableEntity>,
}

/// All possible components for an entity, serialized as optionals
#[derive(Serialize, Deserialize, Default)]
pub struct SerializableEntity {
    /// Handle bits at save time
    pub id: u64,

    // Items
    pub ingredient: Option<Ingredient>,
    pub pot: Option<CookingPot>,
    pub plate: Option<Plate>,
    pub on_floor: bool,

    // Stations
    pub station: Option<Station>,
    pub chopping_board: Option<ChoppingBoard>,
    pub sink: Option<Sink>,
    pub dish_tray: Option<DishTray>,
    pub ingredient_crate: Option<IngredientCrate>,

    pub chef: Option<Chef>,
}

/// Extract all entities from a world into serializable form
fn serialize_entities(world: &World) -> Vec<SerializableEntity> {
    world
        .iter()
        .map(|entity_ref| SerializableEntity {
            id: entity_ref.entity().to_bits().get(),
            ingredient: entity_ref.get::<&Ingredient>().map(|c| *c),
            pot: entity_ref.get::<&CookingPot>().map(|c| (*c).clone()),
            plate: entity_ref.get::<&Plate>().map(|c| (*c).clone()),
            on_floor: entity_ref.has::<OnFloor>(),
            station: entity_ref.get::<&Station>().map(|c| (*c).clone()),
            chopping_board: entity_ref.get::<&ChoppingBoard>().map(|c| (*c).clone()),
            sink: entity_ref.get::<&Sink>().map(|c| (*c).clone()),
            dish_tray: entity_ref.get::<&DishTray>().map(|c| (*c).clone()),
            ingredient_crate: entity_ref.get::<&IngredientCrate>().map(|c| *c),
            chef: entity_ref.get::<&Chef>().map(|c| (*c).clone()),
        })
        .collect()
}

/// Rebuild a world from serialized entities, keeping their handles
fn deserialize_entities(world: &mut World, entities: Vec<SerializableEntity>) -> Result<(), SaveError> {
    for se in entities {
        let handle = Entity::from_bits(se.id).ok_or(SaveError::MissingEntity(se.id))?;
        let mut builder = EntityBuilder::new();

        if let Some(c) = se.ingredient {
            builder.add(c);
        }
        if let Some(c) = se.pot {
            builder.add(c);
        }
        if let Some(c) = se.plate {
            builder.add(c);
        }
        if se.on_floor {
            builder.add(OnFloor);
        }
        if let Some(c) = se.station {
            builder.add(c);
        }
        if let Some(c) = se.chopping_board {
            builder.add(c);
        }
        if let Some(c) = se.sink {
            builder.add(c);
        }
        if let Some(c) = se.dish_tray {
            builder.add(c);
        }
        if let Some(c) = se.ingredient_crate {
            builder.add(c);
        }
        if let Some(c) = se.chef {
            builder.add(c);
        }

        world.spawn_at(handle, builder.build());
    }
    Ok(())
}

/// Every handle stored inside a component must point at a live entity.
fn check_references(world: &World, kitchen: &KitchenEntities, returns: &PlateReturns) -> Result<(), SaveError> {
    let mut refs: Vec<Entity> = Vec::new();
    refs.extend(&kitchen.chefs);
    refs.extend(&kitchen.stations);
    refs.extend(returns.iter().map(|r| r.plate));

    for (_, chef) in world.query::<&Chef>().iter() {
        refs.extend(chef.held);
        refs.extend(chef.focus);
    }
    for (_, station) in world.query::<&Station>().iter() {
        refs.extend(station.slot);
    }
    for (_, plate) in world.query::<&Plate>().iter() {
        refs.extend(&plate.stack);
    }
    for (_, sink) in world.query::<&Sink>().iter() {
        refs.extend(&sink.dirty);
        refs.extend(&sink.clean);
    }
    for (_, tray) in world.query::<&DishTray>().iter() {
        refs.extend(&tray.pile);
    }

    match refs.into_iter().find(|e| !world.contains(*e)) {
        Some(missing) => Err(SaveError::MissingEntity(missing.to_bits().get())),
        None => Ok(()),
    }
}

/// Save the complete kitchen to a writer
#[allow(clippy::too_many_arguments)]
pub fn save_kitchen<W: Write>(
    writer: W,
    world: &World,
    sim_time: f64,
    level: &LevelConfig,
    session: &GameSession,
    orders: &OrderManager,
    returns: &PlateReturns,
    kitchen: &KitchenEntities,
) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        sim_time,
        level: level.clone(),
        session: session.clone(),
        orders: orders.clone(),
        returns: returns.clone(),
        kitchen: kitchen.clone(),
        entities: serialize_entities(world),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a kitchen from a reader
pub fn load_kitchen<R: Read>(reader: R) -> Result<LoadedKitchen, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let mut world = World::new();
    deserialize_entities(&mut world, save_data.entities)?;
    check_references(&world, &save_data.kitchen, &save_data.returns)?;

    Ok(LoadedKitchen {
        world,
        sim_time: save_data.sim_time,
        level: save_data.level,
        session: save_data.session,
        orders: save_data.orders,
        returns: save_data.returns,
        kitchen: save_data.kitchen,
    })
}

/// Result of loading a kitchen
pub struct LoadedKitchen {
    pub world: World,
    pub sim_time: f64,
    pub level: LevelConfig,
    pub session: GameSession,
    pub orders: OrderManager,
    pub returns: PlateReturns,
    pub kitchen: KitchenEntities,
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("snapshot references missing entity {0:#x}")]
    MissingEntity(u64),
}
