//! Kitchen generation - builds stations, chefs and starting items

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use galley_logic::ingredient::IngredientType;
use galley_logic::level::LevelConfig;

use crate::components::*;

/// Item placed on a station when the kitchen is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartingItem {
    Pot,
    CleanPlate,
    DirtyPlate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSpec {
    pub kind: StationKind,
    /// Crate contents; required for ingredient crates
    #[serde(default)]
    pub ingredient: Option<IngredientType>,
    #[serde(default)]
    pub holds: Option<StartingItem>,
}

impl StationSpec {
    pub fn new(kind: StationKind) -> Self {
        Self {
            kind,
            ingredient: None,
            holds: None,
        }
    }

    pub fn crate_of(kind: IngredientType) -> Self {
        Self {
            ingredient: Some(kind),
            ..Self::new(StationKind::IngredientCrate)
        }
    }

    pub fn holding(mut self, item: StartingItem) -> Self {
        self.holds = Some(item);
        self
    }
}

/// Description of a kitchen to build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenLayout {
    pub chefs: Vec<String>,
    pub stations: Vec<StationSpec>,
}

impl Default for KitchenLayout {
    fn default() -> Self {
        use StationKind::*;

        let mut stations: Vec<StationSpec> = IngredientType::ALL
            .iter()
            .map(|&kind| StationSpec::crate_of(kind))
            .collect();
        stations.extend([
            StationSpec::new(ChoppingBoard),
            StationSpec::new(ChoppingBoard),
            StationSpec::new(Hob).holding(StartingItem::Pot),
            StationSpec::new(Hob).holding(StartingItem::Pot),
            StationSpec::new(Countertop).holding(StartingItem::CleanPlate),
            StationSpec::new(Countertop).holding(StartingItem::CleanPlate),
            StationSpec::new(Countertop).holding(StartingItem::CleanPlate),
            StationSpec::new(Countertop),
            StationSpec::new(Sink),
            StationSpec::new(DishTray),
            StationSpec::new(Trash),
            StationSpec::new(DeliverCountertop),
        ]);

        Self {
            chefs: vec!["Ada".to_string(), "Bruno".to_string()],
            stations,
        }
    }
}

/// Entities created for a kitchen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KitchenEntities {
    pub chefs: Vec<Entity>,
    pub stations: Vec<Entity>,
}

impl KitchenEntities {
    /// Every station of a kind, in layout order.
    pub fn stations_of(&self, world: &World, kind: StationKind) -> Vec<Entity> {
        self.stations
            .iter()
            .copied()
            .filter(|&e| {
                world
                    .get::<&Station>(e)
                    .map(|s| s.kind == kind)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// First station of a kind.
    pub fn station(&self, world: &World, kind: StationKind) -> Option<Entity> {
        self.stations_of(world, kind).into_iter().next()
    }

    /// The crate handing out a given ingredient.
    pub fn crate_for(&self, world: &World, ingredient: IngredientType) -> Option<Entity> {
        self.stations.iter().copied().find(|&e| {
            world
                .get::<&IngredientCrate>(e)
                .map(|c| c.kind == ingredient)
                .unwrap_or(false)
        })
    }
}

fn spawn_item(world: &mut World, item: StartingItem) -> Entity {
    match item {
        StartingItem::Pot => world.spawn((CookingPot::new(),)),
        StartingItem::CleanPlate => world.spawn((Plate::clean(),)),
        StartingItem::DirtyPlate => world.spawn((Plate::dirty(),)),
    }
}

/// Build a kitchen in the ECS world
pub fn generate_kitchen(world: &mut World, layout: &KitchenLayout, level: &LevelConfig) -> KitchenEntities {
    let mut kitchen = KitchenEntities::default();

    for spec in &layout.stations {
        let station = match spec.kind {
            StationKind::ChoppingBoard => {
                world.spawn((Station::new(spec.kind), ChoppingBoard::default()))
            }
            StationKind::Sink => {
                world.spawn((Station::new(spec.kind), Sink::new(level.sink_cleaning_seconds)))
            }
            StationKind::DishTray => world.spawn((Station::new(spec.kind), DishTray::default())),
            StationKind::IngredientCrate => match spec.ingredient {
                Some(kind) => world.spawn((Station::new(spec.kind), IngredientCrate { kind })),
                None => {
                    log::warn!("Ingredient crate without an ingredient, skipping");
                    continue;
                }
            },
            _ => world.spawn((Station::new(spec.kind),)),
        };

        if let Some(item) = spec.holds {
            if spec.kind.has_slot() {
                let entity = spawn_item(world, item);
                if item == StartingItem::Pot && spec.kind == StationKind::Hob {
                    if let Ok(mut pot) = world.get::<&mut CookingPot>(entity) {
                        pot.set_on_hob(true);
                    }
                }
                if let Ok(mut s) = world.get::<&mut Station>(station) {
                    s.slot = Some(entity);
                }
            } else {
                log::warn!("{} can't hold a starting item", spec.kind.name());
            }
        }

        kitchen.stations.push(station);
    }

    for name in &layout.chefs {
        kitchen.chefs.push(world.spawn((Chef::new(name.clone()),)));
    }

    log::info!(
        "Generated kitchen: {} stations, {} chefs",
        kitchen.stations.len(),
        kitchen.chefs.len()
    );
    kitchen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kitchen_has_every_station() {
        let mut world = World::new();
        let kitchen = generate_kitchen(&mut world, &KitchenLayout::default(), &LevelConfig::soups());

        assert_eq!(kitchen.chefs.len(), 2);
        for kind in [
            StationKind::Countertop,
            StationKind::Hob,
            StationKind::ChoppingBoard,
            StationKind::Sink,
            StationKind::DishTray,
            StationKind::Trash,
            StationKind::IngredientCrate,
            StationKind::DeliverCountertop,
        ] {
            assert!(kitchen.station(&world, kind).is_some(), "missing {:?}", kind);
        }
        for ingredient in IngredientType::ALL {
            assert!(kitchen.crate_for(&world, ingredient).is_some());
        }
    }

    #[test]
    fn test_hob_pots_start_on_heat() {
        let mut world = World::new();
        let kitchen = generate_kitchen(&mut world, &KitchenLayout::default(), &LevelConfig::soups());
        for hob in kitchen.stations_of(&world, StationKind::Hob) {
            let pot = world.get::<&Station>(hob).unwrap().slot.unwrap();
            assert!(world.get::<&CookingPot>(pot).unwrap().is_on_hob());
        }
    }

    #[test]
    fn test_layout_from_json() {
        let json = r#"{
            "chefs": ["Solo"],
            "stations": [
                { "kind": "IngredientCrate", "ingredient": "Tomato" },
                { "kind": "IngredientCrate" },
                { "kind": "Hob", "holds": "Pot" },
                { "kind": "Trash", "holds": "CleanPlate" }
            ]
        }"#;
        let layout: KitchenLayout = serde_json::from_str(json).unwrap();
        let mut world = World::new();
        let kitchen = generate_kitchen(&mut world, &layout, &LevelConfig::soups());

        // The crate without contents is skipped
        assert_eq!(kitchen.stations.len(), 3);
        assert!(kitchen.crate_for(&world, IngredientType::Tomato).is_some());
        let trash = kitchen.station(&world, StationKind::Trash).unwrap();
        assert!(world.get::<&Station>(trash).unwrap().slot.is_none());
    }
}
