//! Item components: ingredients, cooking pots and plates.
//!
//! Ingredients and pots reuse the plain rule types from `galley-logic`
//! directly as components; plates carry an ECS-specific pile of entities.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use galley_logic::constants::capacity;
use galley_logic::ingredient::{is_cooked_soup, is_soup, IngredientType};

pub use galley_logic::ingredient::Ingredient;
pub use galley_logic::pot::CookingPot;

/// A plate. Piles are modelled as a bottom plate carrying the others in
/// `stack`, so a chef picking up a pile holds a single entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    pub clean: bool,
    pub ingredients: Vec<Ingredient>,
    /// Plates piled on top of this one, bottom first.
    pub stack: Vec<Entity>,
}

impl Plate {
    pub fn clean() -> Self {
        Self {
            clean: true,
            ..Self::default()
        }
    }

    pub fn dirty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn kinds(&self) -> Vec<IngredientType> {
        self.ingredients.iter().map(|i| i.kind).collect()
    }

    pub fn has_soup(&self) -> bool {
        is_soup(&self.ingredients)
    }

    pub fn has_cooked_soup(&self) -> bool {
        is_cooked_soup(&self.ingredients)
    }

    /// Clean, empty and not carrying a pile: ready to receive a soup.
    pub fn is_ready_for_soup(&self) -> bool {
        self.clean && self.is_empty() && self.stack.is_empty()
    }

    /// Loose chopped ingredients can be plated one at a time (salads), but
    /// never into a soup-shaped trio: soup only comes out of a pot.
    pub fn accepts_ingredient(&self, ingredient: &Ingredient) -> bool {
        if !self.clean
            || !ingredient.is_processed()
            || self.has_soup()
            || self.ingredients.len() >= capacity::PLATE_INGREDIENTS
        {
            return false;
        }
        let mut after = self.ingredients.clone();
        after.push(*ingredient);
        !is_soup(&after)
    }

    /// Empties the plate and marks it dirty (after a delivery).
    pub fn soil(&mut self) {
        self.ingredients.clear();
        self.clean = false;
    }
}

/// Marker for an item lying loose, in no hand and no station slot.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OnFloor;

/// What sort of item an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Ingredient,
    Pot,
    Plate,
}

/// Classify an entity as an item, if it is one.
pub fn item_kind(world: &World, entity: Entity) -> Option<ItemKind> {
    let entity = world.entity(entity).ok()?;
    if entity.has::<Ingredient>() {
        Some(ItemKind::Ingredient)
    } else if entity.has::<CookingPot>() {
        Some(ItemKind::Pot)
    } else if entity.has::<Plate>() {
        Some(ItemKind::Plate)
    } else {
        None
    }
}
