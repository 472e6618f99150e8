//! Ingredients and soup validation.
//!
//! An [`Ingredient`] is a plain value: its type, how far it has been
//! processed, and the timing constants it carries from its
//! [`IngredientSpec`]. Containers (pots, plates) hold ingredients by value.

use serde::{Deserialize, Serialize};

use crate::constants::{capacity, timing};

/// Kinds of ingredient a crate can hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IngredientType {
    Onion,
    Tomato,
    Mushroom,
    Lettuce,
}

impl IngredientType {
    pub const ALL: [IngredientType; 4] = [
        IngredientType::Onion,
        IngredientType::Tomato,
        IngredientType::Mushroom,
        IngredientType::Lettuce,
    ];

    /// Can three of these make a soup?
    pub fn is_soup_base(self) -> bool {
        matches!(
            self,
            IngredientType::Onion | IngredientType::Tomato | IngredientType::Mushroom
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            IngredientType::Onion => "onion",
            IngredientType::Tomato => "tomato",
            IngredientType::Mushroom => "mushroom",
            IngredientType::Lettuce => "lettuce",
        }
    }
}

impl std::fmt::Display for IngredientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How far an ingredient has been prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientStatus {
    Raw,
    Processed,
    Cooked,
}

/// Per-type timing constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IngredientSpec {
    #[serde(rename = "type")]
    pub kind: IngredientType,
    /// Seconds of chopping to go from Raw to Processed.
    #[serde(default = "default_process_time")]
    pub process_time: f32,
    /// Seconds this ingredient adds to a pot's total cook time.
    #[serde(default = "default_cook_time")]
    pub cook_time: f32,
}

fn default_process_time() -> f32 {
    timing::DEFAULT_PROCESS_TIME
}

fn default_cook_time() -> f32 {
    timing::DEFAULT_COOK_TIME
}

impl IngredientSpec {
    pub fn new(kind: IngredientType) -> Self {
        Self {
            kind,
            process_time: timing::DEFAULT_PROCESS_TIME,
            cook_time: timing::DEFAULT_COOK_TIME,
        }
    }

    /// Look up the spec for `kind` among `overrides`, falling back to defaults.
    pub fn lookup(overrides: &[IngredientSpec], kind: IngredientType) -> Self {
        overrides
            .iter()
            .find(|s| s.kind == kind)
            .copied()
            .unwrap_or_else(|| Self::new(kind))
    }
}

/// An ingredient instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub kind: IngredientType,
    pub status: IngredientStatus,
    pub process_time: f32,
    pub cook_time: f32,
}

impl Ingredient {
    /// A fresh, raw ingredient as handed out by a crate.
    pub fn raw(spec: IngredientSpec) -> Self {
        Self {
            kind: spec.kind,
            status: IngredientStatus::Raw,
            process_time: spec.process_time,
            cook_time: spec.cook_time,
        }
    }

    /// Shortcut for a chopped ingredient with default timings.
    pub fn processed(kind: IngredientType) -> Self {
        Self {
            status: IngredientStatus::Processed,
            ..Self::raw(IngredientSpec::new(kind))
        }
    }

    pub fn is_raw(&self) -> bool {
        self.status == IngredientStatus::Raw
    }

    pub fn is_processed(&self) -> bool {
        self.status == IngredientStatus::Processed
    }

    pub fn mark_processed(&mut self) {
        self.status = IngredientStatus::Processed;
    }

    pub fn mark_cooked(&mut self) {
        self.status = IngredientStatus::Cooked;
    }
}

/// True iff `kinds` is exactly three identical soup-base ingredients.
pub fn check_soup_ingredients(kinds: &[IngredientType]) -> bool {
    if kinds.len() != capacity::SOUP_INGREDIENTS {
        return false;
    }
    let first = kinds[0];
    first.is_soup_base() && kinds.iter().all(|k| *k == first)
}

/// [`check_soup_ingredients`] over ingredient values.
pub fn is_soup(ingredients: &[Ingredient]) -> bool {
    let kinds: Vec<IngredientType> = ingredients.iter().map(|i| i.kind).collect();
    check_soup_ingredients(&kinds)
}

/// A soup that has actually been through a pot.
pub fn is_cooked_soup(ingredients: &[Ingredient]) -> bool {
    is_soup(ingredients)
        && ingredients
            .iter()
            .all(|i| i.status == IngredientStatus::Cooked)
}
