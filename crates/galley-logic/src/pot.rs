//! Cooking pot state machine.
//!
//! ```text
//! Empty ─add─▶ Cooking ─(3 ingredients)─▶ CookFinished ─▶ Burning(stage) ─▶ Burned
//!                  │                                          ▲
//!                  └──────(fewer than 3: partial cook)────────┘
//! ```
//!
//! Cooking and burning only advance while the pot sits on a hob; taking it
//! off pauses whichever is running without losing progress. Emptying the
//! pot (trash, or serving the soup) resets everything.
//!
//! ```
//! use galley_logic::ingredient::{Ingredient, IngredientType};
//! use galley_logic::pot::{CookingPot, PotState};
//!
//! let mut pot = CookingPot::new();
//! pot.set_on_hob(true);
//! for _ in 0..3 {
//!     assert!(pot.add_ingredient(Ingredient::processed(IngredientType::Onion)));
//! }
//! pot.advance(18.0);
//! assert_eq!(pot.state(), PotState::CookFinished);
//! assert!(pot.take_soup().is_some());
//! assert_eq!(pot.state(), PotState::Empty);
//! ```

use serde::{Deserialize, Serialize};

use crate::burn::{BurnStage, BurnStep, BurnTimeline};
use crate::constants::capacity;
use crate::ingredient::{is_cooked_soup, is_soup, Ingredient, IngredientType};
use crate::timer::ProgressTimer;

/// Observable pot state, derived from the underlying timers and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotState {
    Empty,
    Cooking,
    CookFinished,
    Burning(BurnStage),
    Burned,
}

/// What one call to [`CookingPot::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PotStep {
    /// A full three-ingredient cook completed.
    pub cook_finished: bool,
    /// Cooking completed with fewer than three ingredients.
    pub partial_cook_done: bool,
    pub burn: BurnStep,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CookingPot {
    ingredients: Vec<Ingredient>,
    cook: ProgressTimer,
    burn: BurnTimeline,
    cook_finished: bool,
    burned: bool,
    on_hob: bool,
}

impl CookingPot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn kinds(&self) -> Vec<IngredientType> {
        self.ingredients.iter().map(|i| i.kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ingredients.len() >= capacity::POT_INGREDIENTS
    }

    pub fn is_cook_finished(&self) -> bool {
        self.cook_finished
    }

    pub fn is_burned(&self) -> bool {
        self.burned
    }

    pub fn is_on_hob(&self) -> bool {
        self.on_hob
    }

    pub fn total_cook_time(&self) -> f32 {
        self.cook.duration
    }

    pub fn current_cook_time(&self) -> f32 {
        self.cook.elapsed
    }

    pub fn burn_elapsed(&self) -> f32 {
        self.burn.elapsed
    }

    pub fn scorch_fraction(&self) -> f32 {
        if self.burned {
            1.0
        } else {
            self.burn.scorch_fraction()
        }
    }

    /// Cooking is over (fully or partially) and the burn timer has started.
    pub fn is_burning(&self) -> bool {
        !self.burned && !self.is_empty() && self.cook.is_finished() && self.burn.is_started()
    }

    /// A finished pot of mixed ingredients can't be served, only trashed.
    pub fn is_locked(&self) -> bool {
        self.cook_finished && !is_soup(&self.ingredients)
    }

    /// Actively cooking or burning right now.
    pub fn is_heating(&self) -> bool {
        self.on_hob && !self.is_empty() && !self.burned
    }

    pub fn state(&self) -> PotState {
        if self.is_empty() {
            PotState::Empty
        } else if self.burned {
            PotState::Burned
        } else if self.cook_finished && !self.burn.is_started() {
            PotState::CookFinished
        } else if self.cook.is_finished() {
            PotState::Burning(self.burn.stage())
        } else {
            PotState::Cooking
        }
    }

    /// Would the pot take this ingredient?
    pub fn accepts(&self, ingredient: &Ingredient) -> bool {
        !self.burned
            && !self.is_full()
            && ingredient.is_processed()
            && ingredient.kind.is_soup_base()
    }

    /// Drop an ingredient in. Refused (returns false, nothing changes) unless
    /// the pot has room, isn't burned, and the ingredient is a processed
    /// soup base.
    ///
    /// Adding always resets burn progress. Adding while the pot is already
    /// burning also restarts cooking from zero elapsed time.
    pub fn add_ingredient(&mut self, ingredient: Ingredient) -> bool {
        if !self.accepts(&ingredient) {
            return false;
        }
        let was_burning = self.is_burning();

        self.cook.extend(ingredient.cook_time);
        self.ingredients.push(ingredient);
        self.burn.reset();
        if was_burning {
            self.cook.reset();
        }
        true
    }

    pub fn set_on_hob(&mut self, on_hob: bool) {
        self.on_hob = on_hob;
    }

    /// Advance cooking or burning by `dt` seconds of heat.
    pub fn advance(&mut self, dt: f32) -> PotStep {
        let mut step = PotStep::default();
        if !self.is_heating() {
            return step;
        }

        if self.cook_finished || self.cook.is_finished() {
            step.burn = self.burn.advance(dt);
            if step.burn.burned {
                self.burned = true;
            }
            return step;
        }

        if self.cook.advance(dt) {
            if self.ingredients.len() == capacity::POT_INGREDIENTS {
                self.cook_finished = true;
                self.ingredients.iter_mut().for_each(Ingredient::mark_cooked);
                step.cook_finished = true;
            } else {
                step.partial_cook_done = true;
            }
            // Heat left over past the cook goes straight into the burn
            let overshoot = self.cook.elapsed - self.cook.duration;
            if overshoot > 0.0 {
                step.burn = self.burn.advance(overshoot);
                if step.burn.burned {
                    self.burned = true;
                }
            }
        }
        step
    }

    /// Serve the soup: only a finished, unburned pot of three identical
    /// soup bases gives up its contents. The pot is emptied on success.
    pub fn take_soup(&mut self) -> Option<Vec<Ingredient>> {
        if !self.cook_finished || self.burned || !is_soup(&self.ingredients) {
            return None;
        }
        let soup = std::mem::take(&mut self.ingredients);
        self.empty();
        Some(soup)
    }

    /// Pour a cooked soup from a plate back into this (empty) pot. On
    /// refusal the ingredients are handed back untouched.
    pub fn pour_in_soup(&mut self, soup: Vec<Ingredient>) -> Result<(), Vec<Ingredient>> {
        if !self.is_empty() || !is_cooked_soup(&soup) {
            return Err(soup);
        }
        let total: f32 = soup.iter().map(|i| i.cook_time).sum();
        self.ingredients = soup;
        self.cook = ProgressTimer {
            elapsed: total,
            duration: total,
        };
        self.burn.reset();
        self.cook_finished = true;
        self.burned = false;
        Ok(())
    }

    /// Clear all ingredients, timers and flags. The pot stays where it is.
    pub fn empty(&mut self) {
        self.ingredients.clear();
        self.cook = ProgressTimer::default();
        self.burn.reset();
        self.cook_finished = false;
        self.burned = false;
    }
}
