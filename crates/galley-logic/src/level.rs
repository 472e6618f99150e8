//! Level configuration and validation.
//!
//! A level names the orders customers may ask for, how long the shift
//! lasts, the score needed for each star, and the kitchen's timing rules.
//! Every field except `name` and `orders` has a default, so a level file
//! can be as small as:
//!
//! ```
//! use galley_logic::level::{LevelConfig, validate_level};
//! use galley_logic::order::OrderTemplate;
//! use galley_logic::ingredient::IngredientType;
//!
//! let level = LevelConfig {
//!     orders: vec![OrderTemplate::soup(IngredientType::Onion)],
//!     ..LevelConfig::default()
//! };
//! assert!(validate_level(&level).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{orders, timing};
use crate::ingredient::{IngredientSpec, IngredientType};
use crate::order::{MatchPolicy, OrderCountdown, OrderTemplate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub name: String,
    /// Recipes that may be spawned, picked by weight.
    pub orders: Vec<OrderTemplate>,
    /// Shift length in whole seconds.
    pub duration_seconds: u32,
    /// Scores needed for one, two and three stars.
    pub star_thresholds: [i32; 3],
    pub spawn_interval_seconds: f32,
    pub max_concurrent_orders: usize,
    pub order_time_limit_seconds: f32,
    pub order_alert_seconds: f32,
    pub plate_return_seconds: f32,
    pub sink_cleaning_seconds: f32,
    /// Per-type chop/cook overrides; missing types use the defaults.
    pub ingredients: Vec<IngredientSpec>,
    pub match_policy: MatchPolicy,
    /// Seed for order selection (None = entropy).
    pub seed: Option<u64>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            name: "Kitchen".to_string(),
            orders: Vec::new(),
            duration_seconds: timing::LEVEL_DURATION,
            star_thresholds: [40, 80, 120],
            spawn_interval_seconds: timing::ORDER_SPAWN_INTERVAL,
            max_concurrent_orders: orders::MAX_CONCURRENT,
            order_time_limit_seconds: timing::ORDER_TIME_LIMIT,
            order_alert_seconds: timing::ORDER_ALERT_TIME,
            plate_return_seconds: timing::PLATE_RETURN_TIME,
            sink_cleaning_seconds: timing::SINK_CLEANING_TIME,
            ingredients: Vec::new(),
            match_policy: MatchPolicy::default(),
            seed: None,
        }
    }
}

impl LevelConfig {
    /// The classic three-soup level.
    pub fn soups() -> Self {
        Self {
            name: "Soup Kitchen".to_string(),
            orders: vec![
                OrderTemplate::soup(IngredientType::Onion),
                OrderTemplate::soup(IngredientType::Tomato),
                OrderTemplate::soup(IngredientType::Mushroom),
            ],
            ..Self::default()
        }
    }

    pub fn ingredient_spec(&self, kind: IngredientType) -> IngredientSpec {
        IngredientSpec::lookup(&self.ingredients, kind)
    }

    /// A fresh countdown using this level's time limit and alert window.
    pub fn order_countdown(&self) -> OrderCountdown {
        OrderCountdown::new(self.order_time_limit_seconds, self.order_alert_seconds)
    }
}

/// A problem found in a level definition.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelIssue {
    /// No order templates to spawn from.
    NoOrders,
    /// A template has no ingredients.
    EmptyOrder(String),
    /// A template can never be plated (more than a plate holds).
    OrderTooLarge(String, usize),
    /// A template weight is zero, negative or not a number.
    InvalidWeight(String),
    /// A duration that must be positive isn't.
    NonPositiveDuration(&'static str),
    /// The concurrent order cap is zero.
    NoConcurrentOrders,
    /// Star thresholds must not decrease.
    UnorderedStarThresholds([i32; 3]),
}

impl std::fmt::Display for LevelIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelIssue::NoOrders => write!(f, "level has no order templates"),
            LevelIssue::EmptyOrder(name) => write!(f, "order '{}' has no ingredients", name),
            LevelIssue::OrderTooLarge(name, n) => {
                write!(f, "order '{}' needs {} ingredients, more than a plate holds", name, n)
            }
            LevelIssue::InvalidWeight(name) => {
                write!(f, "order '{}' has a non-positive weight", name)
            }
            LevelIssue::NonPositiveDuration(field) => write!(f, "{} must be positive", field),
            LevelIssue::NoConcurrentOrders => write!(f, "max_concurrent_orders must be at least 1"),
            LevelIssue::UnorderedStarThresholds(t) => {
                write!(f, "star thresholds {:?} must be non-decreasing", t)
            }
        }
    }
}

/// Validate a level, returning every issue found.
pub fn validate_level(level: &LevelConfig) -> Vec<LevelIssue> {
    use crate::constants::capacity;

    let mut issues = Vec::new();

    if level.orders.is_empty() {
        issues.push(LevelIssue::NoOrders);
    }
    for template in &level.orders {
        if template.ingredients.is_empty() {
            issues.push(LevelIssue::EmptyOrder(template.name.clone()));
        }
        if template.ingredients.len() > capacity::PLATE_INGREDIENTS {
            issues.push(LevelIssue::OrderTooLarge(
                template.name.clone(),
                template.ingredients.len(),
            ));
        }
        if !is_positive(template.weight) {
            issues.push(LevelIssue::InvalidWeight(template.name.clone()));
        }
    }

    if level.duration_seconds == 0 {
        issues.push(LevelIssue::NonPositiveDuration("duration_seconds"));
    }
    let timings = [
        ("spawn_interval_seconds", level.spawn_interval_seconds),
        ("order_time_limit_seconds", level.order_time_limit_seconds),
        ("order_alert_seconds", level.order_alert_seconds),
        ("plate_return_seconds", level.plate_return_seconds),
        ("sink_cleaning_seconds", level.sink_cleaning_seconds),
    ];
    for (field, value) in timings {
        if !is_positive(value) {
            issues.push(LevelIssue::NonPositiveDuration(field));
        }
    }
    for spec in &level.ingredients {
        if !is_positive(spec.process_time) || !is_positive(spec.cook_time) {
            issues.push(LevelIssue::NonPositiveDuration("ingredient timing"));
        }
    }

    if level.max_concurrent_orders == 0 {
        issues.push(LevelIssue::NoConcurrentOrders);
    }

    let t = level.star_thresholds;
    if t[0] > t[1] || t[1] > t[2] {
        issues.push(LevelIssue::UnorderedStarThresholds(t));
    }

    issues
}

/// NaN and infinity count as invalid too.
fn is_positive(value: f32) -> bool {
    value > 0.0 && value.is_finite()
}
