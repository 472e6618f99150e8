//! Customer orders: countdown, matching and tips.
//!
//! An order counts down from its time limit. Inside the final few seconds
//! it raises an alert; at zero it expires and *restarts* its countdown
//! rather than disappearing. Delivery freezes the remaining time, which
//! decides the tip.

use serde::{Deserialize, Serialize};

use crate::constants::timing;
use crate::ingredient::IngredientType;

/// A recipe a level can ask for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTemplate {
    pub name: String,
    pub ingredients: Vec<IngredientType>,
    /// Relative spawn weight among the level's templates.
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

impl OrderTemplate {
    pub fn new(name: impl Into<String>, ingredients: Vec<IngredientType>) -> Self {
        Self {
            name: name.into(),
            ingredients,
            weight: 1.0,
        }
    }

    /// Three of one soup base.
    pub fn soup(kind: IngredientType) -> Self {
        Self::new(format!("{} soup", kind), vec![kind; 3])
    }
}

/// How plate contents are compared against an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Same ingredient count, and every plate ingredient type appears
    /// somewhere in the order. Multiplicity is ignored, so
    /// {Onion, Onion, Tomato} satisfies {Onion, Tomato, Tomato}.
    #[default]
    Legacy,
    /// Exact multiset equality.
    Multiset,
}

/// Does a plate holding `plate` satisfy an order asking for `order`?
pub fn ingredients_match(
    plate: &[IngredientType],
    order: &[IngredientType],
    policy: MatchPolicy,
) -> bool {
    if plate.len() != order.len() {
        return false;
    }
    match policy {
        MatchPolicy::Legacy => plate.iter().all(|k| order.contains(k)),
        MatchPolicy::Multiset => {
            let mut a = plate.to_vec();
            let mut b = order.to_vec();
            a.sort();
            b.sort();
            a == b
        }
    }
}

/// Tip tier from the fraction of time left at delivery.
pub fn calculate_tip(remaining: f32, initial: f32) -> u32 {
    if initial <= 0.0 {
        return 0;
    }
    let ratio = remaining / initial;
    if ratio > 0.75 {
        6
    } else if ratio > 0.5 {
        4
    } else if ratio > 0.25 {
        2
    } else {
        0
    }
}

/// What one countdown tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownStep {
    pub alert: bool,
    pub expired: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderCountdown {
    pub remaining: f32,
    pub initial: f32,
    pub alert_at: f32,
    alerted: bool,
}

impl Default for OrderCountdown {
    fn default() -> Self {
        Self::new(timing::ORDER_TIME_LIMIT, timing::ORDER_ALERT_TIME)
    }
}

impl OrderCountdown {
    pub fn new(initial: f32, alert_at: f32) -> Self {
        Self {
            remaining: initial,
            initial,
            alert_at,
            alerted: false,
        }
    }

    pub fn is_alerting(&self) -> bool {
        self.alerted
    }

    pub fn ratio(&self) -> f32 {
        if self.initial <= 0.0 {
            0.0
        } else {
            (self.remaining / self.initial).clamp(0.0, 1.0)
        }
    }

    pub fn advance(&mut self, dt: f32) -> CountdownStep {
        let mut step = CountdownStep::default();
        self.remaining -= dt.max(0.0);

        if !self.alerted && self.remaining <= self.alert_at {
            self.alerted = true;
            step.alert = true;
        }
        if self.remaining <= 0.0 {
            step.expired = true;
            self.restart();
        }
        step
    }

    pub fn restart(&mut self) {
        self.remaining = self.initial;
        self.alerted = false;
    }
}

/// Unique per spawned order (recycled pool slots get fresh ids).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A live customer request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub template: OrderTemplate,
    /// Clock time (seconds) the current countdown began; reset on expiry.
    pub arrival_time: f64,
    pub countdown: OrderCountdown,
    pub delivered: bool,
    /// Countdown value frozen at delivery.
    pub remaining_when_delivered: Option<f32>,
}

impl Order {
    pub fn new(id: OrderId, template: OrderTemplate, now: f64, countdown: OrderCountdown) -> Self {
        Self {
            id,
            template,
            arrival_time: now,
            countdown,
            delivered: false,
            remaining_when_delivered: None,
        }
    }

    /// Reuse a pooled order for a fresh request.
    pub fn setup(&mut self, id: OrderId, template: OrderTemplate, now: f64, countdown: OrderCountdown) {
        *self = Self::new(id, template, now, countdown);
    }

    pub fn ingredients(&self) -> &[IngredientType] {
        &self.template.ingredients
    }

    pub fn remaining_time(&self) -> f32 {
        self.remaining_when_delivered
            .unwrap_or(self.countdown.remaining)
    }

    /// Tick the countdown. Delivered orders are frozen.
    pub fn advance(&mut self, dt: f32, now: f64) -> CountdownStep {
        if self.delivered {
            return CountdownStep::default();
        }
        let step = self.countdown.advance(dt);
        if step.expired {
            self.arrival_time = now;
        }
        step
    }

    pub fn tip(&self) -> u32 {
        calculate_tip(self.remaining_time(), self.countdown.initial)
    }

    /// Freeze the countdown and mark the order served.
    pub fn set_delivered(&mut self) {
        self.remaining_when_delivered = Some(self.countdown.remaining);
        self.delivered = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use IngredientType::*;

    #[test]
    fn test_tip_tiers() {
        assert_eq!(calculate_tip(40.0, 50.0), 6);
        assert_eq!(calculate_tip(30.0, 50.0), 4);
        assert_eq!(calculate_tip(15.0, 50.0), 2);
        assert_eq!(calculate_tip(5.0, 50.0), 0);
        // Tier edges are exclusive.
        assert_eq!(calculate_tip(37.5, 50.0), 4);
        assert_eq!(calculate_tip(25.0, 50.0), 2);
        assert_eq!(calculate_tip(12.5, 50.0), 0);
        assert_eq!(calculate_tip(10.0, 0.0), 0);
    }

    #[test]
    fn test_legacy_match_ignores_multiplicity() {
        let plate = [Onion, Onion, Tomato];
        let order = [Onion, Tomato, Tomato];
        assert!(ingredients_match(&plate, &order, MatchPolicy::Legacy));
        assert!(!ingredients_match(&plate, &order, MatchPolicy::Multiset));
    }

    #[test]
    fn test_match_requires_equal_counts() {
        for policy in [MatchPolicy::Legacy, MatchPolicy::Multiset] {
            assert!(!ingredients_match(&[Onion, Onion], &[Onion; 3], policy));
            assert!(ingredients_match(&[Onion; 3], &[Onion; 3], policy));
            assert!(!ingredients_match(&[Tomato; 3], &[Onion; 3], policy));
        }
    }

    #[test]
    fn test_multiset_is_order_independent() {
        assert!(ingredients_match(
            &[Tomato, Lettuce],
            &[Lettuce, Tomato],
            MatchPolicy::Multiset
        ));
    }

    #[test]
    fn test_countdown_alerts_once_then_expires_and_restarts() {
        let mut c = OrderCountdown::new(50.0, 5.0);
        assert_eq!(c.advance(44.0), CountdownStep::default());
        let step = c.advance(2.0);
        assert!(step.alert && !step.expired);
        assert!(!c.advance(1.0).alert);
        let step = c.advance(4.0);
        assert!(step.expired);
        assert_eq!(c.remaining, 50.0);
        assert!(!c.is_alerting());
    }

    #[test]
    fn test_delivered_order_is_frozen() {
        let mut order = Order::new(
            OrderId(1),
            OrderTemplate::soup(Onion),
            0.0,
            OrderCountdown::new(50.0, 5.0),
        );
        order.advance(10.0, 10.0);
        order.set_delivered();
        assert!(!order.advance(100.0, 110.0).expired);
        assert_eq!(order.remaining_time(), 40.0);
        assert_eq!(order.tip(), 6);
    }

    #[test]
    fn test_expiry_resets_arrival_time() {
        let mut order = Order::new(
            OrderId(2),
            OrderTemplate::soup(Tomato),
            3.0,
            OrderCountdown::new(10.0, 5.0),
        );
        assert!(order.advance(10.0, 13.0).expired);
        assert_eq!(order.arrival_time, 13.0);
        assert!(!order.delivered);
    }
}
