//! Order manager - spawns customer orders and matches deliveries
//!
//! Orders spawn on a fixed interval up to a cap of outstanding orders.
//! Served orders are retired to a pool and reused for later spawns.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use galley_logic::ingredient::IngredientType;
use galley_logic::level::LevelConfig;
use galley_logic::order::{ingredients_match, MatchPolicy, Order, OrderId};

use crate::events::{EventQueue, GameEvent};

/// A successful match of a plate against an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub order: OrderId,
    pub name: String,
    pub tip: u32,
}

fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderManager {
    /// Outstanding orders, oldest spawn first
    orders: Vec<Order>,
    /// Retired orders waiting for reuse
    pool: Vec<Order>,
    spawn_timer: f32,
    next_id: u32,
    running: bool,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl OrderManager {
    pub fn new(seed: Option<u64>) -> Self {
        let mut manager = Self {
            orders: Vec::new(),
            pool: Vec::new(),
            spawn_timer: 0.0,
            next_id: 1,
            running: false,
            rng: entropy_rng(),
        };
        manager.reseed(seed);
        manager
    }

    /// Reset the RNG from the level seed, mixed with the order counter so
    /// a restored snapshot doesn't replay the orders already seen.
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = match seed {
            Some(seed) => {
                StdRng::seed_from_u64(seed ^ (self.next_id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
            }
            None => entropy_rng(),
        };
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Outstanding orders, oldest spawn first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn outstanding(&self) -> usize {
        self.orders.iter().filter(|o| !o.delivered).count()
    }

    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    /// Begin spawning; the first order arrives immediately.
    pub fn start(&mut self, level: &LevelConfig, now: f64, events: &mut EventQueue) {
        self.retire_all();
        self.running = true;
        self.spawn_timer = 0.0;
        self.spawn(level, now, events);
    }

    /// Stop spawning and clear every outstanding order.
    pub fn stop(&mut self) {
        self.running = false;
        self.retire_all();
    }

    fn retire_all(&mut self) {
        self.pool.append(&mut self.orders);
    }

    /// Tick countdowns and the spawn timer. Returns the orders that expired
    /// this tick.
    pub fn update(
        &mut self,
        dt: f32,
        now: f64,
        level: &LevelConfig,
        events: &mut EventQueue,
    ) -> Vec<OrderId> {
        let mut expired = Vec::new();
        if !self.running {
            return expired;
        }

        for order in &mut self.orders {
            let step = order.advance(dt, now);
            if step.alert {
                events.push(GameEvent::OrderAlert { order: order.id });
            }
            if step.expired {
                log::info!("Order {} ({}) expired", order.id, order.template.name);
                events.push(GameEvent::OrderExpired { order: order.id });
                expired.push(order.id);
            }
        }

        let interval = level.spawn_interval_seconds;
        self.spawn_timer += dt.max(0.0);
        while interval > 0.0 && self.spawn_timer >= interval {
            self.spawn_timer -= interval;
            if self.outstanding() < level.max_concurrent_orders {
                self.spawn(level, now, events);
            }
        }

        expired
    }

    /// Spawn one order from a weighted pick of the level's templates.
    pub fn spawn(&mut self, level: &LevelConfig, now: f64, events: &mut EventQueue) -> Option<OrderId> {
        let index = self.choose_template(level)?;
        let template = level.orders[index].clone();
        let id = OrderId(self.next_id);
        self.next_id += 1;

        let countdown = level.order_countdown();
        let order = match self.pool.pop() {
            Some(mut order) => {
                order.setup(id, template, now, countdown);
                order
            }
            None => Order::new(id, template, now, countdown),
        };

        log::info!("Order {} spawned: {}", id, order.template.name);
        events.push(GameEvent::OrderSpawned {
            order: id,
            name: order.template.name.clone(),
        });
        self.orders.push(order);
        Some(id)
    }

    fn choose_template(&mut self, level: &LevelConfig) -> Option<usize> {
        if level.orders.is_empty() {
            log::warn!("Level '{}' has no order templates", level.name);
            return None;
        }
        match WeightedIndex::new(level.orders.iter().map(|t| t.weight)) {
            Ok(dist) => Some(dist.sample(&mut self.rng)),
            Err(e) => {
                log::warn!("Bad order weights ({}), picking uniformly", e);
                Some(self.rng.gen_range(0..level.orders.len()))
            }
        }
    }

    /// Match plate contents against outstanding orders, oldest arrival
    /// first. The first match is marked delivered and retired.
    pub fn match_delivery(
        &mut self,
        plate: &[IngredientType],
        policy: MatchPolicy,
    ) -> Option<Delivery> {
        let mut candidates: Vec<usize> = (0..self.orders.len())
            .filter(|&i| !self.orders[i].delivered)
            .collect();
        candidates.sort_by(|&a, &b| {
            self.orders[a]
                .arrival_time
                .partial_cmp(&self.orders[b].arrival_time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let index = candidates
            .into_iter()
            .find(|&i| ingredients_match(plate, self.orders[i].ingredients(), policy))?;

        let mut order = self.orders.remove(index);
        order.set_delivered();
        let delivery = Delivery {
            order: order.id,
            name: order.template.name.clone(),
            tip: order.tip(),
        };
        log::info!(
            "Order {} ({}) delivered, tip {}",
            delivery.order,
            delivery.name,
            delivery.tip
        );
        self.pool.push(order);
        Some(delivery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galley_logic::order::OrderTemplate;
    use IngredientType::*;

    fn onion_level() -> LevelConfig {
        LevelConfig {
            orders: vec![OrderTemplate::soup(Onion)],
            seed: Some(7),
            ..LevelConfig::default()
        }
    }

    #[test]
    fn test_spawns_immediately_then_on_interval() {
        let level = onion_level();
        let mut events = EventQueue::new();
        let mut manager = OrderManager::new(level.seed);

        manager.start(&level, 0.0, &mut events);
        assert_eq!(manager.outstanding(), 1);

        manager.update(14.0, 14.0, &level, &mut events);
        assert_eq!(manager.outstanding(), 1);
        manager.update(1.0, 15.0, &level, &mut events);
        assert_eq!(manager.outstanding(), 2);
    }

    #[test]
    fn test_respects_concurrency_cap() {
        let mut level = onion_level();
        level.max_concurrent_orders = 2;
        level.order_time_limit_seconds = 1000.0;
        let mut events = EventQueue::new();
        let mut manager = OrderManager::new(level.seed);

        manager.start(&level, 0.0, &mut events);
        for i in 1..10 {
            manager.update(15.0, 15.0 * i as f64, &level, &mut events);
        }
        assert_eq!(manager.outstanding(), 2);
    }

    #[test]
    fn test_match_picks_oldest_arrival_and_recycles() {
        let level = onion_level();
        let mut events = EventQueue::new();
        let mut manager = OrderManager::new(level.seed);
        manager.start(&level, 0.0, &mut events);
        manager.update(15.0, 15.0, &level, &mut events);
        let oldest = manager.orders()[0].id;

        let delivery = manager
            .match_delivery(&[Onion, Onion, Onion], MatchPolicy::Legacy)
            .unwrap();
        assert_eq!(delivery.order, oldest);
        assert_eq!(manager.outstanding(), 1);
        assert_eq!(manager.pooled(), 1);

        // The pooled order is reused for the next spawn with a fresh id
        let next = manager.spawn(&level, 20.0, &mut events).unwrap();
        assert_ne!(next, oldest);
        assert_eq!(manager.pooled(), 0);
    }

    #[test]
    fn test_no_match_leaves_orders_untouched() {
        let level = onion_level();
        let mut events = EventQueue::new();
        let mut manager = OrderManager::new(level.seed);
        manager.start(&level, 0.0, &mut events);

        assert!(manager
            .match_delivery(&[Tomato, Tomato, Tomato], MatchPolicy::Legacy)
            .is_none());
        assert_eq!(manager.outstanding(), 1);
    }

    #[test]
    fn test_expiry_reported_and_order_kept() {
        let level = onion_level();
        let mut events = EventQueue::new();
        let mut manager = OrderManager::new(level.seed);
        manager.start(&level, 0.0, &mut events);
        let id = manager.orders()[0].id;

        let expired = manager.update(50.0, 50.0, &level, &mut events);
        assert_eq!(expired, vec![id]);
        assert_eq!(manager.orders()[0].arrival_time, 50.0);
        assert!(events.iter().any(|e| *e == GameEvent::OrderAlert { order: id }));
    }

    #[test]
    fn test_stop_clears_outstanding() {
        let level = onion_level();
        let mut events = EventQueue::new();
        let mut manager = OrderManager::new(level.seed);
        manager.start(&level, 0.0, &mut events);
        manager.stop();
        assert_eq!(manager.outstanding(), 0);
        assert!(!manager.is_running());
        assert!(manager.update(100.0, 100.0, &level, &mut events).is_empty());
    }

    #[test]
    fn test_weights_bias_selection() {
        let level = LevelConfig {
            orders: vec![
                OrderTemplate {
                    weight: 1000.0,
                    ..OrderTemplate::soup(Tomato)
                },
                OrderTemplate {
                    weight: 0.001,
                    ..OrderTemplate::soup(Mushroom)
                },
            ],
            seed: Some(42),
            ..LevelConfig::default()
        };
        let mut events = EventQueue::new();
        let mut manager = OrderManager::new(level.seed);
        for _ in 0..50 {
            manager.spawn(&level, 0.0, &mut events);
        }
        let tomatoes = manager
            .orders()
            .iter()
            .filter(|o| o.ingredients()[0] == Tomato)
            .count();
        assert!(tomatoes >= 45);
    }
}
