//! Delivery system - serving plates and sending them back dirty

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use galley_logic::level::LevelConfig;
use galley_logic::scoring::delivery_points;
use galley_logic::timer::ProgressTimer;

use crate::components::{DishTray, OnFloor, Plate};
use crate::events::{EventQueue, GameEvent};
use crate::session::GameSession;
use crate::systems::{Delivery, OrderManager};

/// A served plate on its way back to the dish tray
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingReturn {
    pub plate: Entity,
    pub timer: ProgressTimer,
}

/// Plates currently out in the dining room
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlateReturns {
    pending: Vec<PendingReturn>,
}

impl PlateReturns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, plate: Entity, delay: f32) {
        self.pending.push(PendingReturn {
            plate,
            timer: ProgressTimer::new(delay),
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingReturn> {
        self.pending.iter()
    }
}

/// Serve a plate. Empty or dirty plates skip matching entirely; either
/// way the plate is emptied, dirtied and queued for return.
pub fn deliver_plate(
    world: &mut World,
    plate: Entity,
    orders: &mut OrderManager,
    session: &mut GameSession,
    returns: &mut PlateReturns,
    level: &LevelConfig,
    events: &mut EventQueue,
) -> Option<Delivery> {
    let delivery = {
        let mut state = world.get::<&mut Plate>(plate).ok()?;
        let delivery = if !state.clean || state.is_empty() {
            log::debug!("Plate {:?} is empty or dirty, nothing to match", plate);
            None
        } else if state.has_soup() && !state.has_cooked_soup() {
            log::debug!("Plate {:?} holds an uncooked soup", plate);
            None
        } else {
            orders.match_delivery(&state.kinds(), level.match_policy)
        };
        state.soil();
        delivery
    };

    match &delivery {
        Some(d) => {
            events.push(GameEvent::OrderDelivered {
                order: d.order,
                tip: d.tip,
            });
            session.add_score(delivery_points(d.tip), events);
        }
        None => log::debug!("Plate {:?} matched no order", plate),
    }

    let _ = world.remove_one::<OnFloor>(plate);
    returns.schedule(plate, level.plate_return_seconds);
    delivery
}

/// Advance plate returns and put finished ones on the dish tray.
pub fn plate_return_system(
    world: &mut World,
    returns: &mut PlateReturns,
    dt: f32,
    events: &mut EventQueue,
) {
    let mut arrived = Vec::new();
    returns.pending.retain_mut(|pending| {
        if pending.timer.advance(dt) {
            arrived.push(pending.plate);
            false
        } else {
            true
        }
    });
    if arrived.is_empty() {
        return;
    }

    let tray = world
        .query_mut::<&mut DishTray>()
        .into_iter()
        .next()
        .map(|(_, tray)| {
            tray.pile.extend(arrived.iter().copied());
        });

    if tray.is_none() {
        log::warn!("No dish tray in the kitchen, leaving {} plates on the floor", arrived.len());
        for &plate in &arrived {
            let _ = world.insert_one(plate, OnFloor);
        }
    }
    for plate in arrived {
        events.push(GameEvent::PlateReturned { plate });
    }
}
