//! Pure kitchen rules for Galley.
//!
//! This crate contains all game rules that are independent of any ECS,
//! engine, or runtime. Types are plain data advanced by explicit `dt`
//! ticks, making them unit-testable and deterministic.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`burn`] | Five-stage burn timeline with warning pulses |
//! | [`constants`] | Capacities, default timings, score values |
//! | [`ingredient`] | Ingredient types, status, timing specs, soup validation |
//! | [`level`] | Level configuration and validation |
//! | [`order`] | Order countdown, plate/order matching, tips |
//! | [`pot`] | Cooking pot state machine (cook → finish → burn) |
//! | [`scoring`] | Delivery/expiry points, star rating |
//! | [`timer`] | Pausable elapsed/duration progress timers |

pub mod burn;
pub mod constants;
pub mod ingredient;
pub mod level;
pub mod order;
pub mod pot;
pub mod scoring;
pub mod timer;
