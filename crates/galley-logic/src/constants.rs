//! Game constants: capacities, timings and scoring values.
//!
//! Plain numbers with no engine dependency. Level files may override the
//! timing values (see [`crate::level::LevelConfig`]); the capacities and
//! score values are fixed rules of the kitchen.

pub mod capacity {
    /// A cooking pot holds at most this many ingredients.
    pub const POT_INGREDIENTS: usize = 3;
    /// A plate holds at most this many ingredients.
    pub const PLATE_INGREDIENTS: usize = 4;
    /// A soup is exactly this many identical ingredients.
    pub const SOUP_INGREDIENTS: usize = 3;
}

pub mod timing {
    /// Default seconds to chop an ingredient.
    pub const DEFAULT_PROCESS_TIME: f32 = 7.4;
    /// Default seconds each ingredient adds to a pot's cook time.
    pub const DEFAULT_COOK_TIME: f32 = 6.0;
    /// Seconds an order waits before it expires (and restarts).
    pub const ORDER_TIME_LIMIT: f32 = 50.0;
    /// Remaining seconds at which an order raises its alert.
    pub const ORDER_ALERT_TIME: f32 = 5.0;
    /// Seconds between order generator attempts.
    pub const ORDER_SPAWN_INTERVAL: f32 = 15.0;
    /// Seconds for the sink to clean one plate.
    pub const SINK_CLEANING_TIME: f32 = 3.0;
    /// Seconds before a delivered plate shows up dirty on the dish tray.
    pub const PLATE_RETURN_TIME: f32 = 3.0;
    /// Default level length in seconds.
    pub const LEVEL_DURATION: u32 = 180;
}

pub mod orders {
    /// Default cap on undelivered orders.
    pub const MAX_CONCURRENT: usize = 5;
}

pub mod score {
    /// Points for any matched delivery, before the tip.
    pub const BASE_PER_PLATE: i32 = 20;
    /// Points lost every time an order expires.
    pub const EXPIRED_PENALTY: i32 = 10;
}
