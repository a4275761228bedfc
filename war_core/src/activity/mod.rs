//! Activity accounting: the rolling average and the tier it maps to

mod averager;
mod tier;

pub use averager::average_daily_actions;
pub use tier::tier_for_average;
