//! Shared zones and the market/deck lifecycle.
//!
//! ## Key Types
//!
//! - `Zones`: market, cost-tier decks, weapon/demon decks, discard
//! - `market`: reveals (`refresh_market`) and tier mixing (`mix_decks`)

pub mod manager;
pub mod market;

pub use manager::{ZoneKind, Zones};
pub use market::{mix_decks, refresh_market, should_mix, MixReport};
