//! Card system: tags, definitions, instances, blueprints and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardKind`, `Family`, `CardClass`, `Cost`: closed tag enumerations
//! - `CardDefinition`: Static card data with parsed abilities
//! - `CardInstance`: One physical copy in a game's arena
//! - `CardBlueprint`: Serializable raw descriptor with ability text
//! - `CardRegistry`: Validated definition lookup, including evolutions

pub mod blueprint;
pub mod definition;
pub mod instance;
pub mod registry;
pub mod starter;
pub mod tags;

pub use blueprint::{CardBlueprint, TierText};
pub use definition::{CardDefinition, CardId};
pub use instance::CardInstance;
pub use registry::CardRegistry;
pub use starter::{starter_blueprints, starter_registry};
pub use tags::{CardClass, CardKind, Cost, Family};
