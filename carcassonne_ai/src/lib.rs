mod error;
mod moves;
mod rule_based;
mod settings;
pub use error::*;
pub use moves::*;
pub use rule_based::*;
pub use settings::*;
