//! CLI command implementations.

pub mod partout;
pub mod price;

pub use partout::PartOutCommand;
pub use price::PriceGuideCommand;
