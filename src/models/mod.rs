pub mod enums;
pub mod message;
pub mod portfolio;

pub use enums::*;
pub use message::*;
pub use portfolio::*;
