pub mod analytics;
pub mod enums;
pub mod models;
pub mod timestamp;

pub use analytics::*;
pub use enums::*;
pub use models::*;
