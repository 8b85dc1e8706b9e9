pub mod agent;
pub mod position;
pub mod reward;
pub mod vault;

pub use agent::*;
pub use position::*;
pub use reward::*;
pub use vault::*;
