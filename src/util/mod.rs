mod declarations;
mod ids;
mod log;

pub use declarations::Declarations;
pub use ids::{StateArena, StateId};
pub use log::{level, set_level, Log};
