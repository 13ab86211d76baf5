pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod roster;
pub mod session;
pub mod sheet;

pub use config::Config;
pub use error::{GraderError, Result};
pub use session::{Outcome, Session};
