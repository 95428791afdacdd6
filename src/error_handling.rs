pub mod types;

pub use types::{ExtractError, SupervisorError};
