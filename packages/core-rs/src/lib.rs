pub mod config;
pub mod error;
pub mod heat;
pub mod recommendation;
pub mod risk;
pub mod state;
pub mod types;

pub use config::*;
pub use error::*;
pub use heat::*;
pub use risk::*;
pub use state::*;
pub use types::*;
