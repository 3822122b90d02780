pub mod config;
pub mod error;
pub mod recipe;
pub mod tag;

pub use config::*;
pub use error::*;
pub use recipe::*;
pub use tag::*;
