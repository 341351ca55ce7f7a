pub mod config;
pub mod roles;

pub use config::*;
pub use roles::*;
