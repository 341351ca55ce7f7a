pub mod initialize;
pub mod migrate;
pub mod params;
pub mod pause;
pub mod roles;
pub mod withdraw;

pub use initialize::*;
pub use migrate::*;
pub use params::*;
pub use pause::*;
pub use roles::*;
pub use withdraw::*;
