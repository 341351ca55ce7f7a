pub mod admin;
pub mod oracle;

pub use admin::*;
pub use oracle::*;
