pub mod calldata;
pub mod push;
pub mod round_feed;

pub use calldata::*;
pub use push::*;
pub use round_feed::*;
