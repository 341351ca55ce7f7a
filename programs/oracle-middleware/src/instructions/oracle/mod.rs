pub mod validate_price;
pub mod validation_cost;

pub use validate_price::*;
pub use validation_cost::*;
