pub mod authorized;
pub mod drink_id;

pub use drink_id::DrinkId;
