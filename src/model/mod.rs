pub mod reading;
pub mod segment;
pub mod span;
