pub mod calendar;
pub mod formatter;
pub mod segments;
