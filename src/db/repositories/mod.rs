pub mod category;
pub mod cinema;
pub mod movie;
