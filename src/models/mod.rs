pub mod category;
pub mod cinema;
pub mod movie;

pub use category::{Category, CategoryDraft, CategoryNode, CategoryPatch, build_category_tree};
pub use cinema::{Cinema, Screen, SeatMap};
pub use movie::{BatchAction, Movie, MovieDraft, MovieFilter, MoviePatch, Prices, Showtime};
