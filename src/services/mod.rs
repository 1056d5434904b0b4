pub mod movie_service;
pub use movie_service::{CatalogError, ClientSort, MovieService};

pub mod movie_service_impl;
pub use movie_service_impl::SeaOrmMovieService;

pub mod category_service;
pub use category_service::CategoryService;

pub mod seats;
pub use seats::SeatService;

pub mod upload;
pub use upload::UploadService;
