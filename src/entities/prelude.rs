pub use super::categories::Entity as Categories;
pub use super::cinemas::Entity as Cinemas;
pub use super::movies::Entity as Movies;
