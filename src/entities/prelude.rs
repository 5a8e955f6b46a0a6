pub use super::anime::Entity as Anime;
pub use super::favorites::Entity as Favorites;
pub use super::histories::Entity as Histories;
pub use super::users::Entity as Users;
