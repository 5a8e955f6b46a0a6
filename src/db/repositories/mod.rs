pub mod anime;
pub mod favorite;
pub mod history;
pub mod user;
