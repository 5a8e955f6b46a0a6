pub mod prelude;

pub mod anime;
pub mod favorites;
pub mod histories;
pub mod users;
