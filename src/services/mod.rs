pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService, HomePage};
pub use catalog_service_impl::DefaultCatalogService;

pub mod watch_service;
pub mod watch_service_impl;
pub use watch_service::{EpisodeWatch, WatchError, WatchService};
pub use watch_service_impl::DefaultWatchService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::AnilistAuthService;
