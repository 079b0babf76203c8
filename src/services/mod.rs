// Business logic services
// Registration/login, listing management, order workflow

pub mod auth_service;
pub mod listing_service;
pub mod order_service;

pub use auth_service::AuthService;
pub use listing_service::ListingService;
pub use order_service::OrderService;
