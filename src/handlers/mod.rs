// API handlers
// Each module maps to one tag in the OpenAPI docs

pub mod auth;
pub mod dashboard;
pub mod extract;
pub mod health;
pub mod listings;
pub mod orders;
pub mod response;

pub use response::ApiResponse;
