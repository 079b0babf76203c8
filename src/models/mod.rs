// Data models and DTOs
// Database rows, API request/response models

pub mod listing;
pub mod order;
pub mod user;
