pub mod http;
pub mod service;

pub use http::HttpProfileService;
pub use service::{ProfileService, ServiceError};
