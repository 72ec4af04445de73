pub mod blog_service;
pub mod request_service;
pub mod session_service;
pub mod user_service;
