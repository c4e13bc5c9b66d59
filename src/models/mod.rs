pub mod auth;

pub use auth::{ApiReply, AuthResponse, LoginRequest, MessageResponse, RegisterRequest};
