//! Google provider implementations
//!
//! - Service-account OAuth2 for Drive access
//! - Drive v3 ranged media downloads
//! - Gemini for text generation

mod auth;
mod drive_store;
mod gemini_client;

pub use auth::GcpAuth;
pub use drive_store::DriveDocumentStore;
pub use gemini_client::GeminiClient;
