mod client;
mod error;

pub use client::AuthorApi;
pub use error::ApiError;
