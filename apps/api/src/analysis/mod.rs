// Upload → extract → match → artifacts. One request, one document, no persistence.

pub mod handlers;
pub mod upload;
