pub mod aggregate;
pub mod analyzer;
pub mod api;
pub mod classifier;
pub mod error;
pub mod filter;
pub mod model;
pub mod prototype;
pub mod taxonomy;
pub mod text;
pub mod vectorizer;
