pub mod extractor;
pub mod handlers;
pub mod impact;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod scoring;
pub mod tips;
