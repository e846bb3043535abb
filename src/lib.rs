pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod links;
pub mod pipeline;
pub mod policy;
pub mod server;
