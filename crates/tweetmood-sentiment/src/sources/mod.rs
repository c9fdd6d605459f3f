//! Upstream search sources.

mod twitter;

pub use twitter::TwitterClient;
