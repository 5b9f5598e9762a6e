//! Reddit content source for leadscout.
//!
//! [`RedditClient`] authenticates with the OAuth password grant and pages
//! subreddit listings. [`collect`] layers the multi-ranking, deduplicated
//! collection procedure on top of any [`ContentSource`].

pub mod client;
pub mod collector;
pub mod error;
mod retry;
pub mod types;

pub use client::{RedditClient, RedditSettings};
pub use collector::{collect, ContentSource};
pub use error::RedditError;
