//! # Vismatch Library
//!
//! Visual product matching by embedding similarity.
//! Normalizes query embeddings and ranks catalog products by cosine
//! similarity, skipping malformed stored embeddings along the way.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod logger;
pub mod matcher;
pub mod similarity;
