//! Operations module provides functionality for interacting with Voat

pub mod comment;
pub mod comments;
pub mod posts;
pub mod subverse_info;
pub mod token;
