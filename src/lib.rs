//! Client library for the Voat API.
//!
//! Entities ([`Submission`], [`Subverse`], [`Comment`]) are built from API
//! payloads and resolve their relations lazily through an attached
//! [`VoatApi`] handle, caching each answer after the first access.

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod objects;
pub mod operations;

pub use auth::AuthToken;
pub use client::{VoatApi, VoatClient, VoatError};
pub use config::AppConfig;
pub use objects::{Comment, Submission, Subverse, VoatHandle, VoatObject};
