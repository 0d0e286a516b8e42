//! GitHub API client module using octocrab.
//!
//! Provides OctocrabClient and the `ActivityClient` calls used to
//! collect a user's recent participation.

mod activity;
mod client;
pub(crate) mod error;
#[cfg(test)]
pub(crate) mod mock;

pub use activity::{ActivityClient, Page, SearchItem, SearchSort, ThreadComment};
pub use client::OctocrabClient;
