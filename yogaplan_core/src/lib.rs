#![forbid(unsafe_code)]

//! Core domain model and planning logic for the yogaplan wellness planner.
//!
//! This crate provides:
//! - Domain types (activities, profiles, sessions, plans)
//! - The built-in content library
//! - Profile normalization
//! - The planning engine (eligibility, ranking, budgeting, assembly, scheduling)
//! - Progression outline and safety notes
//! - Configuration and stored profile preferences

pub mod types;
pub mod error;
pub mod library;
pub mod config;
pub mod logging;
pub mod profile;
pub mod profile_store;
pub mod eligibility;
pub mod ranking;
pub mod budget;
pub mod assembler;
pub mod schedule;
pub mod progression;
pub mod safety;
pub mod plan;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use library::{build_default_library, default_library, ContentLibrary};
pub use config::{Config, OutputFormat};
pub use profile::{normalize, RawProfile};
pub use profile_store::ProfileStore;
pub use plan::{generate_plan, generate_plan_from_value, generate_plan_with};
