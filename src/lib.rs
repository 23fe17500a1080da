//! FAM - Family Allowance Moderator
//!
//! This library provides the core functionality for FAM, a terminal tool
//! that helps parents moderate a child's spending. Each child has a bank
//! account and one budget per spending category. Every purchase is recorded
//! against a category, and the child's archetype decides when they are
//! warned, when a category locks, and when the whole account freezes.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, accounts, budgets, transactions)
//! - `policy`: Per-archetype thresholds and the derived account lock
//! - `storage`: JSON file storage layer
//! - `services`: Registration, the transaction recorder, and queries
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fam::config::{paths::FamPaths, settings::Settings};
//! use fam::storage::Storage;
//!
//! let paths = FamPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod policy;
pub mod services;
pub mod storage;

pub use error::FamError;
