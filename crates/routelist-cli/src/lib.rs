//! # routelist-cli
//!
//! Command-line front end for routelist.
//!
//! ## Commands
//!
//! - **sync**: merge core, upstream-extra and custom rules into the canonical list
//! - **build**: project the canonical list into every client dialect
//! - **check**: poll DNS for every domain rule and track consecutive NXDOMAIN runs

pub mod cli;
pub mod config;
pub mod files;
pub mod layout;
pub mod output;

pub use cli::run;
