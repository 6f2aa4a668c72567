//! # Core Application Logic
//!
//! Lectern's reading and search logic. Knows nothing about any specific UI
//! technology or how content is fetched.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │          CORE           │
//!                    │                         │
//!                    │  • State (App)          │
//!                    │  • Action / Effect      │
//!                    │  • update() (reducer)   │
//!                    │  • scan() (verse search)│
//!                    └───────────┬─────────────┘
//!                                │ effects
//!                    ┌───────────▼─────────────┐
//!                    │   Driver (tokio tasks)  │──► ContentGateway
//!                    └───────────┬─────────────┘
//!                                │ actions
//!                    ┌───────────▼─────────────┐
//!                    │   TUI adapter (ratatui) │
//!                    └─────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all reading state in one place
//! - [`action`]: `Action`, `Effect` and the `update` reducer
//! - [`search`]: resolving a query to a book or a verse search
//! - [`scanner`]: concurrent verse scan across books
//! - [`notice`]: generation-guarded transient messages
//! - [`scroll`]: verse addressing for scroll targets and highlights
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod notice;
pub mod scanner;
pub mod scroll;
pub mod search;
pub mod state;
