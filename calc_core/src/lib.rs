//! # calc_core - Context-Aware Calculator Engine
//!
//! `calc_core` is the state machine behind a calculator whose special buttons
//! change with the use case (Standard, Homework, Shopping, Budgeting,
//! Cooking). Front ends own a [`CalculatorEngine`] (or a [`Session`] that adds
//! the active mode), feed it typed [`Action`]s, and render its [`DisplayState`].
//!
//! ## Design Philosophy
//!
//! - **Explicit state**: the engine is a plain owned struct, no globals
//! - **Closed actions**: inputs are an enum, dispatched by exhaustive match
//! - **Errors as state**: failures are stored and displayed, never thrown
//! - **JSON-friendly**: actions, errors, displays and settings serialize
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{Action, CalculatorEngine, Operator};
//!
//! let mut engine = CalculatorEngine::new();
//! engine.apply(Action::Digit(5));
//! engine.apply(Action::Operator(Operator::Add));
//! engine.apply(Action::Digit(3));
//! engine.apply(Action::Operator(Operator::Add));
//! engine.apply(Action::Digit(2));
//! engine.apply(Action::Evaluate);
//!
//! assert_eq!(engine.entry(), "10");
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - The calculator state machine
//! - [`action`] - User inputs as typed actions
//! - [`functions`] - Mode helper functions (sqrt, tip, recipe scaling, ...)
//! - [`modes`] - Context modes and their button tables
//! - [`session`] - Engine plus active mode, resolving button labels
//! - [`format`] - Result formatting
//! - [`settings`] - Tunable rates and thresholds
//! - [`errors`] - Structured error types

pub mod action;
pub mod engine;
pub mod errors;
pub mod format;
pub mod functions;
pub mod modes;
pub mod session;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use action::{Action, Arity, Function, Operator};
pub use engine::{CalculatorEngine, DisplayState, EngineState, PendingOperation};
pub use errors::{CalcError, CalcResult};
pub use modes::ContextMode;
pub use session::Session;
pub use settings::EngineSettings;
