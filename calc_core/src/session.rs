//! # Calculator Session
//!
//! A [`CalculatorEngine`] together with the active [`ContextMode`]. Front ends
//! that work in button labels (a GUI, the terminal client) go through
//! [`Session::press`]; the session resolves the label for the active mode and
//! forwards the typed [`Action`] to the engine.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::modes::ContextMode;
//! use calc_core::session::Session;
//!
//! let mut session = Session::new(ContextMode::Homework);
//! for label in ["1", "6", "√"] {
//!     session.press(label).unwrap();
//! }
//! assert_eq!(session.engine().entry(), "4");
//! ```

use tracing::debug;

use crate::action::{Action, Operator};
use crate::engine::{CalculatorEngine, DisplayState};
use crate::errors::{CalcError, CalcResult};
use crate::modes::ContextMode;
use crate::settings::EngineSettings;

/// Engine plus the mode whose buttons are on screen.
#[derive(Debug, Clone, Default)]
pub struct Session {
    engine: CalculatorEngine,
    mode: ContextMode,
}

impl Session {
    pub fn new(mode: ContextMode) -> Self {
        Session {
            engine: CalculatorEngine::new(),
            mode,
        }
    }

    pub fn with_settings(mode: ContextMode, settings: EngineSettings) -> Self {
        Session {
            engine: CalculatorEngine::with_settings(settings),
            mode,
        }
    }

    /// Translate a button label into an action for the active mode.
    ///
    /// Digits, `.`, `=` and the operator keys work in every mode; everything
    /// else must be one of the mode's special buttons.
    pub fn resolve(&self, label: &str) -> CalcResult<Action> {
        let mut chars = label.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(digit) = c.to_digit(10) {
                return Ok(Action::Digit(digit as u8));
            }
        }

        if let Some(action) = self.mode.button(label) {
            return Ok(action);
        }

        match label {
            "." => Ok(Action::DecimalPoint),
            "=" => Ok(Action::Evaluate),
            _ => Operator::from_symbol(label)
                .map(Action::Operator)
                .ok_or_else(|| {
                    CalcError::invalid_input(format!("No '{}' button in {} mode", label, self.mode))
                }),
        }
    }

    /// Resolve a label and apply it.
    ///
    /// An unknown label is reported to the caller and leaves the engine
    /// untouched. Calculation failures are engine state, not `Err`.
    pub fn press(&mut self, label: &str) -> CalcResult<Action> {
        let action = self.resolve(label)?;
        self.engine.apply(action);
        Ok(action)
    }

    /// Switch mode. The calculator starts over in the new mode.
    pub fn switch_mode(&mut self, mode: ContextMode) {
        debug!(from = %self.mode, to = %mode, "switch mode");
        self.mode = mode;
        self.engine.clear();
    }

    pub fn mode(&self) -> ContextMode {
        self.mode
    }

    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CalculatorEngine {
        &mut self.engine
    }

    pub fn display(&self) -> DisplayState {
        self.engine.display()
    }
}
