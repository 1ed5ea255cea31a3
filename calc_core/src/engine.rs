//! # Calculator Engine
//!
//! The state machine behind every calculator mode. It owns the entry
//! buffer, at most one pending binary operation, and the error state. Each
//! call processes one user action to completion.
//!
//! ## States
//!
//! ```text
//!            select_operator               evaluate / chained operator
//! Entering ──────────────────▶ PendingOperator ──────────────────────▶ Entering
//!     │                              │
//!     └──── failing evaluate ────────┴──────────▶ Error ──(any input)──▶ Entering
//!                                         clear() from anywhere ──▶ Entering (reset)
//! ```
//!
//! Failures never escape as panics or `Err` values. They are stored as
//! [`CalcError`] and shown in place of the entry until the next input.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::action::Operator;
//! use calc_core::engine::CalculatorEngine;
//! use calc_core::errors::CalcError;
//!
//! let mut engine = CalculatorEngine::new();
//! engine.append_digit(1);
//! engine.append_digit(0);
//! engine.select_operator(Operator::Div);
//! engine.append_digit(0);
//! engine.evaluate();
//!
//! assert_eq!(engine.error(), Some(&CalcError::DivisionByZero));
//! assert_eq!(engine.entry(), "0");
//! assert!(engine.pending().is_some());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::{Action, Function, Operator};
use crate::errors::{finite, parse_number, CalcError, CalcResult};
use crate::format::format_result;
use crate::functions;
use crate::settings::EngineSettings;

/// A stored operand and operator waiting for the second operand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    pub operand: f64,
    pub operator: Operator,
}

impl PendingOperation {
    /// Apply the operator with `rhs` as the second operand.
    pub fn apply(&self, rhs: f64) -> CalcResult<f64> {
        if self.operator == Operator::Div && rhs == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        finite(self.operator.apply(self.operand, rhs))
    }

    /// Text for the line above the entry, e.g. `"5 +"`
    pub fn label(&self) -> String {
        format!("{} {}", format_result(self.operand), self.operator.symbol())
    }
}

/// Coarse state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Typing an operand (initial state)
    Entering,
    /// An operator is selected and waits for its second operand
    PendingOperator,
    /// An error is displayed
    Error,
}

/// Snapshot of what a front end should draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Entry text, or the error message when `is_error` is set
    pub text: String,
    /// Whether `text` is an error message
    pub is_error: bool,
    /// Pending operand and operator, e.g. `"5 +"`
    pub pending: Option<String>,
    /// Informational lines from the last helper function
    pub hints: Vec<String>,
}

impl DisplayState {
    /// Main text cut to `width` characters, with `...` appended when cut.
    pub fn truncated(&self, width: usize) -> String {
        if self.text.chars().count() > width {
            let head: String = self.text.chars().take(width).collect();
            format!("{}...", head)
        } else {
            self.text.clone()
        }
    }
}

/// Single pending operation calculator.
///
/// Owned by the front end and driven through [`apply`](Self::apply) or the
/// individual operation methods. Instances are independent; there is no
/// shared state.
#[derive(Debug, Clone, Default)]
pub struct CalculatorEngine {
    entry: String,
    pending: Option<PendingOperation>,
    error: Option<CalcError>,
    hints: Vec<String>,
    last_result: Option<f64>,
    settings: EngineSettings,
}

impl CalculatorEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom settings.
    pub fn with_settings(settings: EngineSettings) -> Self {
        CalculatorEngine {
            settings,
            ..Self::default()
        }
    }

    /// Dispatch one action.
    ///
    /// Every action except [`Action::Clear`] first dismisses a displayed
    /// error. The operation methods below all route through here.
    pub fn apply(&mut self, action: Action) {
        debug!(?action, "apply");
        if action.clears_error() {
            self.error = None;
        }
        match action {
            Action::Digit(digit) => self.push_digit(digit),
            Action::DecimalPoint => self.push_decimal_point(),
            Action::Operator(op) => self.push_operator(op),
            Action::Evaluate => {
                let result = self.try_evaluate().map(|_| ());
                self.settle(result);
            }
            Action::Clear => self.reset(),
            Action::Backspace => {
                // with an empty entry the only effect is dismissing the error
                self.entry.pop();
            }
            Action::Function(function) => self.run_function(function),
        }
    }

    /// Append a digit `0..=9` to the entry.
    pub fn append_digit(&mut self, digit: u8) {
        self.apply(Action::Digit(digit));
    }

    /// Append a decimal point unless the entry already has one.
    ///
    /// An empty entry becomes `"0."`.
    pub fn append_decimal_point(&mut self) {
        self.apply(Action::DecimalPoint);
    }

    /// Select a binary operator.
    ///
    /// Does nothing while the entry is empty. With an operation already
    /// pending, that operation is evaluated first and its result becomes the
    /// new operand; if it fails, the error is kept and the operator is not
    /// changed.
    pub fn select_operator(&mut self, operator: Operator) {
        self.apply(Action::Operator(operator));
    }

    /// Evaluate the pending operation.
    ///
    /// Does nothing unless an operation is pending and the entry is non-empty.
    /// On failure the entry and pending operation stay as they were so the
    /// second operand can be corrected.
    pub fn evaluate(&mut self) {
        self.apply(Action::Evaluate);
    }

    /// Reset to the initial state. Settings are kept.
    pub fn clear(&mut self) {
        self.apply(Action::Clear);
    }

    /// Remove the last entry character, or dismiss the error if the entry is
    /// already empty.
    pub fn backspace(&mut self) {
        self.apply(Action::Backspace);
    }

    /// Run a mode helper function.
    pub fn apply_function(&mut self, function: Function) {
        self.apply(Action::Function(function));
    }

    fn push_digit(&mut self, digit: u8) {
        let result = char::from_digit(u32::from(digit), 10)
            .map(|c| self.entry.push(c))
            .ok_or_else(|| CalcError::invalid_input(format!("Invalid digit {}", digit)));
        self.settle(result);
    }

    fn push_decimal_point(&mut self) {
        if self.entry.contains('.') {
            return;
        }
        if self.entry.is_empty() {
            self.entry.push('0');
        }
        self.entry.push('.');
    }

    fn push_operator(&mut self, operator: Operator) {
        if self.entry.is_empty() {
            return;
        }
        let result = self.try_select_operator(operator);
        self.settle(result);
    }

    fn reset(&mut self) {
        self.entry.clear();
        self.pending = None;
        self.error = None;
        self.hints.clear();
        self.last_result = None;
    }

    fn run_function(&mut self, function: Function) {
        let operand = self.pending.map(|p| p.operand);
        let result = functions::run(function, &self.entry, operand, &self.settings).map(|outcome| {
            if let Some(entry) = outcome.entry {
                self.entry = entry;
            }
            if outcome.value.is_some() {
                self.last_result = outcome.value;
            }
            if outcome.consumes_pending {
                self.pending = None;
            }
            self.hints = outcome.hints;
        });
        self.settle(result);
    }

    fn try_select_operator(&mut self, operator: Operator) -> CalcResult<()> {
        let operand = match self.try_evaluate()? {
            Some(value) => value,
            None => parse_number(&self.entry)?,
        };
        self.pending = Some(PendingOperation { operand, operator });
        self.entry.clear();
        Ok(())
    }

    /// Evaluate if possible. `Ok(None)` means there was nothing to evaluate.
    fn try_evaluate(&mut self) -> CalcResult<Option<f64>> {
        let pending = match self.pending {
            Some(pending) if !self.entry.is_empty() => pending,
            _ => return Ok(None),
        };
        let rhs = parse_number(&self.entry)?;
        let value = pending.apply(rhs)?;

        self.entry = format_result(value);
        self.last_result = Some(value);
        self.pending = None;
        Ok(Some(value))
    }

    fn settle(&mut self, result: CalcResult<()>) {
        if let Err(error) = result {
            debug!(code = error.error_code(), %error, "calculator error");
            self.error = Some(error);
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// The text being typed
    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn pending(&self) -> Option<&PendingOperation> {
        self.pending.as_ref()
    }

    pub fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Most recent numeric result from an evaluation or helper
    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn state(&self) -> EngineState {
        if self.error.is_some() {
            EngineState::Error
        } else if self.pending.is_some() {
            EngineState::PendingOperator
        } else {
            EngineState::Entering
        }
    }

    /// Snapshot for rendering.
    pub fn display(&self) -> DisplayState {
        DisplayState {
            text: match &self.error {
                Some(error) => error.to_string(),
                None => self.entry.clone(),
            },
            is_error: self.error.is_some(),
            pending: self.pending.as_ref().map(PendingOperation::label),
            hints: self.hints.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a whitespace separated key sequence: digits, `.`, operators, `=`.
    fn run_keys(engine: &mut CalculatorEngine, keys: &str) {
        for key in keys.split_whitespace() {
            let action = match key {
                "=" => Action::Evaluate,
                "." => Action::DecimalPoint,
                "C" => Action::Clear,
                "Del" => Action::Backspace,
                _ => match Operator::from_symbol(key) {
                    Some(op) => Action::Operator(op),
                    None => {
                        for c in key.chars() {
                            if c == '.' {
                                engine.apply(Action::DecimalPoint);
                            } else {
                                engine.apply(Action::Digit(c.to_digit(10).unwrap() as u8));
                            }
                        }
                        continue;
                    }
                },
            };
            engine.apply(action);
        }
    }

    fn eval(keys: &str) -> CalculatorEngine {
        let mut engine = CalculatorEngine::new();
        run_keys(&mut engine, keys);
        engine
    }

    #[test]
    fn test_initial_state() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.entry(), "");
        assert_eq!(engine.pending(), None);
        assert_eq!(engine.error(), None);
        assert_eq!(engine.state(), EngineState::Entering);
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(eval("5 + 3 =").entry(), "8");
        assert_eq!(eval("10 - 4 =").entry(), "6");
        assert_eq!(eval("4 - 10 =").entry(), "-6");
        assert_eq!(eval("7 × 6 =").entry(), "42");
        assert_eq!(eval("7 × 0 =").entry(), "0");
        assert_eq!(eval("5 / 2 =").entry(), "2.5");
    }

    #[test]
    fn test_integral_results_have_no_decimal() {
        assert_eq!(eval("10 / 2 =").entry(), "5");
        assert_eq!(eval("5.5 + 2.5 =").entry(), "8");
    }

    #[test]
    fn test_repeating_decimal_is_rounded() {
        assert_eq!(eval("1 / 3 =").entry(), "0.3333333333");
        assert_eq!(eval("0.1 + 0.2 =").entry(), "0.3");
    }

    #[test]
    fn test_evaluate_clears_pending_and_stores_result() {
        let engine = eval("6 × 7 =");
        assert_eq!(engine.pending(), None);
        assert_eq!(engine.last_result(), Some(42.0));
        assert_eq!(engine.state(), EngineState::Entering);
    }

    #[test]
    fn test_division_by_zero_is_retryable() {
        let mut engine = eval("10 / 0 =");
        assert_eq!(engine.error(), Some(&CalcError::DivisionByZero));
        assert_eq!(engine.entry(), "0");
        assert_eq!(
            engine.pending(),
            Some(&PendingOperation {
                operand: 10.0,
                operator: Operator::Div
            })
        );
        assert_eq!(engine.state(), EngineState::Error);
        assert_eq!(engine.display().text, "Error: Division by 0");
        assert!(engine.display().is_error);

        run_keys(&mut engine, "Del 4 =");
        assert_eq!(engine.error(), None);
        assert_eq!(engine.entry(), "2.5");
    }

    #[test]
    fn test_chained_operators() {
        let engine = eval("5 + 3 + 2 =");
        assert_eq!(engine.entry(), "10");
        assert_eq!(engine.pending(), None);
    }

    #[test]
    fn test_chained_operator_shows_intermediate() {
        let engine = eval("5 + 3 ×");
        assert_eq!(
            engine.pending(),
            Some(&PendingOperation {
                operand: 8.0,
                operator: Operator::Mul
            })
        );
        assert_eq!(engine.entry(), "");
        assert_eq!(engine.display().pending.as_deref(), Some("8 ×"));
    }

    #[test]
    fn test_chained_division_by_zero_aborts_operator_change() {
        let engine = eval("8 / 0 +");
        assert_eq!(engine.error(), Some(&CalcError::DivisionByZero));
        assert_eq!(engine.pending().map(|p| p.operator), Some(Operator::Div));
        assert_eq!(engine.entry(), "0");
    }

    #[test]
    fn test_operator_needs_entry() {
        let engine = eval("+");
        assert_eq!(engine.pending(), None);
        assert_eq!(engine.state(), EngineState::Entering);

        // a second operator without a new operand keeps the first one
        let engine = eval("5 + ×");
        assert_eq!(engine.pending().map(|p| p.operator), Some(Operator::Add));
    }

    #[test]
    fn test_evaluate_without_operands_is_noop() {
        let engine = eval("5 =");
        assert_eq!(engine.entry(), "5");
        assert_eq!(engine.error(), None);

        let engine = eval("5 + =");
        assert_eq!(engine.entry(), "");
        assert!(engine.pending().is_some());
    }

    #[test]
    fn test_decimal_point_idempotent() {
        let mut engine = CalculatorEngine::new();
        engine.append_digit(3);
        engine.append_decimal_point();
        engine.append_decimal_point();
        engine.append_digit(1);
        engine.append_decimal_point();
        assert_eq!(engine.entry(), "3.1");
        assert_eq!(engine.entry().matches('.').count(), 1);
    }

    #[test]
    fn test_decimal_point_seeds_zero() {
        let mut engine = CalculatorEngine::new();
        engine.append_decimal_point();
        assert_eq!(engine.entry(), "0.");
        engine.append_digit(5);
        assert_eq!(engine.entry(), "0.5");
    }

    #[test]
    fn test_invalid_digit() {
        let mut engine = CalculatorEngine::new();
        engine.append_digit(12);
        assert_eq!(engine.error().map(CalcError::error_code), Some("INVALID_INPUT"));
        assert_eq!(engine.entry(), "");
    }

    #[test]
    fn test_backspace() {
        let mut engine = eval("12.5");
        engine.backspace();
        assert_eq!(engine.entry(), "12.");
        engine.backspace();
        engine.backspace();
        engine.backspace();
        assert_eq!(engine.entry(), "");
        engine.backspace();
        assert_eq!(engine.entry(), "");
    }

    #[test]
    fn test_backspace_clears_error_only() {
        let mut engine = eval("9 +");
        engine.apply_function(Function::SquareRoot);
        assert!(engine.error().is_some());

        engine.backspace();
        assert_eq!(engine.error(), None);
        assert_eq!(engine.entry(), "");
        assert_eq!(engine.pending().map(|p| p.operand), Some(9.0));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut engine = eval("10 / 0 =");
        engine.clear();
        assert_eq!(engine.entry(), "");
        assert_eq!(engine.pending(), None);
        assert_eq!(engine.error(), None);
        assert_eq!(engine.last_result(), None);
        assert_eq!(engine.state(), EngineState::Entering);
    }

    #[test]
    fn test_any_input_clears_error() {
        let mut engine = eval("10 / 0 =");
        engine.append_digit(5);
        assert_eq!(engine.error(), None);
        assert_eq!(engine.entry(), "05");
    }

    #[test]
    fn test_every_non_clear_action_clears_error() {
        let actions = [
            Action::Digit(1),
            Action::DecimalPoint,
            Action::Operator(Operator::Add),
            Action::Evaluate,
            Action::Backspace,
            Action::Function(Function::Half),
        ];
        for action in actions {
            let mut engine = eval("4");
            engine.append_digit(12);
            assert!(engine.error().is_some());

            engine.apply(action);
            assert_eq!(engine.error(), None, "{:?} kept the error", action);
        }
    }

    #[test]
    fn test_large_results_show_typed_digits() {
        assert_eq!(eval("9999999.9 + 0 =").entry(), "9999999.9");
        assert_eq!(eval("1234567.1 + 1 =").entry(), "1234568.1");
    }

    #[test]
    fn test_overflow_is_domain_error() {
        let mut engine = CalculatorEngine::new();
        engine.apply_function(Function::Pi);
        for _ in 0..12 {
            engine.apply_function(Function::Square);
        }
        assert_eq!(engine.error(), Some(&CalcError::domain("Result out of range")));
    }

    #[test]
    fn test_helper_result_feeds_arithmetic() {
        let mut engine = eval("16");
        engine.apply_function(Function::SquareRoot);
        run_keys(&mut engine, "+ 1 =");
        assert_eq!(engine.entry(), "5");
    }

    #[test]
    fn test_constant_with_pending_operator() {
        let mut engine = eval("2 ×");
        engine.apply_function(Function::Pi);
        engine.evaluate();
        assert_eq!(engine.entry(), "6.2831853072");
    }

    #[test]
    fn test_binary_helper_consumes_pending() {
        let mut engine = eval("100 + 4");
        engine.apply_function(Function::Split);
        assert_eq!(engine.entry(), "25");
        assert_eq!(engine.pending(), None);
        assert_eq!(engine.hints(), ["Each pays: $25.00"]);
    }

    #[test]
    fn test_hints_survive_until_clear() {
        let mut engine = eval("50");
        engine.apply_function(Function::Tip);
        assert_eq!(engine.entry(), "50");
        assert_eq!(engine.hints().len(), 3);

        run_keys(&mut engine, "+ 1 =");
        assert_eq!(engine.hints().len(), 3);

        engine.clear();
        assert!(engine.hints().is_empty());
    }

    #[test]
    fn test_custom_settings() {
        let settings = EngineSettings {
            tax_rate: 0.1,
            ..EngineSettings::default()
        };
        let mut engine = CalculatorEngine::with_settings(settings);
        run_keys(&mut engine, "20");
        engine.apply_function(Function::Tax);
        assert_eq!(engine.entry(), "22");
        assert_eq!(engine.hints(), ["Tax added: 10%"]);
    }

    #[test]
    fn test_independent_instances() {
        let mut a = eval("1 +");
        let b = a.clone();
        run_keys(&mut a, "2 =");
        assert_eq!(a.entry(), "3");
        assert_eq!(b.entry(), "");
        assert!(b.pending().is_some());
    }

    #[test]
    fn test_display_truncation() {
        let mut engine = CalculatorEngine::new();
        engine.apply_function(Function::Pi);
        let display = engine.display();
        assert_eq!(display.truncated(20), "3.1415926536");
        assert_eq!(display.truncated(4), "3.14...");
    }

    #[test]
    fn test_display_serializes() {
        let display: DisplayState = eval("5 +").display();
        let json = serde_json::to_value(&display).unwrap();
        assert_eq!(json["pending"], "5 +");
        assert_eq!(json["is_error"], false);
    }
}
