//! # Actions
//!
//! Every user input the engine understands is one [`Action`]. Front ends map
//! clicks or key presses onto these values and hand them to
//! [`CalculatorEngine::apply`](crate::engine::CalculatorEngine::apply).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::action::{Action, Operator};
//! use calc_core::engine::CalculatorEngine;
//!
//! let mut engine = CalculatorEngine::new();
//! for action in [
//!     Action::Digit(7),
//!     Action::Operator(Operator::Mul),
//!     Action::Digit(6),
//!     Action::Evaluate,
//! ] {
//!     engine.apply(action);
//! }
//! assert_eq!(engine.entry(), "42");
//! ```

use serde::{Deserialize, Serialize};

/// The four binary operators a pending operation can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Operator; 4] = [Operator::Div, Operator::Mul, Operator::Sub, Operator::Add];

    /// Button label (`+`, `-`, `×`, `/`)
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "×",
            Operator::Div => "/",
        }
    }

    /// Parse a button label or keyboard key into an operator.
    ///
    /// Accepts `*` and `x` as multiplication and `÷` as division.
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "×" | "*" | "x" => Some(Operator::Mul),
            "/" | "÷" => Some(Operator::Div),
            _ => None,
        }
    }

    /// Apply the operator. Division by zero is checked by the caller.
    pub(crate) fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / rhs,
        }
    }
}

/// Mode-specific helper functions.
///
/// Unary functions work on the entry buffer alone. Binary helpers take the
/// pending operand as their first value and the entry as their second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Function {
    // Homework
    SquareRoot,
    Square,
    Pi,
    E,
    Sin,
    Cos,
    Tan,

    // Shopping
    Tip,
    Tax,
    Split,
    Total,
    Discount,

    // Budgeting
    Percent,
    Increase,
    Decrease,
    Average,
    SavingsPlan,
    Goal,

    // Cooking
    Half,
    Third,
    Quarter,
    Double,
    Triple,
    Temperature,
    PerServing,
}

/// How many values a helper function reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arity {
    /// Inserts a constant, needs no entry
    Constant,
    /// Works on the entry
    Unary,
    /// Combines the pending operand with the entry
    Binary,
}

impl Function {
    /// All helpers, grouped by the mode that shows them
    pub const ALL: [Function; 25] = [
        Function::SquareRoot,
        Function::Square,
        Function::Pi,
        Function::E,
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Tip,
        Function::Tax,
        Function::Split,
        Function::Total,
        Function::Discount,
        Function::Percent,
        Function::Increase,
        Function::Decrease,
        Function::Average,
        Function::SavingsPlan,
        Function::Goal,
        Function::Half,
        Function::Third,
        Function::Quarter,
        Function::Double,
        Function::Triple,
        Function::Temperature,
        Function::PerServing,
    ];

    pub fn arity(&self) -> Arity {
        match self {
            Function::Pi | Function::E => Arity::Constant,
            Function::SquareRoot
            | Function::Square
            | Function::Sin
            | Function::Cos
            | Function::Tan
            | Function::Tip
            | Function::Tax
            | Function::Percent
            | Function::SavingsPlan
            | Function::Half
            | Function::Third
            | Function::Quarter
            | Function::Double
            | Function::Triple
            | Function::Temperature => Arity::Unary,
            Function::Split
            | Function::Total
            | Function::Discount
            | Function::Increase
            | Function::Decrease
            | Function::Average
            | Function::Goal
            | Function::PerServing => Arity::Binary,
        }
    }
}

/// One user input, carrying its typed payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value")]
pub enum Action {
    /// Append a digit `0..=9`
    Digit(u8),
    /// Append the decimal point
    DecimalPoint,
    /// Select a binary operator
    Operator(Operator),
    /// Evaluate the pending operation (`=`)
    Evaluate,
    /// Reset everything (`C`)
    Clear,
    /// Remove the last character (`Del`)
    Backspace,
    /// Run a mode helper
    Function(Function),
}

impl Action {
    /// Whether this action clears a displayed error before running
    pub fn clears_error(&self) -> bool {
        !matches!(self, Action::Clear)
    }
}
