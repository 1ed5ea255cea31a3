//! # Context Modes
//!
//! Each mode swaps the calculator's special buttons for a use case. The
//! digit pad, the decimal point and `=` are shared by every mode; operators
//! are always reachable from the keyboard.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::action::{Action, Function};
//! use calc_core::modes::ContextMode;
//!
//! let mode: ContextMode = "cooking".parse().unwrap();
//! assert_eq!(mode, ContextMode::Cooking);
//! assert_eq!(mode.button("½"), Some(Action::Function(Function::Half)));
//! assert_eq!(mode.button("sin"), None);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::{Action, Function, Operator};
use crate::errors::CalcError;

/// A labelled special button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeButton {
    pub label: &'static str,
    pub action: Action,
}

const fn button(label: &'static str, action: Action) -> ModeButton {
    ModeButton { label, action }
}

const fn function(label: &'static str, function: Function) -> ModeButton {
    ModeButton {
        label,
        action: Action::Function(function),
    }
}

const CLEAR: ModeButton = button("C", Action::Clear);
const DELETE: ModeButton = button("Del", Action::Backspace);

const STANDARD_BUTTONS: &[ModeButton] = &[
    CLEAR,
    DELETE,
    button("/", Action::Operator(Operator::Div)),
    button("×", Action::Operator(Operator::Mul)),
    button("-", Action::Operator(Operator::Sub)),
    button("+", Action::Operator(Operator::Add)),
    button("=", Action::Evaluate),
    button(".", Action::DecimalPoint),
];

const HOMEWORK_BUTTONS: &[ModeButton] = &[
    CLEAR,
    DELETE,
    function("√", Function::SquareRoot),
    function("x²", Function::Square),
    function("π", Function::Pi),
    function("sin", Function::Sin),
    function("cos", Function::Cos),
    function("tan", Function::Tan),
    function("e", Function::E),
];

const SHOPPING_BUTTONS: &[ModeButton] = &[
    CLEAR,
    DELETE,
    function("%", Function::Percent),
    function("Tax", Function::Tax),
    function("Tip", Function::Tip),
    function("Split", Function::Split),
    function("Save", Function::Discount),
    function("Total", Function::Total),
];

const BUDGETING_BUTTONS: &[ModeButton] = &[
    CLEAR,
    DELETE,
    function("%", Function::Percent),
    function("Avg", Function::Average),
    function("Inc", Function::Increase),
    function("Dec", Function::Decrease),
    function("Save", Function::SavingsPlan),
    function("Goal", Function::Goal),
];

const COOKING_BUTTONS: &[ModeButton] = &[
    CLEAR,
    DELETE,
    function("½", Function::Half),
    function("⅓", Function::Third),
    function("¼", Function::Quarter),
    function("2×", Function::Double),
    function("3×", Function::Triple),
    function("°C/°F", Function::Temperature),
    function("Save", Function::PerServing),
];

/// Calculator use case selecting the special button set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContextMode {
    #[default]
    Standard,
    Homework,
    Shopping,
    Budgeting,
    Cooking,
}

impl ContextMode {
    /// All modes in selector order
    pub const ALL: [ContextMode; 5] = [
        ContextMode::Standard,
        ContextMode::Homework,
        ContextMode::Shopping,
        ContextMode::Budgeting,
        ContextMode::Cooking,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ContextMode::Standard => "Standard",
            ContextMode::Homework => "Homework",
            ContextMode::Shopping => "Shopping",
            ContextMode::Budgeting => "Budgeting",
            ContextMode::Cooking => "Cooking",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ContextMode::Standard => "Basic arithmetic operations",
            ContextMode::Homework => "Math homework and studies",
            ContextMode::Shopping => "Shopping and expenses",
            ContextMode::Budgeting => "Personal budgeting",
            ContextMode::Cooking => "Cooking and recipes",
        }
    }

    /// Hint shown before any helper has produced output
    pub fn default_hint(&self) -> &'static str {
        match self {
            ContextMode::Standard => "Enter numbers and operations",
            ContextMode::Homework => "Try sin(), cos(), or √ functions",
            ContextMode::Shopping => "Calculate tips, taxes, or split bills",
            ContextMode::Budgeting => "Track expenses with % calculations",
            ContextMode::Cooking => "Convert units or scale recipes",
        }
    }

    /// Special buttons for this mode
    pub fn buttons(&self) -> &'static [ModeButton] {
        match self {
            ContextMode::Standard => STANDARD_BUTTONS,
            ContextMode::Homework => HOMEWORK_BUTTONS,
            ContextMode::Shopping => SHOPPING_BUTTONS,
            ContextMode::Budgeting => BUDGETING_BUTTONS,
            ContextMode::Cooking => COOKING_BUTTONS,
        }
    }

    /// Look up a special button by label
    pub fn button(&self, label: &str) -> Option<Action> {
        self.buttons()
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.action)
    }
}

impl fmt::Display for ContextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ContextMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContextMode::ALL
            .into_iter()
            .find(|mode| mode.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalcError::invalid_input(format!("Unknown mode '{}'", s.trim())))
    }
}
