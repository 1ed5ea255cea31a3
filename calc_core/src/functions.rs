//! # Mode Helper Functions
//!
//! The extra buttons offered by the Homework, Shopping, Budgeting and Cooking
//! modes. Each helper is a pure function of the entry text, the pending
//! operand and the [`EngineSettings`]; the engine decides what to do with the
//! returned [`FunctionOutcome`].
//!
//! Unary helpers read the entry buffer. Binary helpers read the pending
//! operand as their first value ("100 + 4 Split" splits 100 four ways) and
//! consume the pending operation when they succeed.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::action::Function;
//! use calc_core::functions::run;
//! use calc_core::settings::EngineSettings;
//!
//! let settings = EngineSettings::default();
//! let outcome = run(Function::Split, "4", Some(100.0), &settings).unwrap();
//! assert_eq!(outcome.entry.as_deref(), Some("25"));
//! assert!(outcome.consumes_pending);
//! ```

use std::f64::consts;

use serde::{Deserialize, Serialize};

use crate::action::{Arity, Function};
use crate::errors::{finite, parse_number, CalcError, CalcResult};
use crate::format::{format_fixed, format_result, format_rounded, RESULT_PRECISION};
use crate::settings::EngineSettings;

/// Below this |cos θ| the tangent is treated as undefined.
const TAN_POLE_EPSILON: f64 = 1e-10;

/// Decimal places for money helpers
const CENTS: usize = 2;

/// Decimal places for recipe scaling
const RECIPE_PLACES: usize = 3;

/// What a helper produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionOutcome {
    /// New entry text, or `None` to leave the entry untouched
    pub entry: Option<String>,
    /// Unrounded numeric value behind `entry`
    pub value: Option<f64>,
    /// Informational lines for the display
    pub hints: Vec<String>,
    /// Whether the pending operation was used up
    pub consumes_pending: bool,
}

impl FunctionOutcome {
    fn value(value: f64, entry: String) -> Self {
        FunctionOutcome {
            entry: Some(entry),
            value: Some(value),
            hints: Vec::new(),
            consumes_pending: false,
        }
    }

    fn hints_only(hints: Vec<String>) -> Self {
        FunctionOutcome {
            entry: None,
            value: None,
            hints,
            consumes_pending: false,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

/// Where a helper reads its values from.
struct Input<'a> {
    function: Function,
    entry: &'a str,
    operand: Option<f64>,
}

impl Input<'_> {
    /// The entry as a number.
    fn unary(&self) -> CalcResult<f64> {
        if self.entry.is_empty() {
            return Err(CalcError::invalid_input(prompt(self.function)));
        }
        parse_number(self.entry)
    }

    /// The pending operand and the entry.
    fn binary(&self) -> CalcResult<(f64, f64)> {
        match self.operand {
            Some(first) if !self.entry.is_empty() => Ok((first, parse_number(self.entry)?)),
            _ => Err(CalcError::invalid_input(prompt(self.function))),
        }
    }
}

/// Run a helper function.
///
/// `entry` is the current entry text (possibly empty) and `operand` the
/// pending operand, if an operator has been selected.
pub fn run(
    function: Function,
    entry: &str,
    operand: Option<f64>,
    settings: &EngineSettings,
) -> CalcResult<FunctionOutcome> {
    let input = Input {
        function,
        entry,
        operand,
    };

    let outcome = match function {
        // Homework
        Function::Pi => constant(consts::PI),
        Function::E => constant(consts::E),
        Function::SquareRoot => {
            let value = input.unary()?;
            if value < 0.0 {
                return Err(CalcError::domain("Negative sqrt"));
            }
            rounded(value.sqrt(), RESULT_PRECISION)?
        }
        Function::Square => {
            let value = input.unary()?;
            rounded(value * value, RESULT_PRECISION)?
        }
        Function::Sin => rounded(input.unary()?.to_radians().sin(), RESULT_PRECISION)?,
        Function::Cos => rounded(input.unary()?.to_radians().cos(), RESULT_PRECISION)?,
        Function::Tan => {
            let radians = input.unary()?.to_radians();
            if radians.cos().abs() < TAN_POLE_EPSILON {
                return Err(CalcError::domain("Undefined tan"));
            }
            rounded(radians.tan(), RESULT_PRECISION)?
        }

        // Shopping
        Function::Tip => rate_hints(input.unary()?, &settings.tip_rates, ""),
        Function::Tax => rounded(input.unary()? * (1.0 + settings.tax_rate), CENTS)?.with_hint(
            format!("Tax added: {}", EngineSettings::percent_label(settings.tax_rate)),
        ),
        Function::Split => {
            let (total, people) = input.binary()?;
            if people == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            let each = finite(total / people)?;
            rounded(each, CENTS)?.with_hint(format!("Each pays: ${}", format_fixed(each, CENTS)))
        }
        Function::Total => {
            let (price, quantity) = input.binary()?;
            let total = finite(price * quantity)?;
            rounded(total, CENTS)?.with_hint(format!("Total: ${}", format_fixed(total, CENTS)))
        }
        Function::Discount => {
            let (price, percent) = input.binary()?;
            if !(0.0..=100.0).contains(&percent) {
                return Err(CalcError::domain("Discount must be 0-100%"));
            }
            let saved = price * (percent / 100.0);
            rounded(price - saved, CENTS)?
                .with_hint(format!("Saved: ${}", format_fixed(saved, CENTS)))
        }

        // Budgeting
        Function::Percent => {
            rounded(input.unary()? / 100.0, RESULT_PRECISION)?.with_hint("Converted to decimal")
        }
        Function::Increase => {
            let (base, percent) = input.binary()?;
            rounded(base * (1.0 + percent / 100.0), CENTS)?
                .with_hint(format!("Increased by {}%", format_result(percent)))
        }
        Function::Decrease => {
            let (base, percent) = input.binary()?;
            rounded(base * (1.0 - percent / 100.0), CENTS)?
                .with_hint(format!("Decreased by {}%", format_result(percent)))
        }
        Function::Average => {
            let (first, second) = input.binary()?;
            rounded((first + second) / 2.0, CENTS)?.with_hint("Average calculated")
        }
        Function::SavingsPlan => rate_hints(input.unary()?, &settings.savings_rates, "Save "),
        Function::Goal => {
            let (goal, saved) = input.binary()?;
            if goal <= 0.0 {
                return Err(CalcError::domain("Goal must be positive"));
            }
            let progress = finite(saved / goal * 100.0)?;
            rounded(progress, 1)?.with_hint(format!("Progress: {}%", format_fixed(progress, 1)))
        }

        // Cooking
        Function::Half => rounded(input.unary()? / 2.0, RECIPE_PLACES)?,
        Function::Third => rounded(input.unary()? / 3.0, RECIPE_PLACES)?,
        Function::Quarter => rounded(input.unary()? / 4.0, RECIPE_PLACES)?,
        Function::Double => rounded(input.unary()? * 2.0, RECIPE_PLACES)?,
        Function::Triple => rounded(input.unary()? * 3.0, RECIPE_PLACES)?,
        Function::Temperature => {
            let value = input.unary()?;
            if value > settings.fahrenheit_threshold {
                rounded((value - 32.0) * 5.0 / 9.0, 1)?.with_hint("Converted °F to °C")
            } else {
                rounded(value * 9.0 / 5.0 + 32.0, 1)?.with_hint("Converted °C to °F")
            }
        }
        Function::PerServing => {
            let (total, servings) = input.binary()?;
            if servings == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            let per = finite(total / servings)?;
            rounded(per, RECIPE_PLACES)?
                .with_hint(format!("Per serving: {}", format_fixed(per, RECIPE_PLACES)))
        }
    };

    Ok(FunctionOutcome {
        consumes_pending: function.arity() == Arity::Binary,
        ..outcome
    })
}

fn constant(value: f64) -> FunctionOutcome {
    FunctionOutcome::value(value, format_result(value))
}

/// One `"<prefix>15%: $6.00"` line per rate. The entry is left alone.
fn rate_hints(amount: f64, rates: &[f64], prefix: &str) -> FunctionOutcome {
    let hints = rates
        .iter()
        .map(|rate| {
            format!(
                "{}{}: ${}",
                prefix,
                EngineSettings::percent_label(*rate),
                format_fixed(amount * rate, CENTS)
            )
        })
        .collect();
    FunctionOutcome::hints_only(hints)
}

/// Check the value and format it with `places` decimals.
fn rounded(value: f64, places: usize) -> CalcResult<FunctionOutcome> {
    let value = finite(value)?;
    Ok(FunctionOutcome::value(value, format_rounded(value, places)))
}

/// What to ask for when a helper is missing its input.
fn prompt(function: Function) -> &'static str {
    match function {
        Function::Pi | Function::E => "Enter a number first",
        Function::SquareRoot | Function::Square | Function::Percent => "Enter a number first",
        Function::Sin | Function::Cos | Function::Tan => "Enter angle in degrees first",
        Function::Tip | Function::Tax => "Enter amount first",
        Function::Half | Function::Third | Function::Quarter | Function::Double | Function::Triple => {
            "Enter amount first"
        }
        Function::SavingsPlan => "Enter income first",
        Function::Temperature => "Enter temperature first",
        Function::Split => "Enter total and people count",
        Function::Total => "Enter price and quantity",
        Function::Discount => "Enter price and discount %",
        Function::Increase | Function::Decrease => "Enter base and percentage",
        Function::Average => "Enter two numbers",
        Function::Goal => "Enter goal and current savings",
        Function::PerServing => "Enter total and servings",
    }
}
