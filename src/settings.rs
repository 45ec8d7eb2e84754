//! Settings of the calculator.
//!
//! The defaults can be overridden with the environment variables
//! `MATRIX_CALCULATOR_MAX_DIMENSION`, `MATRIX_CALCULATOR_RANDOM_MIN`,
//! `MATRIX_CALCULATOR_RANDOM_MAX` and `MATRIX_CALCULATOR_FRACTIONAL`.

use std::{env, str::FromStr};

use tracing::warn;

use crate::{generator::RandomSettings, printer::PrintOptions, solve::CramerOptions};

/// The largest matrix that may be entered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DimensionLimits {
    pub max_rows: u32,
    pub max_cols: u32,
}

impl Default for DimensionLimits {
    fn default() -> Self {
        DimensionLimits {
            max_rows: 10,
            max_cols: 10,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct CalculatorSettings {
    pub limits: DimensionLimits,
    pub random: RandomSettings,
    pub print: PrintOptions,
    pub cramer: CramerOptions,
}

impl CalculatorSettings {
    /// Read the settings from the environment, falling back to the defaults
    /// for variables that are unset or invalid.
    pub fn from_env() -> CalculatorSettings {
        Self::from_vars(|k| env::var(k).ok())
    }

    pub(crate) fn from_vars(var: impl Fn(&str) -> Option<String>) -> CalculatorSettings {
        let mut settings = CalculatorSettings::default();

        if let Some(d) = parse_var::<u32>(&var, "MATRIX_CALCULATOR_MAX_DIMENSION") {
            if d == 0 {
                warn!("MATRIX_CALCULATOR_MAX_DIMENSION must be positive; using the default");
            } else {
                settings.limits = DimensionLimits {
                    max_rows: d,
                    max_cols: d,
                };
            }
        }

        let min = parse_var::<i32>(&var, "MATRIX_CALCULATOR_RANDOM_MIN").unwrap_or(settings.random.min());
        let max = parse_var::<i32>(&var, "MATRIX_CALCULATOR_RANDOM_MAX").unwrap_or(settings.random.max());
        let fractional = parse_var::<bool>(&var, "MATRIX_CALCULATOR_FRACTIONAL")
            .unwrap_or(settings.random.fractional());

        match RandomSettings::new(min, max, fractional) {
            Ok(r) => settings.random = r,
            Err(e) => warn!("Ignoring random generation bounds: {}", e),
        }

        settings
    }
}

fn parse_var<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let v = var(key)?;
    match v.trim().parse() {
        Ok(x) => Some(x),
        Err(_) => {
            warn!("Ignoring invalid value `{}` of {}", v, key);
            None
        }
    }
}
