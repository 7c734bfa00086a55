//! Cell value types

use std::fmt;

/// The value a cell evaluates to
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text value; an empty cell reads as empty text
    Text(String),

    /// Numeric value
    Number(f64),

    /// Evaluation error (#VALUE!, #REF!, #DIV/0!)
    Error(CellError),
}

impl Value {
    /// The value of a blank cell
    pub fn blank() -> Self {
        Value::Text(String::new())
    }

    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        Value::Text(s.into())
    }

    /// Check if this is the blank value
    pub fn is_blank(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }

    /// Get the error if this is one
    pub fn as_error(&self) -> Option<CellError> {
        match self {
            Value::Error(e) => Some(*e),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::blank()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<CellError> for Value {
    fn from(e: CellError) -> Self {
        Value::Error(e)
    }
}

/// Formula evaluation error categories
///
/// These are ordinary values, not faults: they are cached like any other
/// value and flow through dependent formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellError {
    /// #REF! - Reference to a position outside the sheet
    Ref,
    /// #VALUE! - Operand cannot be used as a number
    Value,
    /// #DIV/0! - Division by zero or a non-finite result
    Div0,
}

impl CellError {
    /// Get the display token for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Ref => "#REF!",
            CellError::Value => "#VALUE!",
            CellError::Div0 => "#DIV/0!",
        }
    }

    /// Parse a display token
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "#REF!" => Some(CellError::Ref),
            "#VALUE!" => Some(CellError::Value),
            "#DIV/0!" => Some(CellError::Div0),
            _ => None,
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Significant digits used when displaying numbers
const DISPLAY_PRECISION: i32 = 6;

/// Format a number the way sheet output displays it
///
/// Uses the shortest general form with six significant digits: fixed
/// notation for moderate exponents, scientific (`1e+10`) otherwise, and no
/// trailing zeros in either.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".into();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.into();
    }

    // Rounding to the display precision can bump the exponent (999999.5 -> 1e+06),
    // so take the exponent from the rounded scientific form.
    let sci = format!("{:.*e}", (DISPLAY_PRECISION - 1) as usize, n);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= DISPLAY_PRECISION {
        format!(
            "{}e{}{:02}",
            trim_fraction_zeros(mantissa),
            if exp < 0 { '-' } else { '+' },
            exp.abs()
        )
    } else {
        let fixed = format!("{:.*}", (DISPLAY_PRECISION - 1 - exp) as usize, n);
        trim_fraction_zeros(&fixed).to_string()
    }
}

fn trim_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
