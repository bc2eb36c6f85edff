use super::GeneralizedTime;

/// An attribute value after applying the normalization of an equality
/// matching rule.
///
/// Two raw values are equal under a rule iff their normalized forms are
/// equal.
#[derive(Clone, Debug)]
pub enum NormalizedValue {
    /// Verbatim or case folded text.
    Text(String),
    /// A numeric value. `text` keeps the trimmed source for rendering values
    /// that did not coerce to a finite number.
    Number { value: f64, text: String },
    Time(GeneralizedTime),
    /// The canonical rendering of a distinguished name.
    Dn(String),
}

impl NormalizedValue {
    /// Coerce text to a number.
    ///
    /// Blank text is zero, anything unparsable becomes NaN and therefore never
    /// equals another number.
    pub fn number(text: &str) -> Self {
        let text = text.trim();
        let value = if text.is_empty() {
            0.0
        } else {
            text.parse::<f64>().unwrap_or(f64::NAN)
        };
        Self::Number {
            value,
            text: text.to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Dn(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<GeneralizedTime> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }
}

impl PartialEq for NormalizedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Dn(a), Self::Dn(b)) => a == b,
            (Self::Number { value: a, .. }, Self::Number { value: b, .. }) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) | Self::Dn(s) => f.write_str(s),
            Self::Number { value, .. } if value.is_finite() => write!(f, "{}", value),
            Self::Number { text, .. } => f.write_str(text),
            Self::Time(t) => std::fmt::Display::fmt(t, f),
        }
    }
}
