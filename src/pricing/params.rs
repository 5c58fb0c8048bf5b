//! User-controlled estimation parameters

/// Value substituted for any input that is not a usable number
pub const DEFAULT_PARAM_VALUE: f64 = 0.0;

/// A numeric input that keeps the text the user typed next to the value
/// the arithmetic actually uses
///
/// Empty, non-numeric, non-finite and negative text all coerce to
/// [`DEFAULT_PARAM_VALUE`].
#[derive(Debug, Clone, PartialEq)]
pub struct NumericParam {
    raw: String,
    value: f64,
}

impl NumericParam {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = coerce(&raw);
        Self { raw, value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True when the text did not parse and the default was substituted
    pub fn is_coerced(&self) -> bool {
        parse_strict(&self.raw).is_none()
    }
}

impl Default for NumericParam {
    fn default() -> Self {
        Self::parse("0")
    }
}

fn parse_strict(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parse numeric text, substituting the default when it is unusable
pub fn coerce(text: &str) -> f64 {
    match parse_strict(text) {
        // normalizes "-0"
        Some(v) if v > 0.0 => v,
        _ => DEFAULT_PARAM_VALUE,
    }
}

/// The three form inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    NumRequests,
    ResponseSize,
    Frequency,
}

impl ParamField {
    pub const ALL: [ParamField; 3] = [
        ParamField::NumRequests,
        ParamField::ResponseSize,
        ParamField::Frequency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NumRequests => "No. Of Requests",
            Self::ResponseSize => "Response Size (GB)",
            Self::Frequency => "Frequency (days/month)",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::NumRequests => Self::ResponseSize,
            Self::ResponseSize => Self::Frequency,
            Self::Frequency => Self::NumRequests,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::NumRequests => Self::Frequency,
            Self::ResponseSize => Self::NumRequests,
            Self::Frequency => Self::ResponseSize,
        }
    }
}

/// Request count, response size (GB) and billing frequency (days/month)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    num_requests: NumericParam,
    response_size: NumericParam,
    frequency: NumericParam,
}

impl Parameters {
    pub fn new(num_requests: &str, response_size: &str, frequency: &str) -> Self {
        Self {
            num_requests: NumericParam::parse(num_requests),
            response_size: NumericParam::parse(response_size),
            frequency: NumericParam::parse(frequency),
        }
    }

    /// Displayed only; no formula uses it
    pub fn num_requests(&self) -> f64 {
        self.num_requests.value()
    }

    pub fn response_size(&self) -> f64 {
        self.response_size.value()
    }

    pub fn frequency(&self) -> f64 {
        self.frequency.value()
    }

    pub fn get(&self, field: ParamField) -> &NumericParam {
        match field {
            ParamField::NumRequests => &self.num_requests,
            ParamField::ResponseSize => &self.response_size,
            ParamField::Frequency => &self.frequency,
        }
    }

    /// Replace the text of one input
    ///
    /// Returns true when the coerced value changed, i.e. when the new
    /// parameters should trigger a refresh.
    pub fn set_raw(&mut self, field: ParamField, raw: impl Into<String>) -> bool {
        let slot = match field {
            ParamField::NumRequests => &mut self.num_requests,
            ParamField::ResponseSize => &mut self.response_size,
            ParamField::Frequency => &mut self.frequency,
        };
        let previous = slot.value();
        *slot = NumericParam::parse(raw);
        slot.value() != previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce() {
        assert_eq!(coerce("2"), 2.0);
        assert_eq!(coerce(" 1.5 "), 1.5);
        assert_eq!(coerce("1e3"), 1000.0);
        assert_eq!(coerce(""), 0.0);
        assert_eq!(coerce("abc"), 0.0);
        assert_eq!(coerce("1.2.3"), 0.0);
        assert_eq!(coerce("-"), 0.0);
        assert_eq!(coerce("-4"), 0.0);
        assert_eq!(coerce("NaN"), 0.0);
        assert_eq!(coerce("inf"), 0.0);
        assert!(coerce("-0").is_sign_positive());
    }

    #[test]
    fn test_numeric_param_keeps_raw_text() {
        let param = NumericParam::parse("12abc");
        assert_eq!(param.raw(), "12abc");
        assert_eq!(param.value(), 0.0);
        assert!(param.is_coerced());

        let param = NumericParam::parse("12");
        assert_eq!(param.value(), 12.0);
        assert!(!param.is_coerced());
    }

    #[test]
    fn test_parameters_default_to_zero() {
        let params = Parameters::default();
        assert_eq!(params.num_requests(), 0.0);
        assert_eq!(params.response_size(), 0.0);
        assert_eq!(params.frequency(), 0.0);
    }

    #[test]
    fn test_set_raw_reports_value_changes() {
        let mut params = Parameters::new("100", "2", "30");

        assert!(params.set_raw(ParamField::Frequency, "3"));
        assert_eq!(params.frequency(), 3.0);

        // same value, different text
        assert!(!params.set_raw(ParamField::Frequency, "3."));
        assert_eq!(params.get(ParamField::Frequency).raw(), "3.");

        assert!(params.set_raw(ParamField::ResponseSize, "oops"));
        assert_eq!(params.response_size(), 0.0);
    }

    #[test]
    fn test_field_cycle() {
        let mut field = ParamField::NumRequests;
        for _ in 0..ParamField::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, ParamField::NumRequests);
        assert_eq!(ParamField::NumRequests.prev(), ParamField::Frequency);
    }
}
