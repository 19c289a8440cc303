use serde_json::Value;

/// Ordered candidate keys for one canonical field, with the literal used when
/// none of them is present
#[derive(Debug, Clone, Copy)]
pub struct Fallback {
    pub candidates: &'static [&'static str],
    pub default: &'static str,
}

impl Fallback {
    pub const fn new(candidates: &'static [&'static str], default: &'static str) -> Self {
        Self {
            candidates,
            default,
        }
    }

    /// Text of the first present candidate, or the default
    pub fn resolve(&self, raw: &Value) -> String {
        self.resolve_opt(raw)
            .unwrap_or_else(|| self.default.to_string())
    }

    /// Text of the first present candidate, ignoring the default
    pub fn resolve_opt(&self, raw: &Value) -> Option<String> {
        first_present(raw, self.candidates).map(render_text)
    }
}

/// First candidate key whose value exists and is not null.
///
/// Non-object inputs have no keys, so they never match.
pub fn first_present<'a>(raw: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .find_map(|key| raw.get(*key).filter(|value| !value.is_null()))
}

/// Text form of a present value: strings as-is, everything else as compact JSON
pub fn render_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Prices are non-negative numbers. Numeric strings are parsed, everything else is 0.
pub fn coerce_price(value: Option<&Value>) -> f64 {
    let price = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}
