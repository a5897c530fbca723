use super::*;

/// How quoted string fields are encoded.
///
/// DBC has no portable escape for control characters, so they are refused
/// under every policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StringPolicy {
    /// Write `"` as `\"` and `\` as `\\`.
    #[default]
    Escape,
    /// Refuse any string containing `"` or `\`.
    Reject,
}

impl core::str::FromStr for StringPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "escape" => Ok(Self::Escape),
            "reject" => Ok(Self::Reject),
            _ => Err(format!("Unknown string policy '{s}', expected 'escape' or 'reject'")),
        }
    }
}

/// Shortest decimal representation that round-trips to `value`, without exponent.
pub fn format_float(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0"
        return "0".into();
    }
    format!("{value}")
}

pub fn format_uint<T>(value: T) -> String
where
    T: Into<u64>,
{
    value.into().to_string()
}

/// Wraps `value` in double quotes, encoding it according to `policy`.
///
/// `field` only names the value in the returned error.
pub fn format_string(
    field: &'static str,
    value: &str,
    policy: StringPolicy,
) -> Result<String, Error> {
    let invalid = |reason| Error::InvalidString {
        field,
        value: value.into(),
        reason,
    };

    let mut s = String::with_capacity(value.len() + 2);
    s.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' if policy == StringPolicy::Reject => {
                return Err(invalid("quotes and backslashes are not permitted"));
            }
            '"' | '\\' => {
                s.push('\\');
                s.push(c);
            }
            c if c.is_control() => {
                return Err(invalid("control characters cannot be encoded"));
            }
            c => s.push(c),
        }
    }
    s.push('"');
    Ok(s)
}
