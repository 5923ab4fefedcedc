use serde::{Deserialize, Serialize};

/// A single configuration value as stored by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Conversion from a raw [`ConfigValue`] into the type a caller asked for.
///
/// Conversions are lenient in the way server config files are usually
/// written: booleans may be `0`/`1`, numbers may be quoted.
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue) -> Option<Self>;
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::Integer(n) => Some(*n != 0),
            ConfigValue::Float(_) => None,
            ConfigValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" => Some(false),
                _ => None,
            },
        }
    }
}

impl FromConfigValue for i64 {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Integer(n) => Some(*n),
            ConfigValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            ConfigValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromConfigValue for u32 {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        i64::from_config_value(value).and_then(|n| u32::try_from(n).ok())
    }
}

impl FromConfigValue for u8 {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        i64::from_config_value(value).and_then(|n| u8::try_from(n).ok())
    }
}

impl FromConfigValue for f64 {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Integer(n) => Some(*n as f64),
            ConfigValue::String(s) => s.trim().parse().ok(),
            ConfigValue::Bool(_) => None,
        }
    }
}

impl FromConfigValue for f32 {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        f64::from_config_value(value).map(|f| f as f32)
    }
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::String(s) => Some(s.clone()),
            ConfigValue::Bool(b) => Some(b.to_string()),
            ConfigValue::Integer(n) => Some(n.to_string()),
            ConfigValue::Float(f) => Some(f.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_booleans() {
        assert_eq!(bool::from_config_value(&ConfigValue::Integer(1)), Some(true));
        assert_eq!(bool::from_config_value(&ConfigValue::Integer(0)), Some(false));
        assert_eq!(bool::from_config_value(&"yes".into()), Some(true));
        assert_eq!(bool::from_config_value(&"maybe".into()), None);
    }

    #[test]
    fn numbers_cross_convert() {
        assert_eq!(f32::from_config_value(&ConfigValue::Integer(3)), Some(3.0));
        assert_eq!(u32::from_config_value(&ConfigValue::Float(80.0)), Some(80));
        assert_eq!(u32::from_config_value(&ConfigValue::Float(80.5)), None);
        assert_eq!(u32::from_config_value(&ConfigValue::Integer(-1)), None);
        assert_eq!(f32::from_config_value(&" 1.5 ".into()), Some(1.5));
    }
}
