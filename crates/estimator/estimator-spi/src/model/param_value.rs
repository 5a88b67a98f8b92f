//! Parameter values as stored by bindings and sent over the wire.

use serde::{Deserialize, Serialize};

use super::DatasetHandle;

/// A single parameter value.
///
/// Absence is modelled as `Option<ParamValue>::None`, not as a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    StrList(Vec<String>),
    Frame(DatasetHandle),
}

impl ParamValue {
    /// Short description of the value's shape, used in type errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Str(_) => "str",
            ParamValue::StrList(_) => "List[str]",
            ParamValue::Frame(_) => "frame",
        }
    }

    /// Form-encoded representation understood by the service.
    pub fn to_wire(&self) -> String {
        match self {
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Float(x) => x.to_string(),
            ParamValue::Str(s) => s.clone(),
            ParamValue::StrList(items) => {
                let quoted: Vec<String> = items
                    .iter()
                    .map(|s| serde_json::Value::String(s.clone()).to_string())
                    .collect();
                format!("[{}]", quoted.join(","))
            }
            ParamValue::Frame(frame) => frame.key.clone(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::StrList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&DatasetHandle> {
        match self {
            ParamValue::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ParamValue::Int(_) | ParamValue::Float(_))
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Str(s) => write!(f, "{:?}", s),
            ParamValue::StrList(items) => write!(f, "{:?}", items),
            ParamValue::Frame(frame) => write!(f, "Frame({})", frame.key),
            other => write!(f, "{}", other.to_wire()),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::StrList(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::StrList(value.into_iter().map(String::from).collect())
    }
}

impl From<DatasetHandle> for ParamValue {
    fn from(value: DatasetHandle) -> Self {
        ParamValue::Frame(value)
    }
}
