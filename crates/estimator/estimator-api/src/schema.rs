//! Parameter whitelist and per-parameter shape rules.

use serde::{Deserialize, Serialize};

use estimator_spi::{DatasetHandle, EstimatorError, ParamValue, Result};

/// Names accepted by the Target Encoder, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamName {
    EncodedColumns,
    TargetColumn,
    Blending,
    K,
    F,
    DataLeakageHandling,
    ModelId,
    TrainingFrame,
    FoldColumn,
}

impl ParamName {
    /// The full whitelist.
    pub const ALL: [ParamName; 9] = [
        ParamName::EncodedColumns,
        ParamName::TargetColumn,
        ParamName::Blending,
        ParamName::K,
        ParamName::F,
        ParamName::DataLeakageHandling,
        ParamName::ModelId,
        ParamName::TrainingFrame,
        ParamName::FoldColumn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamName::EncodedColumns => "encoded_columns",
            ParamName::TargetColumn => "target_column",
            ParamName::Blending => "blending",
            ParamName::K => "k",
            ParamName::F => "f",
            ParamName::DataLeakageHandling => "data_leakage_handling",
            ParamName::ModelId => "model_id",
            ParamName::TrainingFrame => "training_frame",
            ParamName::FoldColumn => "fold_column",
        }
    }

    /// Look up a name in the whitelist.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == name)
    }

    /// Declared shape of the parameter.
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamName::EncodedColumns => ParamKind::StrList,
            ParamName::TargetColumn | ParamName::ModelId | ParamName::FoldColumn => ParamKind::Str,
            ParamName::Blending => ParamKind::Bool,
            ParamName::K | ParamName::F => ParamKind::Numeric,
            ParamName::DataLeakageHandling => ParamKind::Enum(DataLeakageHandling::WIRE_VALUES),
            ParamName::TrainingFrame => ParamKind::Frame,
        }
    }

    /// Check and normalise a value for this parameter.
    ///
    /// `None` always passes. A frame parameter also accepts a bare key, which
    /// is coerced into a [`DatasetHandle`].
    pub fn validate(&self, value: Option<ParamValue>) -> Result<Option<ParamValue>> {
        let value = match value {
            Some(value) => value,
            None => return Ok(None),
        };

        let kind = self.kind();
        let accepted = match (&kind, value) {
            (ParamKind::StrList, v @ ParamValue::StrList(_)) => Ok(v),
            (ParamKind::Str, v @ ParamValue::Str(_)) => Ok(v),
            (ParamKind::Bool, v @ ParamValue::Bool(_)) => Ok(v),
            (ParamKind::Numeric, v) if v.is_numeric() => Ok(v),
            (ParamKind::Enum(allowed), ParamValue::Str(s)) if allowed.contains(&s.as_str()) => {
                Ok(ParamValue::Str(s))
            }
            (ParamKind::Frame, v @ ParamValue::Frame(_)) => Ok(v),
            (ParamKind::Frame, ParamValue::Str(key)) => Ok(ParamValue::Frame(DatasetHandle::new(key))),
            (_, other) => Err(other),
        };

        accepted.map(Some).map_err(|received| EstimatorError::TypeMismatch {
            name: self.as_str().to_string(),
            expected: kind.describe(),
            received: format!("{} {}", received.type_name(), received),
        })
    }
}

impl std::fmt::Display for ParamName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shape a parameter value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    StrList,
    Str,
    Bool,
    /// Integer or floating point
    Numeric,
    /// One of a fixed set of literal strings
    Enum(&'static [&'static str]),
    Frame,
}

impl ParamKind {
    /// Human readable type, as reported in type errors.
    pub fn describe(&self) -> String {
        match self {
            ParamKind::StrList => "List[str]".to_string(),
            ParamKind::Str => "str".to_string(),
            ParamKind::Bool => "bool".to_string(),
            ParamKind::Numeric => "numeric".to_string(),
            ParamKind::Enum(values) => {
                let quoted: Vec<String> = values.iter().map(|v| format!("{:?}", v)).collect();
                format!("Enum({})", quoted.join(", "))
            }
            ParamKind::Frame => "frame".to_string(),
        }
    }
}

/// Training-time strategy against target leakage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataLeakageHandling {
    /// Use the whole frame
    #[default]
    None,
    /// Encodings for a fold come from out-of-fold rows
    KFold,
    /// The row's own response is subtracted from its level statistics
    LeaveOneOut,
}

impl DataLeakageHandling {
    pub const WIRE_VALUES: &'static [&'static str] = &["none", "k_fold", "leave_one_out"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataLeakageHandling::None => "none",
            DataLeakageHandling::KFold => "k_fold",
            DataLeakageHandling::LeaveOneOut => "leave_one_out",
        }
    }
}

impl std::str::FromStr for DataLeakageHandling {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(DataLeakageHandling::None),
            "k_fold" => Ok(DataLeakageHandling::KFold),
            "leave_one_out" => Ok(DataLeakageHandling::LeaveOneOut),
            other => Err(EstimatorError::TypeMismatch {
                name: ParamName::DataLeakageHandling.as_str().to_string(),
                expected: ParamName::DataLeakageHandling.kind().describe(),
                received: format!("str {:?}", other),
            }),
        }
    }
}

impl std::fmt::Display for DataLeakageHandling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<DataLeakageHandling> for ParamValue {
    fn from(value: DataLeakageHandling) -> Self {
        ParamValue::Str(value.as_str().to_string())
    }
}

/// Documented server-side defaults; never inserted locally.
pub mod defaults {
    pub const BLENDING: bool = false;
    /// Inflection point
    pub const K: f64 = 20.0;
    /// Smoothing factor
    pub const F: f64 = 10.0;
    pub const DATA_LEAKAGE_HANDLING: super::DataLeakageHandling = super::DataLeakageHandling::None;
}
