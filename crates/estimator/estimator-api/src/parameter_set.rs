//! Validated parameter storage.

use std::collections::BTreeMap;

use estimator_spi::{ParamValue, Payload, Result};

use crate::schema::ParamName;

/// Ordered store of estimator parameters.
///
/// Keys are restricted to [`ParamName`] and every stored value has passed
/// [`ParamName::validate`]. A rejected assignment leaves the set unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: BTreeMap<ParamName, ParamValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a value. `None` clears the parameter.
    pub fn set(&mut self, name: ParamName, value: Option<ParamValue>) -> Result<()> {
        match name.validate(value)? {
            Some(value) => {
                self.values.insert(name, value);
            }
            None => {
                self.values.remove(&name);
            }
        }
        Ok(())
    }

    pub fn get(&self, name: ParamName) -> Option<&ParamValue> {
        self.values.get(&name)
    }

    pub fn contains(&self, name: ParamName) -> bool {
        self.values.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamName, &ParamValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Outgoing payload; absent parameters are omitted.
    pub fn to_payload(&self) -> Payload {
        self.iter()
            .map(|(name, value)| (name.as_str(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimator_spi::{DatasetHandle, EstimatorError};

    #[test]
    fn test_set_and_get() {
        let mut params = ParameterSet::new();
        params.set(ParamName::K, Some(ParamValue::Int(20))).unwrap();
        assert_eq!(params.get(ParamName::K), Some(&ParamValue::Int(20)));
        assert!(params.get(ParamName::F).is_none());
    }

    #[test]
    fn test_rejected_set_leaves_value() {
        let mut params = ParameterSet::new();
        params.set(ParamName::K, Some(ParamValue::Float(5.0))).unwrap();
        let before = params.clone();

        let result = params.set(ParamName::K, Some(ParamValue::from("five")));
        assert!(matches!(result, Err(EstimatorError::TypeMismatch { .. })));
        assert_eq!(params, before);
    }

    #[test]
    fn test_set_none_clears() {
        let mut params = ParameterSet::new();
        params.set(ParamName::Blending, Some(ParamValue::Bool(true))).unwrap();
        params.set(ParamName::Blending, None).unwrap();
        assert!(!params.contains(ParamName::Blending));
        assert!(params.is_empty());
    }

    #[test]
    fn test_iter_in_declaration_order() {
        let mut params = ParameterSet::new();
        params.set(ParamName::FoldColumn, Some("fold".into())).unwrap();
        params.set(ParamName::EncodedColumns, Some(vec!["a"].into())).unwrap();
        params.set(ParamName::K, Some(ParamValue::Int(3))).unwrap();

        let names: Vec<ParamName> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![ParamName::EncodedColumns, ParamName::K, ParamName::FoldColumn]
        );
    }

    #[test]
    fn test_to_payload_uses_wire_names() {
        let mut params = ParameterSet::new();
        params.set(ParamName::TargetColumn, Some("y".into())).unwrap();
        params
            .set(ParamName::TrainingFrame, Some(ParamValue::from("train.hex")))
            .unwrap();

        let payload = params.to_payload();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("target_column"), Some(&ParamValue::from("y")));
        assert_eq!(
            payload.get("training_frame"),
            Some(&ParamValue::Frame(DatasetHandle::new("train.hex")))
        );
    }
}
