//! Loosely-typed gate records as received from clients.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A gate parameter value: either a number or a string holding one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A JSON number.
    Number(f64),
    /// A JSON string, parsed on use.
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl ParamValue {
    /// Zero or the empty string. Such values defer to the next parameter key.
    pub fn is_blank(&self) -> bool {
        match self {
            ParamValue::Number(n) => *n == 0.0,
            ParamValue::Text(s) => s.is_empty(),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

/// One raw gate from a request.
///
/// Only `type` is required. Which operand fields matter depends on the gate
/// kind; see [`crate::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateRecord {
    /// Client-side identifier, used only in log messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Gate kind tag, matched case-sensitively.
    #[serde(rename = "type")]
    pub kind: String,
    /// Single operand, or the control of a two-qubit gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qubit: Option<i64>,
    /// Column index. Anything other than an integer counts as column 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<serde_json::Value>,
    /// Named gate parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, ParamValue>>,
    /// Target qubits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<i64>>,
    /// Control qubits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<Vec<i64>>,
}

impl GateRecord {
    /// Create a record of the given kind with no operands.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Set the single operand.
    pub fn on(mut self, qubit: i64) -> Self {
        self.qubit = Some(qubit);
        self
    }

    /// Set the column position.
    pub fn at(mut self, position: i64) -> Self {
        self.position = Some(serde_json::Value::from(position));
        self
    }

    /// Set the target list.
    pub fn with_targets(mut self, targets: impl Into<Vec<i64>>) -> Self {
        self.targets = Some(targets.into());
        self
    }

    /// Set the control list.
    pub fn with_controls(mut self, controls: impl Into<Vec<i64>>) -> Self {
        self.controls = Some(controls.into());
        self
    }

    /// Add a named parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Set the client identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The column this record belongs to.
    ///
    /// Integral floats such as `2.0` count as integers. Any other position,
    /// or none at all, is column 0.
    pub fn column(&self) -> i64 {
        let Some(position) = self.position.as_ref() else {
            return 0;
        };
        position
            .as_i64()
            .or_else(|| {
                position
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .unwrap_or(0)
    }

    /// First non-blank parameter among `keys`, in order.
    ///
    /// A blank value (see [`ParamValue::is_blank`]) falls through to the next
    /// key, so `{theta: 0, angle: 90}` reads `angle`.
    pub fn param(&self, keys: &[&str]) -> Option<&ParamValue> {
        let params = self.params.as_ref()?;
        keys.iter()
            .filter_map(|key| params.get(*key))
            .find(|value| !value.is_blank())
    }

    /// The first target, if any.
    pub fn first_target(&self) -> Option<i64> {
        self.targets.as_deref().and_then(<[i64]>::first).copied()
    }

    /// The first control, if any.
    pub fn first_control(&self) -> Option<i64> {
        self.controls.as_deref().and_then(<[i64]>::first).copied()
    }

    /// Short label for log messages: the id when set, else the kind.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.kind)
    }
}
