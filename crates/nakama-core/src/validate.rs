//! Validation of incoming documents against the schema registry.

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::{
  entity::Entity,
  schema::{FieldDefault, FieldKind, FieldSpec},
  store::Document,
  timestamp,
};

/// Why a document was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("expected a JSON object")]
  NotAnObject,

  #[error("{field}: field required")]
  Missing { field: &'static str },

  #[error("{field}: expected {expected}")]
  WrongType {
    field:    &'static str,
    expected: &'static str,
  },

  #[error("{field}: must be greater than or equal to {minimum}, got {actual}")]
  OutOfRange {
    field:   &'static str,
    minimum: i64,
    actual:  i64,
  },

  #[error("{field}: {value:?} is not one of {allowed:?}")]
  UnknownVariant {
    field:   &'static str,
    value:   String,
    allowed: &'static [&'static str],
  },
}

impl ValidationError {
  /// The offending field, if the error concerns one.
  pub fn field(&self) -> Option<&'static str> {
    match self {
      Self::NotAnObject => None,
      Self::Missing { field }
      | Self::WrongType { field, .. }
      | Self::OutOfRange { field, .. }
      | Self::UnknownVariant { field, .. } => Some(*field),
    }
  }
}

/// A document that passed validation for `entity`, with every declared field
/// present and undeclared fields dropped.
///
/// Only [`validate`] constructs these, so holding one is proof the document
/// matches its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
  entity:   Entity,
  document: Document,
}

impl ValidatedRecord {
  pub fn entity(&self) -> Entity { self.entity }

  pub fn document(&self) -> &Document { &self.document }

  pub fn into_document(self) -> Document { self.document }
}

/// Check `input` against the registered shape of `entity`.
pub fn validate(entity: Entity, input: &Value) -> Result<ValidatedRecord, ValidationError> {
  let object = input.as_object().ok_or(ValidationError::NotAnObject)?;
  let schema = entity.schema();

  let mut document = Map::with_capacity(schema.fields.len());
  for spec in schema.fields {
    let value = match object.get(spec.name) {
      None => default_for(spec)?,
      Some(Value::Null) if spec.nullable => Value::Null,
      Some(value) => check_value(spec, value)?,
    };
    document.insert(spec.name.to_owned(), value);
  }

  Ok(ValidatedRecord { entity, document })
}

fn default_for(spec: &FieldSpec) -> Result<Value, ValidationError> {
  Ok(match spec.default {
    FieldDefault::Required => {
      return Err(ValidationError::Missing { field: spec.name });
    }
    FieldDefault::Null => Value::Null,
    FieldDefault::Str(s) => Value::String(s.to_owned()),
    FieldDefault::Int(i) => Value::Number(i.into()),
    FieldDefault::Bool(b) => Value::Bool(b),
    FieldDefault::Now => Value::String(timestamp::now()),
  })
}

fn check_value(spec: &FieldSpec, value: &Value) -> Result<Value, ValidationError> {
  let wrong_type = || ValidationError::WrongType {
    field:    spec.name,
    expected: spec.kind.expected(),
  };

  match spec.kind {
    FieldKind::String => value.as_str().map(Value::from).ok_or_else(wrong_type),
    FieldKind::Boolean => value.as_bool().map(Value::Bool).ok_or_else(wrong_type),
    FieldKind::Integer => {
      let n = value.as_number().and_then(integral).ok_or_else(wrong_type)?;
      if let Some(minimum) = spec.minimum
        && n < minimum
      {
        return Err(ValidationError::OutOfRange { field: spec.name, minimum, actual: n });
      }
      Ok(Value::Number(Number::from(n)))
    }
    FieldKind::Timestamp => value
      .as_str()
      .and_then(timestamp::parse)
      .map(|dt| Value::String(timestamp::encode(dt)))
      .ok_or_else(wrong_type),
    FieldKind::Enum(allowed) => {
      let s = value.as_str().ok_or_else(wrong_type)?;
      if allowed.contains(&s) {
        Ok(Value::from(s))
      } else {
        Err(ValidationError::UnknownVariant {
          field: spec.name,
          value: s.to_owned(),
          allowed,
        })
      }
    }
  }
}

/// Integers, plus floats with no fractional part (`5.0`).
fn integral(n: &Number) -> Option<i64> {
  if let Some(i) = n.as_i64() {
    return Some(i);
  }
  let f = n.as_f64()?;
  (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}
