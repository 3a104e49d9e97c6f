//! Translation of core query types into SQL fragments and parameters.
//!
//! Document bodies are JSON text; fields are addressed with `$.<field>` JSON
//! paths. The reserved `_id` field maps to the `doc_id` column.

use nakama_core::store::{Condition, Document, Filter, ID_FIELD, Mutation, Op};
use rusqlite::types::Value as SqlValue;
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Bodies ───────────────────────────────────────────────────────────────────

pub fn encode_body(document: &Document) -> Result<String> {
  Ok(serde_json::to_string(document)?)
}

pub fn decode_body(id: Uuid, body: &str) -> Result<Document> {
  match serde_json::from_str(body)? {
    Value::Object(document) => Ok(document),
    _ => Err(Error::NotAnObject(id)),
  }
}

// ─── Parameters ───────────────────────────────────────────────────────────────

/// Positional parameters collected while building a statement.
#[derive(Debug, Default)]
pub struct Params {
  values: Vec<SqlValue>,
}

impl Params {
  /// Bind `value` and return its placeholder (`?N`).
  pub fn bind(&mut self, value: impl Into<SqlValue>) -> String {
    self.values.push(value.into());
    format!("?{}", self.values.len())
  }

  pub fn into_values(self) -> Vec<SqlValue> { self.values }
}

/// The SQL value `json_extract` yields for a JSON scalar, so the two can be
/// compared directly. Booleans come out of SQLite as 0/1.
fn scalar(value: &Value) -> Result<SqlValue> {
  Ok(match value {
    Value::Null => SqlValue::Null,
    Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
    Value::Number(n) => match n.as_i64() {
      Some(i) => SqlValue::Integer(i),
      None => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
    },
    Value::String(s) => SqlValue::Text(s.clone()),
    compound => SqlValue::Text(serde_json::to_string(compound)?),
  })
}

// ─── Paths ────────────────────────────────────────────────────────────────────

/// `$.<field>`, after checking the field is a plain identifier.
pub fn json_path(field: &str) -> Result<String> {
  let mut chars = field.chars();
  let valid = chars
    .next()
    .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
  if valid {
    Ok(format!("$.{field}"))
  } else {
    Err(Error::InvalidField(field.to_owned()))
  }
}

// ─── Filters ──────────────────────────────────────────────────────────────────

fn condition_sql(condition: &Condition, params: &mut Params) -> Result<String> {
  let lhs = if condition.field == ID_FIELD {
    "doc_id".to_owned()
  } else {
    format!("json_extract(body, {})", params.bind(json_path(&condition.field)?))
  };
  let rhs = params.bind(scalar(&condition.value)?);
  Ok(match condition.op {
    // `IS` so that a `null` operand matches missing and null fields.
    Op::Eq => format!("{lhs} IS {rhs}"),
    Op::Gte => format!("{lhs} >= {rhs}"),
  })
}

/// `collection = ?N [AND <condition>]*`
pub fn where_sql(collection: &str, filter: &Filter, params: &mut Params) -> Result<String> {
  let mut clauses = vec![format!("collection = {}", params.bind(collection.to_owned()))];
  for condition in &filter.conditions {
    clauses.push(condition_sql(condition, params)?);
  }
  Ok(clauses.join(" AND "))
}

// ─── Mutations ────────────────────────────────────────────────────────────────

/// The new `body` expression for an `UPDATE ... SET body = <expr>`.
pub fn mutation_sql(mutation: &Mutation, params: &mut Params) -> Result<String> {
  Ok(match mutation {
    Mutation::Set { field, value } => {
      let path = params.bind(json_path(field)?);
      let json = params.bind(serde_json::to_string(value)?);
      format!("json_set(body, {path}, json({json}))")
    }
    Mutation::Inc { field, by } => {
      let path = params.bind(json_path(field)?);
      let by = params.bind(*by);
      format!("json_set(body, {path}, COALESCE(json_extract(body, {path}), 0) + {by})")
    }
  })
}

/// Extra `WHERE` condition a mutation needs, if any.
///
/// An increment only applies where the result still fits in an `i64`;
/// SQLite would otherwise silently promote the sum to a REAL. Documents
/// that would overflow are left untouched and not counted as modified.
pub fn mutation_guard_sql(mutation: &Mutation, params: &mut Params) -> Result<Option<String>> {
  Ok(match mutation {
    Mutation::Set { .. } => None,
    Mutation::Inc { field, by } => {
      let path = params.bind(json_path(field)?);
      let current = format!("COALESCE(json_extract(body, {path}), 0)");
      Some(if *by >= 0 {
        format!("{current} <= {}", params.bind(i64::MAX - by))
      } else {
        format!("{current} >= {}", params.bind(i64::MIN - by))
      })
    }
  })
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn json_path_rejects_non_identifiers() {
    assert_eq!(json_path("last_active_ts").unwrap(), "$.last_active_ts");
    assert!(json_path("a.b").is_err());
    assert!(json_path("").is_err());
    assert!(json_path("1st").is_err());
    assert!(json_path("x') OR 1=1 --").is_err());
  }

  #[test]
  fn where_clause_numbers_its_parameters() {
    let mut params = Params::default();
    let filter = Filter::eq("username", "luffy").and("belly", Op::Gte, 5);
    let sql = where_sql("nakama", &filter, &mut params).unwrap();
    assert_eq!(
      sql,
      "collection = ?1 AND json_extract(body, ?2) IS ?3 AND json_extract(body, ?4) >= ?5"
    );
    let values = params.into_values();
    assert_eq!(values[0], SqlValue::Text("nakama".into()));
    assert_eq!(values[2], SqlValue::Text("luffy".into()));
    assert_eq!(values[4], SqlValue::Integer(5));
  }

  #[test]
  fn id_conditions_use_the_key_column() {
    let mut params = Params::default();
    let sql = where_sql("logro", &Filter::eq(ID_FIELD, "abc"), &mut params).unwrap();
    assert_eq!(sql, "collection = ?1 AND doc_id IS ?2");
  }

  #[test]
  fn scalars_match_json_extract_output() {
    assert_eq!(scalar(&json!(true)).unwrap(), SqlValue::Integer(1));
    assert_eq!(scalar(&json!(null)).unwrap(), SqlValue::Null);
    assert_eq!(scalar(&json!(1.5)).unwrap(), SqlValue::Real(1.5));
  }

  #[test]
  fn inc_reuses_the_path_parameter() {
    let mut params = Params::default();
    let sql = mutation_sql(&Mutation::inc("belly", 5), &mut params).unwrap();
    assert_eq!(sql, "json_set(body, ?1, COALESCE(json_extract(body, ?1), 0) + ?2)");
    assert_eq!(params.into_values().len(), 2);
  }

  #[test]
  fn inc_guard_bounds_the_current_value() {
    let mut params = Params::default();
    let sql = mutation_guard_sql(&Mutation::inc("belly", 5), &mut params)
      .unwrap()
      .unwrap();
    assert_eq!(sql, "COALESCE(json_extract(body, ?1), 0) <= ?2");
    assert_eq!(params.into_values()[1], SqlValue::Integer(i64::MAX - 5));

    let mut params = Params::default();
    let sql = mutation_guard_sql(&Mutation::inc("belly", -3), &mut params)
      .unwrap()
      .unwrap();
    assert_eq!(sql, "COALESCE(json_extract(body, ?1), 0) >= ?2");
    assert_eq!(params.into_values()[1], SqlValue::Integer(i64::MIN + 3));

    let mut params = Params::default();
    assert!(mutation_guard_sql(&Mutation::set("rank", "Yonko"), &mut params).unwrap().is_none());
  }
}
