//! Handler for `GET /i18n`.

use std::collections::BTreeMap;

use axum::{
  Json,
  extract::{Query, State},
};
use nakama_core::{
  CollectionMapper, Entity,
  language::Language,
  store::{DocumentStore, Filter, Projection},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

const KEY_FIELD: &str = "string_id";

#[derive(Debug, Deserialize)]
pub struct I18nParams {
  /// Language code, case-insensitive. Defaults to `ES`.
  #[serde(default = "default_lang")]
  pub lang: String,
}

fn default_lang() -> String { "ES".to_owned() }

#[derive(Debug, Serialize)]
pub struct Strings {
  pub lang:    &'static str,
  /// `string_id` → text in `lang`; empty when the text is missing.
  pub strings: BTreeMap<String, String>,
}

/// `GET /i18n[?lang=ES|EN|JA]`
pub async fn handler<S>(
  State(mapper): State<CollectionMapper<S>>,
  Query(params): Query<I18nParams>,
) -> Result<Json<Strings>, ApiError>
where
  S: DocumentStore,
{
  mapper.handle()?;
  let lang = Language::from_code(&params.lang)?;

  let rows = mapper
    .query(
      Entity::LocalizedString,
      &Filter::all(),
      &Projection::include([KEY_FIELD, lang.field()]),
    )
    .await?;

  let strings = rows
    .into_iter()
    .filter_map(|row| {
      let key = row.get(KEY_FIELD)?.as_str()?.to_owned();
      let text = row.get(lang.field()).and_then(Value::as_str).unwrap_or_default();
      Some((key, text.to_owned()))
    })
    .collect();

  Ok(Json(Strings { lang: lang.code(), strings }))
}
