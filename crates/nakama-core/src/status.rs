//! Closed value sets for the string-valued status fields.
//!
//! The stored representation is the serialised variant name; the registry
//! checks incoming values against [`VariantNames::VARIANTS`] so anything
//! outside the set is rejected before it reaches a collection.

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr, VariantNames};

/// Crew rank of a profile.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  EnumString,
  IntoStaticStr,
  VariantNames,
)]
pub enum Rank {
  #[default]
  Rookie,
  Supernova,
  Shichibukai,
  Yonko,
}

/// State of an escrow contract between two parties.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  EnumString,
  IntoStaticStr,
  VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContractStatus {
  #[default]
  Draft,
  Deployed,
  Released,
  Cancelled,
}

/// Progress of a profile on a mission.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  EnumString,
  IntoStaticStr,
  VariantNames,
)]
pub enum MissionStatus {
  #[default]
  #[serde(rename = "En Progreso")]
  #[strum(serialize = "En Progreso")]
  InProgress,
  #[serde(rename = "Completada")]
  #[strum(serialize = "Completada")]
  Completed,
  #[serde(rename = "Fallida")]
  #[strum(serialize = "Fallida")]
  Failed,
}
