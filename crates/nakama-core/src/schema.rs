//! The schema registry: one static record shape per [`Entity`].
//!
//! Shapes are plain data. [`crate::validate`] checks incoming documents
//! against them, and [`EntitySchema::describe`] renders them as JSON Schema
//! for the `/schema` endpoint.

use serde_json::{Map, Value, json};
use strum::VariantNames as _;

use crate::{
  entity::Entity,
  status::{ContractStatus, MissionStatus, Rank},
};

// ─── Field shapes ────────────────────────────────────────────────────────────

/// The semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  String,
  Integer,
  Boolean,
  /// Stored in the encoding of [`crate::timestamp::encode`].
  Timestamp,
  /// A string restricted to a closed set of values.
  Enum(&'static [&'static str]),
}

impl FieldKind {
  /// JSON Schema `type` keyword.
  pub fn json_type(self) -> &'static str {
    match self {
      Self::String | Self::Timestamp | Self::Enum(_) => "string",
      Self::Integer => "integer",
      Self::Boolean => "boolean",
    }
  }

  /// Wording used in validation messages.
  pub fn expected(self) -> &'static str {
    match self {
      Self::String => "a string",
      Self::Integer => "an integer",
      Self::Boolean => "a boolean",
      Self::Timestamp => "an RFC 3339 timestamp",
      Self::Enum(_) => "one of the allowed values",
    }
  }
}

/// Value used when a field is absent from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
  Required,
  Null,
  Str(&'static str),
  Int(i64),
  Bool(bool),
  /// The time of validation.
  Now,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  pub name:        &'static str,
  pub kind:        FieldKind,
  /// Whether an explicit `null` is accepted.
  pub nullable:    bool,
  pub default:     FieldDefault,
  /// Inclusive lower bound for integer fields.
  pub minimum:     Option<i64>,
  pub description: Option<&'static str>,
}

impl FieldSpec {
  pub const fn required(name: &'static str, kind: FieldKind) -> Self {
    Self {
      name,
      kind,
      nullable: false,
      default: FieldDefault::Required,
      minimum: None,
      description: None,
    }
  }

  pub const fn with_default(
    name: &'static str,
    kind: FieldKind,
    default: FieldDefault,
  ) -> Self {
    Self {
      name,
      kind,
      nullable: false,
      default,
      minimum: None,
      description: None,
    }
  }

  /// A field that may be `null`, defaulting to `null`.
  pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
    Self {
      name,
      kind,
      nullable: true,
      default: FieldDefault::Null,
      minimum: None,
      description: None,
    }
  }

  pub const fn or_null(mut self) -> Self {
    self.nullable = true;
    self
  }

  pub const fn at_least(mut self, minimum: i64) -> Self {
    self.minimum = Some(minimum);
    self
  }

  pub const fn doc(mut self, description: &'static str) -> Self {
    self.description = Some(description);
    self
  }

  pub fn is_required(&self) -> bool { self.default == FieldDefault::Required }

  /// JSON Schema for this single property.
  pub fn describe(&self) -> Value {
    let mut prop = Map::new();
    let ty = self.kind.json_type();
    let ty = if self.nullable { json!([ty, "null"]) } else { json!(ty) };
    prop.insert("type".into(), ty);

    match self.kind {
      FieldKind::Timestamp => {
        prop.insert("format".into(), json!("date-time"));
      }
      FieldKind::Enum(allowed) => {
        prop.insert("enum".into(), json!(allowed));
      }
      _ => {}
    }
    if let Some(min) = self.minimum {
      prop.insert("minimum".into(), json!(min));
    }
    let default = match self.default {
      FieldDefault::Required | FieldDefault::Now => None,
      FieldDefault::Null => Some(Value::Null),
      FieldDefault::Str(s) => Some(json!(s)),
      FieldDefault::Int(i) => Some(json!(i)),
      FieldDefault::Bool(b) => Some(json!(b)),
    };
    if let Some(default) = default {
      prop.insert("default".into(), default);
    }
    if let Some(description) = self.description {
      prop.insert("description".into(), json!(description));
    }
    Value::Object(prop)
  }
}

// ─── Entity shapes ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
  pub entity:      Entity,
  pub description: &'static str,
  pub fields:      &'static [FieldSpec],
}

impl EntitySchema {
  pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
    self.fields.iter().find(|f| f.name == name)
  }

  /// Names of fields without a default, in declaration order.
  pub fn required_fields(&self) -> Vec<&'static str> {
    self
      .fields
      .iter()
      .filter(|f| f.is_required())
      .map(|f| f.name)
      .collect()
  }

  /// A JSON-Schema-equivalent description of the record shape.
  pub fn describe(&self) -> Value {
    let properties: Map<String, Value> = self
      .fields
      .iter()
      .map(|f| (f.name.to_owned(), f.describe()))
      .collect();
    json!({
      "title":       self.entity.name(),
      "description": self.description,
      "type":        "object",
      "properties":  properties,
      "required":    self.required_fields(),
    })
  }
}

/// Describe every registered entity, keyed by collection name.
pub fn describe_all() -> Map<String, Value> {
  Entity::all()
    .map(|e| (e.collection().to_owned(), e.schema().describe()))
    .collect()
}

// ─── Registry ────────────────────────────────────────────────────────────────

use self::FieldDefault::{Bool, Int, Now, Str};
use self::FieldKind::{Boolean, Integer, String as Text, Timestamp};

const PROFILE: &[FieldSpec] = &[
  FieldSpec::required("username", Text).doc("Unique handle for the nakama"),
  FieldSpec::with_default("rank", FieldKind::Enum(Rank::VARIANTS), Str("Rookie"))
    .doc("Crew rank"),
  FieldSpec::with_default("belly", Integer, Int(0))
    .at_least(0)
    .doc("Utility token balance ($BELLY)"),
  FieldSpec::with_default("nakamas", Integer, Int(0))
    .at_least(0)
    .doc("Governance score ($NAKAMAS snapshot)"),
  FieldSpec::with_default("last_active_ts", Timestamp, Now)
    .or_null()
    .doc("Last activity timestamp"),
];

const CHAT_ROOM: &[FieldSpec] = &[
  FieldSpec::required("name", Text),
  FieldSpec::optional("topic", Text),
  FieldSpec::with_default("is_private", Boolean, Bool(false)),
];

const CHAT_MESSAGE: &[FieldSpec] = &[
  FieldSpec::required("room_id", Text),
  FieldSpec::required("sender", Text),
  FieldSpec::required("text", Text),
  FieldSpec::with_default("created_at", Timestamp, Now).or_null(),
];

const CONTRACT: &[FieldSpec] = &[
  FieldSpec::required("title", Text),
  FieldSpec::required("party_a", Text),
  FieldSpec::required("party_b", Text),
  FieldSpec::with_default("amount_nakamas", Integer, Int(0)).or_null(),
  FieldSpec::optional("escrow_address", Text),
  FieldSpec::with_default(
    "status",
    FieldKind::Enum(ContractStatus::VARIANTS),
    Str("draft"),
  ),
];

const MISSION: &[FieldSpec] = &[
  FieldSpec::required("title", Text),
  FieldSpec::optional("description", Text),
  FieldSpec::with_default("reward_belly", Integer, Int(0)),
];

const PROFILE_MISSION: &[FieldSpec] = &[
  FieldSpec::required("nakama", Text),
  FieldSpec::required("mision_id", Text),
  FieldSpec::with_default(
    "status",
    FieldKind::Enum(MissionStatus::VARIANTS),
    Str("En Progreso"),
  ),
];

const ACHIEVEMENT: &[FieldSpec] = &[
  FieldSpec::required("name", Text),
  FieldSpec::optional("icon", Text),
];

const PROFILE_ACHIEVEMENT: &[FieldSpec] = &[
  FieldSpec::required("nakama", Text),
  FieldSpec::required("logro_id", Text),
  FieldSpec::with_default("obtained_at", Timestamp, Now).or_null(),
];

const PROJECT: &[FieldSpec] = &[
  FieldSpec::required("title", Text),
  FieldSpec::optional("description", Text),
  FieldSpec::optional("vibe_css", Text)
    .doc("Custom CSS to inject on the project page"),
  FieldSpec::optional("vibe_music_url", Text),
];

const INVESTMENT: &[FieldSpec] = &[
  FieldSpec::required("proyecto_id", Text),
  FieldSpec::required("investor", Text),
  FieldSpec::required("amount_belly", Integer),
];

const PROPOSAL: &[FieldSpec] = &[
  FieldSpec::optional("proyecto_id", Text),
  FieldSpec::required("proposer", Text),
  FieldSpec::required("title", Text),
  FieldSpec::optional("details", Text),
  FieldSpec::with_default("stake_nakamas", Integer, Int(0)),
];

const GAME: &[FieldSpec] = &[
  FieldSpec::required("title", Text),
  FieldSpec::required("embed_url", Text),
  FieldSpec::optional("thumbnail", Text),
];

const GAME_REQUEST: &[FieldSpec] = &[
  FieldSpec::required("title", Text),
  FieldSpec::required("requested_by", Text),
  FieldSpec::with_default("total_belly_votado", Integer, Int(0)),
];

const SONG: &[FieldSpec] = &[
  FieldSpec::required("title", Text),
  FieldSpec::optional("artist", Text),
  FieldSpec::required("audio_file_url", Text),
  FieldSpec::optional("cassette_art", Text),
];

const VOTE: &[FieldSpec] = &[
  FieldSpec::required("cancion_id", Text),
  FieldSpec::required("voter", Text),
  FieldSpec::with_default("belly_spent", Integer, Int(0)),
  FieldSpec::with_default("created_at", Timestamp, Now).or_null(),
];

const GAME_ROOM: &[FieldSpec] = &[
  FieldSpec::required("name", Text),
  FieldSpec::optional("description", Text),
];

const GAME_STATUS: &[FieldSpec] = &[
  FieldSpec::required("nakama", Text),
  FieldSpec::required("sala_id", Text),
  FieldSpec::with_default("stamina", Integer, Int(100)),
  FieldSpec::with_default("pi_score", Integer, Int(0)),
];

const SKILL: &[FieldSpec] = &[
  FieldSpec::required("codigo", Text).doc("Chat command, e.g. /gomu_gomu_pistol"),
  FieldSpec::with_default("stamina_cost", Integer, Int(10)),
  FieldSpec::optional("effect", Text),
];

const LOCALIZED_STRING: &[FieldSpec] = &[
  FieldSpec::required("string_id", Text),
  FieldSpec::required("eco_es", Text),
  FieldSpec::required("eco_en", Text),
  FieldSpec::required("eco_ja", Text),
];

impl Entity {
  /// The registered record shape of this entity.
  pub fn schema(self) -> EntitySchema {
    let (description, fields) = match self {
      Self::Profile => ("A crew member profile", PROFILE),
      Self::ChatRoom => ("A messenger room", CHAT_ROOM),
      Self::ChatMessage => ("A message posted to a room", CHAT_MESSAGE),
      Self::Contract => ("An escrow agreement between two parties", CONTRACT),
      Self::Mission => ("A quest with a $BELLY reward", MISSION),
      Self::ProfileMission => ("A profile's progress on a mission", PROFILE_MISSION),
      Self::Achievement => ("An unlockable badge", ACHIEVEMENT),
      Self::ProfileAchievement => {
        ("A badge unlocked by a profile", PROFILE_ACHIEVEMENT)
      }
      Self::Project => ("A crowdfunded project page", PROJECT),
      Self::Investment => ("$BELLY invested into a project", INVESTMENT),
      Self::Proposal => ("A governance proposal", PROPOSAL),
      Self::Game => ("An arcade catalog entry", GAME),
      Self::GameRequest => ("A request to add an arcade game", GAME_REQUEST),
      Self::Song => ("A track that can be voted on", SONG),
      Self::Vote => ("$BELLY spent voting for a song", VOTE),
      Self::GameRoom => ("A skill minigame room", GAME_ROOM),
      Self::GameStatus => ("A profile's state inside a game room", GAME_STATUS),
      Self::Skill => ("A skill usable in game rooms", SKILL),
      Self::LocalizedString => ("A UI string in every language", LOCALIZED_STRING),
    };
    EntitySchema { entity: self, description, fields }
  }
}
