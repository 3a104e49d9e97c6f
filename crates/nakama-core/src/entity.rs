//! The closed set of record types and their storage collections.

use std::fmt;

use strum::{EnumCount, EnumIter, IntoEnumIterator as _};

/// Every record type known to the backend.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount,
)]
pub enum Entity {
  // ── Crew ──────────────────────────────────────────────────────────────
  Profile,
  // ── Messaging ─────────────────────────────────────────────────────────
  ChatRoom,
  ChatMessage,
  Contract,
  // ── Log book ──────────────────────────────────────────────────────────
  Mission,
  ProfileMission,
  Achievement,
  ProfileAchievement,
  // ── Crowdfunding / governance ─────────────────────────────────────────
  Project,
  Investment,
  Proposal,
  // ── Arcade ────────────────────────────────────────────────────────────
  Game,
  GameRequest,
  // ── Music ─────────────────────────────────────────────────────────────
  Song,
  Vote,
  // ── Skill minigame ────────────────────────────────────────────────────
  GameRoom,
  GameStatus,
  Skill,
  // ── i18n ──────────────────────────────────────────────────────────────
  LocalizedString,
}

impl Entity {
  /// Iterate every entity in declaration order.
  pub fn all() -> impl Iterator<Item = Entity> { Self::iter() }

  /// The storage collection holding records of this entity.
  pub fn collection(self) -> &'static str {
    match self {
      Self::Profile => "nakama",
      Self::ChatRoom => "chat_room",
      Self::ChatMessage => "chat_message",
      Self::Contract => "pacto_contrato",
      Self::Mission => "mision",
      Self::ProfileMission => "nakama_mision",
      Self::Achievement => "logro",
      Self::ProfileAchievement => "nakama_logro",
      Self::Project => "proyecto",
      Self::Investment => "inversion_proyecto",
      Self::Proposal => "dao_propuesta",
      Self::Game => "arcade_juego",
      Self::GameRequest => "peticion_juego",
      Self::Song => "cancion",
      Self::Vote => "mechero_voto",
      Self::GameRoom => "sala_chat_juego",
      Self::GameStatus => "nakama_status_juego",
      Self::Skill => "habilidad",
      Self::LocalizedString => "ecos_globales",
    }
  }

  /// Reverse lookup of [`Entity::collection`].
  pub fn from_collection(name: &str) -> Option<Entity> {
    Self::all().find(|entity| entity.collection() == name)
  }

  /// Human-readable record type name.
  pub fn name(self) -> &'static str {
    match self {
      Self::Profile => "Profile",
      Self::ChatRoom => "ChatRoom",
      Self::ChatMessage => "ChatMessage",
      Self::Contract => "Contract",
      Self::Mission => "Mission",
      Self::ProfileMission => "ProfileMission",
      Self::Achievement => "Achievement",
      Self::ProfileAchievement => "ProfileAchievement",
      Self::Project => "Project",
      Self::Investment => "Investment",
      Self::Proposal => "Proposal",
      Self::Game => "Game",
      Self::GameRequest => "GameRequest",
      Self::Song => "Song",
      Self::Vote => "Vote",
      Self::GameRoom => "GameRoom",
      Self::GameStatus => "GameStatus",
      Self::Skill => "Skill",
      Self::LocalizedString => "LocalizedString",
    }
  }
}

impl fmt::Display for Entity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
