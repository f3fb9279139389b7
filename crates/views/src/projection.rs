//! Field projection policy for actor views.

/// Selects which actor fields a view carries.
///
/// Battle views leave out social media: it has nothing to do with the battle
/// and needs a join of its own. Actor profile pages want the full record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActorProjection {
    /// Every actor field, social media included.
    FullProfile,
    /// Identity and biography only; social media is always absent.
    #[default]
    BattleContext,
}

impl ActorProjection {
    /// Returns true if this projection carries social-media links.
    pub fn includes_social_media(&self) -> bool {
        matches!(self, ActorProjection::FullProfile)
    }
}

impl std::fmt::Display for ActorProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorProjection::FullProfile => write!(f, "full_profile"),
            ActorProjection::BattleContext => write!(f, "battle_context"),
        }
    }
}
