use super::context::CombatContext;

/// Predicate a rule requires before its outcomes apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    HasMeleeWeapon,
    HasRangedWeapon,
    CanCastSpell,
    MultipleEnemies,
    /// Actor below half health.
    PlayerInjured,
    /// Actor at or above half health.
    PlayerHealthy,
    /// Target below half health. False without a target.
    EnemyWeakened,
    /// Target at or above half health. False without a target.
    EnemyStrong,
    /// At least one other living party member.
    AllyNearby,
    /// The actor is the last one standing.
    PlayerAlone,
}

impl Condition {
    pub fn evaluate(&self, ctx: &CombatContext<'_>) -> bool {
        match self {
            // No equipment model yet; capability checks always pass.
            Self::HasMeleeWeapon | Self::HasRangedWeapon | Self::CanCastSpell => true,
            Self::MultipleEnemies => ctx.enemy_count > 1,
            Self::PlayerInjured => ctx.actor.state.health.is_below_half(),
            Self::PlayerHealthy => !ctx.actor.state.health.is_below_half(),
            Self::EnemyWeakened => ctx
                .target
                .is_some_and(|target| target.state.health.is_below_half()),
            Self::EnemyStrong => ctx
                .target
                .is_some_and(|target| !target.state.health.is_below_half()),
            Self::AllyNearby => ctx.ally_count > 1,
            Self::PlayerAlone => ctx.ally_count == 1,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HasMeleeWeapon => "has melee weapon",
            Self::HasRangedWeapon => "has ranged weapon",
            Self::CanCastSpell => "can cast spell",
            Self::MultipleEnemies => "multiple enemies",
            Self::PlayerInjured => "injured",
            Self::PlayerHealthy => "healthy",
            Self::EnemyWeakened => "enemy weakened",
            Self::EnemyStrong => "enemy strong",
            Self::AllyNearby => "ally nearby",
            Self::PlayerAlone => "alone",
        }
    }
}
