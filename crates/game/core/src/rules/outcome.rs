use crate::state::LedgerScope;

/// Effect a rule applies after a check resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    DealNormalDamage,
    DealDoubleDamage,
    DealTripleDamage,
    /// A random other party member hits the target.
    AllyDealsNormalDamage,
    HealSelf,
    /// Target loses its next turn.
    StunEnemy,
    /// Target is marked as having acted this cycle.
    KnockbackEnemy,
    /// Actor takes the target's damage.
    TakeDamage,
    /// A random other party member takes the target's damage.
    AllyRedirectDamage,
    /// A random other party member takes the actor's damage.
    DealDamageToAlly,
    /// Exhaustion level rises by one, then the actor takes that much damage.
    TakeExhaustionDamage,
    TauntEnemy,
    TauntAllEnemies,
    GainAdvantage(LedgerScope),
    GainDisadvantage(LedgerScope),
    EnemyAttackedWithAdvantage,
    EnemyAttackedWithDisadvantage,
    EnemyDefendedWithAdvantage,
    EnemyDefendedWithDisadvantage,
    Nothing,
}

impl Outcome {
    /// Whether applying this outcome requires a random ally.
    pub const fn needs_ally(&self) -> bool {
        matches!(
            self,
            Self::AllyDealsNormalDamage | Self::AllyRedirectDamage | Self::DealDamageToAlly
        )
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::DealNormalDamage => "deal damage",
            Self::DealDoubleDamage => "deal double damage",
            Self::DealTripleDamage => "deal triple damage",
            Self::AllyDealsNormalDamage => "ally strikes",
            Self::HealSelf => "heal",
            Self::StunEnemy => "stun enemy",
            Self::KnockbackEnemy => "knock enemy back",
            Self::TakeDamage => "take damage",
            Self::AllyRedirectDamage => "ally takes the hit",
            Self::DealDamageToAlly => "hit an ally",
            Self::TakeExhaustionDamage => "exhaustion",
            Self::TauntEnemy => "taunt enemy",
            Self::TauntAllEnemies => "taunt all enemies",
            Self::GainAdvantage(LedgerScope::General) => "advantage on next roll",
            Self::GainAdvantage(LedgerScope::Attack) => "advantage on next attack",
            Self::GainAdvantage(LedgerScope::Defense) => "advantage on next defense",
            Self::GainDisadvantage(LedgerScope::General) => "disadvantage on next roll",
            Self::GainDisadvantage(LedgerScope::Attack) => "disadvantage on next attack",
            Self::GainDisadvantage(LedgerScope::Defense) => "disadvantage on next defense",
            Self::EnemyAttackedWithAdvantage => "enemy is attacked with advantage",
            Self::EnemyAttackedWithDisadvantage => "enemy is attacked with disadvantage",
            Self::EnemyDefendedWithAdvantage => "enemy is defended against with advantage",
            Self::EnemyDefendedWithDisadvantage => "enemy is defended against with disadvantage",
            Self::Nothing => "nothing happens",
        }
    }
}

impl core::fmt::Display for Outcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
