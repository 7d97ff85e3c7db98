use crate::state::{Combatant, Monster, Player};

/// Snapshot rule conditions are evaluated against.
///
/// Built fresh for every resolved action and dropped once outcomes have been
/// applied.
#[derive(Clone, Copy, Debug)]
pub struct CombatContext<'a> {
    pub actor: &'a Player,
    pub target: Option<&'a Monster>,
    /// Living monsters.
    pub enemy_count: usize,
    /// Living party members, the actor included.
    pub ally_count: usize,
}

impl<'a> CombatContext<'a> {
    pub fn new(
        actor: &'a Player,
        target: Option<&'a Monster>,
        party: &[Player],
        monsters: &[Monster],
    ) -> Self {
        Self {
            actor,
            target,
            enemy_count: monsters.iter().filter(|m| m.is_alive()).count(),
            ally_count: party.iter().filter(|p| p.is_alive()).count(),
        }
    }
}
