//! Banked one-shot advantage and disadvantage.

use crate::dice::AdvantageCounts;

/// Which checks a banked stack applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LedgerScope {
    /// Any check.
    General,
    /// Success and critical checks of an active action.
    Attack,
    /// Every check of a reaction.
    Defense,
}

impl LedgerScope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Attack => "attack",
            Self::Defense => "defense",
        }
    }
}

/// Six non-negative counters of banked stacks.
///
/// Outcomes increment them; each check consumes at most one unit of each
/// counter that applies to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusLedger {
    pub general_advantage: u32,
    pub general_disadvantage: u32,
    pub attack_advantage: u32,
    pub attack_disadvantage: u32,
    pub defense_advantage: u32,
    pub defense_disadvantage: u32,
}

impl StatusLedger {
    pub fn grant_advantage(&mut self, scope: LedgerScope) {
        let slot = self.advantage_slot(scope);
        *slot = slot.saturating_add(1);
    }

    pub fn grant_disadvantage(&mut self, scope: LedgerScope) {
        let slot = self.disadvantage_slot(scope);
        *slot = slot.saturating_add(1);
    }

    pub fn advantage(&self, scope: LedgerScope) -> u32 {
        match scope {
            LedgerScope::General => self.general_advantage,
            LedgerScope::Attack => self.attack_advantage,
            LedgerScope::Defense => self.defense_advantage,
        }
    }

    pub fn disadvantage(&self, scope: LedgerScope) -> u32 {
        match scope {
            LedgerScope::General => self.general_disadvantage,
            LedgerScope::Attack => self.attack_disadvantage,
            LedgerScope::Defense => self.defense_disadvantage,
        }
    }

    /// Consumes the stacks a check framed as `framing` is entitled to.
    ///
    /// General counters always apply. An `Attack` or `Defense` framing also
    /// consumes from that scope. Each counter gives at most one unit.
    pub fn consume(&mut self, framing: LedgerScope) -> AdvantageCounts {
        let mut counts = self.consume_scope(LedgerScope::General);
        if framing != LedgerScope::General {
            counts += self.consume_scope(framing);
        }
        counts
    }

    /// Consumes one unit of each counter of exactly `scope`.
    pub fn consume_scope(&mut self, scope: LedgerScope) -> AdvantageCounts {
        let advantages = Self::take_one(self.advantage_slot(scope));
        let disadvantages = Self::take_one(self.disadvantage_slot(scope));
        AdvantageCounts::new(advantages, disadvantages)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }

    fn take_one(slot: &mut u32) -> u32 {
        if *slot > 0 {
            *slot -= 1;
            1
        } else {
            0
        }
    }

    fn advantage_slot(&mut self, scope: LedgerScope) -> &mut u32 {
        match scope {
            LedgerScope::General => &mut self.general_advantage,
            LedgerScope::Attack => &mut self.attack_advantage,
            LedgerScope::Defense => &mut self.defense_advantage,
        }
    }

    fn disadvantage_slot(&mut self, scope: LedgerScope) -> &mut u32 {
        match scope {
            LedgerScope::General => &mut self.general_disadvantage,
            LedgerScope::Attack => &mut self.attack_disadvantage,
            LedgerScope::Defense => &mut self.defense_disadvantage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumes_one_unit_per_counter() {
        let mut ledger = StatusLedger::default();
        ledger.grant_advantage(LedgerScope::General);
        ledger.grant_advantage(LedgerScope::General);
        ledger.grant_advantage(LedgerScope::Attack);
        ledger.grant_disadvantage(LedgerScope::Defense);

        let counts = ledger.consume(LedgerScope::Attack);
        assert_eq!(counts, AdvantageCounts::new(2, 0));
        assert_eq!(ledger.general_advantage, 1);
        assert_eq!(ledger.attack_advantage, 0);
        assert_eq!(ledger.defense_disadvantage, 1);
    }

    #[test]
    fn general_framing_leaves_scoped_counters() {
        let mut ledger = StatusLedger::default();
        ledger.grant_disadvantage(LedgerScope::Attack);
        assert!(ledger.consume(LedgerScope::General).is_empty());
        assert_eq!(ledger.attack_disadvantage, 1);
    }

    #[test]
    fn defense_disadvantage_decrements_itself() {
        let mut ledger = StatusLedger::default();
        ledger.grant_disadvantage(LedgerScope::General);
        ledger.grant_disadvantage(LedgerScope::Defense);
        ledger.grant_disadvantage(LedgerScope::Defense);

        let counts = ledger.consume(LedgerScope::Defense);
        assert_eq!(counts, AdvantageCounts::new(0, 2));
        assert_eq!(ledger.general_disadvantage, 0);
        assert_eq!(ledger.defense_disadvantage, 1);
    }

    #[test]
    fn empty_ledger_never_underflows() {
        let mut ledger = StatusLedger::default();
        for _ in 0..3 {
            assert!(ledger.consume(LedgerScope::Defense).is_empty());
        }
        assert!(ledger.is_clear());
    }
}
