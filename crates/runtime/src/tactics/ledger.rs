//! Per-turn mana bookkeeping.
//!
//! The snapshot only reports raw mana. When one decision earmarks mana for a
//! multi-turn savings plan, later decisions in the same turn must see that the
//! mana is taken, otherwise a cheap purchase would quietly eat the savings.
//! Reservations are advisory: the ledger never refuses one, and the spendable
//! figure may go negative. [`ResourceLedger::can_afford`] is the only admission
//! check callers use before issuing a paid command.

/// Mana available this turn and what has been earmarked so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResourceLedger {
    raw: i32,
    reserved: i32,
}

impl ResourceLedger {
    pub fn new(raw_mana: i32) -> Self {
        Self {
            raw: raw_mana,
            reserved: 0,
        }
    }

    /// Starts a new turn with a fresh balance.
    pub fn begin_turn(&mut self, raw_mana: i32) {
        self.raw = raw_mana;
        self.reset();
    }

    /// Drops every reservation made this turn.
    pub fn reset(&mut self) {
        self.reserved = 0;
    }

    /// Earmarks `cost`. Accumulates; repeated calls are not deduplicated.
    pub fn reserve(&mut self, cost: i32) {
        self.reserved += cost;
        tracing::trace!(cost, reserved = self.reserved, "mana reserved");
    }

    pub fn raw(&self) -> i32 {
        self.raw
    }

    pub fn reserved(&self) -> i32 {
        self.reserved
    }

    /// Raw mana minus everything reserved this turn.
    pub fn available(&self) -> i32 {
        self.raw - self.reserved
    }

    /// Free items are always affordable, even with an overdrawn ledger.
    pub fn can_afford(&self, cost: i32) -> bool {
        cost <= 0 || self.available() >= cost
    }

    /// Whole turns of income needed before `cost` becomes affordable.
    ///
    /// `Some(0)` when it already is; `None` when there is no income to wait for.
    pub fn saving_turns(&self, cost: i32, income: i32) -> Option<i32> {
        let missing = cost - self.available();
        if missing <= 0 {
            return Some(0);
        }
        if income <= 0 {
            return None;
        }
        Some((missing + income - 1) / income)
    }
}
