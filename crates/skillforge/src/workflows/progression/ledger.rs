use super::domain::{UserId, UserProgression};

/// XP needed to advance one level.
pub const XP_PER_LEVEL: u32 = 500;

/// Level as a pure function of accumulated XP: a step function with
/// period [`XP_PER_LEVEL`], starting at level 1.
pub const fn level_for_xp(total_xp: u32) -> u32 {
    total_xp / XP_PER_LEVEL + 1
}

/// Append-only experience-point ledger.
///
/// `award` is NOT idempotent: callers are responsible for invoking it
/// at most once per qualifying event (the submission workflow keys
/// awards on its status compare-and-swap). Implementations must make
/// the read-modify-write of `total_xp` atomic and recompute the level
/// from the new total with [`level_for_xp`].
pub trait ProgressionLedger: Send + Sync {
    /// Add `amount` XP (> 0, validated by the caller) and return the
    /// updated progression.
    fn award(&self, user_id: &UserId, amount: u32) -> Result<UserProgression, LedgerError>;

    /// Current progression; users without any XP yet are level 1.
    fn progression(&self, user_id: &UserId) -> Result<UserProgression, LedgerError>;
}

/// Error enumeration for ledger failures.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_a_step_function_with_period_500() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(499), 1);
        assert_eq!(level_for_xp(500), 2);
        assert_eq!(level_for_xp(999), 2);
        assert_eq!(level_for_xp(1000), 3);
    }

    #[test]
    fn level_is_monotonic() {
        let mut previous = 0;
        for xp in (0..5000).step_by(33) {
            let level = level_for_xp(xp);
            assert!(level >= previous);
            previous = level;
        }
    }
}
