//! Conflict resolution between simultaneously satisfied rules

use super::types::Rule;

/// Picks a single winner among rules that all evaluate true.
pub struct ConflictResolver;

impl ConflictResolver {
    /// Returns the most specific rule; ties go to the earliest in `winners`.
    ///
    /// Deterministic: no randomness, no dependence on hashing order.
    pub fn pick<'a>(winners: &[&'a Rule]) -> Option<&'a Rule> {
        let mut best: Option<(&'a Rule, usize)> = None;

        for &rule in winners {
            let specificity = rule.specificity();
            match best {
                Some((_, top)) if specificity <= top => {}
                _ => best = Some((rule, specificity)),
            }
        }

        best.map(|(rule, _)| rule)
    }
}
