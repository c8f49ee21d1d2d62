//! Rule engine for ready-queue dispatching.
//!
//! Composes dispatching rules lexicographically (primary rule, then the
//! next rule on ties) with a configurable final tie-breaker.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchingRule, SchedulingContext};
use crate::models::SimUser;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep ready-queue insertion order (stable).
    #[default]
    Insertion,
    /// Lower user ID first.
    ById,
}

/// A composable rule engine for ready-queue prioritization.
///
/// # Example
/// ```
/// use eventrix_sim::dispatching::{rules, RuleEngine, TieBreaker};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::ArrivalOrder)
///     .with_final_tie_breaker(TieBreaker::ById);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::Insertion,
            epsilon: 1e-9,
        }
    }

    /// Appends a rule. Earlier rules dominate; later ones only break ties.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Returns the index of the highest-priority user.
    ///
    /// Among equals the earliest position wins.
    pub fn select_best<U: Borrow<SimUser>>(
        &self,
        users: &[U],
        context: &SchedulingContext,
    ) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, user) in users.iter().enumerate() {
            let better = match best {
                None => true,
                Some(b) => self.compare(user.borrow(), users[b].borrow(), context) == Ordering::Less,
            };
            if better {
                best = Some(i);
            }
        }
        best
    }

    fn compare(&self, a: &SimUser, b: &SimUser, context: &SchedulingContext) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a, context);
            let score_b = rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }

        match self.tie_breaker {
            TieBreaker::Insertion => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
