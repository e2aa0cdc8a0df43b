//! Velocity-dependent ballistic coefficients.
//!
//! Some manufacturers publish stepped coefficients, each valid over a
//! velocity bracket. During integration the coefficient matching the
//! instantaneous velocity is picked from the list.

use serde::{Deserialize, Serialize};

/// A ballistic coefficient valid between `min_velocity` and `max_velocity`
/// fps (inclusive). A zero bound means "no limit on that side"; both bounds
/// zero makes the entry valid at any velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallisticCoefficient {
    pub bc: f64,
    #[serde(default)]
    pub min_velocity: f64,
    #[serde(default)]
    pub max_velocity: f64,
}

impl BallisticCoefficient {
    pub fn new(bc: f64, min_velocity: f64, max_velocity: f64) -> Self {
        Self { bc, min_velocity, max_velocity }
    }

    /// Entry valid at every velocity
    pub fn catch_all(bc: f64) -> Self {
        Self::new(bc, 0.0, 0.0)
    }

    pub fn is_catch_all(&self) -> bool {
        self.min_velocity == 0.0 && self.max_velocity == 0.0
    }

    pub fn matches(&self, velocity: f64) -> bool {
        (velocity >= self.min_velocity || self.min_velocity == 0.0)
            && (velocity <= self.max_velocity || self.max_velocity == 0.0)
    }
}

/// Ordered, append-only list of coefficients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoefficientSet {
    entries: Vec<BallisticCoefficient>,
}

impl CoefficientSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, coefficient: BallisticCoefficient) {
        self.entries.push(coefficient);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BallisticCoefficient> {
        self.entries.iter()
    }

    /// Coefficient to use at `velocity`.
    ///
    /// The first catch-all entry wins outright. Otherwise, among the entries
    /// whose bracket contains `velocity`, the one with the lowest
    /// `min_velocity` is returned (earliest inserted on ties). `None` when
    /// nothing matches.
    pub fn select(&self, velocity: f64) -> Option<f64> {
        let mut best: Option<&BallisticCoefficient> = None;
        for entry in &self.entries {
            if entry.is_catch_all() {
                return Some(entry.bc);
            }
            if entry.matches(velocity) && best.map_or(true, |b| entry.min_velocity < b.min_velocity) {
                best = Some(entry);
            }
        }
        best.map(|b| b.bc)
    }

    /// Coefficient of the entry with the lowest `min_velocity`, ignoring
    /// brackets. Last resort for velocities outside every bracket.
    pub fn select_for_lowest_velocity(&self) -> Option<f64> {
        let mut best: Option<&BallisticCoefficient> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.min_velocity < b.min_velocity) {
                best = Some(entry);
            }
        }
        best.map(|b| b.bc)
    }
}

impl FromIterator<BallisticCoefficient> for CoefficientSet {
    fn from_iter<I: IntoIterator<Item = BallisticCoefficient>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a CoefficientSet {
    type Item = &'a BallisticCoefficient;
    type IntoIter = std::slice::Iter<'a, BallisticCoefficient>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
