//! Unit types for physical quantities.
//!
//! Five-axis points in millimeters and in controller steps, and the
//! steps-per-millimeter scale that converts between them.

use core::ops::{Index, IndexMut};

use crate::axis::AxisId;

/// Steps per millimeter for one axis.
///
/// Used as a divisor in [`StepPosition`] to [`Position`] conversion, so it is
/// never zero or non-finite. Negative scales are allowed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct StepsPerMm(f64);

impl StepsPerMm {
    /// Scale used when none is configured.
    pub const UNIT: Self = Self(1.0);

    /// Create a scale, rejecting values that cannot divide.
    #[inline]
    pub fn new(value: f64) -> Option<Self> {
        if value != 0.0 && value.is_finite() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Default for StepsPerMm {
    fn default() -> Self {
        Self::UNIT
    }
}

/// A point in millimeters, one coordinate per [`AxisId`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position([f64; AxisId::COUNT]);

impl Position {
    /// Create a point from its five coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, a: f64, b: f64) -> Self {
        Self([x, y, z, a, b])
    }

    /// Build a point by evaluating `f` for every axis.
    pub fn from_fn(mut f: impl FnMut(AxisId) -> f64) -> Self {
        let mut p = Self::default();
        for id in AxisId::ALL {
            p[id] = f(id);
        }
        p
    }

    /// Iterate over `(axis, millimeters)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (AxisId, f64)> + '_ {
        AxisId::ALL.into_iter().map(move |id| (id, self[id]))
    }
}

impl Index<AxisId> for Position {
    type Output = f64;

    fn index(&self, id: AxisId) -> &f64 {
        &self.0[id.index()]
    }
}

impl IndexMut<AxisId> for Position {
    fn index_mut(&mut self, id: AxisId) -> &mut f64 {
        &mut self.0[id.index()]
    }
}

/// A point in controller steps, one count per [`AxisId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepPosition([i64; AxisId::COUNT]);

impl StepPosition {
    /// Create a point from its five step counts.
    #[inline]
    pub const fn new(x: i64, y: i64, z: i64, a: i64, b: i64) -> Self {
        Self([x, y, z, a, b])
    }

    /// Build a point by evaluating `f` for every axis.
    pub fn from_fn(mut f: impl FnMut(AxisId) -> i64) -> Self {
        let mut p = Self::default();
        for id in AxisId::ALL {
            p[id] = f(id);
        }
        p
    }

    /// Iterate over `(axis, steps)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (AxisId, i64)> + '_ {
        AxisId::ALL.into_iter().map(move |id| (id, self[id]))
    }
}

impl Index<AxisId> for StepPosition {
    type Output = i64;

    fn index(&self, id: AxisId) -> &i64 {
        &self.0[id.index()]
    }
}

impl IndexMut<AxisId> for StepPosition {
    fn index_mut(&mut self, id: AxisId) -> &mut i64 {
        &mut self.0[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_per_mm_rejects_zero() {
        assert!(StepsPerMm::new(0.0).is_none());
        assert!(StepsPerMm::new(-0.0).is_none());
        assert!(StepsPerMm::new(f64::NAN).is_none());
        assert!(StepsPerMm::new(f64::INFINITY).is_none());
        assert_eq!(StepsPerMm::new(-80.0).unwrap().value(), -80.0);
    }

    #[test]
    fn test_steps_per_mm_default_is_one() {
        assert_eq!(StepsPerMm::default().value(), 1.0);
    }

    #[test]
    fn test_position_indexing() {
        let mut p = Position::new(1.0, 2.0, 3.0, 4.0, 5.0);
        assert_eq!(p[AxisId::Z], 3.0);
        p[AxisId::B] = -1.5;
        assert_eq!(p[AxisId::B], -1.5);
    }

    #[test]
    fn test_position_iter_follows_axis_order() {
        let p = Position::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let pairs: Vec<_> = p.iter().collect();
        assert_eq!(pairs.len(), AxisId::COUNT);
        assert_eq!(pairs[0], (AxisId::X, 1.0));
        assert_eq!(pairs[4], (AxisId::B, 5.0));
        assert!(p.iter().all(|(id, mm)| p[id] == mm));
    }

    #[test]
    fn test_step_position_from_fn() {
        let p = StepPosition::from_fn(|id| id.index() as i64 * 10);
        assert_eq!(p, StepPosition::new(0, 10, 20, 30, 40));
        assert_eq!(p.iter().count(), AxisId::COUNT);
    }
}
