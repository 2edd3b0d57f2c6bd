//! Core traits for the dense solver
//!
//! This module defines the scalar abstraction used throughout the crate:
//! - [`RealField`]: Trait for real floating-point types (f64, f32) with the
//!   single near-zero comparison used by both elimination and rank.

use num_traits::{Float, NumAssign};
use std::fmt::{Debug, Display};

/// Trait for scalar types that can be used by the Gauss-Jordan solver.
///
/// Every "is this entry zero?" decision in the crate goes through
/// [`RealField::is_negligible`], so the solver and the rank calculator can
/// never disagree about what counts as zero for a given tolerance.
///
/// # Implementations
///
/// Provided for:
/// - `f64` (default)
/// - `f32` (for memory-constrained applications)
pub trait RealField:
    Float + NumAssign + Copy + Send + Sync + Debug + Display + Default + 'static
{
    /// Convert from an `f64` constant, rounding if the target is narrower
    fn from_f64_lossy(value: f64) -> Self;

    /// Widen to `f64` (exact for every implementation)
    fn to_f64_lossless(self) -> f64;

    /// Zero tolerance used when none is configured.
    ///
    /// Scaled to the type's precision: `f32` elimination leaves residues
    /// around `1e-8` that must still count as zero.
    fn default_tolerance() -> Self;

    /// `|self| <= tol`
    #[inline]
    fn is_negligible(self, tol: Self) -> bool {
        self.abs() <= tol
    }

    /// `|self| > tol`, i.e. usable as a pivot
    #[inline]
    fn is_significant(self, tol: Self) -> bool {
        !self.is_negligible(tol)
    }
}

impl RealField for f64 {
    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64_lossless(self) -> f64 {
        self
    }

    #[inline]
    fn default_tolerance() -> Self {
        crate::EPSILON
    }
}

impl RealField for f32 {
    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64_lossless(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn default_tolerance() -> Self {
        1e-5
    }
}
