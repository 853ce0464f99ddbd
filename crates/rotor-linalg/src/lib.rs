//! Fixed-dimension linear algebra for rigid-body math.
//!
//! This library provides dense matrices, vectors and quaternions whose dimensions are part of
//! their type. It exists for code that works with small, statically known shapes (poses,
//! rotations, camera intrinsics, ...) and wants shape mismatches to be compile errors rather than
//! runtime panics.
//!
//! # Goals & Non-Goals
//!
//! - Every shape is specified via const generics. Operations that require matching or related
//!   shapes (products, sub-matrix extraction, minors) encode those relationships in their
//!   signatures, so a dimension mismatch simply does not type-check.
//! - Be generic over the element type, but don't try to support non-[`Copy`] numeric types (eg.
//!   "big decimals").
//! - Degenerate *values* (a singular matrix, a zero-length axis) are not representable in the
//!   type system; operations that can encounter them return [`Option`] instead of panicking or
//!   producing marker values.
//! - The decomposition and inversion routines favor the straightforward textbook formulation
//!   (cofactor expansion, adjugate-based inversion, Householder QR) over cache-tuned variants;
//!   the supported shapes are small enough that asymptotics don't matter.
//! - Don't support dynamically-sized vectors and matrices. If dynamically-sized objects are
//!   needed in the future, they will be added as separate types.

pub mod approx;
mod matrix;
mod quat;
mod traits;
mod vector;

pub use matrix::*;
pub use quat::*;
pub use traits::*;
pub use vector::*;
