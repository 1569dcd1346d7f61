use num_traits::{One, Zero};
use std::fmt::{Debug, Display};
use std::ops::{Add, Mul, Sub};

/// Field-like element the elimination engine works over.
///
/// The arithmetic operators are exact as far as the type allows. The three
/// step methods are the only places the engine asks for context-dependent
/// behaviour: rounding a quotient, or normalizing the result of a row
/// operation. Types without a precision model use `Context = ()` and keep the
/// default steps.
pub trait Scalar:
    Clone
    + PartialEq
    + Debug
    + Display
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
    type Context: Clone + Debug + Default + PartialEq;

    /// `self / rhs`, used to turn a pivot into one. `rhs` is never zero.
    fn divide(self, rhs: &Self, ctx: &Self::Context) -> Self;

    /// `self - pivot_entry * factor` while clearing entries below a pivot.
    fn eliminate(self, pivot_entry: &Self, factor: &Self, _ctx: &Self::Context) -> Self {
        self - pivot_entry.clone() * factor.clone()
    }

    /// `self - pivot_entry * factor` while clearing entries above a pivot.
    fn back_eliminate(self, pivot_entry: &Self, factor: &Self, _ctx: &Self::Context) -> Self {
        self - pivot_entry.clone() * factor.clone()
    }
}
