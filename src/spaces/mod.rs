//! Spaces: sets of elements with structure.
mod finite;
mod index;
#[cfg(test)]
pub mod testing;

pub use finite::FiniteSpace;
pub use index::IndexSpace;

use rand::distributions::Distribution;
use std::fmt::{Debug, Display};

/// A space: a set of values with some added structure.
///
/// A space is effectively a type with a membership test.
pub trait Space: Display + Debug {
    /// Type of elements of the space.
    type Element;

    /// Check whether a particular value is contained in the space.
    fn contains(&self, value: &Self::Element) -> bool;
}

/// A space from which elements can be sampled uniformly at random.
pub trait SampleSpace: Space + Distribution<<Self as Space>::Element> {}
impl<S: Space + Distribution<<S as Space>::Element>> SampleSpace for S {}
