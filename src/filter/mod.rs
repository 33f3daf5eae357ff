//! Data filtering, averaging and smoothing.

pub mod ema;

pub use ema::Ema;

/// A filter for values of type `V`.
///
/// Filter parameters and filter state are separate objects: the filter
/// itself is an immutable set of coefficients that can be shared between
/// any number of filtered quantities, while each quantity owns one
/// [`Filter::State`]. Resetting a quantity's history is done by replacing
/// its state with [`Default::default`].
pub trait Filter<V> {
    /// Mutable state associated with one filtered quantity.
    type State: Default;

    /// Adds a new value to the filter, returning the filtered value.
    fn filter(&self, state: &mut Self::State, value: V) -> V;
}
