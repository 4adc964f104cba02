use rand::Rng;
use rand::distr::weighted::{Error as WeightError, WeightedIndex};

/// An ordered list of items with one relative weight per item.
///
/// Weights need not sum to 1: the probability of an item is its weight
/// divided by the total. The sampling table is built once, so a
/// `WeightedTable` is cheap to draw from and can be shared across threads.
///
/// ## Invariants
/// - `items.len() == weights.len()`
/// - The weights are finite, non-negative, and at least one is positive
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
	items: Vec<T>,
	weights: Vec<f64>,
	index: WeightedIndex<f64>,
}

impl<T> WeightedTable<T> {
	/// Builds a table from aligned items and weights.
	///
	/// # Errors
	/// - `InvalidInput` if the lengths differ or the list is empty
	/// - `InvalidWeight` if a weight is negative or not finite
	/// - `InsufficientNonZero` if all weights are zero
	pub fn new(items: Vec<T>, weights: Vec<f64>) -> Result<Self, WeightError> {
		if items.len() != weights.len() {
			return Err(WeightError::InvalidInput);
		}
		let index = WeightedIndex::new(&weights)?;
		Ok(Self { items, weights, index })
	}

	/// Draws one item. Each call is an independent draw.
	pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
		&self.items[rng.sample(&self.index)]
	}

	pub fn items(&self) -> &[T] {
		&self.items
	}

	/// The relative weights, aligned with [`WeightedTable::items`].
	pub fn weights(&self) -> &[f64] {
		&self.weights
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}
