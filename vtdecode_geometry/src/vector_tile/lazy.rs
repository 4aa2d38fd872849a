//! Memoized, lazily decoded feature sequences.
//!
//! A [`LazyFeatures`] belongs to one geometry category of a layer (points, lines or
//! polygons). It holds the positions of that category's raw features and one
//! [`OnceLock`] per position. A cell is filled the first time anything asks for it; the
//! single and the multi sequence of a category both read from the same cells, so each
//! feature is decoded once no matter which of the two sequences reaches it first.

use super::DecodeError;
use crate::geo::Feature;
use itertools::Either;
use std::{
	fmt::Debug,
	sync::{
		OnceLock,
		atomic::{AtomicUsize, Ordering},
	},
};

/// The memoized result of decoding one feature of a category.
pub type Decoded<S, M> = Result<Either<Feature<S>, Feature<M>>, DecodeError>;

pub struct LazyFeatures<S, M> {
	indices: Vec<usize>,
	cells: Vec<OnceLock<Decoded<S, M>>>,
	decoded: AtomicUsize,
}

impl<S, M> LazyFeatures<S, M> {
	/// Creates an empty cache for the raw features at `indices`, in that order.
	pub(crate) fn new(indices: Vec<usize>) -> Self {
		let cells = indices.iter().map(|_| OnceLock::new()).collect();
		Self {
			indices,
			cells,
			decoded: AtomicUsize::new(0),
		}
	}

	/// Number of raw features in this category.
	pub fn len(&self) -> usize {
		self.indices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.indices.is_empty()
	}

	/// Positions of this category's features in the layer's raw feature list.
	pub fn indices(&self) -> &[usize] {
		&self.indices
	}

	/// How many features have been decoded so far.
	///
	/// Never exceeds [`LazyFeatures::len`], however often the sequences are traversed.
	pub fn decoded(&self) -> usize {
		self.decoded.load(Ordering::Acquire)
	}

	/// Returns the cached result for `slot`, running `decode` on the raw feature index
	/// if the cell is still empty. Concurrent callers block until the first one has
	/// published its result.
	pub(crate) fn get<F>(&self, slot: usize, decode: F) -> &Decoded<S, M>
	where
		F: FnOnce(usize) -> Decoded<S, M>,
	{
		self.cells[slot].get_or_init(|| {
			self.decoded.fetch_add(1, Ordering::AcqRel);
			decode(self.indices[slot])
		})
	}

	/// Iterates over all results in feature order, decoding on demand.
	pub(crate) fn iter<'a, F>(&'a self, decode: F) -> impl Iterator<Item = &'a Decoded<S, M>> + 'a
	where
		F: Fn(usize) -> Decoded<S, M> + 'a,
	{
		(0..self.cells.len()).map(move |slot| self.get(slot, &decode))
	}

	/// The features that decoded to a single geometry, plus every decode error.
	pub(crate) fn singles<'a, F>(&'a self, decode: F) -> impl Iterator<Item = Result<&'a Feature<S>, DecodeError>> + 'a
	where
		F: Fn(usize) -> Decoded<S, M> + 'a,
	{
		self.iter(decode).filter_map(|decoded| match decoded {
			Ok(Either::Left(feature)) => Some(Ok(feature)),
			Ok(Either::Right(_)) => None,
			Err(err) => Some(Err(err.clone())),
		})
	}

	/// The features that decoded to a multi geometry, plus every decode error.
	pub(crate) fn multis<'a, F>(&'a self, decode: F) -> impl Iterator<Item = Result<&'a Feature<M>, DecodeError>> + 'a
	where
		F: Fn(usize) -> Decoded<S, M> + 'a,
	{
		self.iter(decode).filter_map(|decoded| match decoded {
			Ok(Either::Left(_)) => None,
			Ok(Either::Right(feature)) => Some(Ok(feature)),
			Err(err) => Some(Err(err.clone())),
		})
	}
}

impl<S, M> Debug for LazyFeatures<S, M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LazyFeatures")
			.field("len", &self.len())
			.field("decoded", &self.decoded())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::geo::GeoProperties;

	type Numbers = LazyFeatures<u32, String>;

	// even raw indices decode to singles, odd ones to multis, 13 fails
	fn decode(index: usize) -> Decoded<u32, String> {
		match index {
			13 => Err(DecodeError::MalformedGeometryPart(String::from("thirteen"))),
			i if i % 2 == 0 => Ok(Either::Left(Feature::new(i as u32, GeoProperties::new()))),
			i => Ok(Either::Right(Feature::new(format!("#{i}"), GeoProperties::new()))),
		}
	}

	#[test]
	fn nothing_is_decoded_up_front() {
		let lazy = Numbers::new(vec![0, 1, 2]);
		assert_eq!(lazy.len(), 3);
		assert_eq!(lazy.decoded(), 0);
	}

	#[test]
	fn decodes_only_what_is_consumed() {
		let lazy = Numbers::new(vec![0, 2, 4, 6]);
		let first: Vec<u32> = lazy.singles(decode).take(2).map(|f| f.unwrap().geometry).collect();
		assert_eq!(first, vec![0, 2]);
		assert_eq!(lazy.decoded(), 2);
	}

	#[test]
	fn singles_and_multis_share_cells() {
		let calls = AtomicUsize::new(0);
		let counting = |index: usize| {
			calls.fetch_add(1, Ordering::SeqCst);
			decode(index)
		};
		let lazy = Numbers::new(vec![0, 1, 2, 3]);

		let singles: Vec<u32> = lazy.singles(counting).map(|f| f.unwrap().geometry).collect();
		let multis: Vec<String> = lazy.multis(counting).map(|f| f.unwrap().geometry.clone()).collect();
		assert_eq!(singles, vec![0, 2]);
		assert_eq!(multis, vec!["#1", "#3"]);
		assert_eq!(calls.load(Ordering::SeqCst), 4);
		assert_eq!(lazy.decoded(), 4);
	}

	#[test]
	fn errors_appear_in_both_sequences() {
		let lazy = Numbers::new(vec![0, 13, 1]);
		let singles: Vec<_> = lazy.singles(decode).collect();
		let multis: Vec<_> = lazy.multis(decode).collect();
		assert_eq!(singles.len(), 2);
		assert!(singles[1].is_err());
		assert_eq!(multis.len(), 2);
		assert!(multis[0].is_err());
		assert_eq!(lazy.decoded(), 3);
	}

	#[test]
	fn repeated_access_returns_the_same_reference() {
		let lazy = Numbers::new(vec![4]);
		let a = lazy.get(0, decode);
		let b = lazy.get(0, |_| panic!("must not decode twice"));
		assert!(std::ptr::eq(a, b));
	}

	#[test]
	fn debug() {
		let lazy = Numbers::new(vec![0, 1]);
		lazy.get(1, decode);
		assert_eq!(format!("{lazy:?}"), "LazyFeatures { len: 2, decoded: 1 }");
	}
}
