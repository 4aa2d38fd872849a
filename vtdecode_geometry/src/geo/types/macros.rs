/// Implements `From<Vec<T>>`, `From<&Vec<T>>`, `From<&[T]>` and `From<&[T; N]>` for a
/// tuple-struct geometry wrapping a `Vec` of items.
#[macro_export]
macro_rules! impl_from_array {
	($($t:ty,$i:ty),*) => {$(
		impl<T> From<Vec<T>> for $t
		where
			$i: From<T>,
		{
			fn from(value: Vec<T>) -> Self {
				Self(value.into_iter().map(<$i>::from).collect())
			}
		}

		impl<'a, T> From<&'a Vec<T>> for $t
		where
			$i: From<&'a T>,
		{
			fn from(value: &'a Vec<T>) -> Self {
				Self(value.iter().map(<$i>::from).collect())
			}
		}

		impl<'a, T> From<&'a [T]> for $t
		where
			$i: From<&'a T>,
		{
			fn from(value: &'a [T]) -> Self {
				Self(value.iter().map(<$i>::from).collect())
			}
		}

		impl<'a, T, const N: usize> From<&'a [T; N]> for $t
		where
			$i: From<&'a T>,
		{
			fn from(value: &'a [T; N]) -> Self {
				Self(value.iter().map(|v| <$i>::from(v)).collect())
			}
		}
	)*}
}

/// Implements [`super::CompositeGeometryTrait`] for a tuple-struct geometry wrapping a `Vec`.
#[macro_export]
macro_rules! impl_composite {
	($($t:ty,$i:ty),*) => {$(
		impl $crate::CompositeGeometryTrait<$i> for $t {
			fn new() -> Self {
				Self(Vec::new())
			}
			fn as_vec(&self) -> &Vec<$i> {
				&self.0
			}
			fn as_mut_vec(&mut self) -> &mut Vec<$i> {
				&mut self.0
			}
			fn into_inner(self) -> Vec<$i> {
				self.0
			}
		}
	)*}
}
