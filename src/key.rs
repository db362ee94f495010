//! Key trait for storage indices.
//!
//! A [`Key`] is a copyable index with a reserved sentinel value (`NONE`)
//! standing in for "no node". Using a reserved value instead of
//! `Option<K>` keeps link fields at their bare integer size, which matters
//! when every node carries two of them.

/// A copyable index type with a sentinel "none" value.
///
/// Implemented for the unsigned integer types. The sentinel is the type's
/// maximum value, which storage implementations must never hand out as a
/// live index.
///
/// # Example
///
/// ```
/// use ring_list::Key;
///
/// let key: u32 = 42;
/// assert!(key.is_some());
/// assert!(u32::NONE.is_none());
/// ```
pub trait Key: Copy + Eq + core::fmt::Debug {
    /// Sentinel value representing "no key".
    ///
    /// Used for empty link fields and never valid as a storage index.
    const NONE: Self;

    /// Creates a key from a `usize` value.
    fn from_usize(val: usize) -> Self;

    /// Returns the key as a `usize`, for indexing and bounds checks.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as $ty
                }

                #[inline]
                fn as_usize(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u8, u16, u32, u64, usize);
