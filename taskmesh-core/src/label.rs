//! Segment label types

use std::fmt::Debug;
use std::hash::Hash;

/// Unsigned integer type used to store segment ids in a volume.
///
/// Implemented for `u8`, `u16`, `u32` and `u64`; every algorithm in the
/// workspace is generic over it.
pub trait Label: Copy + Eq + Ord + Hash + Default + Debug + Send + Sync + 'static {
    /// Exterior value of an occupancy mask
    const ZERO: Self;
    /// Interior value of an occupancy mask
    const ONE: Self;
    /// Size of one label in bytes
    const BYTES: usize;
    /// Human readable type name
    const NAME: &'static str;

    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Narrow a wide id into this label type, `None` if it does not fit
    fn try_from_u64(value: u64) -> Option<Self>;

    fn to_u64(self) -> u64;
}

macro_rules! impl_label {
    ($($t:ty),*) => {
        $(
            impl Label for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const BYTES: usize = std::mem::size_of::<$t>();
                const NAME: &'static str = stringify!($t);

                fn try_from_u64(value: u64) -> Option<Self> {
                    <$t>::try_from(value).ok()
                }

                fn to_u64(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_label!(u8, u16, u32, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_narrowing() {
        assert_eq!(u8::try_from_u64(255), Some(255u8));
        assert_eq!(u8::try_from_u64(256), None);
        assert_eq!(u16::try_from_u64(7303), Some(7303u16));
        assert_eq!(u64::try_from_u64(u64::MAX), Some(u64::MAX));
    }

    #[test]
    fn test_label_constants() {
        assert_eq!(<u32 as Label>::BYTES, 4);
        assert_eq!(<u16 as Label>::NAME, "u16");
        assert!(0u64.is_zero());
        assert!(!<u8 as Label>::ONE.is_zero());
    }
}
