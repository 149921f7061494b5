//! Typed bitmask wrapper for fieldless flag enums
//!
//! `FlagWrapper<T>` stores a set of `T` flags in `T`'s underlying integer
//! type. Only enums registered through [`flag_enum!`](crate::flag_enum) can
//! be wrapped, so mixing flags of unrelated enums is a compile error.
//!
//! ```
//! use rust_gosu::flag_enum;
//! use rust_gosu::foundation::flags::FlagWrapper;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! #[repr(u8)]
//! enum Edge {
//!     Left = 1,
//!     Right = 2,
//! }
//! flag_enum!(Edge: u8);
//!
//! let both: FlagWrapper<Edge> = Edge::Left | Edge::Right;
//! assert!(both.contains(Edge::Right));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Integer types usable as flag storage
pub trait FlagBits:
    Copy
    + Eq
    + Hash
    + Default
    + fmt::Debug
    + BitOr<Output = Self>
    + BitAnd<Output = Self>
    + Not<Output = Self>
{
}

impl<B> FlagBits for B where
    B: Copy
        + Eq
        + Hash
        + Default
        + fmt::Debug
        + BitOr<Output = B>
        + BitAnd<Output = B>
        + Not<Output = B>
{
}

/// A fieldless enum whose variants are bit flags
///
/// Implement it with [`flag_enum!`](crate::flag_enum) rather than by hand.
pub trait FlagEnum: Copy {
    /// Underlying integer representation
    type Bits: FlagBits;

    /// The bits of this flag
    fn bits(self) -> Self::Bits;
}

/// Set of flags of enum `T`
pub struct FlagWrapper<T: FlagEnum> {
    bits: T::Bits,
    _marker: PhantomData<T>,
}

impl<T: FlagEnum> FlagWrapper<T> {
    /// Empty flag set
    pub fn new() -> Self {
        Self::from_integral(T::Bits::default())
    }

    /// Build a set by adding each flag in turn, starting from zero
    pub fn from_flags<I: IntoIterator<Item = T>>(flags: I) -> Self {
        flags.into_iter().fold(Self::new(), |mut set, flag| {
            set.add(flag);
            set
        })
    }

    /// Wrap raw bits; bits outside the enum are kept as-is
    pub fn from_integral(bits: T::Bits) -> Self {
        Self {
            bits,
            _marker: PhantomData,
        }
    }

    /// Raw bits
    pub fn bits(&self) -> T::Bits {
        self.bits
    }

    /// Set the bits of `flag`
    pub fn add(&mut self, flag: T) {
        self.bits = self.bits | flag.bits();
    }

    /// Clear the bits of `flag`
    pub fn remove(&mut self, flag: T) {
        self.bits = self.bits & !flag.bits();
    }

    /// Keep only the bits of `flag`
    pub fn mask(&mut self, flag: T) {
        self.bits = self.bits & flag.bits();
    }

    /// Whether every bit of `flag` is set
    pub fn contains(&self, flag: T) -> bool {
        self.bits & flag.bits() == flag.bits()
    }

    /// True iff any bit is set
    pub fn is_any(&self) -> bool {
        self.bits != T::Bits::default()
    }
}

impl<T: FlagEnum> Default for FlagWrapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FlagEnum> Clone for FlagWrapper<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: FlagEnum> Copy for FlagWrapper<T> {}

impl<T: FlagEnum> PartialEq for FlagWrapper<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<T: FlagEnum> Eq for FlagWrapper<T> {}

impl<T: FlagEnum> Hash for FlagWrapper<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<T: FlagEnum> fmt::Debug for FlagWrapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FlagWrapper").field(&self.bits).finish()
    }
}

impl<T: FlagEnum> From<T> for FlagWrapper<T> {
    fn from(flag: T) -> Self {
        Self::from_integral(flag.bits())
    }
}

impl<T: FlagEnum> From<FlagWrapper<T>> for bool {
    fn from(flags: FlagWrapper<T>) -> Self {
        flags.is_any()
    }
}

impl<T: FlagEnum> FromIterator<T> for FlagWrapper<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_flags(iter)
    }
}

impl<T: FlagEnum> Extend<T> for FlagWrapper<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for flag in iter {
            self.add(flag);
        }
    }
}

impl<T: FlagEnum, R: Into<FlagWrapper<T>>> BitOr<R> for FlagWrapper<T> {
    type Output = Self;

    fn bitor(self, rhs: R) -> Self {
        Self::from_integral(self.bits | rhs.into().bits)
    }
}

impl<T: FlagEnum, R: Into<FlagWrapper<T>>> BitAnd<R> for FlagWrapper<T> {
    type Output = Self;

    fn bitand(self, rhs: R) -> Self {
        Self::from_integral(self.bits & rhs.into().bits)
    }
}

impl<T: FlagEnum, R: Into<FlagWrapper<T>>> BitOrAssign<R> for FlagWrapper<T> {
    fn bitor_assign(&mut self, rhs: R) {
        self.bits = self.bits | rhs.into().bits;
    }
}

impl<T: FlagEnum, R: Into<FlagWrapper<T>>> BitAndAssign<R> for FlagWrapper<T> {
    fn bitand_assign(&mut self, rhs: R) {
        self.bits = self.bits & rhs.into().bits;
    }
}

impl<T: FlagEnum> Not for FlagWrapper<T> {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_integral(!self.bits)
    }
}

/// Register a fieldless `#[repr(uN)]` enum as a flag enum
///
/// Implements [`FlagEnum`] plus `flag | flag`, `flag | set` and `flag & set`.
#[macro_export]
macro_rules! flag_enum {
    ($name:ty : $bits:ty) => {
        impl $crate::foundation::flags::FlagEnum for $name {
            type Bits = $bits;

            fn bits(self) -> $bits {
                self as $bits
            }
        }

        impl ::std::ops::BitOr for $name {
            type Output = $crate::foundation::flags::FlagWrapper<$name>;

            fn bitor(self, rhs: $name) -> Self::Output {
                $crate::foundation::flags::FlagWrapper::<$name>::from(self) | rhs
            }
        }

        impl ::std::ops::BitOr<$crate::foundation::flags::FlagWrapper<$name>> for $name {
            type Output = $crate::foundation::flags::FlagWrapper<$name>;

            fn bitor(self, rhs: $crate::foundation::flags::FlagWrapper<$name>) -> Self::Output {
                $crate::foundation::flags::FlagWrapper::<$name>::from(self) | rhs
            }
        }

        impl ::std::ops::BitAnd<$crate::foundation::flags::FlagWrapper<$name>> for $name {
            type Output = $crate::foundation::flags::FlagWrapper<$name>;

            fn bitand(self, rhs: $crate::foundation::flags::FlagWrapper<$name>) -> Self::Output {
                $crate::foundation::flags::FlagWrapper::<$name>::from(self) & rhs
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(u8)]
    enum Access {
        Read = 0b001,
        Write = 0b010,
        Execute = 0b100,
    }
    crate::flag_enum!(Access: u8);

    #[test]
    fn test_construction_folds_from_zero() {
        let set = FlagWrapper::from_flags([Access::Read, Access::Execute]);
        assert_eq!(set.bits(), 0b101);

        let collected: FlagWrapper<Access> = [Access::Write].into_iter().collect();
        assert_eq!(collected.bits(), 0b010);

        assert_eq!(FlagWrapper::<Access>::new().bits(), 0);
        assert!(!FlagWrapper::<Access>::default().is_any());
    }

    #[test]
    fn test_absorption() {
        let a = FlagWrapper::from(Access::Read);
        let b = Access::Write | Access::Execute;
        assert_eq!((a | b) & b, b);
        assert_eq!(a | (a & b), a);
    }

    #[test]
    fn test_add_then_remove_restores_original() {
        let original = FlagWrapper::from(Access::Read);
        let mut set = original;
        set.add(Access::Write);
        assert!(set.contains(Access::Write));
        set.remove(Access::Write);
        assert_eq!(set, original);
    }

    #[test]
    fn test_double_negation() {
        let set = Access::Read | Access::Execute;
        assert_eq!(!!set, set);
        assert_eq!((!set).bits(), !0b101u8);
    }

    #[test]
    fn test_mask_and_assign_operators() {
        let mut set = FlagWrapper::from_flags([Access::Read, Access::Write]);
        set.mask(Access::Write);
        assert_eq!(set, FlagWrapper::from(Access::Write));

        set |= Access::Execute;
        assert_eq!(set.bits(), 0b110);
        set &= Access::Read | Access::Execute;
        assert_eq!(set.bits(), 0b100);
        assert_eq!(Access::Execute & set, set);
    }

    #[test]
    fn test_boolean_conversion() {
        assert!(bool::from(FlagWrapper::from(Access::Read)));
        assert!(!bool::from(FlagWrapper::<Access>::new()));
        assert!(!(Access::Read & FlagWrapper::from(Access::Write)).is_any());
    }

    #[test]
    fn test_foreign_bits_are_preserved() {
        let set = FlagWrapper::<Access>::from_integral(0b1000_0001);
        assert!(set.contains(Access::Read));
        assert_eq!((set | Access::Write).bits(), 0b1000_0011);
    }
}
