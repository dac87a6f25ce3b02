//! Handle types for the MIB tree arena.
//!
//! Using `NonZeroU32` enables `Option<T>` niche optimization (no extra space),
//! which keeps the sibling/child links of every node at four bytes each.

use core::num::NonZeroU32;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create from a raw index (1-based).
            #[must_use]
            pub const fn from_raw(raw: u32) -> Option<Self> {
                match NonZeroU32::new(raw) {
                    Some(n) => Some(Self(n)),
                    None => None,
                }
            }

            /// Create from a 0-based index.
            ///
            /// Returns `None` once the index no longer fits the handle.
            #[must_use]
            pub fn from_index(index: usize) -> Option<Self> {
                let raw = u32::try_from(index.checked_add(1)?).ok()?;
                Self::from_raw(raw)
            }

            /// Get the raw value (1-based).
            #[must_use]
            pub const fn to_raw(self) -> u32 {
                self.0.get()
            }

            /// Get the 0-based index.
            #[must_use]
            pub const fn to_index(self) -> usize {
                (self.0.get() - 1) as usize
            }
        }
    };
}

define_id!(
    /// Interned string identifier.
    StrId
);

define_id!(
    /// Module identifier.
    ModuleId
);

define_id!(
    /// MIB tree node identifier.
    NodeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_zero() {
        assert!(NodeId::from_raw(0).is_none());
    }

    #[test]
    fn test_from_raw_nonzero() {
        let id = NodeId::from_raw(1).unwrap();
        assert_eq!(id.to_raw(), 1);
        assert_eq!(id.to_index(), 0);
    }

    #[test]
    fn test_from_index() {
        let id = ModuleId::from_index(99).unwrap();
        assert_eq!(id.to_raw(), 100);
        assert_eq!(id.to_index(), 99);
    }

    #[test]
    fn test_from_index_overflow() {
        assert!(NodeId::from_index(u32::MAX as usize).is_none());
        assert!(NodeId::from_index(usize::MAX).is_none());
    }

    #[test]
    fn test_option_size() {
        // Option<NodeId> should be the same size as NodeId due to niche optimization
        assert_eq!(
            core::mem::size_of::<Option<NodeId>>(),
            core::mem::size_of::<NodeId>()
        );
    }
}
