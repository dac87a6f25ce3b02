//! OID to name resolution.
//!
//! Resolution is a longest-prefix walk over a [`MibRepository`]: each arc of
//! the OID is matched against one level of the tree until an arc has no
//! symbol. Whatever is left over stays numeric, so resolution never fails;
//! instance indices and table rows simply trail the deepest name.
//!
//! ```text
//! 1.3.6.1.2.1.2.2.1.10.3
//! └──────── walk ───────┘└ suffix
//!  iso org dod internet mgmt mib-2 interfaces ifTable ifEntry ifInOctets
//!                                                 → IF-MIB::ifInOctets.3
//! ```
//!
//! All functions here only read the repository and return owned values, so
//! they can be called concurrently against a shared tree.
//!
//! [`MibRepository`]: crate::mib::MibRepository

mod lookup;
mod name;
pub mod tracing;
mod walk;

pub use lookup::{lookup, LookupError};
#[cfg(feature = "tracing")]
pub use name::abbreviate_traced;
pub use name::{abbreviate, append_abbreviated_name};
#[cfg(feature = "tracing")]
pub use walk::walk_traced;
pub use walk::{walk, walk_from, ResolvedNode};
