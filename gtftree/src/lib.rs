#[cfg(feature = "core")]
#[doc(inline)]
pub use gtftree_core as core;

#[cfg(feature = "overlaprs")]
#[doc(inline)]
pub use gtftree_overlaprs as overlaprs;
