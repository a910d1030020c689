pub mod entry;
pub mod strand;

// re-export for cleaner imports
pub use self::entry::Entry;
pub use self::strand::Strand;
