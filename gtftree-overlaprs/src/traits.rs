use gtftree_core::errors::Result;
use gtftree_core::models::Entry;

pub trait Overlapper: Send + Sync {
    fn build(entries: Vec<Entry>) -> Result<Self>
    where
        Self: Sized;

    fn find(&self, start: u32, end: u32) -> Vec<Entry>;

    fn find_iter<'a>(&'a self, start: u32, end: u32) -> Box<dyn Iterator<Item = &'a Entry> + 'a>;
}
