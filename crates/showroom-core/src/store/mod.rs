mod collection;

pub(crate) use collection::{ResourceCollection, Snapshot};
