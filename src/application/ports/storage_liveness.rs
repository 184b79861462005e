/// Cheap, non-blocking view of whether the document store is up.
pub trait StorageLiveness: Send + Sync {
    fn is_reachable(&self) -> bool;
}
