//! Bounded containers backing course rosters and waitlists.

mod error;
mod queue;
mod sequence;

pub use error::CollectionError;
pub use queue::BoundedFifoQueue;
pub use sequence::BoundedUniqueSequence;
