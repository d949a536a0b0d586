// Catalog: job/course persistence, CSV seed + backup, and the immutable snapshot
// the recommendation engine reads from.

pub mod csv_io;
pub mod handlers;
pub mod repository;
pub mod snapshot;
pub mod source;
