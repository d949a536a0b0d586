// Skill-gap recommendation engine
// Pipeline: skill extraction → job skill resolution → gap → course ranking.
// Everything here is synchronous and reads only from a CatalogSnapshot.

pub mod engine;
pub mod gap;
pub mod handlers;
pub mod matcher;
pub mod ranker;
pub mod resolver;
pub mod skills;
