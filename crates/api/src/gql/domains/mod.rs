// Each domain contains: mod.rs, resolvers.rs, types.rs (+ service.rs where
// a workflow is more than a single repo call).

pub mod registrations;
pub mod tournaments;
pub mod users;
