mod loaders;
mod store;

pub use loaders::SeedData;
pub use store::{StoreError, TeamCascade, TournamentStore};
