pub mod users;
pub mod plants;
pub mod swipes;
pub mod connections;
pub mod proposals;

pub use users::{User, Preferences};
pub use plants::Plant;
pub use swipes::Swipe;
pub use connections::{Connection, PlantMatch, ConnectionWithMatches};
pub use proposals::{TradeProposal, ProposalStatus};
