pub mod candidates;
pub mod swipes;
pub mod connections;
pub mod proposals;
