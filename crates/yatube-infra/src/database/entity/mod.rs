//! SeaORM entities mirroring the persisted tables.

pub mod group;
pub mod post;
pub mod user;
