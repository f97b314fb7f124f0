pub mod game;
pub mod record;
pub mod schedule;
