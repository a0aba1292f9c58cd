pub mod availability;
pub mod booking;
pub mod events;
pub mod group;
pub mod program;
pub mod session;
