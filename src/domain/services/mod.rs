pub mod availability;
pub mod cache;
pub mod capacity;
pub mod grouping;
pub mod presenter;
pub mod scheduling;

#[cfg(test)]
pub(crate) mod fakes;
