pub mod actions;
pub mod ai;
pub mod attack;
pub mod catch;
pub mod controller;
pub mod engine;
pub mod items;
pub mod roster;
pub mod state;

#[cfg(test)]
pub(crate) mod tests;
