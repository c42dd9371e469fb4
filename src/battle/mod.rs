pub mod ai;
pub mod calculators;
pub mod catch;
pub mod engine;
pub mod state;
pub mod stats;

#[cfg(test)]
mod tests;
