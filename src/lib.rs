pub mod controller;
pub mod domain;
pub mod facade;
pub mod resource;
pub mod simulation;
pub mod simulator;

#[cfg(test)]
mod tests;
