pub mod controller;
pub mod crash;
pub mod engine;
pub mod order;
pub mod placement;
