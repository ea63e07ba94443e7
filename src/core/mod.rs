// src/core/mod.rs

pub mod destination;
pub mod inventory;
pub mod paths;
pub mod usage;
