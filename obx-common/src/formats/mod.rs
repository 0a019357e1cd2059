//! File format definitions

pub mod obx;

pub use obx::*;
