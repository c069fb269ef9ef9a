//! Base types shared by sigmaview and its rendering surfaces.
//!
//! Kept in a separate crate so that surfaces do not need to depend on each other.

pub mod color;
pub mod geom;

pub use color::ColorU8;
