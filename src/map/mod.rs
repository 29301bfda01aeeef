//! This module defines the maze geometry and the level data built on top of it.

pub mod builder;
pub mod direction;
pub mod geometry;
pub mod layout;
pub mod maze;
pub mod reachability;
