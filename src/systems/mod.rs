//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod collision;
pub mod components;
pub mod ghost;
pub mod hud;
pub mod item;
pub mod player;
pub mod state;
pub mod vulnerable;

pub use self::collision::*;
pub use self::components::*;
pub use self::ghost::*;
pub use self::hud::*;
pub use self::item::*;
pub use self::player::*;
pub use self::state::*;
pub use self::vulnerable::*;
