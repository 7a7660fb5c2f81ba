pub mod body;
pub mod bounds;
pub mod collider;
pub mod resolve;
pub mod time;
pub mod world;
