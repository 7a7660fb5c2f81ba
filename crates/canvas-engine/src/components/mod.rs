pub mod controller;
pub mod entity;
pub mod shape;
