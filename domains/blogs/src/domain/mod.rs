//! Domain layer for the Blogs domain

pub mod entities;
pub mod pipeline;
pub mod state;
