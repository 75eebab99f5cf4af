pub mod controllers;
pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod router;
pub mod state;
