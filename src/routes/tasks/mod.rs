pub mod dto;
pub mod gate;
pub mod model;
pub mod routes;
pub mod store;
