pub mod answer;
pub mod config;
pub mod identity;
pub mod near_client;
pub mod responder;
