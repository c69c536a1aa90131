pub mod abstract_trait;
pub mod client;
pub mod di;
pub mod service;
pub mod session;
pub mod state;
pub mod transport;
