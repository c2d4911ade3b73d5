pub mod budget;
pub mod dba;
pub mod error;
pub mod net;
pub mod sim;
pub mod topo;
pub mod traffic;

pub use error::{Error, Result};

#[cfg(test)]
mod test;
