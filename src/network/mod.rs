pub mod network;
pub mod io;
pub mod spec;

pub use network::Network;
pub use spec::NetworkSpec;
