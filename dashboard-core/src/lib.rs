// dashboard-core: manifest proxy server and operator CLI

pub mod cli;
pub mod proxy;
pub mod server;
