mod client;

pub use client::EthereumClient;
