mod client;

pub use client::SubstrateClient;
