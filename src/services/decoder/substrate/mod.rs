mod address;
mod block;
mod extrinsic;

pub use address::{derive_recipient, derive_sender, ss58_address, ExtrinsicSender};
pub use block::SubstrateBlockDecoder;
pub use extrinsic::{split_payload, SubstrateExtrinsicDecoder, PAYLOAD_MARKER};
