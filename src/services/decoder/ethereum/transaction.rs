//! Ethereum transaction decoder.

use crate::{
	models::{
		EthereumTransaction, KeyKind, NormalizedTransaction, Protocol, PublicKeyRecord, TxContext,
	},
	services::decoder::{
		ethereum::signing::{
			address_from_public_key, chain_id_from_v, recover_public_key, recover_sender,
			recovery_id, signing_hash,
		},
		DecodeError, DecoderStores, PayloadFilter,
	},
};

/// Recovers the sender key of legacy transactions and persists the results
pub struct EthereumTransactionDecoder {
	network: String,
	stores: DecoderStores,
	filter: PayloadFilter,
}

impl EthereumTransactionDecoder {
	pub fn new(network: impl Into<String>, stores: DecoderStores) -> Self {
		let network = network.into();
		let filter = PayloadFilter::new(
			Protocol::Ethereum,
			network.clone(),
			stores.transactions.clone(),
			stores.raw_transactions.clone(),
		);
		Self {
			network,
			stores,
			filter,
		}
	}

	/// Decodes `tx`, stores the sender public key and applies the payload filter
	pub async fn run(
		&self,
		tx: &EthereumTransaction,
		context: &TxContext<'_>,
	) -> Result<NormalizedTransaction, DecodeError> {
		let TxContext::Ethereum(context) = context else {
			return Err(DecodeError::WrongPayloadType {
				expected: Protocol::Ethereum,
				actual: context.protocol(),
			});
		};

		let (r, s, v) = tx.signature();
		let chain_id = chain_id_from_v(v)?;
		let hash = signing_hash(tx, chain_id);
		let recovery_id = recovery_id(v, chain_id)?;
		let public_key = recover_public_key(&hash, r, s, recovery_id)?;

		let from = recover_sender(tx, chain_id, r, s, recovery_id)?;
		let key_address = address_from_public_key(&public_key);
		if from != key_address {
			return Err(DecodeError::SignatureRecoveryFailed(format!(
				"recovered key address {} does not match sender {}",
				key_address, from
			)));
		}

		if !context.block.contains_transaction(tx.hash()) {
			return Err(DecodeError::TxNotInBlock(tx.hash().to_string()));
		}

		let block_hash = context.block.hash();
		let record = NormalizedTransaction {
			from: from.to_vec(),
			to: tx.to().map(|to| to.to_vec()).unwrap_or_default(),
			data: tx.input().to_vec(),
			block_hash: block_hash.to_vec(),
			hash: tx.hash().to_vec(),
			block_number: context.block.number().unwrap_or_default(),
			value: tx.value,
			gas_used: tx.gas,
			gas_price: tx.gas_price(),
		};

		self.stores
			.public_keys
			.put_public_key(
				Protocol::Ethereum,
				&self.network,
				from.as_slice(),
				&PublicKeyRecord {
					address: from.to_vec(),
					public_key: public_key.to_vec(),
					key_kind: KeyKind::Secp256k1,
					block_hash: block_hash.to_vec(),
					tx_hash: tx.hash().to_vec(),
				},
			)
			.await?;

		let raw = tx
			.to_raw_json()
			.map_err(|e| DecodeError::CodecEncodeFailed(e.to_string()))?;
		self.filter.apply(tx.hash().as_slice(), &record, &raw).await?;

		tracing::debug!(
			hash = %tx.hash(),
			from = %from,
			chain_id = %chain_id,
			"Decoded transaction"
		);
		Ok(record)
	}
}

