use std::fmt::Debug;

use anchor_lang::prelude::*;
use solana_program::keccak;
use libsecp256k1::{Message, PublicKey, SecretKey};

use crate::constants::CALLDATA_MARKER;
use crate::errors::OracleMiddlewareError;
use crate::oracle::payload::is_push_update;
use crate::oracle::sources::*;
use crate::state::{InitializeParams, MiddlewareConfig};

pub const PUSH_FEED_ID: [u8; 32] = [0xaa; 32];
pub const CALLDATA_FEED_ID: [u8; 32] = [0xcc; 32];
pub const PUSH_FEE: u64 = 7;

pub fn assert_error<T: Debug>(result: Result<T>, expected: OracleMiddlewareError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(err)) => assert_eq!(
            err.error_code_number,
            u32::from(expected),
            "expected {:?}, got {}",
            expected,
            err.error_msg
        ),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

/// Freshly initialized config: three calldata signers (seeds 1..=3), threshold 2.
pub fn test_config() -> MiddlewareConfig {
    let mut config = MiddlewareConfig::default();
    config
        .initialize(
            254,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            &InitializeParams {
                push_feed_id: PUSH_FEED_ID,
                push_update_fee: PUSH_FEE,
                calldata_feed_id: CALLDATA_FEED_ID,
                calldata_signers: (1..=3).map(|seed| signer_address(&signer_key(seed))).collect(),
                calldata_signer_threshold: 2,
            },
        )
        .unwrap();
    config
}

/// Push source that attests whatever it is shown.
pub struct FakePush {
    pub attested: bool,
    pub fee: u64,
}

impl FakePush {
    pub fn attested() -> Self {
        Self { attested: true, fee: PUSH_FEE }
    }
}

impl PushSource for FakePush {
    fn update_fee(&self, payload: &[u8]) -> u64 {
        if is_push_update(payload) {
            self.fee
        } else {
            0
        }
    }

    fn verify(&self, _update: &PushPriceUpdate) -> Result<()> {
        require!(self.attested, OracleMiddlewareError::UnverifiedUpdate);
        Ok(())
    }
}

/// Update published at `publish_time`, one second after its predecessor.
pub fn push_payload(price: i64, conf: u64, exponent: i32, publish_time: u64) -> Vec<u8> {
    push_payload_after(publish_time.saturating_sub(1), price, conf, exponent, publish_time)
}

pub fn push_payload_after(
    prev_publish_time: u64,
    price: i64,
    conf: u64,
    exponent: i32,
    publish_time: u64,
) -> Vec<u8> {
    PushPriceUpdate {
        feed_id: PUSH_FEED_ID,
        price,
        conf,
        exponent,
        publish_time: publish_time as i64,
        prev_publish_time: prev_publish_time as i64,
    }
    .encode()
}

pub struct FakeFeed {
    decimals: u8,
    rounds: Vec<RoundData>,
}

impl FakeFeed {
    /// `(round_id, answer, updated_at)`, in ascending round order.
    pub fn new(decimals: u8, rounds: &[(u32, i128, u64)]) -> Self {
        let rounds = rounds
            .iter()
            .map(|&(round_id, answer, updated_at)| RoundData {
                round_id,
                answer,
                started_at: updated_at,
                updated_at,
            })
            .collect();
        Self { decimals, rounds }
    }
}

impl RoundFeed for FakeFeed {
    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn latest_round(&self) -> Option<RoundData> {
        self.rounds.last().copied()
    }

    fn round(&self, round_id: u32) -> Option<RoundData> {
        self.rounds.iter().find(|round| round.round_id == round_id).copied()
    }
}

/// Raw `Transmissions` account with `rounds` (timestamp, answer) written in
/// order into a live ring of `live_length` slots.
pub fn store_feed_data(decimals: u8, live_length: u32, rounds: &[(u64, i128)]) -> Vec<u8> {
    let header = TransmissionsHeader {
        version: 2,
        store: Pubkey::new_unique(),
        writer: Pubkey::new_unique(),
        description: [b' '; 32],
        decimals,
        flagging_threshold: 0,
        latest_round_id: rounds.len() as u32,
        granularity: 30,
        live_length,
        live_cursor: rounds.len() as u32 % live_length,
        historical_cursor: 0,
    };

    let mut data = transmissions_discriminator().to_vec();
    header.serialize(&mut data).unwrap();
    data.resize(TRANSMISSIONS_DISCRIMINATOR_LEN + TRANSMISSIONS_HEADER_LEN, 0);

    let body_start = data.len();
    data.resize(body_start + live_length as usize * TRANSMISSION_LEN, 0);
    for (i, (timestamp, answer)) in rounds.iter().enumerate() {
        let offset = body_start + (i % live_length as usize) * TRANSMISSION_LEN;
        data[offset..offset + 8].copy_from_slice(&timestamp.to_le_bytes());
        data[offset + 8..offset + TRANSMISSION_LEN].copy_from_slice(&answer.to_le_bytes());
    }
    data
}

pub fn signer_key(seed: u8) -> SecretKey {
    SecretKey::parse(&[seed; 32]).unwrap()
}

pub fn signer_address(key: &SecretKey) -> [u8; 20] {
    let public = PublicKey::from_secret_key(key).serialize();
    let hash = keccak::hash(&public[1..]).to_bytes();
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// One signed package. `v_offset` is 27 for Ethereum-style `v`, 0 for a raw recovery id.
pub fn sign_package(
    key: &SecretKey,
    feed_id: &[u8; 32],
    value: u128,
    timestamp_ms: u64,
    v_offset: u8,
) -> Vec<u8> {
    let mut package = Vec::with_capacity(PACKAGE_LEN);
    package.extend_from_slice(feed_id);
    package.extend_from_slice(&[0u8; 16]);
    package.extend_from_slice(&value.to_be_bytes());
    package.extend_from_slice(&timestamp_ms.to_be_bytes()[2..]);

    let digest = keccak::hash(&package).to_bytes();
    let (signature, recovery_id) = libsecp256k1::sign(&Message::parse(&digest), key);
    package.extend_from_slice(&signature.serialize());
    package.push(recovery_id.serialize() + v_offset);
    package
}

pub fn calldata_payload(packages: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = packages.concat();
    payload.extend_from_slice(&(packages.len() as u16).to_be_bytes());
    payload.extend_from_slice(&CALLDATA_MARKER);
    payload
}
