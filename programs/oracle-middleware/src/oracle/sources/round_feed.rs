use anchor_lang::prelude::*;
use solana_program::hash;
use arrayref::{array_ref, array_refs};
use crate::errors::OracleMiddlewareError;
use crate::oracle::normalize::scale_decimals;
use crate::oracle::PriceRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundData {
    pub round_id: u32,
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
}

/// Source B: a continuously updated, round-indexed feed.
pub trait RoundFeed {
    fn decimals(&self) -> u8;
    fn latest_round(&self) -> Option<RoundData>;
    fn round(&self, round_id: u32) -> Option<RoundData>;
}

/// Latest round, rejected when older than `staleness_limit` seconds.
pub fn latest_price<F: RoundFeed>(feed: &F, now: u64, staleness_limit: u64) -> Result<PriceRecord> {
    let round = feed
        .latest_round()
        .ok_or(OracleMiddlewareError::WrongPrice)?;
    require!(
        now.saturating_sub(round.updated_at) <= staleness_limit,
        OracleMiddlewareError::PriceTooOld
    );
    to_record(feed, &round)
}

/// The round that was in effect at `target_limit`: `round_id` must have been
/// published at or before it and its successor strictly after it.
pub fn bracketed_price<F: RoundFeed>(feed: &F, round_id: u32, target_limit: u64) -> Result<PriceRecord> {
    let next_id = round_id
        .checked_add(1)
        .ok_or(OracleMiddlewareError::InvalidRoundId)?;
    let round = feed
        .round(round_id)
        .ok_or(OracleMiddlewareError::InvalidRoundId)?;
    let next = feed
        .round(next_id)
        .ok_or(OracleMiddlewareError::InvalidRoundId)?;

    require!(
        round.updated_at <= target_limit && target_limit < next.updated_at,
        OracleMiddlewareError::InvalidRoundId
    );
    require!(next.answer > 0, OracleMiddlewareError::WrongPrice);
    to_record(feed, &round)
}

fn to_record<F: RoundFeed>(feed: &F, round: &RoundData) -> Result<PriceRecord> {
    require!(round.answer > 0, OracleMiddlewareError::WrongPrice);
    let price = scale_decimals(round.answer.unsigned_abs(), u32::from(feed.decimals()))?;
    require!(price > 0, OracleMiddlewareError::WrongPrice);
    Ok(PriceRecord {
        price,
        timestamp: round.updated_at,
    })
}

/// Header of a Chainlink store `Transmissions` account, as laid out after its discriminator.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransmissionsHeader {
    pub version: u8,
    pub store: Pubkey,
    pub writer: Pubkey,
    /// Raw UTF-8 byte string
    pub description: [u8; 32],
    pub decimals: u8,
    pub flagging_threshold: u32,
    pub latest_round_id: u32,
    pub granularity: u8,
    pub live_length: u32,
    pub live_cursor: u32,
    pub historical_cursor: u32,
}

pub const TRANSMISSIONS_DISCRIMINATOR_LEN: usize = 8;
pub const TRANSMISSIONS_HEADER_LEN: usize = 128;
/// timestamp u64 | answer i128
pub const TRANSMISSION_LEN: usize = 8 + 16;

pub fn transmissions_discriminator() -> [u8; 8] {
    let digest = hash::hash(b"account:Transmissions").to_bytes();
    *array_ref![digest, 0, 8]
}

/// Read-only view of a Chainlink store feed account.
///
/// Only the live ring buffer is consulted: the historical ring rounds ids down
/// to its granularity and cannot say which round was in effect at a timestamp.
pub struct ChainlinkStoreFeed<'a> {
    header: TransmissionsHeader,
    live: &'a [u8],
}

impl<'a> ChainlinkStoreFeed<'a> {
    pub fn load(data: &'a [u8]) -> Result<Self> {
        let body_start = TRANSMISSIONS_DISCRIMINATOR_LEN + TRANSMISSIONS_HEADER_LEN;
        require!(data.len() >= body_start, OracleMiddlewareError::InvalidFeedAccount);
        require!(
            data[..TRANSMISSIONS_DISCRIMINATOR_LEN] == transmissions_discriminator(),
            OracleMiddlewareError::InvalidFeedAccount
        );

        let mut header_bytes = &data[TRANSMISSIONS_DISCRIMINATOR_LEN..body_start];
        let header = TransmissionsHeader::deserialize(&mut header_bytes)
            .map_err(|_| error!(OracleMiddlewareError::InvalidFeedAccount))?;
        require!(
            header.live_length > 0 && header.live_cursor < header.live_length,
            OracleMiddlewareError::InvalidFeedAccount
        );

        let live_len = (header.live_length as usize)
            .checked_mul(TRANSMISSION_LEN)
            .ok_or(OracleMiddlewareError::InvalidFeedAccount)?;
        let live = data
            .get(body_start..body_start + live_len)
            .ok_or(OracleMiddlewareError::InvalidFeedAccount)?;

        Ok(Self { header, live })
    }

    pub fn header(&self) -> &TransmissionsHeader {
        &self.header
    }

    fn transmission(&self, index: u32, round_id: u32) -> RoundData {
        let offset = index as usize * TRANSMISSION_LEN;
        let raw = array_ref![self.live, offset, TRANSMISSION_LEN];
        let (timestamp, answer) = array_refs![raw, 8, 16];
        let timestamp = u64::from_le_bytes(*timestamp);
        RoundData {
            round_id,
            answer: i128::from_le_bytes(*answer),
            started_at: timestamp,
            updated_at: timestamp,
        }
    }
}

impl RoundFeed for ChainlinkStoreFeed<'_> {
    fn decimals(&self) -> u8 {
        self.header.decimals
    }

    fn latest_round(&self) -> Option<RoundData> {
        self.round(self.header.latest_round_id)
    }

    fn round(&self, round_id: u32) -> Option<RoundData> {
        let latest = self.header.latest_round_id;
        if round_id == 0 || round_id > latest {
            return None;
        }

        let len = self.header.live_length;
        let stored = latest.min(len);
        let live_start = latest - (stored - 1);
        if round_id < live_start {
            return None;
        }

        // + 1 because the cursor points past the latest element
        let offset = latest - round_id + 1;
        let cursor = self.header.live_cursor;
        let index = cursor
            .checked_sub(offset)
            .unwrap_or_else(|| len - (offset - cursor));

        Some(self.transmission(index, round_id))
    }
}
