use anchor_lang::prelude::*;
use arrayref::array_refs;
use pyth_solana_receiver_sdk::price_update::{PriceUpdateV2, VerificationLevel};
use crate::constants::PUSH_UPDATE_MAGIC;
use crate::errors::OracleMiddlewareError;
use crate::oracle::normalize::normalize;
use crate::oracle::payload::is_push_update;

/// magic | feed_id | price | conf | exponent | publish_time | prev_publish_time
pub const PUSH_UPDATE_LEN: usize = 4 + 32 + 8 + 8 + 4 + 8 + 8;

/// A push-source price message as carried in the caller's payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PushPriceUpdate {
    pub feed_id: [u8; 32],
    pub price: i64,
    pub conf: u64,
    pub exponent: i32,
    pub publish_time: i64,
    /// Publish time of the update this one superseded.
    pub prev_publish_time: i64,
}

impl PushPriceUpdate {
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let raw: &[u8; PUSH_UPDATE_LEN] = payload
            .try_into()
            .map_err(|_| error!(OracleMiddlewareError::MalformedPayload))?;
        #[allow(clippy::ptr_offset_with_cast)]
        let (magic, feed_id, price, conf, exponent, publish_time, prev_publish_time) =
            array_refs![raw, 4, 32, 8, 8, 4, 8, 8];
        require!(*magic == PUSH_UPDATE_MAGIC, OracleMiddlewareError::MalformedPayload);

        Ok(Self {
            feed_id: *feed_id,
            price: i64::from_le_bytes(*price),
            conf: u64::from_le_bytes(*conf),
            exponent: i32::from_le_bytes(*exponent),
            publish_time: i64::from_le_bytes(*publish_time),
            prev_publish_time: i64::from_le_bytes(*prev_publish_time),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PUSH_UPDATE_LEN);
        out.extend_from_slice(&PUSH_UPDATE_MAGIC);
        out.extend_from_slice(&self.feed_id);
        out.extend_from_slice(&self.price.to_le_bytes());
        out.extend_from_slice(&self.conf.to_le_bytes());
        out.extend_from_slice(&self.exponent.to_le_bytes());
        out.extend_from_slice(&self.publish_time.to_le_bytes());
        out.extend_from_slice(&self.prev_publish_time.to_le_bytes());
        out
    }
}

/// Source A: a paid, caller-supplied signed update.
pub trait PushSource {
    /// Fee the source quotes for the updates carried by `payload`.
    fn update_fee(&self, payload: &[u8]) -> u64;

    /// Succeeds only when `update` carries the source's attestation.
    fn verify(&self, update: &PushPriceUpdate) -> Result<()>;
}

/// The fields of a `PriceUpdateV2` account the middleware relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostedPriceUpdate {
    pub fully_verified: bool,
    pub update: PushPriceUpdate,
}

impl From<&PriceUpdateV2> for PostedPriceUpdate {
    fn from(account: &PriceUpdateV2) -> Self {
        let message = &account.price_message;
        Self {
            fully_verified: matches!(account.verification_level, VerificationLevel::Full),
            update: PushPriceUpdate {
                feed_id: message.feed_id,
                price: message.price,
                conf: message.conf,
                exponent: message.exponent,
                publish_time: message.publish_time,
                prev_publish_time: message.prev_publish_time,
            },
        }
    }
}

/// Push source backed by the Pyth receiver: the receiver program verifies the
/// guardian signatures and posts the update, the payload must match it exactly.
pub struct PythReceiverSource {
    posted: Option<PostedPriceUpdate>,
    fee_per_update: u64,
}

impl PythReceiverSource {
    pub fn new(posted: Option<PostedPriceUpdate>, fee_per_update: u64) -> Self {
        Self { posted, fee_per_update }
    }
}

impl PushSource for PythReceiverSource {
    fn update_fee(&self, payload: &[u8]) -> u64 {
        // one feed, one update per payload
        if is_push_update(payload) {
            self.fee_per_update
        } else {
            0
        }
    }

    fn verify(&self, update: &PushPriceUpdate) -> Result<()> {
        let posted = self
            .posted
            .as_ref()
            .ok_or(OracleMiddlewareError::UnverifiedUpdate)?;
        require!(
            posted.fully_verified && posted.update == *update,
            OracleMiddlewareError::UnverifiedUpdate
        );
        Ok(())
    }
}

/// Normalized push price and its unbiased confidence interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PushPrice {
    pub price: u128,
    pub conf: u128,
    pub publish_time: u64,
    pub prev_publish_time: u64,
}

pub fn read_push_price<P: PushSource>(
    source: &P,
    payload: &[u8],
    feed_id: &[u8; 32],
) -> Result<PushPrice> {
    let update = PushPriceUpdate::decode(payload)?;
    require!(update.feed_id == *feed_id, OracleMiddlewareError::FeedMismatch);
    source.verify(&update)?;

    require!(update.price > 0, OracleMiddlewareError::WrongPrice);
    let price = normalize(u128::from(update.price.unsigned_abs()), update.exponent)?;
    require!(price > 0, OracleMiddlewareError::WrongPrice);
    let conf = normalize(u128::from(update.conf), update.exponent)?;
    let publish_time = u64::try_from(update.publish_time)
        .map_err(|_| error!(OracleMiddlewareError::PriceTooOld))?;
    require!(
        update.prev_publish_time < update.publish_time,
        OracleMiddlewareError::MalformedPayload
    );
    // a negative predecessor time only means there was no earlier update
    let prev_publish_time = u64::try_from(update.prev_publish_time).unwrap_or(0);

    Ok(PushPrice {
        price,
        conf,
        publish_time,
        prev_publish_time,
    })
}
