use anchor_lang::prelude::*;
use crate::constants::{CALLDATA_HEARTBEAT, CALLDATA_MAX_FUTURE_SKEW};
use crate::errors::OracleMiddlewareError;
use crate::oracle::bias::{apply_bias, CONFIDENCE_OVERFLOW_POLICY};
use crate::oracle::payload::{classify, SourcePayload};
use crate::oracle::safeguard::{check_divergence, SAFEGUARD_BOUND};
use crate::oracle::sources::*;
use crate::oracle::{Action, ActionClass, PriceRecord, PriceSource};
use crate::state::MiddlewareConfig;
use crate::utils::math::bps_of;

/// Outcome of a successful validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatedPrice {
    pub action: Action,
    pub record: PriceRecord,
    pub source: PriceSource,
    /// Payment that was due, and has to be credited to the fee balance.
    pub fee: u64,
}

/// Cost of validating `payload` for `action`, payable alongside the request.
pub fn validation_cost<P: PushSource>(push: &P, payload: &[u8], action: u8) -> Result<u64> {
    Action::try_from(action)?;
    Ok(push.update_fee(payload))
}

/// Accepted publish times for a source price.
#[derive(Clone, Copy, Debug)]
enum Window {
    /// Not older than the given timestamp.
    Since(u64),
    /// Inside `[earliest, latest]`.
    Between(u64, u64),
}

impl Window {
    fn check(self, timestamp: u64) -> Result<()> {
        match self {
            Window::Since(earliest) => {
                require!(timestamp >= earliest, OracleMiddlewareError::PriceTooOld);
            }
            Window::Between(earliest, latest) => {
                require!(timestamp >= earliest, OracleMiddlewareError::PriceTooOld);
                require!(timestamp <= latest, OracleMiddlewareError::PriceTooRecent);
            }
        }
        Ok(())
    }

    /// Start of a validation window, where only the first update at or after
    /// it is accepted.
    fn first_update_from(self) -> Option<u64> {
        match self {
            Window::Since(_) => None,
            Window::Between(earliest, _) => Some(earliest),
        }
    }

    fn in_millis(self) -> Result<Window> {
        Ok(match self {
            Window::Since(earliest) => Window::Since(to_millis(earliest)?),
            Window::Between(earliest, latest) => Window::Between(to_millis(earliest)?, to_millis(latest)?),
        })
    }
}

fn to_millis(seconds: u64) -> Result<u64> {
    Ok(seconds
        .checked_mul(1_000)
        .ok_or(OracleMiddlewareError::MathOverflow)?)
}

/// Selects a source per action, reads it through the adapters and applies
/// timing, bias and cross-source checks.
pub struct OracleMiddleware<'a, P: PushSource, F: RoundFeed> {
    config: &'a MiddlewareConfig,
    push: &'a P,
    feed: &'a F,
    now: u64,
}

impl<'a, P: PushSource, F: RoundFeed> OracleMiddleware<'a, P, F> {
    pub fn new(config: &'a MiddlewareConfig, push: &'a P, feed: &'a F, now: u64) -> Self {
        Self { config, push, feed, now }
    }

    pub fn validation_cost(&self, payload: &[u8], action: u8) -> Result<u64> {
        validation_cost(self.push, payload, action)
    }

    pub fn parse_and_validate_price(
        &self,
        payload: &[u8],
        target_timestamp: u64,
        action: u8,
        attached_payment: u64,
    ) -> Result<ValidatedPrice> {
        require!(!self.config.paused, OracleMiddlewareError::Paused);
        let fee = self.validation_cost(payload, action)?;
        let action = Action::try_from(action)?;
        require!(attached_payment == fee, OracleMiddlewareError::IncorrectFee);

        let class = action.class();
        let (record, source) = match (class, classify(payload, class)?) {
            (ActionClass::Validate, selected) => self.validate_at(selected, target_timestamp, action)?,
            (_, SourcePayload::PushUpdate(raw)) => {
                let earliest = self.now.saturating_sub(self.config.push_recent_delay);
                (self.push_price(raw, action, Window::Since(earliest))?, PriceSource::Push)
            }
            (_, SourcePayload::CalldataPush(raw)) => {
                let earliest = self.now.saturating_sub(self.config.calldata_recent_delay);
                (self.calldata_price(raw, action, Window::Since(earliest))?, PriceSource::Calldata)
            }
            (_, SourcePayload::Empty) => (
                latest_price(self.feed, self.now, self.config.on_chain_staleness_limit)?,
                PriceSource::OnChainLatest,
            ),
            (_, SourcePayload::RoundSelector(_)) => {
                return err!(OracleMiddlewareError::MalformedPayload);
            }
        };

        Ok(ValidatedPrice { action, record, source, fee })
    }

    /// Validations inside the low-latency window may use a fresh low-latency
    /// price; past it only the round in effect at the window's end is accepted.
    fn validate_at(
        &self,
        payload: SourcePayload,
        target_timestamp: u64,
        action: Action,
    ) -> Result<(PriceRecord, PriceSource)> {
        let limit = target_timestamp
            .checked_add(self.config.low_latency_delay)
            .ok_or(OracleMiddlewareError::MathOverflow)?;
        let earliest = target_timestamp
            .checked_add(self.config.validation_delay)
            .ok_or(OracleMiddlewareError::MathOverflow)?;
        let window = Window::Between(earliest, limit);
        let low_latency = self.now <= limit;

        match payload {
            SourcePayload::PushUpdate(raw) if low_latency => {
                Ok((self.push_price(raw, action, window)?, PriceSource::Push))
            }
            SourcePayload::CalldataPush(raw) if low_latency => {
                Ok((self.calldata_price(raw, action, window)?, PriceSource::Calldata))
            }
            SourcePayload::RoundSelector(round_id) => Ok((
                bracketed_price(self.feed, round_id, limit)?,
                PriceSource::OnChainRound,
            )),
            _ => {
                msg!("Validation past the low-latency window requires a round id");
                err!(OracleMiddlewareError::MalformedPayload)
            }
        }
    }

    fn push_price(&self, payload: &[u8], action: Action, window: Window) -> Result<PriceRecord> {
        let push = read_push_price(self.push, payload, &self.config.push_feed_id)?;
        window.check(push.publish_time)?;
        if let Some(earliest) = window.first_update_from() {
            require!(
                push.prev_publish_time < earliest,
                OracleMiddlewareError::PriceTooRecent
            );
        }

        let adjustment = bps_of(push.conf, self.config.conf_ratio_bps)?;
        let price = apply_bias(push.price, adjustment, action.bias(), CONFIDENCE_OVERFLOW_POLICY)?;
        Ok(PriceRecord {
            price,
            timestamp: push.publish_time,
        })
    }

    fn calldata_price(&self, payload: &[u8], action: Action, window: Window) -> Result<PriceRecord> {
        let config = self.config;
        let calldata = read_calldata_price(
            payload,
            &config.calldata_feed_id,
            &config.calldata_signers,
            config.calldata_signer_threshold,
        )?;
        let max_ahead = to_millis(self.now.saturating_add(CALLDATA_MAX_FUTURE_SKEW))?;
        require!(
            calldata.timestamp_ms <= max_ahead,
            OracleMiddlewareError::PriceTooRecent
        );
        window.in_millis()?.check(calldata.timestamp_ms)?;
        // a package one heartbeat past the delay means an earlier one existed
        if let Some(earliest) = window.first_update_from() {
            let next_heartbeat = to_millis(
                earliest
                    .checked_add(CALLDATA_HEARTBEAT)
                    .ok_or(OracleMiddlewareError::MathOverflow)?,
            )?;
            require!(
                calldata.timestamp_ms < next_heartbeat,
                OracleMiddlewareError::PriceTooRecent
            );
        }

        let penalty = bps_of(calldata.price, config.penalty_bps)?;
        let price = apply_bias(calldata.price, penalty, action.bias(), CONFIDENCE_OVERFLOW_POLICY)?;

        // the on-chain feed is the trust anchor for signed calldata
        let reference = latest_price(self.feed, self.now, config.on_chain_staleness_limit)?;
        check_divergence(price, reference.price, SAFEGUARD_BOUND)?;

        Ok(PriceRecord {
            price,
            timestamp: calldata.timestamp(),
        })
    }
}
