use anchor_lang::prelude::*;
use crate::constants::{CALLDATA_MARKER, PUSH_UPDATE_MAGIC, ROUND_SELECTOR_LEN};
use crate::errors::OracleMiddlewareError;
use crate::oracle::ActionClass;

/// The caller's oracle payload, tagged by the source it targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourcePayload<'a> {
    Empty,
    PushUpdate(&'a [u8]),
    RoundSelector(u32),
    CalldataPush(&'a [u8]),
}

pub fn is_push_update(payload: &[u8]) -> bool {
    payload.starts_with(&PUSH_UPDATE_MAGIC)
}

pub fn is_calldata_push(payload: &[u8]) -> bool {
    payload.ends_with(&CALLDATA_MARKER)
}

/// Round selectors are only meaningful when validating against historical rounds.
pub fn classify(payload: &[u8], class: ActionClass) -> Result<SourcePayload<'_>> {
    if payload.is_empty() {
        return Ok(SourcePayload::Empty);
    }
    if is_push_update(payload) {
        return Ok(SourcePayload::PushUpdate(payload));
    }
    if is_calldata_push(payload) {
        return Ok(SourcePayload::CalldataPush(payload));
    }
    if class == ActionClass::Validate && payload.len() == ROUND_SELECTOR_LEN {
        let mut raw = [0u8; ROUND_SELECTOR_LEN];
        raw.copy_from_slice(payload);
        return Ok(SourcePayload::RoundSelector(u32::from_le_bytes(raw)));
    }
    msg!("Unrecognized oracle payload of {} bytes", payload.len());
    err!(OracleMiddlewareError::MalformedPayload)
}
