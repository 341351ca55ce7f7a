use anchor_lang::prelude::*;

#[error_code]
pub enum OracleMiddlewareError {
    #[msg("Price source reported a positive exponent")]
    MalformedExponent,
    #[msg("Price source returned a non-positive price")]
    WrongPrice,
    #[msg("Unsupported protocol action")]
    UnsupportedAction,
    #[msg("Oracle payload could not be decoded for this action")]
    MalformedPayload,
    #[msg("Price update belongs to another feed")]
    FeedMismatch,
    #[msg("On-chain feed account has an unexpected layout")]
    InvalidFeedAccount,
    #[msg("Push update was not attested by the price receiver")]
    UnverifiedUpdate,
    #[msg("Price is too old")]
    PriceTooOld,
    #[msg("Price is too recent for the requested window")]
    PriceTooRecent,
    #[msg("Round does not bracket the target timestamp")]
    InvalidRoundId,
    #[msg("Confidence interval exceeds the price")]
    ConfidenceTooHigh,
    #[msg("Calldata price diverges from the on-chain price")]
    CrossSourceDivergence,
    #[msg("Calldata package signed by an unknown signer")]
    UnauthorizedSigner,
    #[msg("Calldata package signer appears more than once")]
    DuplicateSigner,
    #[msg("Not enough signed calldata packages")]
    InsufficientSigners,
    #[msg("Attached payment does not match the validation cost")]
    IncorrectFee,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Middleware is paused")]
    Paused,
    #[msg("Parameter out of bounds")]
    InvalidParameter,
    #[msg("Destination is the zero address")]
    ZeroAddress,
    #[msg("Destination cannot receive lamports")]
    RecipientRejected,
    #[msg("Config already at the current version")]
    AlreadyMigrated,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}
