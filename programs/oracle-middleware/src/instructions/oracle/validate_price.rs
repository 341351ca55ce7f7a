use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;
use crate::constants::CONFIG_SEED;
use crate::errors::OracleMiddlewareError;
use crate::events::PriceValidated;
use crate::oracle::sources::{ChainlinkStoreFeed, PostedPriceUpdate, PythReceiverSource};
use crate::oracle::{OracleMiddleware, PriceRecord};
use crate::state::MiddlewareConfig;
use crate::utils::math::current_timestamp;

#[derive(Accounts)]
pub struct ValidatePrice<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, MiddlewareConfig>,

    /// Pays the validation cost
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Posted by the Pyth receiver; required only for push payloads
    pub price_update: Option<Account<'info, PriceUpdateV2>>,

    /// CHECK: address pinned to the config, layout checked by `ChainlinkStoreFeed::load`
    #[account(address = config.round_feed @ OracleMiddlewareError::FeedMismatch)]
    pub round_feed: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_parse_and_validate_price(
    ctx: Context<ValidatePrice>,
    payload: Vec<u8>,
    target_timestamp: u64,
    action: u8,
    action_id: [u8; 32],
    attached_payment: u64,
) -> Result<PriceRecord> {
    let now = current_timestamp()?;

    let validated = {
        let config = &ctx.accounts.config;
        let posted = ctx
            .accounts
            .price_update
            .as_ref()
            .map(|account| PostedPriceUpdate::from(&**account));
        let push = PythReceiverSource::new(posted, config.push_update_fee);
        let data = ctx.accounts.round_feed.try_borrow_data()?;
        let feed = ChainlinkStoreFeed::load(&data)?;

        OracleMiddleware::new(config, &push, &feed, now).parse_and_validate_price(
            &payload,
            target_timestamp,
            action,
            attached_payment,
        )?
    };

    if validated.fee > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.payer.to_account_info(),
                    to: ctx.accounts.config.to_account_info(),
                },
            ),
            validated.fee,
        )?;
        ctx.accounts.config.credit_fees(validated.fee)?;
    }

    msg!(
        "{:?} price {} at {} from {:?}",
        validated.action,
        validated.record.price,
        validated.record.timestamp,
        validated.source
    );
    emit!(PriceValidated {
        action: validated.action,
        source: validated.source,
        price: validated.record.price,
        timestamp: validated.record.timestamp,
        target_timestamp,
        action_id,
        fee: validated.fee,
    });

    Ok(validated.record)
}
