use anchor_lang::prelude::*;
use crate::constants::CONFIG_SEED;
use crate::events::MiddlewareInitialized;
use crate::oracle::sources::ChainlinkStoreFeed;
use crate::state::{InitializeParams, MiddlewareConfig};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        seeds = [CONFIG_SEED],
        bump,
        payer = authority,
        space = MiddlewareConfig::LEN
    )]
    pub config: Account<'info, MiddlewareConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: Chainlink store feed, layout verified in the handler
    pub round_feed: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    {
        let data = ctx.accounts.round_feed.try_borrow_data()?;
        let feed = ChainlinkStoreFeed::load(&data)?;
        msg!("Round feed decimals: {}", feed.header().decimals);
    }

    let config = &mut ctx.accounts.config;
    config.initialize(
        ctx.bumps.config,
        ctx.accounts.authority.key(),
        ctx.accounts.round_feed.key(),
        &params,
    )?;

    emit!(MiddlewareInitialized {
        authority: ctx.accounts.authority.key(),
        round_feed: config.round_feed,
        push_feed_id: config.push_feed_id,
        calldata_feed_id: config.calldata_feed_id,
        version: config.version,
    });

    Ok(())
}
