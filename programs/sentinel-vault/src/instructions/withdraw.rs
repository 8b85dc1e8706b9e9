use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    errors::VaultError,
    events::Withdrawn,
    instructions::transfer_from_treasury,
    state::{UserPosition, Vault},
};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        address = vault.treasury
    )]
    pub treasury: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, vault.key().as_ref(), owner.key().as_ref()],
        bump = user_position.bump,
        has_one = owner @ VaultError::Unauthorized
    )]
    pub user_position: Box<Account<'info, UserPosition>>,

    /// Receiving token account; its owner is the destination checked
    /// against the position whitelist
    #[account(
        mut,
        constraint = destination.mint == vault.value_mint @ VaultError::Unauthorized,
        constraint = vault.is_payout_account(&destination.key()) @ VaultError::DestinationNotWhitelisted
    )]
    pub destination: Box<Account<'info, TokenAccount>>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn withdraw(ctx: Context<Withdraw>, shares_to_burn: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let destination_owner = ctx.accounts.destination.owner;

    let position = &mut ctx.accounts.user_position;
    let vault = &mut ctx.accounts.vault;
    let amount_returned = vault
        .withdraw(position, shares_to_burn, &destination_owner, now)
        .map_err(|err| {
            msg!(
                "withdrawal of {} shares to {} rejected",
                shares_to_burn,
                destination_owner
            );
            err
        })?;

    transfer_from_treasury(
        &ctx.accounts.token_program,
        &ctx.accounts.treasury,
        ctx.accounts.destination.to_account_info(),
        &ctx.accounts.vault,
        amount_returned,
    )?;

    emit!(Withdrawn {
        vault: ctx.accounts.vault.key(),
        user: ctx.accounts.owner.key(),
        destination: destination_owner,
        shares_burned: shares_to_burn,
        amount_returned,
        total_vault_shares: ctx.accounts.vault.total_shares,
        pool_balance: ctx.accounts.vault.pool_balance,
        daily_withdrawn: ctx.accounts.user_position.daily_withdrawn,
        timestamp: now,
    });

    Ok(())
}
