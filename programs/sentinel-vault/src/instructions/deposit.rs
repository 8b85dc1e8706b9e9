use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    constants::*,
    errors::VaultError,
    events::Deposited,
    state::{UserPosition, Vault},
};

#[derive(Accounts)]
pub struct Deposit<'info> {
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
        init_if_needed,
        payer = user,
        space = UserPosition::LEN,
        seeds = [POSITION_SEED, vault.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_position: Box<Account<'info, UserPosition>>,

    /// Depositor's token account for the vault mint
    #[account(
        mut,
        constraint = user_token.mint == vault.value_mint @ VaultError::Unauthorized,
        constraint = user_token.owner == user.key() @ VaultError::Unauthorized
    )]
    pub user_token: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault.key();
    let user_key = ctx.accounts.user.key();

    let position = &mut ctx.accounts.user_position;
    if !position.is_open() {
        position.open(vault_key, user_key, ctx.bumps.user_position);
    }

    let vault = &mut ctx.accounts.vault;
    let shares_minted = vault.deposit(position, amount, now)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token.to_account_info(),
                to: ctx.accounts.treasury.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(Deposited {
        vault: vault_key,
        user: user_key,
        amount,
        shares_minted,
        total_vault_shares: ctx.accounts.vault.total_shares,
        pool_balance: ctx.accounts.vault.pool_balance,
        timestamp: now,
    });

    Ok(())
}
