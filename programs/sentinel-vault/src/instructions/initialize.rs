use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    events::VaultInitialized,
    state::{Vault, VaultRoles, WithdrawalPolicy},
};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = authority,
        space = Vault::LEN,
        seeds = [VAULT_SEED, authority.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, Vault>,

    /// Mint the pooled value is denominated in
    pub value_mint: Account<'info, Mint>,

    /// Vault-owned treasury holding the pooled value
    #[account(
        init,
        payer = authority,
        associated_token::mint = value_mint,
        associated_token::authority = vault,
    )]
    pub treasury: Account<'info, TokenAccount>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn initialize(
    ctx: Context<Initialize>,
    guardian: Pubkey,
    oracle: Pubkey,
    daily_withdraw_cap: u64,
    cooldown_seconds: i64,
) -> Result<()> {
    let vault_key = ctx.accounts.vault.key();
    let roles = VaultRoles {
        authority: ctx.accounts.authority.key(),
        guardian,
        oracle,
    };
    let policy = WithdrawalPolicy {
        daily_cap: daily_withdraw_cap,
        cooldown_seconds,
    };

    let vault = &mut ctx.accounts.vault;
    vault.initialize(
        roles,
        ctx.accounts.value_mint.key(),
        ctx.accounts.treasury.key(),
        policy,
        ctx.bumps.vault,
    )?;

    emit!(VaultInitialized {
        vault: vault_key,
        authority: roles.authority,
        guardian,
        oracle,
        value_mint: vault.value_mint,
        daily_withdraw_cap,
        cooldown_seconds,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
