use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    constants::*,
    errors::VaultError,
    events::ProfitsDistributed,
    state::{AgentProfile, Vault},
};

#[derive(Accounts)]
pub struct DistributeProfits<'info> {
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

    /// Oracle's token account funding the profit
    #[account(
        mut,
        constraint = oracle_token.mint == vault.value_mint @ VaultError::Unauthorized,
        constraint = oracle_token.owner == oracle.key() @ VaultError::Unauthorized
    )]
    pub oracle_token: Box<Account<'info, TokenAccount>>,

    /// Agent the profit is attributed to; omit to credit holders only
    #[account(
        mut,
        constraint = agent_profile.belongs_to(&vault.key()) @ VaultError::InvalidAgent
    )]
    pub agent_profile: Option<Account<'info, AgentProfile>>,

    #[account(mut)]
    pub oracle: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn distribute_profits(
    ctx: Context<DistributeProfits>,
    amount: u64,
    agent_fee_bps: u16,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let agent = ctx.accounts.agent_profile.as_ref().map(|profile| profile.agent);

    let vault = &mut ctx.accounts.vault;
    let split = vault.distribute_profits(
        &ctx.accounts.oracle.key(),
        ctx.accounts.agent_profile.as_deref_mut(),
        amount,
        agent_fee_bps,
    )?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.oracle_token.to_account_info(),
                to: ctx.accounts.treasury.to_account_info(),
                authority: ctx.accounts.oracle.to_account_info(),
            },
        ),
        amount,
    )?;

    let vault = &ctx.accounts.vault;
    emit!(ProfitsDistributed {
        vault: vault.key(),
        oracle: ctx.accounts.oracle.key(),
        agent,
        amount,
        agent_reward: split.agent_reward,
        vault_portion: split.vault_portion,
        pool_balance: vault.pool_balance,
        total_profits_distributed: vault.total_profits_distributed,
        epoch: vault.epoch,
        timestamp: now,
    });

    Ok(())
}
