use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    errors::VaultError,
    events::AgentRewardClaimed,
    instructions::transfer_from_treasury,
    state::{AgentProfile, Vault},
};

#[derive(Accounts)]
pub struct ClaimAgentReward<'info> {
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
        seeds = [AGENT_SEED, vault.key().as_ref(), agent.key().as_ref()],
        bump = agent_profile.bump,
        constraint = agent_profile.belongs_to(&vault.key()) @ VaultError::InvalidAgent,
        constraint = agent_profile.agent == agent.key() @ VaultError::Unauthorized
    )]
    pub agent_profile: Box<Account<'info, AgentProfile>>,

    /// Agent's token account receiving the reward
    #[account(
        mut,
        constraint = agent_token.mint == vault.value_mint @ VaultError::Unauthorized
    )]
    pub agent_token: Box<Account<'info, TokenAccount>>,

    pub agent: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn claim_agent_reward(ctx: Context<ClaimAgentReward>) -> Result<()> {
    let profile = &mut ctx.accounts.agent_profile;
    let vault = &mut ctx.accounts.vault;
    let amount = vault.claim_agent_reward(profile)?;

    transfer_from_treasury(
        &ctx.accounts.token_program,
        &ctx.accounts.treasury,
        ctx.accounts.agent_token.to_account_info(),
        &ctx.accounts.vault,
        amount,
    )?;

    emit!(AgentRewardClaimed {
        vault: ctx.accounts.vault.key(),
        agent: ctx.accounts.agent.key(),
        amount,
        pool_balance: ctx.accounts.vault.pool_balance,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
