use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::AgentRegistered,
    state::{AgentProfile, Vault},
};

#[derive(Accounts)]
#[instruction(agent_key: Pubkey)]
pub struct RegisterAgent<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        init,
        payer = authority,
        space = AgentProfile::LEN,
        seeds = [AGENT_SEED, vault.key().as_ref(), agent_key.as_ref()],
        bump
    )]
    pub agent_profile: Account<'info, AgentProfile>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn register_agent(ctx: Context<RegisterAgent>, agent_key: Pubkey) -> Result<()> {
    let vault_key = ctx.accounts.vault.key();
    let vault = &mut ctx.accounts.vault;
    vault.register_agent(
        &ctx.accounts.authority.key(),
        &mut ctx.accounts.agent_profile,
        vault_key,
        agent_key,
        ctx.bumps.agent_profile,
    )?;

    emit!(AgentRegistered {
        vault: vault_key,
        agent: agent_key,
        agent_count: vault.agent_count,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
