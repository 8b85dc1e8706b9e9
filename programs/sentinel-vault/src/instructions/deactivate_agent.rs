use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::VaultError,
    events::AgentDeactivated,
    state::{AgentProfile, Vault},
};

#[derive(Accounts)]
#[instruction(agent_key: Pubkey)]
pub struct DeactivateAgent<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        seeds = [AGENT_SEED, vault.key().as_ref(), agent_key.as_ref()],
        bump = agent_profile.bump,
        constraint = agent_profile.belongs_to(&vault.key()) @ VaultError::InvalidAgent
    )]
    pub agent_profile: Account<'info, AgentProfile>,

    pub authority: Signer<'info>,
}

pub fn deactivate_agent(ctx: Context<DeactivateAgent>, agent_key: Pubkey) -> Result<()> {
    let profile = &mut ctx.accounts.agent_profile;
    ctx.accounts
        .vault
        .deactivate_agent(&ctx.accounts.authority.key(), profile)?;

    msg!("agent {} deactivated after {} trades", agent_key, profile.trade_count);

    emit!(AgentDeactivated {
        vault: ctx.accounts.vault.key(),
        agent: agent_key,
        trade_count: profile.trade_count,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
