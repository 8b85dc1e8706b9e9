use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::VaultError,
    events::AgentScoreComputed,
    state::{AgentProfile, Vault},
};

#[derive(Accounts)]
pub struct QueryAgentScore<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        seeds = [AGENT_SEED, vault.key().as_ref(), agent_profile.agent.as_ref()],
        bump = agent_profile.bump,
        constraint = agent_profile.belongs_to(&vault.key()) @ VaultError::InvalidAgent
    )]
    pub agent_profile: Account<'info, AgentProfile>,
}

/// Emits the agent's score; read-only.
pub fn query_agent_score(ctx: Context<QueryAgentScore>) -> Result<()> {
    let profile = &ctx.accounts.agent_profile;
    let score = profile.score()?;

    emit!(AgentScoreComputed {
        vault: ctx.accounts.vault.key(),
        agent: profile.agent,
        trade_count: score.trade_count,
        win_rate_bps: score.win_rate_bps,
        cumulative_pnl: score.cumulative_pnl,
        score_numerator: score.score_numerator,
        score_denominator: score.score_denominator,
        mean_positive: score.mean_positive,
        max_score: score.max_score,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
