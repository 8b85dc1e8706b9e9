use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::VaultError,
    events::TradeReported,
    state::{AgentProfile, Vault},
};

#[derive(Accounts)]
pub struct ReportTrade<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        seeds = [AGENT_SEED, vault.key().as_ref(), agent_profile.agent.as_ref()],
        bump = agent_profile.bump,
        constraint = agent_profile.belongs_to(&vault.key()) @ VaultError::InvalidAgent
    )]
    pub agent_profile: Account<'info, AgentProfile>,

    pub oracle: Signer<'info>,
}

pub fn report_trade(ctx: Context<ReportTrade>, pnl_bps: i64, is_win: bool) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let profile = &mut ctx.accounts.agent_profile;
    ctx.accounts
        .vault
        .report_trade(&ctx.accounts.oracle.key(), profile, pnl_bps, is_win, now)?;

    emit!(TradeReported {
        vault: ctx.accounts.vault.key(),
        agent: profile.agent,
        pnl_bps,
        is_win,
        trade_count: profile.trade_count,
        cumulative_pnl: profile.cumulative_pnl,
        timestamp: now,
    });

    Ok(())
}
