use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;

declare_id!("SentVau1t1111111111111111111111111111111111");

#[program]
pub mod sentinel_vault {
    use super::*;

    /// Create the vault, its treasury and the initial withdrawal policy
    pub fn initialize(
        ctx: Context<Initialize>,
        guardian: Pubkey,
        oracle: Pubkey,
        daily_withdraw_cap: u64,
        cooldown_seconds: i64,
    ) -> Result<()> {
        instructions::initialize(ctx, guardian, oracle, daily_withdraw_cap, cooldown_seconds)
    }

    /// Deposit value and mint shares at the current NAV
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)
    }

    /// Burn shares and release value, subject to the guardian policy
    pub fn withdraw(ctx: Context<Withdraw>, shares_to_burn: u64) -> Result<()> {
        instructions::withdraw(ctx, shares_to_burn)
    }

    /// Replace the caller's withdrawal whitelist (max 4 entries)
    pub fn set_whitelist(ctx: Context<SetWhitelist>, destinations: Vec<Pubkey>) -> Result<()> {
        instructions::set_whitelist(ctx, destinations)
    }

    /// Register a trading agent (authority only)
    pub fn register_agent(ctx: Context<RegisterAgent>, agent_key: Pubkey) -> Result<()> {
        instructions::register_agent(ctx, agent_key)
    }

    /// Freeze an agent's history and stop accepting its reports (authority only)
    pub fn deactivate_agent(ctx: Context<DeactivateAgent>, agent_key: Pubkey) -> Result<()> {
        instructions::deactivate_agent(ctx, agent_key)
    }

    /// Record one trade outcome for an agent (oracle only)
    pub fn report_trade(ctx: Context<ReportTrade>, pnl_bps: i64, is_win: bool) -> Result<()> {
        instructions::report_trade(ctx, pnl_bps, is_win)
    }

    /// Emit an agent's risk-adjusted score
    pub fn query_agent_score(ctx: Context<QueryAgentScore>) -> Result<()> {
        instructions::query_agent_score(ctx)
    }

    /// Inject profit into the pool, optionally earmarking an agent fee (oracle only)
    pub fn distribute_profits(
        ctx: Context<DistributeProfits>,
        amount: u64,
        agent_fee_bps: u16,
    ) -> Result<()> {
        instructions::distribute_profits(ctx, amount, agent_fee_bps)
    }

    /// Pay out the calling agent's earmarked reward
    pub fn claim_agent_reward(ctx: Context<ClaimAgentReward>) -> Result<()> {
        instructions::claim_agent_reward(ctx)
    }

    /// Replace daily cap and cooldown (guardian only)
    pub fn update_policy(
        ctx: Context<UpdatePolicy>,
        new_daily_cap: u64,
        new_cooldown_seconds: i64,
    ) -> Result<()> {
        instructions::update_policy(ctx, new_daily_cap, new_cooldown_seconds)
    }

    /// Rotate guardian and/or oracle (authority only)
    pub fn update_roles(
        ctx: Context<UpdateRoles>,
        new_guardian: Option<Pubkey>,
        new_oracle: Option<Pubkey>,
    ) -> Result<()> {
        instructions::update_roles(ctx, new_guardian, new_oracle)
    }

    /// Pause or resume the vault (guardian only)
    pub fn emergency_stop(ctx: Context<EmergencyStop>, pause: bool) -> Result<()> {
        instructions::emergency_stop(ctx, pause)
    }

    /// Close the current accounting epoch (authority only)
    pub fn advance_epoch(ctx: Context<AdvanceEpoch>) -> Result<()> {
        instructions::advance_epoch(ctx)
    }
}
