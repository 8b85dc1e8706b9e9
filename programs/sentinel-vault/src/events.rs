use anchor_lang::prelude::*;

#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub guardian: Pubkey,
    pub oracle: Pubkey,
    pub value_mint: Pubkey,
    pub daily_withdraw_cap: u64,
    pub cooldown_seconds: i64,
    pub timestamp: i64,
}

#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub shares_minted: u64,
    pub total_vault_shares: u64,
    pub pool_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub destination: Pubkey,
    pub shares_burned: u64,
    pub amount_returned: u64,
    pub total_vault_shares: u64,
    pub pool_balance: u64,
    pub daily_withdrawn: u64,
    pub timestamp: i64,
}

#[event]
pub struct WhitelistUpdated {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub count: u8,
    pub timestamp: i64,
}

#[event]
pub struct AgentRegistered {
    pub vault: Pubkey,
    pub agent: Pubkey,
    pub agent_count: u32,
    pub timestamp: i64,
}

#[event]
pub struct AgentDeactivated {
    pub vault: Pubkey,
    pub agent: Pubkey,
    pub trade_count: u32,
    pub timestamp: i64,
}

#[event]
pub struct TradeReported {
    pub vault: Pubkey,
    pub agent: Pubkey,
    pub pnl_bps: i64,
    pub is_win: bool,
    pub trade_count: u32,
    pub cumulative_pnl: i64,
    pub timestamp: i64,
}

#[event]
pub struct AgentScoreComputed {
    pub vault: Pubkey,
    pub agent: Pubkey,
    pub trade_count: u32,
    pub win_rate_bps: u64,
    pub cumulative_pnl: i64,
    /// mean² (numerator of the squared risk-adjusted ratio)
    pub score_numerator: u128,
    /// variance (denominator of the squared risk-adjusted ratio)
    pub score_denominator: u128,
    pub mean_positive: bool,
    /// Zero variance with positive mean; numerator holds MAX_SCORE
    pub max_score: bool,
    pub timestamp: i64,
}

#[event]
pub struct ProfitsDistributed {
    pub vault: Pubkey,
    pub oracle: Pubkey,
    pub agent: Option<Pubkey>,
    pub amount: u64,
    pub agent_reward: u64,
    pub vault_portion: u64,
    pub pool_balance: u64,
    pub total_profits_distributed: u64,
    pub epoch: u64,
    pub timestamp: i64,
}

#[event]
pub struct AgentRewardClaimed {
    pub vault: Pubkey,
    pub agent: Pubkey,
    pub amount: u64,
    pub pool_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct PolicyUpdated {
    pub vault: Pubkey,
    pub guardian: Pubkey,
    pub daily_withdraw_cap: u64,
    pub cooldown_seconds: i64,
    pub timestamp: i64,
}

#[event]
pub struct RolesUpdated {
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub guardian: Pubkey,
    pub oracle: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct EmergencyAction {
    pub vault: Pubkey,
    pub guardian: Pubkey,
    pub paused: bool,
    pub timestamp: i64,
}

#[event]
pub struct EpochAdvanced {
    pub vault: Pubkey,
    pub previous_epoch: u64,
    pub new_epoch: u64,
    pub epoch_profit: u64,
    pub timestamp: i64,
}
