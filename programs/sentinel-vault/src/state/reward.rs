use anchor_lang::prelude::*;

use crate::{
    constants::MAX_AGENT_FEE_BPS,
    errors::VaultError,
    math::bps_of,
    state::{AgentProfile, Vault, VaultRole},
};

/// How one profit injection is split. The whole `amount` always enters the
/// pool; `agent_reward` is only bookkept as owed to the attributed agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardSplit {
    pub amount: u64,
    pub agent_reward: u64,
    pub vault_portion: u64,
}

impl RewardSplit {
    pub fn compute(amount: u64, agent_fee_bps: u16) -> Result<Self> {
        require!(
            agent_fee_bps <= MAX_AGENT_FEE_BPS,
            VaultError::FeeTooHigh
        );
        let agent_reward = bps_of(amount, u64::from(agent_fee_bps))?;
        let vault_portion = amount
            .checked_sub(agent_reward)
            .ok_or(VaultError::MathOverflow)?;
        Ok(Self {
            amount,
            agent_reward,
            vault_portion,
        })
    }

    /// No agent to pay: the carve-out stays with the holders.
    pub fn unattributed(amount: u64) -> Self {
        Self {
            amount,
            agent_reward: 0,
            vault_portion: amount,
        }
    }
}

impl Vault {
    /// Adds `amount` to the pool and earmarks the agent fee, if an agent
    /// is attributed.
    pub fn distribute_profits(
        &mut self,
        caller: &Pubkey,
        agent: Option<&mut AgentProfile>,
        amount: u64,
        agent_fee_bps: u16,
    ) -> Result<RewardSplit> {
        self.require_role(VaultRole::Oracle, caller)?;
        self.require_not_paused()?;
        require!(amount > 0, VaultError::ZeroAmount);
        let split = RewardSplit::compute(amount, agent_fee_bps)?;
        require!(self.total_shares > 0, VaultError::NoShareholders);

        let pool_balance = self
            .pool_balance
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        let total_profits_distributed = self
            .total_profits_distributed
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        let epoch_profit = self
            .epoch_profit
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;

        let split = match agent {
            Some(profile) => {
                require!(profile.is_active, VaultError::AgentInactive);
                profile.total_rewards_earned = profile
                    .total_rewards_earned
                    .checked_add(split.agent_reward)
                    .ok_or(VaultError::MathOverflow)?;
                split
            }
            None => RewardSplit::unattributed(amount),
        };

        self.pool_balance = pool_balance;
        self.total_profits_distributed = total_profits_distributed;
        self.epoch_profit = epoch_profit;
        Ok(split)
    }

    /// Releases the agent's earmarked reward from the pool. Returns the
    /// amount to transfer out.
    pub fn claim_agent_reward(&mut self, agent: &mut AgentProfile) -> Result<u64> {
        self.require_not_paused()?;
        let reward = agent.total_rewards_earned;
        require!(reward > 0, VaultError::ZeroAmount);
        require!(self.pool_balance >= reward, VaultError::InsufficientFunds);

        let pool_balance = self
            .pool_balance
            .checked_sub(reward)
            .ok_or(VaultError::MathOverflow)?;
        let total_rewards_claimed = self
            .total_rewards_claimed
            .checked_add(reward)
            .ok_or(VaultError::MathOverflow)?;

        self.pool_balance = pool_balance;
        self.total_rewards_claimed = total_rewards_claimed;
        agent.total_rewards_earned = 0;
        Ok(reward)
    }
}
