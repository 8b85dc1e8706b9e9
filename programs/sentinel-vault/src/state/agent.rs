use std::cmp::Ordering;

use anchor_lang::prelude::*;

use crate::{
    constants::{BPS_DENOMINATOR, MAX_ABS_PNL_BPS, MAX_SCORE},
    errors::VaultError,
    math::{mul_div_floor, widening_mul_u128},
};

#[account]
#[derive(Default, Debug, PartialEq)]
pub struct AgentProfile {
    /// Agent identity
    pub agent: Pubkey,

    /// Vault the agent trades for
    pub vault: Pubkey,

    /// Trades reported so far
    pub trade_count: u32,

    /// Trades reported as wins
    pub winning_trades: u32,

    /// Cumulative signed pnl in basis points
    pub cumulative_pnl: i64,

    /// Σ r_i, signed bps
    pub sum_returns: i128,

    /// Σ r_i², bps²
    pub sum_sq_returns: u128,

    /// Earmarked reward still held in the pool
    pub total_rewards_earned: u64,

    /// Timestamp of the last trade report
    pub last_report_ts: i64,

    /// Inactive agents keep their history but accept no reports
    pub is_active: bool,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

/// Squared risk-adjusted ratio of an agent, kept as an exact fraction.
///
/// `score_numerator / score_denominator` is mean² / variance, a monotonic
/// surrogate for the mean / stddev ratio that needs no square root. Agents
/// must only be ranked on the combined ratio via [`AgentScore::cmp_risk_adjusted`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentScore {
    pub trade_count: u32,
    pub win_rate_bps: u64,
    pub cumulative_pnl: i64,
    pub mean_bps: i128,
    pub variance: u128,
    pub score_numerator: u128,
    pub score_denominator: u128,
    pub mean_positive: bool,
    /// Zero variance with a positive mean
    pub max_score: bool,
}

impl AgentScore {
    fn sign(&self) -> Ordering {
        self.mean_bps.cmp(&0)
    }

    /// Orders two agents by signed mean² / variance, using exact 256-bit
    /// cross-multiplication. A negative mean ranks below a flat one, and a
    /// larger magnitude ranks lower among negative means.
    pub fn cmp_risk_adjusted(&self, other: &AgentScore) -> Ordering {
        match self.sign().cmp(&other.sign()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }

        let ours = widening_mul_u128(self.score_numerator, other.score_denominator);
        let theirs = widening_mul_u128(other.score_numerator, self.score_denominator);
        match self.sign() {
            Ordering::Greater => ours.cmp(&theirs),
            Ordering::Less => theirs.cmp(&ours),
            Ordering::Equal => Ordering::Equal,
        }
    }
}

impl AgentProfile {
    pub const LEN: usize = 8 + // discriminator
        32 + // agent
        32 + // vault
        4 + // trade_count
        4 + // winning_trades
        8 + // cumulative_pnl
        16 + // sum_returns
        16 + // sum_sq_returns
        8 + // total_rewards_earned
        8 + // last_report_ts
        1 + // is_active
        1; // bump

    pub fn is_registered(&self) -> bool {
        self.agent != Pubkey::default()
    }

    pub fn belongs_to(&self, vault: &Pubkey) -> bool {
        self.vault == *vault
    }

    pub fn register(&mut self, vault: Pubkey, agent: Pubkey, bump: u8) -> Result<()> {
        require!(!self.is_registered(), VaultError::AgentAlreadyRegistered);

        *self = AgentProfile {
            agent,
            vault,
            is_active: true,
            bump,
            ..AgentProfile::default()
        };
        Ok(())
    }

    pub fn deactivate(&mut self) -> Result<()> {
        require!(self.is_active, VaultError::AgentInactive);
        self.is_active = false;
        Ok(())
    }

    /// Folds one trade outcome into the running statistics.
    pub fn record_trade(&mut self, pnl_bps: i64, is_win: bool, now: i64) -> Result<()> {
        require!(self.is_active, VaultError::AgentInactive);
        require!(
            (-MAX_ABS_PNL_BPS..=MAX_ABS_PNL_BPS).contains(&pnl_bps),
            VaultError::PnlOutOfRange
        );

        let trade_count = self
            .trade_count
            .checked_add(1)
            .ok_or(VaultError::MathOverflow)?;
        let winning_trades = if is_win {
            self.winning_trades
                .checked_add(1)
                .ok_or(VaultError::MathOverflow)?
        } else {
            self.winning_trades
        };
        let cumulative_pnl = self
            .cumulative_pnl
            .checked_add(pnl_bps)
            .ok_or(VaultError::MathOverflow)?;
        let sum_returns = self
            .sum_returns
            .checked_add(i128::from(pnl_bps))
            .ok_or(VaultError::MathOverflow)?;
        let magnitude = u128::from(pnl_bps.unsigned_abs());
        let sum_sq_returns = self
            .sum_sq_returns
            .checked_add(magnitude * magnitude)
            .ok_or(VaultError::MathOverflow)?;

        self.trade_count = trade_count;
        self.winning_trades = winning_trades;
        self.cumulative_pnl = cumulative_pnl;
        self.sum_returns = sum_returns;
        self.sum_sq_returns = sum_sq_returns;
        self.last_report_ts = now;
        Ok(())
    }

    /// mean = Σr / n and variance = Σr² / n − mean², both with integer
    /// division; variance is clamped at zero.
    pub fn score(&self) -> Result<AgentScore> {
        require!(self.trade_count > 0, VaultError::NoTradeData);

        let n = i128::from(self.trade_count);
        let mean_bps = self
            .sum_returns
            .checked_div(n)
            .ok_or(VaultError::MathOverflow)?;
        let mean_sq = mean_bps
            .unsigned_abs()
            .checked_mul(mean_bps.unsigned_abs())
            .ok_or(VaultError::MathOverflow)?;
        let second_moment = self.sum_sq_returns / u128::from(self.trade_count);
        let variance = second_moment.checked_sub(mean_sq).unwrap_or(0);

        let win_rate_bps = mul_div_floor(
            u64::from(self.winning_trades),
            BPS_DENOMINATOR,
            u64::from(self.trade_count),
        )?;

        let max_score = variance == 0 && mean_bps > 0;
        let (score_numerator, score_denominator) = match (max_score, variance) {
            (true, _) => (MAX_SCORE, 1),
            (false, 0) => (mean_sq, 1),
            (false, variance) => (mean_sq, variance),
        };

        Ok(AgentScore {
            trade_count: self.trade_count,
            win_rate_bps,
            cumulative_pnl: self.cumulative_pnl,
            mean_bps,
            variance,
            score_numerator,
            score_denominator,
            mean_positive: mean_bps > 0,
            max_score,
        })
    }
}
