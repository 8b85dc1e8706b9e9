use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_WHITELIST, SECONDS_PER_DAY},
    errors::VaultError,
    state::WithdrawalPolicy,
};

/// Policy counters a withdrawal will commit once every other check passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalTicket {
    pub day: i64,
    pub daily_withdrawn: u64,
}

#[account]
#[derive(Default, Debug, PartialEq)]
pub struct UserPosition {
    /// Associated vault
    pub vault: Pubkey,

    /// Depositor owning the shares
    pub owner: Pubkey,

    /// Shares held
    pub shares: u64,

    /// Lifetime deposited value
    pub total_deposited: u64,

    /// Lifetime withdrawn value
    pub total_withdrawn: u64,

    /// Last deposit or withdrawal timestamp
    pub last_action_ts: i64,

    /// Last withdrawal timestamp, drives the cooldown
    pub last_withdraw_ts: i64,

    /// UTC day index (unix_ts / 86400) of the last withdrawal
    pub last_withdraw_day: i64,

    /// Value withdrawn during `last_withdraw_day`
    pub daily_withdrawn: u64,

    /// Allowed withdrawal destinations besides the owner
    pub whitelist: [Pubkey; MAX_WHITELIST],

    /// Number of live whitelist entries (0 = any destination)
    pub whitelist_count: u8,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl UserPosition {
    pub const LEN: usize = 8 + // discriminator
        32 + // vault
        32 + // owner
        8 + // shares
        8 + // total_deposited
        8 + // total_withdrawn
        8 + // last_action_ts
        8 + // last_withdraw_ts
        8 + // last_withdraw_day
        8 + // daily_withdrawn
        32 * MAX_WHITELIST + // whitelist
        1 + // whitelist_count
        1; // bump

    pub fn is_open(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn open(&mut self, vault: Pubkey, owner: Pubkey, bump: u8) {
        *self = UserPosition {
            vault,
            owner,
            bump,
            ..UserPosition::default()
        };
    }

    pub fn active_whitelist(&self) -> &[Pubkey] {
        let count = usize::from(self.whitelist_count).min(MAX_WHITELIST);
        &self.whitelist[..count]
    }

    /// The owner is always an allowed destination.
    pub fn is_whitelisted(&self, destination: &Pubkey) -> bool {
        self.whitelist_count == 0
            || *destination == self.owner
            || self.active_whitelist().contains(destination)
    }

    /// Replaces the whitelist. Only the position owner may call this.
    pub fn set_whitelist(&mut self, caller: &Pubkey, destinations: &[Pubkey]) -> Result<()> {
        require!(*caller == self.owner, VaultError::Unauthorized);
        require!(
            destinations.len() <= MAX_WHITELIST,
            VaultError::TooManyWhitelistEntries
        );

        let mut whitelist = [Pubkey::default(); MAX_WHITELIST];
        whitelist[..destinations.len()].copy_from_slice(destinations);
        self.whitelist = whitelist;
        self.whitelist_count = destinations.len() as u8;
        Ok(())
    }

    /// Runs cooldown, daily cap and whitelist checks, in that order, for
    /// releasing `amount` to `destination`. Nothing is written; the returned
    /// ticket carries the counters to commit.
    pub fn authorize_withdrawal(
        &self,
        policy: WithdrawalPolicy,
        destination: &Pubkey,
        amount: u64,
        now: i64,
    ) -> Result<WithdrawalTicket> {
        let earliest_allowed = self
            .last_withdraw_ts
            .checked_add(policy.cooldown_seconds)
            .ok_or(VaultError::MathOverflow)?;
        require!(now >= earliest_allowed, VaultError::CooldownActive);

        let day = now.div_euclid(SECONDS_PER_DAY);
        let already_withdrawn = if day == self.last_withdraw_day {
            self.daily_withdrawn
        } else {
            0
        };
        let daily_withdrawn = already_withdrawn
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        require!(
            policy.daily_cap == 0 || daily_withdrawn <= policy.daily_cap,
            VaultError::DailyCapExceeded
        );

        require!(
            self.is_whitelisted(destination),
            VaultError::DestinationNotWhitelisted
        );

        Ok(WithdrawalTicket { day, daily_withdrawn })
    }

    pub fn apply_withdrawal(&mut self, ticket: WithdrawalTicket, now: i64) {
        self.last_withdraw_ts = now;
        self.last_action_ts = now;
        self.last_withdraw_day = ticket.day;
        self.daily_withdrawn = ticket.daily_withdrawn;
    }
}
