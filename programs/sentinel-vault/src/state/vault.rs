use anchor_lang::prelude::*;

use crate::{
    constants::MIN_DEPOSIT,
    errors::VaultError,
    math::mul_div_floor,
    state::{AgentProfile, UserPosition},
};

/// Privileged identity a caller is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VaultRole {
    Authority,
    Guardian,
    Oracle,
}

/// The three privileged identities of a vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultRoles {
    pub authority: Pubkey,
    pub guardian: Pubkey,
    pub oracle: Pubkey,
}

impl VaultRoles {
    pub fn holder(&self, role: VaultRole) -> Pubkey {
        match role {
            VaultRole::Authority => self.authority,
            VaultRole::Guardian => self.guardian,
            VaultRole::Oracle => self.oracle,
        }
    }
}

/// Guardian-controlled withdrawal limits shared by every position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WithdrawalPolicy {
    /// Maximum value a position may withdraw per UTC day (0 = unlimited)
    pub daily_cap: u64,
    /// Minimum seconds between two withdrawals of the same position
    pub cooldown_seconds: i64,
}

impl WithdrawalPolicy {
    pub fn validate(&self) -> Result<()> {
        require!(self.cooldown_seconds >= 0, VaultError::InvalidCooldown);
        Ok(())
    }
}

/// Snapshot returned when an epoch is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochRollover {
    pub previous_epoch: u64,
    pub new_epoch: u64,
    pub epoch_profit: u64,
}

#[account]
#[derive(Default, Debug, PartialEq)]
pub struct Vault {
    /// Owner that registers agents, rotates roles and closes epochs
    pub authority: Pubkey,

    /// Risk guardian that pauses the vault and sets withdrawal policy
    pub guardian: Pubkey,

    /// Oracle that reports trades and injects profit
    pub oracle: Pubkey,

    /// Mint the pooled value is denominated in
    pub value_mint: Pubkey,

    /// Treasury token account owned by the vault PDA
    pub treasury: Pubkey,

    /// Outstanding shares across all positions
    pub total_shares: u64,

    /// Tracked pooled value; NAV = pool_balance / total_shares
    pub pool_balance: u64,

    /// Lifetime deposited value
    pub total_deposited: u64,

    /// Lifetime withdrawn value
    pub total_withdrawn: u64,

    /// Lifetime profit injected by the oracle
    pub total_profits_distributed: u64,

    /// Lifetime earmarked rewards paid out to agents
    pub total_rewards_claimed: u64,

    /// Emergency pause flag
    pub is_paused: bool,

    /// Per-position daily withdrawal cap (0 = unlimited)
    pub daily_withdraw_cap: u64,

    /// Per-position cooldown between withdrawals
    pub cooldown_seconds: i64,

    /// Current accounting epoch
    pub epoch: u64,

    /// Profit injected during the current epoch
    pub epoch_profit: u64,

    /// Number of registered agents
    pub agent_count: u32,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 32],
}

impl Vault {
    pub const LEN: usize = 8 + // discriminator
        32 + // authority
        32 + // guardian
        32 + // oracle
        32 + // value_mint
        32 + // treasury
        8 + // total_shares
        8 + // pool_balance
        8 + // total_deposited
        8 + // total_withdrawn
        8 + // total_profits_distributed
        8 + // total_rewards_claimed
        1 + // is_paused
        8 + // daily_withdraw_cap
        8 + // cooldown_seconds
        8 + // epoch
        8 + // epoch_profit
        4 + // agent_count
        1 + // bump
        32; // _reserved

    pub fn initialize(
        &mut self,
        roles: VaultRoles,
        value_mint: Pubkey,
        treasury: Pubkey,
        policy: WithdrawalPolicy,
        bump: u8,
    ) -> Result<()> {
        policy.validate()?;

        *self = Vault {
            authority: roles.authority,
            guardian: roles.guardian,
            oracle: roles.oracle,
            value_mint,
            treasury,
            daily_withdraw_cap: policy.daily_cap,
            cooldown_seconds: policy.cooldown_seconds,
            bump,
            ..Vault::default()
        };
        Ok(())
    }

    /// Fails `Unauthorized` unless `caller` currently holds `role`.
    pub fn require_role(&self, role: VaultRole, caller: &Pubkey) -> Result<()> {
        require!(
            self.roles().holder(role) == *caller,
            VaultError::Unauthorized
        );
        Ok(())
    }

    /// Payouts must leave the treasury.
    pub fn is_payout_account(&self, account: &Pubkey) -> bool {
        *account != self.treasury
    }

    pub fn roles(&self) -> VaultRoles {
        VaultRoles {
            authority: self.authority,
            guardian: self.guardian,
            oracle: self.oracle,
        }
    }

    pub fn withdrawal_policy(&self) -> WithdrawalPolicy {
        WithdrawalPolicy {
            daily_cap: self.daily_withdraw_cap,
            cooldown_seconds: self.cooldown_seconds,
        }
    }

    pub fn require_not_paused(&self) -> Result<()> {
        require!(!self.is_paused, VaultError::VaultPaused);
        Ok(())
    }

    /// Shares minted for `amount` at the current NAV.
    /// An empty vault mints 1:1.
    pub fn shares_for_deposit(&self, amount: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(amount);
        }
        mul_div_floor(amount, self.total_shares, self.pool_balance)
    }

    /// Value returned for burning `shares` at the current NAV.
    pub fn value_for_shares(&self, shares: u64) -> Result<u64> {
        require!(self.total_shares > 0, VaultError::NoShareholders);
        mul_div_floor(shares, self.pool_balance, self.total_shares)
    }

    /// Mints shares for `amount` into `position`. Returns the shares minted.
    pub fn deposit(&mut self, position: &mut UserPosition, amount: u64, now: i64) -> Result<u64> {
        self.require_not_paused()?;
        require!(amount > 0, VaultError::ZeroAmount);
        require!(amount >= MIN_DEPOSIT, VaultError::BelowMinDeposit);

        let shares = self.shares_for_deposit(amount)?;
        require!(shares > 0, VaultError::ZeroShares);

        let total_shares = self
            .total_shares
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;
        let pool_balance = self
            .pool_balance
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        let total_deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        let position_shares = position
            .shares
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;
        let position_deposited = position
            .total_deposited
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;

        self.total_shares = total_shares;
        self.pool_balance = pool_balance;
        self.total_deposited = total_deposited;
        position.shares = position_shares;
        position.total_deposited = position_deposited;
        position.last_action_ts = now;

        Ok(shares)
    }

    /// Burns `shares_to_burn` from `position` after the guardian policy
    /// authorizes paying `destination`. Returns the value released.
    pub fn withdraw(
        &mut self,
        position: &mut UserPosition,
        shares_to_burn: u64,
        destination: &Pubkey,
        now: i64,
    ) -> Result<u64> {
        self.require_not_paused()?;
        require!(shares_to_burn > 0, VaultError::ZeroAmount);
        require!(
            position.shares >= shares_to_burn,
            VaultError::InsufficientShares
        );

        let amount = self.value_for_shares(shares_to_burn)?;
        require!(amount > 0, VaultError::ZeroAmount);

        let ticket =
            position.authorize_withdrawal(self.withdrawal_policy(), destination, amount, now)?;

        require!(self.pool_balance >= amount, VaultError::InsufficientFunds);

        let total_shares = self
            .total_shares
            .checked_sub(shares_to_burn)
            .ok_or(VaultError::MathOverflow)?;
        let pool_balance = self
            .pool_balance
            .checked_sub(amount)
            .ok_or(VaultError::MathOverflow)?;
        let total_withdrawn = self
            .total_withdrawn
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        let position_shares = position
            .shares
            .checked_sub(shares_to_burn)
            .ok_or(VaultError::MathOverflow)?;
        let position_withdrawn = position
            .total_withdrawn
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;

        self.total_shares = total_shares;
        self.pool_balance = pool_balance;
        self.total_withdrawn = total_withdrawn;
        position.shares = position_shares;
        position.total_withdrawn = position_withdrawn;
        position.apply_withdrawal(ticket, now);

        Ok(amount)
    }

    /// Binds a fresh profile to this vault and bumps the agent count.
    pub fn register_agent(
        &mut self,
        caller: &Pubkey,
        profile: &mut AgentProfile,
        vault: Pubkey,
        agent: Pubkey,
        bump: u8,
    ) -> Result<()> {
        self.require_role(VaultRole::Authority, caller)?;
        let agent_count = self
            .agent_count
            .checked_add(1)
            .ok_or(VaultError::MathOverflow)?;
        profile.register(vault, agent, bump)?;
        self.agent_count = agent_count;
        Ok(())
    }

    pub fn deactivate_agent(&self, caller: &Pubkey, profile: &mut AgentProfile) -> Result<()> {
        self.require_role(VaultRole::Authority, caller)?;
        profile.deactivate()
    }

    /// Folds an oracle-reported trade into the agent's statistics.
    pub fn report_trade(
        &self,
        caller: &Pubkey,
        profile: &mut AgentProfile,
        pnl_bps: i64,
        is_win: bool,
        now: i64,
    ) -> Result<()> {
        self.require_role(VaultRole::Oracle, caller)?;
        profile.record_trade(pnl_bps, is_win, now)
    }

    pub fn set_policy(&mut self, caller: &Pubkey, policy: WithdrawalPolicy) -> Result<()> {
        self.require_role(VaultRole::Guardian, caller)?;
        policy.validate()?;
        self.daily_withdraw_cap = policy.daily_cap;
        self.cooldown_seconds = policy.cooldown_seconds;
        Ok(())
    }

    /// Replaces whichever roles are provided. Returns the resulting triad.
    pub fn set_roles(
        &mut self,
        caller: &Pubkey,
        guardian: Option<Pubkey>,
        oracle: Option<Pubkey>,
    ) -> Result<VaultRoles> {
        self.require_role(VaultRole::Authority, caller)?;
        if let Some(guardian) = guardian {
            self.guardian = guardian;
        }
        if let Some(oracle) = oracle {
            self.oracle = oracle;
        }
        Ok(self.roles())
    }

    pub fn set_paused(&mut self, caller: &Pubkey, paused: bool) -> Result<()> {
        self.require_role(VaultRole::Guardian, caller)?;
        self.is_paused = paused;
        Ok(())
    }

    pub fn advance_epoch(&mut self, caller: &Pubkey) -> Result<EpochRollover> {
        self.require_role(VaultRole::Authority, caller)?;
        let new_epoch = self.epoch.checked_add(1).ok_or(VaultError::MathOverflow)?;
        let rollover = EpochRollover {
            previous_epoch: self.epoch,
            new_epoch,
            epoch_profit: self.epoch_profit,
        };
        self.epoch = new_epoch;
        self.epoch_profit = 0;
        Ok(rollover)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use proptest::prelude::*;

    use crate::constants::SECONDS_PER_DAY;

    pub(crate) const NOW: i64 = 1_700_000_000;
    pub(crate) const AUTHORITY: Pubkey = Pubkey::new_from_array([1; 32]);
    pub(crate) const GUARDIAN: Pubkey = Pubkey::new_from_array([2; 32]);
    pub(crate) const ORACLE: Pubkey = Pubkey::new_from_array([3; 32]);
    pub(crate) const TREASURY: Pubkey = Pubkey::new_from_array([4; 32]);

    pub(crate) fn new_vault(policy: WithdrawalPolicy) -> Vault {
        let mut vault = Vault::default();
        vault
            .initialize(
                VaultRoles {
                    authority: AUTHORITY,
                    guardian: GUARDIAN,
                    oracle: ORACLE,
                },
                Pubkey::new_unique(),
                TREASURY,
                policy,
                255,
            )
            .unwrap();
        vault
    }

    pub(crate) fn new_position(vault: &Pubkey) -> UserPosition {
        let mut position = UserPosition::default();
        position.open(*vault, Pubkey::new_unique(), 254);
        position
    }

    fn nav_le(before: (u64, u64), after: (u64, u64)) -> bool {
        // before.pool / before.shares <= after.pool / after.shares
        (before.0 as u128) * (after.1 as u128) <= (after.0 as u128) * (before.1 as u128)
    }

    #[test]
    fn test_initialize_rejects_negative_cooldown() {
        let mut vault = Vault::default();
        let result = vault.initialize(
            VaultRoles {
                authority: Pubkey::new_unique(),
                guardian: Pubkey::new_unique(),
                oracle: Pubkey::new_unique(),
            },
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            WithdrawalPolicy { daily_cap: 0, cooldown_seconds: -1 },
            1,
        );
        assert_eq!(result.unwrap_err(), Error::from(VaultError::InvalidCooldown));
        assert_eq!(vault, Vault::default());
    }

    #[test]
    fn test_bootstrap_deposit_mints_one_to_one() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut position = new_position(&Pubkey::new_unique());

        let shares = vault.deposit(&mut position, 50_000, NOW).unwrap();

        assert_eq!(shares, 50_000);
        assert_eq!(vault.total_shares, 50_000);
        assert_eq!(vault.pool_balance, 50_000);
        assert_eq!(position.shares, 50_000);
        assert_eq!(position.total_deposited, 50_000);
        assert_eq!(position.last_action_ts, NOW);
    }

    #[test]
    fn test_deposit_after_profit_mints_at_nav() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut alice = new_position(&Pubkey::new_unique());
        let mut bob = new_position(&Pubkey::new_unique());

        vault.deposit(&mut alice, 100_000, NOW).unwrap();
        vault.distribute_profits(&ORACLE, None, 100_000, 0).unwrap();

        // NAV is 2.0 now
        let shares = vault.deposit(&mut bob, 30_001, NOW).unwrap();
        assert_eq!(shares, 15_000);
        assert_eq!(vault.total_shares, 115_000);
        assert_eq!(vault.pool_balance, 230_001);
    }

    #[test]
    fn test_deposit_rejections_leave_state_untouched() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut position = new_position(&Pubkey::new_unique());
        vault.deposit(&mut position, 20_000, NOW).unwrap();
        let (vault_before, position_before) = (vault.clone(), position.clone());

        assert_eq!(
            vault.deposit(&mut position, 0, NOW).unwrap_err(),
            Error::from(VaultError::ZeroAmount)
        );
        assert_eq!(
            vault.deposit(&mut position, MIN_DEPOSIT - 1, NOW).unwrap_err(),
            Error::from(VaultError::BelowMinDeposit)
        );
        vault.set_paused(&GUARDIAN, true).unwrap();
        assert_eq!(
            vault.deposit(&mut position, 20_000, NOW).unwrap_err(),
            Error::from(VaultError::VaultPaused)
        );
        vault.set_paused(&GUARDIAN, false).unwrap();

        assert_eq!(vault, vault_before);
        assert_eq!(position, position_before);
    }

    #[test]
    fn test_deposit_truncating_to_zero_shares_fails() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut position = new_position(&Pubkey::new_unique());
        vault.deposit(&mut position, 10_000, NOW).unwrap();
        // NAV = 10_000_010_000 / 10_000, a minimum deposit buys < 1 share
        vault.distribute_profits(&ORACLE, None, 10_000_000_000, 0).unwrap();
        let before = vault.clone();

        assert_eq!(
            vault.deposit(&mut position, 10_000, NOW).unwrap_err(),
            Error::from(VaultError::ZeroShares)
        );
        assert_eq!(vault, before);
    }

    #[test]
    fn test_deposit_overflow_near_max_shares() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        vault.total_shares = u64::MAX;
        vault.pool_balance = 1;
        let mut position = new_position(&Pubkey::new_unique());
        let (vault_before, position_before) = (vault.clone(), position.clone());

        assert_eq!(
            vault.deposit(&mut position, MIN_DEPOSIT, NOW).unwrap_err(),
            Error::from(VaultError::MathOverflow)
        );
        assert_eq!(vault, vault_before);
        assert_eq!(position, position_before);
    }

    #[test]
    fn test_deposit_overflow_near_max_amount() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut whale = new_position(&Pubkey::new_unique());
        vault.deposit(&mut whale, u64::MAX - 5_000, NOW).unwrap();
        let mut position = new_position(&Pubkey::new_unique());
        let before = vault.clone();

        // the minted shares fit, the running totals do not
        assert_eq!(
            vault.deposit(&mut position, MIN_DEPOSIT, NOW).unwrap_err(),
            Error::from(VaultError::MathOverflow)
        );
        assert_eq!(vault, before);
        assert_eq!(position.shares, 0);
    }

    #[test]
    fn test_deposit_into_drained_pool_fails() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        vault.total_shares = 1_000;
        vault.pool_balance = 0;
        let mut position = new_position(&Pubkey::new_unique());

        assert_eq!(
            vault.deposit(&mut position, MIN_DEPOSIT, NOW).unwrap_err(),
            Error::from(VaultError::MathOverflow)
        );
    }

    #[test]
    fn test_withdraw_returns_pro_rata_value() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut position = new_position(&Pubkey::new_unique());
        vault.deposit(&mut position, 100_000, NOW).unwrap();
        vault.distribute_profits(&ORACLE, None, 50_000, 0).unwrap();
        let owner = position.owner;

        let amount = vault.withdraw(&mut position, 40_000, &owner, NOW).unwrap();

        assert_eq!(amount, 60_000);
        assert_eq!(vault.total_shares, 60_000);
        assert_eq!(vault.pool_balance, 90_000);
        assert_eq!(vault.total_withdrawn, 60_000);
        assert_eq!(position.shares, 60_000);
        assert_eq!(position.total_withdrawn, 60_000);
        assert_eq!(position.last_withdraw_ts, NOW);
        assert_eq!(position.daily_withdrawn, 60_000);
    }

    #[test]
    fn test_withdraw_rejections_leave_state_untouched() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut position = new_position(&Pubkey::new_unique());
        vault.deposit(&mut position, 100_000, NOW).unwrap();
        let owner = position.owner;
        let (vault_before, position_before) = (vault.clone(), position.clone());

        assert_eq!(
            vault.withdraw(&mut position, 0, &owner, NOW).unwrap_err(),
            Error::from(VaultError::ZeroAmount)
        );
        assert_eq!(
            vault.withdraw(&mut position, 100_001, &owner, NOW).unwrap_err(),
            Error::from(VaultError::InsufficientShares)
        );
        vault.set_paused(&GUARDIAN, true).unwrap();
        assert_eq!(
            vault.withdraw(&mut position, 1_000, &owner, NOW).unwrap_err(),
            Error::from(VaultError::VaultPaused)
        );
        vault.set_paused(&GUARDIAN, false).unwrap();

        assert_eq!(vault, vault_before);
        assert_eq!(position, position_before);
    }

    #[test]
    fn test_withdraw_with_no_shareholders() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut position = new_position(&Pubkey::new_unique());
        // corrupted record: position claims shares the vault does not track
        position.shares = 10;
        let owner = position.owner;

        assert_eq!(
            vault.withdraw(&mut position, 10, &owner, NOW).unwrap_err(),
            Error::from(VaultError::NoShareholders)
        );
    }

    #[test]
    fn test_withdraw_after_reward_claim_drained_pool() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut position = new_position(&Pubkey::new_unique());
        vault.deposit(&mut position, 10_000, NOW).unwrap();
        vault.pool_balance = 0;
        let owner = position.owner;

        // value rounds to zero, shares are not burned for nothing
        assert_eq!(
            vault.withdraw(&mut position, 10_000, &owner, NOW).unwrap_err(),
            Error::from(VaultError::ZeroAmount)
        );
        assert_eq!(position.shares, 10_000);
    }

    #[test]
    fn test_withdraw_policy_failure_rolls_back_day_reset() {
        let policy = WithdrawalPolicy { daily_cap: 10_000, cooldown_seconds: 0 };
        let mut vault = new_vault(policy);
        let mut position = new_position(&Pubkey::new_unique());
        vault.deposit(&mut position, 100_000, NOW).unwrap();
        let owner = position.owner;
        vault.withdraw(&mut position, 10_000, &owner, NOW).unwrap();
        let (vault_before, position_before) = (vault.clone(), position.clone());

        let tomorrow = NOW + SECONDS_PER_DAY;
        assert_eq!(
            vault.withdraw(&mut position, 10_001, &owner, tomorrow).unwrap_err(),
            Error::from(VaultError::DailyCapExceeded)
        );
        assert_eq!(vault, vault_before);
        assert_eq!(position, position_before);
    }

    #[test]
    fn test_round_trip_never_returns_more() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut seed = new_position(&Pubkey::new_unique());
        vault.deposit(&mut seed, 1_000_000, NOW).unwrap();
        vault.distribute_profits(&ORACLE, None, 333_333, 0).unwrap();

        let mut position = new_position(&Pubkey::new_unique());
        let owner = position.owner;
        let minted = vault.deposit(&mut position, 77_777, NOW).unwrap();
        let returned = vault.withdraw(&mut position, minted, &owner, NOW).unwrap();

        assert!(returned <= 77_777);
        assert_eq!(position.shares, 0);
    }

    #[test]
    fn test_register_agent_counts() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let vault_key = Pubkey::new_unique();
        let mut profile = AgentProfile::default();
        let agent = Pubkey::new_unique();

        vault.register_agent(&AUTHORITY, &mut profile, vault_key, agent, 7).unwrap();
        assert_eq!(vault.agent_count, 1);
        assert_eq!(profile.agent, agent);
        assert_eq!(profile.vault, vault_key);
        assert!(profile.is_active);

        assert_eq!(
            vault
                .register_agent(&AUTHORITY, &mut profile, vault_key, agent, 7)
                .unwrap_err(),
            Error::from(VaultError::AgentAlreadyRegistered)
        );
        assert_eq!(vault.agent_count, 1);
    }

    #[test]
    fn test_set_policy_validates() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        vault
            .set_policy(&GUARDIAN, WithdrawalPolicy { daily_cap: 5, cooldown_seconds: 60 })
            .unwrap();
        assert_eq!(vault.daily_withdraw_cap, 5);
        assert_eq!(vault.cooldown_seconds, 60);

        assert_eq!(
            vault
                .set_policy(&GUARDIAN, WithdrawalPolicy { daily_cap: 9, cooldown_seconds: -5 })
                .unwrap_err(),
            Error::from(VaultError::InvalidCooldown)
        );
        assert_eq!(vault.daily_withdraw_cap, 5);
    }

    #[test]
    fn test_set_roles_replaces_only_given() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let oracle = Pubkey::new_unique();

        let roles = vault.set_roles(&AUTHORITY, None, Some(oracle)).unwrap();
        assert_eq!(roles.guardian, GUARDIAN);
        assert_eq!(roles.oracle, oracle);
        assert!(vault.require_role(VaultRole::Oracle, &oracle).is_ok());
        assert_eq!(
            vault.require_role(VaultRole::Oracle, &ORACLE).unwrap_err(),
            Error::from(VaultError::Unauthorized)
        );
        assert!(vault.require_role(VaultRole::Authority, &AUTHORITY).is_ok());
    }

    #[test]
    fn test_require_role_matches_only_holder() {
        let vault = new_vault(WithdrawalPolicy::default());
        let roles = [
            (VaultRole::Authority, AUTHORITY),
            (VaultRole::Guardian, GUARDIAN),
            (VaultRole::Oracle, ORACLE),
        ];

        for (role, holder) in roles {
            assert!(vault.require_role(role, &holder).is_ok());
            for (_, other) in roles.iter().filter(|(_, key)| *key != holder) {
                assert_eq!(
                    vault.require_role(role, other).unwrap_err(),
                    Error::from(VaultError::Unauthorized)
                );
            }
            assert_eq!(
                vault.require_role(role, &Pubkey::new_unique()).unwrap_err(),
                Error::from(VaultError::Unauthorized)
            );
        }
    }

    #[test]
    fn test_guardian_operations_reject_other_callers() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let before = vault.clone();

        for caller in [AUTHORITY, ORACLE, Pubkey::new_unique()] {
            assert_eq!(
                vault.set_paused(&caller, true).unwrap_err(),
                Error::from(VaultError::Unauthorized)
            );
            assert_eq!(
                vault
                    .set_policy(&caller, WithdrawalPolicy { daily_cap: 1, cooldown_seconds: 1 })
                    .unwrap_err(),
                Error::from(VaultError::Unauthorized)
            );
        }
        assert_eq!(vault, before);

        vault.set_paused(&GUARDIAN, true).unwrap();
        assert!(vault.is_paused);
        vault.set_paused(&GUARDIAN, false).unwrap();
        assert!(!vault.is_paused);
    }

    #[test]
    fn test_authority_operations_reject_other_callers() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut profile = AgentProfile::default();
        let (vault_key, agent) = (Pubkey::new_unique(), Pubkey::new_unique());
        let before = vault.clone();

        for caller in [GUARDIAN, ORACLE, Pubkey::new_unique()] {
            assert_eq!(
                vault
                    .register_agent(&caller, &mut profile, vault_key, agent, 1)
                    .unwrap_err(),
                Error::from(VaultError::Unauthorized)
            );
            assert_eq!(
                vault.advance_epoch(&caller).unwrap_err(),
                Error::from(VaultError::Unauthorized)
            );
            assert_eq!(
                vault
                    .set_roles(&caller, Some(caller), Some(caller))
                    .unwrap_err(),
                Error::from(VaultError::Unauthorized)
            );
        }
        assert_eq!(vault, before);
        assert_eq!(profile, AgentProfile::default());

        vault
            .register_agent(&AUTHORITY, &mut profile, vault_key, agent, 1)
            .unwrap();
        assert_eq!(
            vault.deactivate_agent(&ORACLE, &mut profile).unwrap_err(),
            Error::from(VaultError::Unauthorized)
        );
        assert!(profile.is_active);
        vault.deactivate_agent(&AUTHORITY, &mut profile).unwrap();
        assert!(!profile.is_active);
    }

    #[test]
    fn test_trade_reports_come_from_oracle_only() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut profile = AgentProfile::default();
        let agent = Pubkey::new_unique();
        vault
            .register_agent(&AUTHORITY, &mut profile, Pubkey::new_unique(), agent, 1)
            .unwrap();

        for caller in [AUTHORITY, GUARDIAN, agent] {
            assert_eq!(
                vault.report_trade(&caller, &mut profile, 50, true, NOW).unwrap_err(),
                Error::from(VaultError::Unauthorized)
            );
        }
        assert_eq!(profile.trade_count, 0);

        vault.report_trade(&ORACLE, &mut profile, 50, true, NOW).unwrap();
        assert_eq!(profile.trade_count, 1);

        // a rotated-out oracle loses the right immediately
        let oracle = Pubkey::new_unique();
        vault.set_roles(&AUTHORITY, None, Some(oracle)).unwrap();
        assert_eq!(
            vault.report_trade(&ORACLE, &mut profile, 50, true, NOW).unwrap_err(),
            Error::from(VaultError::Unauthorized)
        );
        vault.report_trade(&oracle, &mut profile, 50, true, NOW).unwrap();
        assert_eq!(profile.trade_count, 2);
    }

    #[test]
    fn test_treasury_is_not_a_payout_account() {
        let vault = new_vault(WithdrawalPolicy::default());
        assert!(!vault.is_payout_account(&TREASURY));
        assert!(vault.is_payout_account(&Pubkey::new_unique()));
    }

    #[test]
    fn test_withdraw_checks_destination_against_whitelist() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut position = new_position(&Pubkey::new_unique());
        vault.deposit(&mut position, 100_000, NOW).unwrap();
        let owner = position.owner;
        let cold_wallet = Pubkey::new_unique();
        position.set_whitelist(&owner, &[cold_wallet]).unwrap();
        let (vault_before, position_before) = (vault.clone(), position.clone());

        assert_eq!(
            vault
                .withdraw(&mut position, 10_000, &Pubkey::new_unique(), NOW)
                .unwrap_err(),
            Error::from(VaultError::DestinationNotWhitelisted)
        );
        assert_eq!(vault, vault_before);
        assert_eq!(position, position_before);

        assert_eq!(
            vault.withdraw(&mut position, 10_000, &cold_wallet, NOW).unwrap(),
            10_000
        );
    }

    #[test]
    fn test_advance_epoch_snapshots_profit() {
        let mut vault = new_vault(WithdrawalPolicy::default());
        let mut position = new_position(&Pubkey::new_unique());
        vault.deposit(&mut position, 10_000, NOW).unwrap();
        vault.distribute_profits(&ORACLE, None, 1_234, 0).unwrap();

        let rollover = vault.advance_epoch(&AUTHORITY).unwrap();
        assert_eq!(
            rollover,
            EpochRollover { previous_epoch: 0, new_epoch: 1, epoch_profit: 1_234 }
        );
        assert_eq!(vault.epoch, 1);
        assert_eq!(vault.epoch_profit, 0);
        assert_eq!(vault.total_profits_distributed, 1_234);

        vault.epoch = u64::MAX;
        assert_eq!(
            vault.advance_epoch(&AUTHORITY).unwrap_err(),
            Error::from(VaultError::MathOverflow)
        );
    }

    proptest! {
        #[test]
        fn prop_deposit_never_lowers_nav(
            seed in MIN_DEPOSIT..1_000_000_000u64,
            profit in 1..1_000_000_000u64,
            amount in MIN_DEPOSIT..1_000_000_000u64,
        ) {
            let mut vault = new_vault(WithdrawalPolicy::default());
            let mut first = new_position(&Pubkey::new_unique());
            vault.deposit(&mut first, seed, NOW).unwrap();
            vault.distribute_profits(&ORACLE, None, profit, 0).unwrap();

            let before = (vault.pool_balance, vault.total_shares);
            let mut second = new_position(&Pubkey::new_unique());
            if vault.deposit(&mut second, amount, NOW).is_ok() {
                let after = (vault.pool_balance, vault.total_shares);
                prop_assert!(nav_le(before, after));
            }
        }

        #[test]
        fn prop_round_trip_never_profits(
            seed in MIN_DEPOSIT..1_000_000_000u64,
            profit in 0..1_000_000_000u64,
            amount in MIN_DEPOSIT..1_000_000_000u64,
        ) {
            let mut vault = new_vault(WithdrawalPolicy::default());
            let mut first = new_position(&Pubkey::new_unique());
            vault.deposit(&mut first, seed, NOW).unwrap();
            if profit > 0 {
                vault.distribute_profits(&ORACLE, None, profit, 0).unwrap();
            }

            let mut position = new_position(&Pubkey::new_unique());
            let owner = position.owner;
            if let Ok(minted) = vault.deposit(&mut position, amount, NOW) {
                if let Ok(returned) = vault.withdraw(&mut position, minted, &owner, NOW) {
                    prop_assert!(returned <= amount);
                }
            }
        }
    }
}
