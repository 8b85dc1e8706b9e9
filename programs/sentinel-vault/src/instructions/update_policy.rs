use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::PolicyUpdated,
    state::{Vault, WithdrawalPolicy},
};

#[derive(Accounts)]
pub struct UpdatePolicy<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    pub guardian: Signer<'info>,
}

pub fn update_policy(
    ctx: Context<UpdatePolicy>,
    new_daily_cap: u64,
    new_cooldown_seconds: i64,
) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.set_policy(
        &ctx.accounts.guardian.key(),
        WithdrawalPolicy {
            daily_cap: new_daily_cap,
            cooldown_seconds: new_cooldown_seconds,
        },
    )?;

    msg!(
        "withdrawal policy: daily cap {}, cooldown {}s",
        new_daily_cap,
        new_cooldown_seconds
    );

    emit!(PolicyUpdated {
        vault: vault.key(),
        guardian: ctx.accounts.guardian.key(),
        daily_withdraw_cap: new_daily_cap,
        cooldown_seconds: new_cooldown_seconds,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
