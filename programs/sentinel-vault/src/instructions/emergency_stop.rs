use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::EmergencyAction,
    state::Vault,
};

#[derive(Accounts)]
pub struct EmergencyStop<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    pub guardian: Signer<'info>,
}

/// Pausing blocks deposit, withdraw, distribute_profits and
/// claim_agent_reward. Trade reports and score queries keep working.
pub fn emergency_stop(ctx: Context<EmergencyStop>, pause: bool) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.set_paused(&ctx.accounts.guardian.key(), pause)?;

    if pause {
        msg!("vault paused by guardian");
    } else {
        msg!("vault resumed by guardian");
    }

    emit!(EmergencyAction {
        vault: vault.key(),
        guardian: ctx.accounts.guardian.key(),
        paused: pause,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
