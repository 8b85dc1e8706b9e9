use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::EpochAdvanced,
    state::Vault,
};

#[derive(Accounts)]
pub struct AdvanceEpoch<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    pub authority: Signer<'info>,
}

pub fn advance_epoch(ctx: Context<AdvanceEpoch>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    let rollover = vault.advance_epoch(&ctx.accounts.authority.key())?;

    msg!(
        "epoch {} closed with profit {}",
        rollover.previous_epoch,
        rollover.epoch_profit
    );

    emit!(EpochAdvanced {
        vault: vault.key(),
        previous_epoch: rollover.previous_epoch,
        new_epoch: rollover.new_epoch,
        epoch_profit: rollover.epoch_profit,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
