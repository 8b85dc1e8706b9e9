use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::WhitelistUpdated,
    state::{UserPosition, Vault},
};

#[derive(Accounts)]
pub struct SetWhitelist<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        seeds = [POSITION_SEED, vault.key().as_ref(), owner.key().as_ref()],
        bump = user_position.bump
    )]
    pub user_position: Account<'info, UserPosition>,

    pub owner: Signer<'info>,
}

pub fn set_whitelist(ctx: Context<SetWhitelist>, destinations: Vec<Pubkey>) -> Result<()> {
    let position = &mut ctx.accounts.user_position;
    position.set_whitelist(&ctx.accounts.owner.key(), &destinations)?;

    emit!(WhitelistUpdated {
        vault: ctx.accounts.vault.key(),
        user: ctx.accounts.owner.key(),
        count: position.whitelist_count,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
