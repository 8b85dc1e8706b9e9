use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::RolesUpdated,
    state::Vault,
};

#[derive(Accounts)]
pub struct UpdateRoles<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    pub authority: Signer<'info>,
}

pub fn update_roles(
    ctx: Context<UpdateRoles>,
    new_guardian: Option<Pubkey>,
    new_oracle: Option<Pubkey>,
) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    let roles = vault.set_roles(&ctx.accounts.authority.key(), new_guardian, new_oracle)?;

    msg!("roles: guardian {}, oracle {}", roles.guardian, roles.oracle);

    emit!(RolesUpdated {
        vault: vault.key(),
        authority: roles.authority,
        guardian: roles.guardian,
        oracle: roles.oracle,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
