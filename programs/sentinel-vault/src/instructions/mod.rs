pub mod initialize;
pub mod deposit;
pub mod withdraw;
pub mod set_whitelist;
pub mod register_agent;
pub mod deactivate_agent;
pub mod report_trade;
pub mod query_agent_score;
pub mod distribute_profits;
pub mod claim_agent_reward;
pub mod update_policy;
pub mod update_roles;
pub mod emergency_stop;
pub mod advance_epoch;

pub use initialize::*;
pub use deposit::*;
pub use withdraw::*;
pub use set_whitelist::*;
pub use register_agent::*;
pub use deactivate_agent::*;
pub use report_trade::*;
pub use query_agent_score::*;
pub use distribute_profits::*;
pub use claim_agent_reward::*;
pub use update_policy::*;
pub use update_roles::*;
pub use emergency_stop::*;
pub use advance_epoch::*;

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::VAULT_SEED, errors::VaultError, state::Vault};

/// Moves `amount` out of the treasury, signed by the vault PDA.
pub(crate) fn transfer_from_treasury<'info>(
    token_program: &Program<'info, Token>,
    treasury: &Account<'info, TokenAccount>,
    to: AccountInfo<'info>,
    vault: &Account<'info, Vault>,
    amount: u64,
) -> Result<()> {
    require!(treasury.amount >= amount, VaultError::InsufficientFunds);

    let bump = [vault.bump];
    let signer_seeds: &[&[u8]] = &[VAULT_SEED, vault.authority.as_ref(), &bump];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: treasury.to_account_info(),
                to,
                authority: vault.to_account_info(),
            },
            &[signer_seeds],
        ),
        amount,
    )
}
