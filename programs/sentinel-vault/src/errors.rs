use anchor_lang::prelude::*;

#[error_code]
pub enum VaultError {
    #[msg("Vault is paused, emergency stop active")]
    VaultPaused,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Deposit below minimum threshold")]
    BelowMinDeposit,

    #[msg("Calculated shares would be zero")]
    ZeroShares,

    #[msg("Insufficient shares for withdrawal")]
    InsufficientShares,

    #[msg("No shareholders in the vault")]
    NoShareholders,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Unauthorized authority for this operation")]
    Unauthorized,

    #[msg("Withdrawal cooldown period still active")]
    CooldownActive,

    #[msg("Daily withdrawal cap exceeded")]
    DailyCapExceeded,

    #[msg("Withdrawal destination not in whitelist")]
    DestinationNotWhitelisted,

    #[msg("Too many whitelist entries (max 4)")]
    TooManyWhitelistEntries,

    #[msg("Agent is inactive")]
    AgentInactive,

    #[msg("No trade data available for scoring")]
    NoTradeData,

    #[msg("Agent fee exceeds maximum (30%)")]
    FeeTooHigh,

    #[msg("Insufficient funds in vault")]
    InsufficientFunds,

    #[msg("Cooldown must not be negative")]
    InvalidCooldown,

    #[msg("Trade pnl outside the accepted bps range")]
    PnlOutOfRange,

    /// Raised by `AgentProfile::register` on a reused record. On chain the
    /// `init` constraint of `register_agent` rejects an existing profile first.
    #[msg("Agent already registered")]
    AgentAlreadyRegistered,

    #[msg("Agent profile belongs to a different vault")]
    InvalidAgent,
}
