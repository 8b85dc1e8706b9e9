/// PDA seeds
pub const VAULT_SEED: &[u8] = b"vault";
pub const POSITION_SEED: &[u8] = b"position";
pub const AGENT_SEED: &[u8] = b"agent";

/// Time constants
pub const SECONDS_PER_DAY: i64 = solana_program::clock::SECONDS_PER_DAY as i64;

/// Ledger constants
pub const MIN_DEPOSIT: u64 = 10_000;

/// Distribution constants
pub const BPS_DENOMINATOR: u64 = 10_000;
/// Agent carve-out ceiling: 30% of each profit injection
pub const MAX_AGENT_FEE_BPS: u16 = 3_000;

/// Guardian policy constants
pub const MAX_WHITELIST: usize = 4;

/// Largest accepted |pnl_bps| for a single trade report.
/// With `trade_count: u32` this keeps Σr² below 2^92 and Σ|r| below 2^62,
/// so the u128/i128/i64 accumulators cannot wrap.
pub const MAX_ABS_PNL_BPS: i64 = 1_000_000_000;

/// Score numerator reported for an agent with zero variance and positive mean
pub const MAX_SCORE: u128 = u128::MAX;
