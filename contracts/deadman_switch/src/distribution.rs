//! Proportional payout of the pool to active beneficiaries.
//!
//! All payouts of one call are computed against the balance read before
//! the first transfer, so each beneficiary receives
//! `floor(balance * share / 100)` regardless of ordering. The rounding
//! remainder stays in the pool.
//!
//! The `proof` argument is the caller's claim about the decrypted
//! attestation. It is not bound to any particular attestation ciphertext;
//! liveness enforcement therefore rests on whoever decrypts the attestation
//! off-chain and submits the proof. For the same reason the encrypted
//! state is never read here and an uninitialized switch can still pay out.

use soroban_sdk::{log, Env};

use crate::encrypted_state::ATTEST_INACTIVE;
use crate::ledger::{ShareLedger, MAX_TOTAL_SHARES};
use crate::{events, pool, DeadmanError};

/// `floor(balance * share / 100)` without forming `balance * share`.
pub fn payout_for(balance: i128, share: u32) -> i128 {
    let share = share as i128;
    let scale = MAX_TOTAL_SHARES as i128;
    (balance / scale) * share + (balance % scale) * share / scale
}

/// Pays every active beneficiary its share and returns the total paid.
///
/// Any failed transfer aborts the call with `TransferFailed`; the host
/// rolls back the transfers already made within it.
pub fn distribute(env: &Env, proof: u32) -> Result<i128, DeadmanError> {
    let ledger = ShareLedger::new(env);
    if ledger.is_empty() {
        return Err(DeadmanError::NoBeneficiaries);
    }
    if proof != ATTEST_INACTIVE {
        return Err(DeadmanError::InactivityNotProven);
    }

    let token = pool::token_client(env)?;
    let balance = token.balance(&env.current_contract_address());
    if balance <= 0 {
        return Err(DeadmanError::NoFunds);
    }

    let mut paid: i128 = 0;
    for record in ledger.active() {
        let amount = payout_for(balance, record.share);
        if amount == 0 {
            continue;
        }
        pool::pay_out(env, &token, &record.identity, amount)?;
        events::publish_funds_distributed(env, record.identity, amount);
        paid += amount;
    }

    log!(env, "distributed {} of {}", paid, balance);
    Ok(paid)
}
