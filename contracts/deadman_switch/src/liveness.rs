//! Owner authorization and liveness entry points layered over
//! [`EncryptedState`].

use common::{ttl, Ciphertext};
use soroban_sdk::{log, Address, Env};

use crate::encrypted_state::EncryptedState;
use crate::{events, storage, DeadmanError};

/// Authenticates `caller` and checks it is the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<Address, DeadmanError> {
    caller.require_auth();
    let owner = storage::owner(env)?;
    if *caller != owner {
        return Err(DeadmanError::Unauthorized);
    }
    Ok(owner)
}

/// One-shot bootstrap. Ownership is checked first, so a stranger always
/// gets `Unauthorized` whether or not the switch is initialized.
pub fn initialize(env: &Env, caller: &Address, period_secs: u32) -> Result<(), DeadmanError> {
    let owner = require_owner(env, caller)?;
    if storage::is_initialized(env) {
        return Err(DeadmanError::AlreadyInitialized);
    }

    EncryptedState::new(env)?.initialize(period_secs);
    storage::mark_initialized(env);
    ttl::extend_instance(env);

    events::publish_initialized(env, owner);
    log!(env, "switch initialized");
    Ok(())
}

pub fn heartbeat(env: &Env, caller: &Address) -> Result<(), DeadmanError> {
    let owner = require_owner(env, caller)?;
    storage::require_initialized(env)?;

    EncryptedState::new(env)?.touch();
    ttl::extend_instance(env);

    events::publish_heartbeat(env, owner);
    log!(env, "heartbeat at {}", env.ledger().timestamp());
    Ok(())
}

pub fn evaluate_inactivity(env: &Env) -> Result<Ciphertext, DeadmanError> {
    storage::require_initialized(env)?;
    EncryptedState::new(env)?.evaluate_inactivity()
}

pub fn attest(env: &Env) -> Result<Ciphertext, DeadmanError> {
    storage::require_initialized(env)?;
    EncryptedState::new(env)?.attest()
}

/// Produces an attestation and publishes it for off-chain decryption.
pub fn verify_inactivity(env: &Env) -> Result<Ciphertext, DeadmanError> {
    let attestation = attest(env)?;
    events::publish_inactivity_verified(env, attestation.clone());
    Ok(attestation)
}
