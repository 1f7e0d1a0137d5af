//! The pooled balance: whatever amount of the pool token the switch holds.

use soroban_sdk::{log, token, Address, Env, MuxedAddress};

use crate::{events, storage, DeadmanError};

pub fn token_client(env: &Env) -> Result<token::Client<'_>, DeadmanError> {
    Ok(token::Client::new(env, &storage::token(env)?))
}

pub fn balance(env: &Env) -> Result<i128, DeadmanError> {
    Ok(token_client(env)?.balance(&env.current_contract_address()))
}

/// Moves `amount` out of the pool, mapping any token-side failure to
/// `TransferFailed`.
pub fn pay_out(
    env: &Env,
    token: &token::Client,
    to: &Address,
    amount: i128,
) -> Result<(), DeadmanError> {
    let recipient: MuxedAddress = to.clone().into();
    match token.try_transfer(&env.current_contract_address(), &recipient, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(DeadmanError::TransferFailed),
    }
}

pub fn deposit(env: &Env, from: &Address, amount: i128) -> Result<(), DeadmanError> {
    from.require_auth();
    if amount <= 0 {
        return Err(DeadmanError::InvalidAmount);
    }
    let recipient: MuxedAddress = env.current_contract_address().into();
    token_client(env)?.transfer(from, &recipient, &amount);

    events::publish_funds_deposited(env, from.clone(), amount);
    log!(env, "deposited {}", amount);
    Ok(())
}

/// Sends the whole pool to `owner`, bypassing the share ledger.
pub fn sweep(env: &Env, owner: &Address) -> Result<i128, DeadmanError> {
    let token = token_client(env)?;
    let amount = token.balance(&env.current_contract_address());
    if amount <= 0 {
        return Err(DeadmanError::NoFunds);
    }
    pay_out(env, &token, owner, amount)?;

    events::publish_emergency_withdrawn(env, owner.clone(), amount);
    log!(env, "emergency sweep of {}", amount);
    Ok(amount)
}
