//! Deployment configuration kept in instance storage.

use common::ttl;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::DeadmanError;

const OWNER: Symbol = symbol_short!("OWNER");
const TOKEN: Symbol = symbol_short!("TOKEN");
const EXECUTOR: Symbol = symbol_short!("EXECUTOR");
const INIT: Symbol = symbol_short!("INIT");

pub fn set_config(env: &Env, owner: &Address, token: &Address, executor: &Address) {
    let store = env.storage().instance();
    store.set(&OWNER, owner);
    store.set(&TOKEN, token);
    store.set(&EXECUTOR, executor);
    ttl::extend_instance(env);
}

pub fn owner(env: &Env) -> Result<Address, DeadmanError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(DeadmanError::NotInitialized)
}

pub fn token(env: &Env) -> Result<Address, DeadmanError> {
    env.storage()
        .instance()
        .get(&TOKEN)
        .ok_or(DeadmanError::NotInitialized)
}

pub fn executor(env: &Env) -> Result<Address, DeadmanError> {
    env.storage()
        .instance()
        .get(&EXECUTOR)
        .ok_or(DeadmanError::NotInitialized)
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INIT)
}

pub fn mark_initialized(env: &Env) {
    env.storage().instance().set(&INIT, &true);
}

pub fn require_initialized(env: &Env) -> Result<(), DeadmanError> {
    if !is_initialized(env) {
        return Err(DeadmanError::NotInitialized);
    }
    Ok(())
}
