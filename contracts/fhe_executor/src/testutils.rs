//! Test-only inspection of executor state.
//!
//! Not compiled into the contract unless the `testutils` feature is on.

use common::Ciphertext;
use soroban_sdk::{Address, Env};

use crate::{slot_key, Slot};

/// Plaintext behind `ct` as held by the executor at `executor`.
pub fn plaintext_of(env: &Env, executor: &Address, ct: &Ciphertext) -> Option<u64> {
    env.as_contract(executor, || {
        env.storage()
            .persistent()
            .get::<_, Slot>(&slot_key(&ct.handle))
            .filter(|slot| slot.kind == ct.kind)
            .map(|slot| slot.value)
    })
}
