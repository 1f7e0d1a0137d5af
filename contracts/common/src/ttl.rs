//! Storage time-to-live helpers shared by the workspace contracts.

use soroban_sdk::{Env, IntoVal, Val};

/// Remaining-TTL threshold (in ledgers) below which an entry is bumped.
pub const TTL_THRESHOLD: u32 = 5_184_000;
/// TTL (in ledgers) an entry is extended to once bumped.
pub const TTL_EXTEND_TO: u32 = 10_368_000;

/// Extends the time-to-live of the current contract's instance storage.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live of a persistent entry.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
