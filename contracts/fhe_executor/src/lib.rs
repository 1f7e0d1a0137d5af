//! # Reference Encrypted-Arithmetic Executor
//!
//! Implements the [`common::FheExecutor`] operation set over opaque 32-byte
//! handles so the dead man's switch can be deployed and tested without a
//! homomorphic coprocessor.
//!
//! Handles are derived from a monotonic nonce and never encode the value
//! they refer to. The values themselves are kept in this contract's
//! persistent storage and there is no entry point that returns them. This
//! is a plaintext-backed stand-in: it preserves the *interface* contract of
//! an FHE engine (opaque handles, no decryption path for callers) but is
//! not a cryptosystem.
//!
//! ## Semantics
//! | Operation | Result kind | Plaintext rule |
//! |-----------|-------------|----------------|
//! | `trivial_encrypt` | `kind` | `value & kind.mask()` |
//! | `cast` | `kind` | truncation / zero extension |
//! | `add`, `sub` | operand kind | wrapping within the kind's width |
//! | `lt` | `Bool` | unsigned comparison |
//! | `select` | branch kind | `cond != 0 ? if_true : if_false` |
#![no_std]


#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

use common::{ttl, CipherKind, Ciphertext, FheError};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Bytes, BytesN, Env, Symbol};

const NONCE: Symbol = symbol_short!("NONCE");
const CT: Symbol = symbol_short!("CT");

/// Stored plaintext behind a handle.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Slot {
    pub kind: CipherKind,
    pub value: u64,
}

pub(crate) fn slot_key(handle: &BytesN<32>) -> (Symbol, BytesN<32>) {
    (CT, handle.clone())
}

#[contract]
pub struct FheExecutorContract;

#[contractimpl]
impl FheExecutorContract {
    pub fn trivial_encrypt(env: Env, value: u64, kind: CipherKind) -> Result<Ciphertext, FheError> {
        Ok(Self::store(&env, kind, value))
    }

    pub fn cast(env: Env, value: Ciphertext, kind: CipherKind) -> Result<Ciphertext, FheError> {
        let slot = Self::load(&env, &value)?;
        if !slot.kind.is_integer() || !kind.is_integer() {
            return Err(FheError::KindMismatch);
        }
        Ok(Self::store(&env, kind, slot.value))
    }

    pub fn add(env: Env, lhs: Ciphertext, rhs: Ciphertext) -> Result<Ciphertext, FheError> {
        let (kind, a, b) = Self::load_integer_pair(&env, &lhs, &rhs)?;
        Ok(Self::store(&env, kind, a.wrapping_add(b)))
    }

    pub fn sub(env: Env, lhs: Ciphertext, rhs: Ciphertext) -> Result<Ciphertext, FheError> {
        let (kind, a, b) = Self::load_integer_pair(&env, &lhs, &rhs)?;
        Ok(Self::store(&env, kind, a.wrapping_sub(b)))
    }

    pub fn lt(env: Env, lhs: Ciphertext, rhs: Ciphertext) -> Result<Ciphertext, FheError> {
        let (_, a, b) = Self::load_integer_pair(&env, &lhs, &rhs)?;
        Ok(Self::store(&env, CipherKind::Bool, (a < b) as u64))
    }

    pub fn select(
        env: Env,
        cond: Ciphertext,
        if_true: Ciphertext,
        if_false: Ciphertext,
    ) -> Result<Ciphertext, FheError> {
        if !cond.is_bool() {
            return Err(FheError::KindMismatch);
        }
        let c = Self::load(&env, &cond)?;
        let t = Self::load(&env, &if_true)?;
        let f = Self::load(&env, &if_false)?;
        if t.kind != f.kind {
            return Err(FheError::KindMismatch);
        }
        let chosen = if c.value != 0 { t } else { f };
        Ok(Self::store(&env, chosen.kind, chosen.value))
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn next_handle(env: &Env) -> BytesN<32> {
        let nonce: u64 = env.storage().instance().get(&NONCE).unwrap_or(0);
        let next = nonce.saturating_add(1);
        env.storage().instance().set(&NONCE, &next);
        ttl::extend_instance(env);

        let mut seed = Bytes::from_array(env, &next.to_be_bytes());
        seed.append(&Bytes::from_array(env, &env.ledger().sequence().to_be_bytes()));
        env.crypto().sha256(&seed).into()
    }

    fn store(env: &Env, kind: CipherKind, value: u64) -> Ciphertext {
        let handle = Self::next_handle(env);
        let key = slot_key(&handle);
        env.storage().persistent().set(
            &key,
            &Slot {
                kind,
                value: value & kind.mask(),
            },
        );
        ttl::extend_persistent(env, &key);
        Ciphertext { handle, kind }
    }

    fn load(env: &Env, ct: &Ciphertext) -> Result<Slot, FheError> {
        let slot: Slot = env
            .storage()
            .persistent()
            .get(&slot_key(&ct.handle))
            .ok_or(FheError::UnknownHandle)?;
        if slot.kind != ct.kind {
            return Err(FheError::KindMismatch);
        }
        Ok(slot)
    }

    fn load_integer_pair(
        env: &Env,
        lhs: &Ciphertext,
        rhs: &Ciphertext,
    ) -> Result<(CipherKind, u64, u64), FheError> {
        let a = Self::load(env, lhs)?;
        let b = Self::load(env, rhs)?;
        if a.kind != b.kind || !a.kind.is_integer() {
            return Err(FheError::KindMismatch);
        }
        Ok((a.kind, a.value, b.value))
    }
}
