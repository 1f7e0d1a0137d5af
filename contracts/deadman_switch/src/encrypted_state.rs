//! Encrypted liveness state: the inactivity period and the owner's
//! last-active timestamp, both held as executor ciphertext handles.
//!
//! The owner is considered inactive when
//!
//! ```text
//! last_active < now - period
//! ```
//!
//! which is evaluated as `last_active + period < now` so the encrypted
//! arithmetic never has to subtract a period larger than the current ledger
//! time. Nothing here ever sees a plaintext timestamp except `now`, which
//! is public ledger data.

use common::{CipherKind, Ciphertext, FheExecutorClient};
use soroban_sdk::{symbol_short, Env, Symbol};

use crate::{storage, DeadmanError};

const PERIOD: Symbol = symbol_short!("PERIOD");
const LAST_ACT: Symbol = symbol_short!("LAST_ACT");

/// Plaintext behind an attestation when the owner is inactive.
pub const ATTEST_INACTIVE: u32 = 1;
/// Plaintext behind an attestation when the owner is alive.
pub const ATTEST_ALIVE: u32 = 0;

pub struct EncryptedState<'a> {
    env: &'a Env,
    fhe: FheExecutorClient<'a>,
}

impl<'a> EncryptedState<'a> {
    pub fn new(env: &'a Env) -> Result<Self, DeadmanError> {
        let executor = storage::executor(env)?;
        Ok(Self {
            env,
            fhe: FheExecutorClient::new(env, &executor),
        })
    }

    /// Stores the encrypted period and seeds the last-active timestamp.
    ///
    /// Callers must have checked that the contract is not yet initialized.
    pub fn initialize(&self, period_secs: u32) {
        let period = self
            .fhe
            .trivial_encrypt(&(period_secs as u64), &CipherKind::U32);
        let period = self.fhe.cast(&period, &CipherKind::U64);
        self.env.storage().instance().set(&PERIOD, &period);
        self.touch();
    }

    /// Overwrites the last-active timestamp with the current ledger time.
    pub fn touch(&self) {
        let now = self.encrypted_now();
        self.env.storage().instance().set(&LAST_ACT, &now);
    }

    pub fn period(&self) -> Result<Ciphertext, DeadmanError> {
        self.env
            .storage()
            .instance()
            .get(&PERIOD)
            .ok_or(DeadmanError::NotInitialized)
    }

    pub fn last_active(&self) -> Result<Ciphertext, DeadmanError> {
        self.env
            .storage()
            .instance()
            .get(&LAST_ACT)
            .ok_or(DeadmanError::NotInitialized)
    }

    /// Encrypted "owner inactive" predicate. Leaves stored state untouched.
    pub fn evaluate_inactivity(&self) -> Result<Ciphertext, DeadmanError> {
        let deadline = self.fhe.add(&self.last_active()?, &self.period()?);
        let now = self.encrypted_now();
        Ok(self.fhe.lt(&deadline, &now))
    }

    /// Maps the predicate onto the two-valued `U8` attestation
    /// ([`ATTEST_INACTIVE`] / [`ATTEST_ALIVE`]).
    pub fn attest(&self) -> Result<Ciphertext, DeadmanError> {
        let inactive = self.evaluate_inactivity()?;
        let yes = self
            .fhe
            .trivial_encrypt(&(ATTEST_INACTIVE as u64), &CipherKind::U8);
        let no = self
            .fhe
            .trivial_encrypt(&(ATTEST_ALIVE as u64), &CipherKind::U8);
        Ok(self.fhe.select(&inactive, &yes, &no))
    }

    fn encrypted_now(&self) -> Ciphertext {
        self.fhe
            .trivial_encrypt(&self.env.ledger().timestamp(), &CipherKind::U64)
    }
}
