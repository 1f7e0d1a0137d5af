//! # Encrypted Dead Man's Switch
//!
//! Holds a pool of a single token on behalf of one owner. The owner
//! registers beneficiaries with percentage shares and proves liveness with
//! periodic heartbeats. Once the owner has been silent for longer than the
//! configured inactivity period, the pool can be released to beneficiaries
//! in proportion to their shares.
//!
//! The inactivity period and the last heartbeat time are never stored in
//! plaintext. They are ciphertext handles of an external encrypted-arithmetic
//! executor ([`common::FheExecutorClient`]), and the inactivity check yields
//! an encrypted attestation rather than a boolean.
//!
//! ## Lifecycle
//! ```text
//! deploy ──► Uninitialized ──initialize──► Active ◄──┐ heartbeat / verify / distribute
//!                                             └──────┘
//! ```
//! There is no settled state: `distribute` may run again whenever the pool
//! is refilled and a proof is presented.
#![no_std]

pub mod distribution;
pub mod encrypted_state;
pub mod events;
pub mod ledger;
pub mod liveness;
pub mod pool;
pub mod storage;


use common::{ttl, Ciphertext};
use ledger::{BeneficiaryRecord, ShareLedger};
use soroban_sdk::{contract, contracterror, contractimpl, log, Address, Env, Vec};

pub use encrypted_state::{ATTEST_ALIVE, ATTEST_INACTIVE};

/// Error codes returned by the switch.
///
/// | Range   | Purpose                    |
/// |---------|----------------------------|
/// | 1 – 9   | Lifecycle & authorization  |
/// | 10 – 19 | Share ledger               |
/// | 20 – 29 | Pool & distribution        |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum DeadmanError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidIdentity = 10,
    InvalidShare = 11,
    DuplicateBeneficiary = 12,
    ShareCapExceeded = 13,
    NotFound = 14,
    NoBeneficiaries = 20,
    InactivityNotProven = 21,
    NoFunds = 22,
    TransferFailed = 23,
    InvalidAmount = 24,
}

#[contract]
pub struct DeadmanSwitchContract;

#[contractimpl]
impl DeadmanSwitchContract {
    // ── Deployment & liveness ────────────────────────────────────────────────

    /// Fixes the owner, the pool token and the encrypted-arithmetic executor.
    pub fn __constructor(env: Env, owner: Address, token: Address, executor: Address) {
        storage::set_config(&env, &owner, &token, &executor);
        events::publish_deployed(&env, owner, token, executor);
    }

    /// Stores the encrypted inactivity period and seeds the last-active time.
    pub fn initialize(env: Env, caller: Address, inactivity_period_secs: u32) -> Result<(), DeadmanError> {
        liveness::initialize(&env, &caller, inactivity_period_secs)
    }

    pub fn heartbeat(env: Env, caller: Address) -> Result<(), DeadmanError> {
        liveness::heartbeat(&env, &caller)
    }

    /// Encrypted boolean: owner silent for longer than the period.
    pub fn evaluate_inactivity(env: Env) -> Result<Ciphertext, DeadmanError> {
        liveness::evaluate_inactivity(&env)
    }

    /// Encrypted `U8` attestation (1 = inactive, 0 = alive), also emitted as
    /// an event for off-chain decryption.
    pub fn verify_inactivity(env: Env) -> Result<Ciphertext, DeadmanError> {
        liveness::verify_inactivity(&env)
    }

    /// Same attestation as `verify_inactivity`, without the event.
    pub fn attest(env: Env) -> Result<Ciphertext, DeadmanError> {
        liveness::attest(&env)
    }

    // ── Distribution & pool ──────────────────────────────────────────────────

    /// Pays out the pool proportionally. `proof` must be the decrypted
    /// attestation value [`ATTEST_INACTIVE`]. Returns the amount paid.
    pub fn distribute(env: Env, proof: u32) -> Result<i128, DeadmanError> {
        distribution::distribute(&env, proof)
    }

    pub fn deposit(env: Env, from: Address, amount: i128) -> Result<(), DeadmanError> {
        pool::deposit(&env, &from, amount)
    }

    /// Owner-only sweep of the entire pool back to the owner.
    pub fn emergency_withdraw(env: Env, caller: Address) -> Result<i128, DeadmanError> {
        let owner = liveness::require_owner(&env, &caller)?;
        pool::sweep(&env, &owner)
    }

    // ── Beneficiaries ────────────────────────────────────────────────────────

    pub fn add_beneficiary(
        env: Env,
        caller: Address,
        identity: Address,
        share_percent: u32,
    ) -> Result<(), DeadmanError> {
        liveness::require_owner(&env, &caller)?;
        let ledger = ShareLedger::new(&env);
        let slot = ledger.add(&identity, share_percent)?;
        ttl::extend_instance(&env);

        events::publish_beneficiary_added(&env, identity, share_percent, ledger.total_shares());
        log!(&env, "beneficiary added at slot {}", slot);
        Ok(())
    }

    pub fn update_beneficiary_share(
        env: Env,
        caller: Address,
        identity: Address,
        new_share_percent: u32,
    ) -> Result<(), DeadmanError> {
        liveness::require_owner(&env, &caller)?;
        let ledger = ShareLedger::new(&env);
        let old_share = ledger.update(&identity, new_share_percent)?;
        ttl::extend_instance(&env);

        events::publish_beneficiary_updated(
            &env,
            identity,
            old_share,
            new_share_percent,
            ledger.total_shares(),
        );
        log!(&env, "beneficiary share {} -> {}", old_share, new_share_percent);
        Ok(())
    }

    pub fn remove_beneficiary(env: Env, caller: Address, identity: Address) -> Result<(), DeadmanError> {
        liveness::require_owner(&env, &caller)?;
        let ledger = ShareLedger::new(&env);
        let removed = ledger.remove(&identity)?;
        ttl::extend_instance(&env);

        events::publish_beneficiary_removed(&env, identity, removed.share, ledger.total_shares());
        log!(&env, "beneficiary removed, {} shares freed", removed.share);
        Ok(())
    }

    // ── Views ────────────────────────────────────────────────────────────────

    pub fn get_beneficiary_count(env: Env) -> u32 {
        ShareLedger::new(&env).len()
    }

    /// Active beneficiaries and their shares, in insertion order.
    pub fn get_all_beneficiaries(env: Env) -> (Vec<Address>, Vec<u32>) {
        ShareLedger::new(&env).snapshot()
    }

    pub fn get_beneficiary(env: Env, identity: Address) -> Option<BeneficiaryRecord> {
        ShareLedger::new(&env).get(&identity)
    }

    pub fn get_total_shares(env: Env) -> u32 {
        ShareLedger::new(&env).total_shares()
    }

    pub fn get_balance(env: Env) -> Result<i128, DeadmanError> {
        pool::balance(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, DeadmanError> {
        storage::owner(&env)
    }

    pub fn get_token(env: Env) -> Result<Address, DeadmanError> {
        storage::token(&env)
    }

    pub fn get_executor(env: Env) -> Result<Address, DeadmanError> {
        storage::executor(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }
}
