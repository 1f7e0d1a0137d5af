//! Notifications published by the dead man's switch.
//!
//! Every event is published under `("DMS", <name>)` with a typed payload
//! that carries the ledger timestamp at emission.

#![allow(deprecated)]

use common::Ciphertext;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

fn emit<T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, name: &str, data: T) {
    env.events()
        .publish((symbol_short!("DMS"), Symbol::new(env, name)), data);
}

// ── Event payloads ───────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeployedEvent {
    pub owner: Address,
    pub token: Address,
    pub executor: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeartbeatEvent {
    pub owner: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BeneficiaryAddedEvent {
    pub identity: Address,
    pub share: u32,
    pub total_shares: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BeneficiaryUpdatedEvent {
    pub identity: Address,
    pub old_share: u32,
    pub new_share: u32,
    pub total_shares: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BeneficiaryRemovedEvent {
    pub identity: Address,
    pub share: u32,
    pub total_shares: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsDepositedEvent {
    pub from: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// One per paid beneficiary.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsDistributedEvent {
    pub beneficiary: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Carries the encrypted attestation for off-chain decryption.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InactivityVerifiedEvent {
    pub attestation: Ciphertext,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub owner: Address,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ───────────────────────────────────────────────────────────────

pub fn publish_deployed(env: &Env, owner: Address, token: Address, executor: Address) {
    emit(
        env,
        "deployed",
        DeployedEvent {
            owner,
            token,
            executor,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_initialized(env: &Env, owner: Address) {
    emit(
        env,
        "initialized",
        InitializedEvent {
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_heartbeat(env: &Env, owner: Address) {
    emit(
        env,
        "heartbeat",
        HeartbeatEvent {
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_beneficiary_added(env: &Env, identity: Address, share: u32, total_shares: u32) {
    emit(
        env,
        "benef_added",
        BeneficiaryAddedEvent {
            identity,
            share,
            total_shares,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_beneficiary_updated(
    env: &Env,
    identity: Address,
    old_share: u32,
    new_share: u32,
    total_shares: u32,
) {
    emit(
        env,
        "benef_updated",
        BeneficiaryUpdatedEvent {
            identity,
            old_share,
            new_share,
            total_shares,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_beneficiary_removed(env: &Env, identity: Address, share: u32, total_shares: u32) {
    emit(
        env,
        "benef_removed",
        BeneficiaryRemovedEvent {
            identity,
            share,
            total_shares,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_funds_deposited(env: &Env, from: Address, amount: i128) {
    emit(
        env,
        "deposited",
        FundsDepositedEvent {
            from,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_funds_distributed(env: &Env, beneficiary: Address, amount: i128) {
    emit(
        env,
        "distributed",
        FundsDistributedEvent {
            beneficiary,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_inactivity_verified(env: &Env, attestation: Ciphertext) {
    emit(
        env,
        "inactivity",
        InactivityVerifiedEvent {
            attestation,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdrawn(env: &Env, owner: Address, amount: i128) {
    emit(
        env,
        "emergency",
        EmergencyWithdrawnEvent {
            owner,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
