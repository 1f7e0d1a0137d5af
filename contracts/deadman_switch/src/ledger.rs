//! # Beneficiary share ledger
//!
//! Records live in an append-only arena addressed by stable `u32` slots:
//!
//! ```text
//! slot:    0        1        2        3
//!        [A 30 ✓] [B 40 ✗] [C 20 ✓] [B 10 ✓]
//! index:  A → 0,  C → 2,  B → 3
//! ```
//!
//! Removing a beneficiary flips `active` off and drops its index entry; the
//! slot itself is never reused. Adding the same identity again appends a
//! fresh slot. `total_shares` always equals the sum of active shares and
//! never exceeds [`MAX_TOTAL_SHARES`].

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{storage, DeadmanError};

const TOTAL: Symbol = symbol_short!("TOTAL");
const SLOTS: Symbol = symbol_short!("SLOTS");
const ACTIVE: Symbol = symbol_short!("ACTIVE");
const RECORD: Symbol = symbol_short!("RECORD");
const INDEX: Symbol = symbol_short!("INDEX");

pub const MIN_SHARE: u32 = 1;
pub const MAX_SHARE: u32 = 100;
pub const MAX_TOTAL_SHARES: u32 = 100;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BeneficiaryRecord {
    pub identity: Address,
    /// Percentage of the pool, 1–100.
    pub share: u32,
    pub active: bool,
}

fn record_key(slot: u32) -> (Symbol, u32) {
    (RECORD, slot)
}

fn index_key(identity: &Address) -> (Symbol, Address) {
    (INDEX, identity.clone())
}

fn validate_share(share: u32) -> Result<(), DeadmanError> {
    if !(MIN_SHARE..=MAX_SHARE).contains(&share) {
        return Err(DeadmanError::InvalidShare);
    }
    Ok(())
}

pub struct ShareLedger<'a> {
    env: &'a Env,
}

impl<'a> ShareLedger<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    pub fn total_shares(&self) -> u32 {
        self.env.storage().instance().get(&TOTAL).unwrap_or(0)
    }

    /// Number of active beneficiaries.
    pub fn len(&self) -> u32 {
        self.env.storage().instance().get(&ACTIVE).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of arena slots ever allocated, soft-deleted ones included.
    pub fn slot_count(&self) -> u32 {
        self.env.storage().instance().get(&SLOTS).unwrap_or(0)
    }

    pub fn slot_of(&self, identity: &Address) -> Option<u32> {
        self.env.storage().persistent().get(&index_key(identity))
    }

    pub fn record(&self, slot: u32) -> Option<BeneficiaryRecord> {
        self.env.storage().persistent().get(&record_key(slot))
    }

    /// Active record for `identity`, if any.
    pub fn get(&self, identity: &Address) -> Option<BeneficiaryRecord> {
        self.slot_of(identity)
            .and_then(|slot| self.record(slot))
            .filter(|record| record.active)
    }

    /// Active records in insertion order, read lazily from the arena.
    pub fn active(&self) -> impl Iterator<Item = BeneficiaryRecord> + 'a {
        let env = self.env;
        (0..self.slot_count())
            .filter_map(move |slot| {
                env.storage()
                    .persistent()
                    .get::<_, BeneficiaryRecord>(&record_key(slot))
            })
            .filter(|record| record.active)
    }

    /// Active `(identities, shares)` in insertion order.
    pub fn snapshot(&self) -> (Vec<Address>, Vec<u32>) {
        let mut identities = Vec::new(self.env);
        let mut shares = Vec::new(self.env);
        for record in self.active() {
            identities.push_back(record.identity);
            shares.push_back(record.share);
        }
        (identities, shares)
    }

    // ── Mutations ────────────────────────────────────────────────────────────
    //
    // Every mutation validates completely before its first write.

    /// Appends a new beneficiary and returns its slot.
    pub fn add(&self, identity: &Address, share: u32) -> Result<u32, DeadmanError> {
        if self.is_reserved(identity) {
            return Err(DeadmanError::InvalidIdentity);
        }
        validate_share(share)?;
        if self.slot_of(identity).is_some() {
            return Err(DeadmanError::DuplicateBeneficiary);
        }
        let total = self
            .total_shares()
            .checked_add(share)
            .filter(|total| *total <= MAX_TOTAL_SHARES)
            .ok_or(DeadmanError::ShareCapExceeded)?;

        let slot = self.slot_count();
        self.write_record(
            slot,
            &BeneficiaryRecord {
                identity: identity.clone(),
                share,
                active: true,
            },
        );
        let key = index_key(identity);
        self.env.storage().persistent().set(&key, &slot);
        ttl::extend_persistent(self.env, &key);

        let instance = self.env.storage().instance();
        instance.set(&SLOTS, &(slot + 1));
        instance.set(&ACTIVE, &(self.len() + 1));
        instance.set(&TOTAL, &total);
        Ok(slot)
    }

    /// Replaces a beneficiary's share and returns the previous one.
    pub fn update(&self, identity: &Address, new_share: u32) -> Result<u32, DeadmanError> {
        validate_share(new_share)?;
        let (slot, mut record) = self.find_active(identity)?;
        let old_share = record.share;
        let total = (self.total_shares() - old_share)
            .checked_add(new_share)
            .filter(|total| *total <= MAX_TOTAL_SHARES)
            .ok_or(DeadmanError::ShareCapExceeded)?;

        record.share = new_share;
        self.write_record(slot, &record);
        self.env.storage().instance().set(&TOTAL, &total);
        Ok(old_share)
    }

    /// Soft-deletes a beneficiary and frees its identity for a later `add`.
    pub fn remove(&self, identity: &Address) -> Result<BeneficiaryRecord, DeadmanError> {
        let (slot, mut record) = self.find_active(identity)?;

        record.active = false;
        self.write_record(slot, &record);
        self.env.storage().persistent().remove(&index_key(identity));

        let instance = self.env.storage().instance();
        instance.set(&TOTAL, &(self.total_shares() - record.share));
        instance.set(&ACTIVE, &(self.len() - 1));
        Ok(record)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn find_active(&self, identity: &Address) -> Result<(u32, BeneficiaryRecord), DeadmanError> {
        let slot = self.slot_of(identity).ok_or(DeadmanError::NotFound)?;
        let record = self
            .record(slot)
            .filter(|record| record.active)
            .ok_or(DeadmanError::NotFound)?;
        Ok((slot, record))
    }

    fn write_record(&self, slot: u32, record: &BeneficiaryRecord) {
        let key = record_key(slot);
        self.env.storage().persistent().set(&key, record);
        ttl::extend_persistent(self.env, &key);
    }

    /// The owner and the switch itself cannot be beneficiaries.
    fn is_reserved(&self, identity: &Address) -> bool {
        *identity == self.env.current_contract_address()
            || storage::owner(self.env).is_ok_and(|owner| owner == *identity)
    }
}
