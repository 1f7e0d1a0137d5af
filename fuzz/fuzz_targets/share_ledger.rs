#![no_main]

use arbitrary::Arbitrary;
use deadman_switch::{DeadmanSwitchContract, DeadmanSwitchContractClient};
use fhe_executor::{testutils::plaintext_of, FheExecutorContract};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

/// Owner and relayer actions against the share ledger and the pool.
///
/// Shares are raw `u8`s so the fuzzer regularly hits 0 and values past 100.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Add { who: u8, share: u8 },
    Update { who: u8, share: u8 },
    Remove { who: u8 },
    Heartbeat,
    Deposit { amount: u32 },
    AdvanceTime { delta: u32 },
    Release,
    Distribute { proof: u8 },
    EmergencyWithdraw,
}

const PERIOD: u32 = 7 * 86_400;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let owner = Address::generate(&env);
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let executor = env.register(FheExecutorContract, ());
    let contract_id = env.register(
        DeadmanSwitchContract,
        (owner.clone(), token.clone(), executor.clone()),
    );
    let client = DeadmanSwitchContractClient::new(&env, &contract_id);
    let asset = TokenClient::new(&env, &token);

    if client.try_initialize(&owner, &PERIOD).is_err() {
        return;
    }

    let users: Vec<Address> = (0..5).map(|_| Address::generate(&env)).collect();
    let mut minted: i128 = 0;

    for action in actions.into_iter().take(64) {
        match action {
            FuzzAction::Add { who, share } => {
                let u = &users[who as usize % users.len()];
                let _ = client.try_add_beneficiary(&owner, u, &(share as u32));
            }
            FuzzAction::Update { who, share } => {
                let u = &users[who as usize % users.len()];
                let _ = client.try_update_beneficiary_share(&owner, u, &(share as u32));
            }
            FuzzAction::Remove { who } => {
                let u = &users[who as usize % users.len()];
                let _ = client.try_remove_beneficiary(&owner, u);
            }
            FuzzAction::Heartbeat => {
                let _ = client.try_heartbeat(&owner);
            }
            FuzzAction::Deposit { amount } => {
                let amt = amount as i128;
                StellarAssetClient::new(&env, &token).mint(&owner, &amt.max(1));
                minted += amt.max(1);
                let _ = client.try_deposit(&owner, &amt);
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
            FuzzAction::Release => {
                let ct = client.verify_inactivity();
                let proof = plaintext_of(&env, &executor, &ct).expect("attestation handle") as u32;
                let _ = client.try_distribute(&proof);
            }
            FuzzAction::Distribute { proof } => {
                let _ = client.try_distribute(&(proof as u32));
            }
            FuzzAction::EmergencyWithdraw => {
                let _ = client.try_emergency_withdraw(&owner);
            }
        }

        // ── Post-action invariant checks ──
        let (ids, shares) = client.get_all_beneficiaries();
        let sum: u32 = shares.iter().sum();
        let total = client.get_total_shares();
        assert_eq!(total, sum, "INVARIANT VIOLATION: total_shares != sum of active shares");
        assert!(total <= 100, "INVARIANT VIOLATION: total_shares {} over cap", total);
        assert_eq!(client.get_beneficiary_count(), ids.len());

        for s in shares.iter() {
            assert!((1..=100).contains(&s), "INVARIANT VIOLATION: share {} out of range", s);
        }

        for u in &users {
            let looked_up = client.get_beneficiary(u).map(|r| r.share);
            let listed = ids
                .iter()
                .position(|a| &a == u)
                .and_then(|i| shares.get(i as u32));
            assert_eq!(looked_up, listed, "INVARIANT VIOLATION: index disagrees with enumeration");
        }

        // Tokens only move between the pool, the owner and the candidates.
        let pool = client.get_balance();
        assert!(pool >= 0, "INVARIANT VIOLATION: negative pool");
        let held: i128 = pool
            + asset.balance(&owner)
            + users.iter().map(|u| asset.balance(u)).sum::<i128>();
        assert_eq!(held, minted, "INVARIANT VIOLATION: tokens created or destroyed");
    }
});
