#![no_main]

use arbitrary::Arbitrary;
use deadman_switch::{DeadmanSwitchContract, DeadmanSwitchContractClient, ATTEST_ALIVE, ATTEST_INACTIVE};
use fhe_executor::{testutils::plaintext_of, FheExecutorContract};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum Step {
    Heartbeat,
    Advance { delta: u32 },
    Attest,
}

#[derive(Arbitrary, Debug)]
pub struct Input {
    period: u32,
    start: u32,
    steps: Vec<Step>,
}

// The encrypted predicate must agree with the plaintext one on every step.
fuzz_target!(|input: Input| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(input.start as u64);

    let owner = Address::generate(&env);
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let executor = env.register(FheExecutorContract, ());
    let contract_id = env.register(DeadmanSwitchContract, (owner.clone(), token, executor.clone()));
    let client = DeadmanSwitchContractClient::new(&env, &contract_id);

    client.initialize(&owner, &input.period);
    let mut last_active = input.start as u64;

    for step in input.steps.into_iter().take(128) {
        match step {
            Step::Heartbeat => {
                client.heartbeat(&owner);
                last_active = env.ledger().timestamp();
            }
            Step::Advance { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
            Step::Attest => {
                let ct = client.attest();
                let got = plaintext_of(&env, &executor, &ct).expect("attestation handle") as u32;
                let now = env.ledger().timestamp();
                let expected = if last_active + input.period as u64 < now {
                    ATTEST_INACTIVE
                } else {
                    ATTEST_ALIVE
                };
                assert_eq!(
                    got, expected,
                    "attestation {} at now={} last_active={} period={}",
                    got, now, last_active, input.period
                );
            }
        }
    }
});
