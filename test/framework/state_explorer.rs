//! # State Space Explorer
//!
//! Drives a switch through action sequences and verifies invariants after
//! every transition.
//!
//! ## Design
//!
//! Each explored state is a `LedgerSnapshot`; edges are `SwitchAction`s.
//! Besides the state invariants, every step is checked against the transition
//! invariants that apply to its action: value conservation always, pool
//! accounting for releases, and an unchanged ledger for actions that never
//! touch shares.
//!
//! ## Complexity
//!
//! - Time: O(S × (I + U)) for S steps, I invariants and U tracked users,
//!   bounded by `max_steps`.
//! - Space: O(S × U) when snapshots are recorded, O(U) otherwise.

extern crate std;

use deadman_switch::DeadmanError;
use soroban_sdk::Address;
use std::string::String;
use std::vec::Vec;

use super::generators::SwitchAction;
use super::invariants::{
    DistributionAccounting, InvariantSet, LedgerUnchanged, TransitionInvariantSet,
    ValueConservation,
};
use super::{ActionOutcome, DeadmanTestHarness, LedgerSnapshot, TestRunSummary};

// ── Explorer Configuration ───────────────────────────────────────────────────

/// Configuration for state-space exploration.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Maximum number of actions to execute in a single exploration run.
    pub max_steps: usize,
    /// Whether to halt on the first invariant violation (fail-fast).
    pub fail_fast: bool,
    /// Whether to record snapshots for later analysis.
    pub record_snapshots: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            fail_fast: true,
            record_snapshots: false,
        }
    }
}

// ── Exploration Result ───────────────────────────────────────────────────────

/// Full result of an exploration run.
#[derive(Debug)]
pub struct ExplorationResult {
    pub summary: TestRunSummary,
    pub snapshots: Vec<LedgerSnapshot>,
    pub action_log: Vec<(SwitchAction, ActionOutcome)>,
    /// Sum of every successful distribution.
    pub total_released: i128,
}

impl ExplorationResult {
    pub fn passed(&self) -> bool {
        self.summary.passed()
    }

    /// Number of logged actions that completed without error.
    pub fn successes(&self) -> usize {
        self.action_log
            .iter()
            .filter(|(_, o)| matches!(o, ActionOutcome::Ok))
            .count()
    }
}

/// What a single step did, for choosing transition invariants.
struct StepEffect {
    outcome: ActionOutcome,
    minted: i128,
    paid: Option<i128>,
}

impl StepEffect {
    fn plain(outcome: ActionOutcome) -> Self {
        Self {
            outcome,
            minted: 0,
            paid: None,
        }
    }
}

// ── State Space Explorer ─────────────────────────────────────────────────────

/// Executes action sequences against a switch, checking invariants after
/// every transition and tracking entry-point coverage.
pub struct StateExplorer<'a> {
    harness: &'a DeadmanTestHarness<'a>,
    invariants: InvariantSet,
    config: ExplorerConfig,
    users: Vec<Address>,
}

impl<'a> StateExplorer<'a> {
    /// Create an explorer for the given harness and candidate pool.
    pub fn new(
        harness: &'a DeadmanTestHarness<'a>,
        invariants: InvariantSet,
        config: ExplorerConfig,
        users: Vec<Address>,
    ) -> Self {
        Self {
            harness,
            invariants,
            config,
            users,
        }
    }

    /// Create an explorer with default configuration and built-in invariants.
    pub fn with_defaults(harness: &'a DeadmanTestHarness<'a>, users: Vec<Address>) -> Self {
        Self::new(
            harness,
            InvariantSet::switch_defaults(),
            ExplorerConfig::default(),
            users,
        )
    }

    /// Execute a sequence of actions, checking invariants after each.
    pub fn explore(&mut self, actions: &[SwitchAction]) -> ExplorationResult {
        let mut summary = TestRunSummary::new();
        let mut snapshots = Vec::new();
        let mut action_log = Vec::new();
        let mut total_released = 0i128;

        let mut before = self.harness.snapshot(&self.users);
        if self.config.record_snapshots {
            snapshots.push(before.clone());
        }

        let steps = actions.len().min(self.config.max_steps);

        for action in actions.iter().take(steps) {
            let effect = self.execute_action(action);
            summary.entry_points_hit.insert(action_entry_point(action));
            summary.actions_executed += 1;
            summary.transitions_observed += 1;

            let after = self.harness.snapshot(&self.users);
            let mut violations = self.invariants.check_all(&after);
            violations.extend(transitions_for(action, &effect).check_all(&before, &after));
            summary.invariant_checks += 1;

            if let Some(paid) = effect.paid {
                total_released += paid;
            }
            action_log.push((action.clone(), effect.outcome));

            let failed = !violations.is_empty();
            for (name, msg) in violations {
                summary.invariant_violations.push(std::format!(
                    "After action #{} ({:?}): [{}] {}",
                    summary.actions_executed,
                    action,
                    name,
                    msg
                ));
            }

            if self.config.record_snapshots {
                snapshots.push(after.clone());
            }
            if failed && self.config.fail_fast {
                break;
            }
            before = after;
        }

        ExplorationResult {
            summary,
            snapshots,
            action_log,
            total_released,
        }
    }

    fn user(&self, index: usize) -> &Address {
        &self.users[index % self.users.len()]
    }

    /// Execute a single action against the harness.
    fn execute_action(&self, action: &SwitchAction) -> StepEffect {
        let h = self.harness;
        match action {
            SwitchAction::Add { user_index, share } => StepEffect::plain(outcome(
                h.client
                    .try_add_beneficiary(&h.owner, self.user(*user_index), share),
            )),
            SwitchAction::Update { user_index, share } => StepEffect::plain(outcome(
                h.client
                    .try_update_beneficiary_share(&h.owner, self.user(*user_index), share),
            )),
            SwitchAction::Remove { user_index } => StepEffect::plain(outcome(
                h.client
                    .try_remove_beneficiary(&h.owner, self.user(*user_index)),
            )),
            SwitchAction::Heartbeat => {
                StepEffect::plain(outcome(h.client.try_heartbeat(&h.owner)))
            }
            SwitchAction::AdvanceTime { delta } => {
                h.env.advance_time(*delta);
                StepEffect::plain(ActionOutcome::Ok)
            }
            SwitchAction::Deposit { amount } => {
                h.env.mint_tokens(&h.token, &h.owner, *amount);
                StepEffect {
                    outcome: outcome(h.client.try_deposit(&h.owner, amount)),
                    minted: *amount,
                    paid: None,
                }
            }
            SwitchAction::Release => {
                let proof = h.attestation();
                self.distribute(proof)
            }
            SwitchAction::Distribute { proof } => self.distribute(*proof),
            SwitchAction::EmergencyWithdraw => {
                StepEffect::plain(outcome(h.client.try_emergency_withdraw(&h.owner)))
            }
        }
    }

    fn distribute(&self, proof: u32) -> StepEffect {
        match self.harness.client.try_distribute(&proof) {
            Ok(Ok(paid)) => StepEffect {
                outcome: ActionOutcome::Ok,
                minted: 0,
                paid: Some(paid),
            },
            other => StepEffect {
                outcome: outcome(other),
                minted: 0,
                paid: Some(0),
            },
        }
    }
}

/// Collapse a generated `try_*` client result into an `ActionOutcome`.
fn outcome<T, C, E: core::fmt::Debug>(
    result: Result<Result<T, C>, Result<DeadmanError, E>>,
) -> ActionOutcome {
    match result {
        Ok(_) => ActionOutcome::Ok,
        Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
        Err(Err(e)) => ActionOutcome::UnexpectedError(std::format!("{:?}", e)),
    }
}

/// The transition invariants that apply to one step.
fn transitions_for(action: &SwitchAction, effect: &StepEffect) -> TransitionInvariantSet {
    let mut set = TransitionInvariantSet::new();
    set.add(Box::new(ValueConservation {
        minted: effect.minted,
    }));
    if let Some(paid) = effect.paid {
        set.add(Box::new(DistributionAccounting { paid }));
    }
    match action {
        SwitchAction::Add { .. } | SwitchAction::Update { .. } | SwitchAction::Remove { .. } => {}
        _ => set.add(Box::new(LedgerUnchanged)),
    }
    set
}

/// Map a switch action to its entry point name for coverage tracking.
fn action_entry_point(action: &SwitchAction) -> String {
    match action {
        SwitchAction::Add { .. } => "add_beneficiary".into(),
        SwitchAction::Update { .. } => "update_beneficiary_share".into(),
        SwitchAction::Remove { .. } => "remove_beneficiary".into(),
        SwitchAction::Heartbeat => "heartbeat".into(),
        SwitchAction::AdvanceTime { .. } => "advance_time".into(),
        SwitchAction::Deposit { .. } => "deposit".into(),
        SwitchAction::Release => "verify_inactivity".into(),
        SwitchAction::Distribute { .. } => "distribute".into(),
        SwitchAction::EmergencyWithdraw => "emergency_withdraw".into(),
    }
}

/// The switch's state-changing entry points, for coverage calculation.
pub const SWITCH_ENTRY_POINTS: &[&str] = &[
    "add_beneficiary",
    "update_beneficiary_share",
    "remove_beneficiary",
    "heartbeat",
    "deposit",
    "verify_inactivity",
    "distribute",
    "emergency_withdraw",
];
