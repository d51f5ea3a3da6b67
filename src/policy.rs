//! Decision-maker seam
//!
//! Policies live outside the simulation. They see owned snapshots (an
//! observation and the last reward) and answer with one action.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Action, Observation, StepOutcome};

/// Anything that turns an observation into an action
pub trait Policy {
    fn act(&mut self, observation: &Observation, reward: i32) -> Action;
}

/// Picks uniformly among all actions
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: Pcg32,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _observation: &Observation, _reward: i32) -> Action {
        Action::ALL[self.rng.random_range(0..Action::ALL.len())]
    }
}

static MISSING_POLICY_WARNED: AtomicBool = AtomicBool::new(false);

/// Ask each character's team policy for its next action
///
/// `teams[i]` is the team of character `i`; `policies` is indexed by team.
/// Characters whose team has no policy idle, with a warning logged once per process.
pub fn collect_actions(
    policies: &mut [Box<dyn Policy>],
    teams: &[u8],
    outcome: &StepOutcome,
) -> Vec<Action> {
    teams
        .iter()
        .zip(outcome.observations.iter().zip(&outcome.rewards))
        .map(|(&team, (observation, &reward))| match policies.get_mut(team as usize) {
            Some(policy) => policy.act(observation, reward),
            None => {
                if !MISSING_POLICY_WARNED.swap(true, Ordering::Relaxed) {
                    log::warn!(
                        "No policy for team {} ({} policies); its characters will idle",
                        team,
                        policies.len()
                    );
                }
                Action::Idle
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(Action);

    impl Policy for Always {
        fn act(&mut self, _: &Observation, _: i32) -> Action {
            self.0
        }
    }

    #[test]
    fn test_random_policy_is_seeded() {
        let obs = Observation::default();
        let mut a = RandomPolicy::new(3);
        let mut b = RandomPolicy::new(3);
        let run_a: Vec<Action> = (0..32).map(|_| a.act(&obs, 0)).collect();
        let run_b: Vec<Action> = (0..32).map(|_| b.act(&obs, 0)).collect();
        assert_eq!(run_a, run_b);
    }

    #[test]
    fn test_collect_actions_by_team() {
        let mut policies: Vec<Box<dyn Policy>> = vec![
            Box::new(Always(Action::Accelerate)),
            Box::new(Always(Action::Fire)),
        ];
        let outcome = StepOutcome {
            observations: vec![Observation::default(); 3],
            rewards: vec![0, -10, 0],
        };

        let actions = collect_actions(&mut policies, &[0, 1, 2], &outcome);
        assert_eq!(actions, vec![Action::Accelerate, Action::Fire, Action::Idle]);
    }

    #[test]
    fn test_missing_team_policy_idles_and_warns() {
        let mut policies: Vec<Box<dyn Policy>> = vec![Box::new(Always(Action::Brake))];
        let outcome = StepOutcome {
            observations: vec![Observation::default(); 4],
            rewards: vec![0; 4],
        };

        for _ in 0..3 {
            let actions = collect_actions(&mut policies, &[0, 5, 0, 9], &outcome);
            assert_eq!(
                actions,
                vec![Action::Brake, Action::Idle, Action::Brake, Action::Idle]
            );
        }
        assert!(MISSING_POLICY_WARNED.load(Ordering::Relaxed));
    }
}
