//! Best-effort teardown sequencing.
//!
//! A teardown is an ordered list of named steps. Step failures are logged and
//! recorded but never abort the sequence: partial cleanup is acceptable, and
//! the caller reports completion to the orchestrator exactly once afterwards.

use std::time::Duration;

use serde_json::json;

use crate::logging::{log_info, log_warn};

/// A named unit of teardown work. Steps are independent: a failing step must
/// not prevent later steps from running.
pub struct TeardownStep<'a> {
    name: String,
    action: Box<dyn FnOnce() -> Result<(), String> + 'a>,
}

impl<'a> TeardownStep<'a> {
    pub fn new(name: impl Into<String>, action: impl FnOnce() -> Result<(), String> + 'a) -> Self {
        Self {
            name: name.into(),
            action: Box::new(action),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub name: String,
    pub result: Result<(), String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub outcomes: Vec<StepOutcome>,
}

impl TeardownReport {
    pub fn completed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_ok())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.completed()
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}

/// Run every step in order, isolating failures per step. Always returns a
/// complete report; never propagates a step error.
pub fn run_teardown(component: &str, steps: Vec<TeardownStep<'_>>) -> TeardownReport {
    let mut outcomes = Vec::with_capacity(steps.len());
    for step in steps {
        let TeardownStep { name, action } = step;
        log_info(component, "step_started", json!({"step": name}));
        let result = action();
        if let Err(error) = &result {
            log_warn(component, "step_failed", json!({"step": name, "error": error}));
        }
        outcomes.push(StepOutcome { name, result });
    }
    TeardownReport { outcomes }
}

/// Bounded polling toward a terminal state: fixed delay, fixed attempt cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitSettings {
    pub delay: Duration,
    pub max_attempts: u32,
}

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Poll until `poll` reports the terminal state. A poll error aborts the wait;
/// exhausting the attempt budget is also an error. Both surface as ordinary
/// step failures to the sequencer.
pub fn wait_until(
    description: &str,
    settings: WaitSettings,
    sleeper: &dyn Sleeper,
    mut poll: impl FnMut() -> Result<bool, String>,
) -> Result<(), String> {
    for attempt in 1..=settings.max_attempts {
        if poll()? {
            return Ok(());
        }
        if attempt < settings.max_attempts {
            sleeper.sleep(settings.delay);
        }
    }
    Err(format!(
        "{description} did not reach terminal state after {} attempts",
        settings.max_attempts
    ))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct RecordingSleeper {
        sleeps: RefCell<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn new() -> Self {
            Self {
                sleeps: RefCell::new(Vec::new()),
            }
        }
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
        }
    }

    #[test]
    fn failed_step_does_not_block_later_steps() {
        let executed = RefCell::new(Vec::new());

        let steps = vec![
            TeardownStep::new("delete nodegroups", || {
                executed.borrow_mut().push("delete nodegroups");
                Err("ResourceNotFoundException".to_string())
            }),
            TeardownStep::new("delete cluster", || {
                executed.borrow_mut().push("delete cluster");
                Ok(())
            }),
        ];

        let report = run_teardown("test", steps);

        assert_eq!(
            executed.into_inner(),
            vec!["delete nodegroups", "delete cluster"]
        );
        assert_eq!(report.failed(), 1);
        assert_eq!(report.completed(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn report_preserves_step_order_and_errors() {
        let steps = vec![
            TeardownStep::new("first", || Ok(())),
            TeardownStep::new("second", || Err("denied".to_string())),
            TeardownStep::new("third", || Ok(())),
        ];

        let report = run_teardown("test", steps);

        let names: Vec<&str> = report
            .outcomes
            .iter()
            .map(|outcome| outcome.name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(report.outcomes[1].result, Err("denied".to_string()));
    }

    #[test]
    fn empty_teardown_is_clean() {
        let report = run_teardown("test", Vec::new());
        assert!(report.is_clean());
        assert_eq!(report.outcomes, Vec::new());
    }

    #[test]
    fn wait_polls_until_terminal_with_fixed_delay() {
        let sleeper = RecordingSleeper::new();
        let polls = RefCell::new(0u32);
        let settings = WaitSettings {
            delay: Duration::from_secs(30),
            max_attempts: 20,
        };

        let result = wait_until("nodegroup deletion", settings, &sleeper, || {
            *polls.borrow_mut() += 1;
            Ok(*polls.borrow() == 3)
        });

        assert_eq!(result, Ok(()));
        assert_eq!(*polls.borrow(), 3);
        assert_eq!(
            sleeper.sleeps.into_inner(),
            vec![Duration::from_secs(30), Duration::from_secs(30)]
        );
    }

    #[test]
    fn wait_gives_up_after_max_attempts() {
        let sleeper = RecordingSleeper::new();
        let settings = WaitSettings {
            delay: Duration::from_secs(1),
            max_attempts: 5,
        };

        let result = wait_until("stack deletion", settings, &sleeper, || Ok(false));

        assert_eq!(
            result,
            Err("stack deletion did not reach terminal state after 5 attempts".to_string())
        );
        assert_eq!(sleeper.sleeps.borrow().len(), 4);
    }

    #[test]
    fn wait_surfaces_poll_errors_without_further_attempts() {
        let sleeper = RecordingSleeper::new();
        let polls = RefCell::new(0u32);
        let settings = WaitSettings {
            delay: Duration::from_secs(1),
            max_attempts: 5,
        };

        let result = wait_until("stack deletion", settings, &sleeper, || {
            *polls.borrow_mut() += 1;
            Err("AccessDenied".to_string())
        });

        assert_eq!(result, Err("AccessDenied".to_string()));
        assert_eq!(*polls.borrow(), 1);
        assert!(sleeper.sleeps.borrow().is_empty());
    }
}
