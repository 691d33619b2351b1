//! Startup, liveness and readiness checks.
//!
//! The application registers its checks, the infrastructure endpoint runs them on request.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct HealthChecks {
    pub startup: Checks,
    pub liveness: Checks,
    pub readiness: Checks,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Up,
    Down,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub state: State,
    /// Why the check is down. Must not contain anything secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The outcome of running a set of checks, ordered by name.
#[derive(Clone, Debug, Default)]
pub struct Report {
    pub results: Vec<CheckResult>,
}

impl Report {
    pub fn is_up(&self) -> bool {
        self.results.iter().all(|result| result.state == State::Up)
    }
}

#[async_trait]
pub trait Check: Send + Sync {
    /// An error marks the check as down, the message gets reported.
    async fn check(&self) -> Result<(), String>;
}

/// A named set of checks.
#[derive(Default)]
pub struct Checks {
    checks: RwLock<BTreeMap<String, Box<dyn Check>>>,
}

impl Checks {
    /// Add a check, replacing an existing one with the same name.
    pub async fn register(&self, name: impl Into<String>, check: impl Check + 'static) {
        self.checks.write().await.insert(name.into(), Box::new(check));
    }

    pub async fn unregister(&self, name: &str) {
        self.checks.write().await.remove(name);
    }

    pub async fn run(&self) -> Report {
        let checks = self.checks.read().await;
        let results = join_all(checks.iter().map(|(name, check)| async move {
            let (state, message) = match check.check().await {
                Ok(()) => (State::Up, None),
                Err(message) => (State::Down, Some(message)),
            };
            CheckResult {
                name: name.clone(),
                state,
                message,
            }
        }))
        .await;

        Report { results }
    }
}

/// A check evaluating a plain function.
pub struct FnCheck<F>(F);

/// Create a check from a function, which must not block.
pub fn from_fn<F>(f: F) -> FnCheck<F>
where
    F: Fn() -> Result<(), String> + Send + Sync,
{
    FnCheck(f)
}

#[async_trait]
impl<F> Check for FnCheck<F>
where
    F: Fn() -> Result<(), String> + Send + Sync,
{
    async fn check(&self) -> Result<(), String> {
        (self.0)()
    }
}

/// A switch the application flips once it reached some state.
///
/// Starts as down.
#[derive(Clone, Debug)]
pub struct Probe {
    up: Arc<AtomicBool>,
}

pub struct ProbeCheck {
    up: Arc<AtomicBool>,
    message: String,
}

impl Probe {
    pub fn new(message: impl Into<String>) -> (Self, ProbeCheck) {
        let up = Arc::new(AtomicBool::new(false));
        let check = ProbeCheck {
            up: up.clone(),
            message: message.into(),
        };
        (Self { up }, check)
    }

    pub fn set(&self, up: bool) {
        self.up.store(up, Ordering::Release);
    }
}

#[async_trait]
impl Check for ProbeCheck {
    async fn check(&self) -> Result<(), String> {
        if self.up.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn empty_is_up() {
        assert!(Checks::default().run().await.is_up());
    }

    #[tokio::test]
    async fn failing_check() {
        let checks = Checks::default();
        checks.register("ok", from_fn(|| Ok(()))).await;
        checks.register("broken", from_fn(|| Err("broken".to_string()))).await;

        let report = checks.run().await;
        assert!(!report.is_up());
        assert_eq!(
            report.results,
            [
                CheckResult {
                    name: "broken".into(),
                    state: State::Down,
                    message: Some("broken".into()),
                },
                CheckResult {
                    name: "ok".into(),
                    state: State::Up,
                    message: None,
                },
            ]
        );

        checks.unregister("broken").await;
        assert!(checks.run().await.is_up());
    }

    #[tokio::test]
    async fn probe() {
        let checks = Checks::default();
        let (probe, check) = Probe::new("not yet started");
        checks.register("startup", check).await;

        assert!(!checks.run().await.is_up());
        probe.set(true);
        assert!(checks.run().await.is_up());
    }

    #[test]
    fn wire_format() {
        let result = CheckResult {
            name: "entry".into(),
            state: State::Down,
            message: Some("missing".into()),
        };
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            serde_json::json!({"name": "entry", "state": "down", "message": "missing"})
        );
    }
}
