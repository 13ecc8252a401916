/// Fetch lifecycle and background loading for screen activations
use crate::clients::ShipSource;
use crate::domain::{VesselDetail, VesselSummary};
use crate::errors::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

/// `Idle -> Loading -> Ready | Failed`
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready { data: T, fetched_at: DateTime<Utc> },
    Failed { code: &'static str, message: String, not_found: bool },
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    /// Enter `Loading`; only valid from `Idle`
    pub fn begin(&mut self) -> bool {
        if matches!(self, FetchState::Idle) {
            *self = FetchState::Loading;
            true
        } else {
            false
        }
    }

    /// Settle a `Loading` state. Returns false when there was nothing in flight.
    pub fn resolve(&mut self, result: ApiResult<T>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match result {
            Ok(data) => FetchState::Ready {
                data,
                fetched_at: Utc::now(),
            },
            Err(e) => FetchState::Failed {
                code: e.code(),
                message: e.to_string(),
                not_found: e.is_not_found(),
            },
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready { data, .. } => Some(data),
            _ => None,
        }
    }
}

static NEXT_ACTIVATION: AtomicU64 = AtomicU64::new(1);

/// One visit to a screen. Dropping it marks the visit as over.
#[derive(Debug)]
pub struct Activation {
    id: u64,
    live: Arc<AtomicBool>,
}

impl Activation {
    pub fn new() -> Self {
        Self {
            id: NEXT_ACTIVATION.fetch_add(1, Ordering::Relaxed),
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Handle given to background work so it can tell whether the screen is still there
    pub fn guard(&self) -> ActivationGuard {
        ActivationGuard {
            id: self.id,
            live: self.live.clone(),
        }
    }
}

impl Default for Activation {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Activation {
    fn drop(&mut self) {
        self.live.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone)]
pub struct ActivationGuard {
    id: u64,
    live: Arc<AtomicBool>,
}

impl ActivationGuard {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

/// Completed fetch, tagged with the activation that asked for it
#[derive(Debug)]
pub enum FetchOutcome {
    Ships {
        activation: u64,
        result: ApiResult<Vec<VesselSummary>>,
    },
    Ship {
        activation: u64,
        id: String,
        result: ApiResult<VesselDetail>,
    },
}

impl FetchOutcome {
    pub fn activation(&self) -> u64 {
        match self {
            FetchOutcome::Ships { activation, .. } | FetchOutcome::Ship { activation, .. } => {
                *activation
            }
        }
    }
}

/// Spawns one fetch per activation and reports back over a channel
#[derive(Clone)]
pub struct FleetService {
    source: Arc<dyn ShipSource>,
    outcomes: UnboundedSender<FetchOutcome>,
}

impl FleetService {
    pub fn new(source: Arc<dyn ShipSource>, outcomes: UnboundedSender<FetchOutcome>) -> Self {
        Self { source, outcomes }
    }

    /// Load all vessels for a list screen activation
    pub fn load_ships(&self, guard: ActivationGuard) {
        let source = self.source.clone();
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let result = source.fetch_ships().await;
            match &result {
                Ok(ships) => info!(count = ships.len(), "Fetched vessel list"),
                Err(e) => log_failure("vessel list", e),
            }
            deliver(
                &outcomes,
                &guard,
                FetchOutcome::Ships {
                    activation: guard.id(),
                    result,
                },
            );
        });
    }

    /// Load a single vessel for a detail screen activation
    pub fn load_ship(&self, id: String, guard: ActivationGuard) {
        let source = self.source.clone();
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let result = source.fetch_ship(&id).await;
            match &result {
                Ok(_) => info!(ship_id = %id, "Fetched vessel detail"),
                Err(e) => log_failure(&id, e),
            }
            deliver(
                &outcomes,
                &guard,
                FetchOutcome::Ship {
                    activation: guard.id(),
                    id,
                    result,
                },
            );
        });
    }
}

fn log_failure(what: &str, e: &ApiError) {
    error!(code = e.code(), "Fetch for {} failed: {}", what, e);
}

fn deliver(outcomes: &UnboundedSender<FetchOutcome>, guard: &ActivationGuard, outcome: FetchOutcome) {
    if !guard.is_live() {
        debug!(activation = guard.id(), "Screen left before fetch completed, discarding result");
        return;
    }
    if outcomes.send(outcome).is_err() {
        debug!(activation = guard.id(), "Event loop gone, discarding fetch result");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::{mpsc, Notify};

    /// Source that waits for a go signal before answering
    struct GatedSource {
        gate: Arc<Notify>,
        ships: Vec<VesselSummary>,
    }

    #[async_trait]
    impl ShipSource for GatedSource {
        async fn fetch_ships(&self) -> ApiResult<Vec<VesselSummary>> {
            self.gate.notified().await;
            Ok(self.ships.clone())
        }

        async fn fetch_ship(&self, id: &str) -> ApiResult<VesselDetail> {
            self.gate.notified().await;
            Err(ApiError::NotFound(format!("ship {id}")))
        }
    }

    fn gated() -> (Arc<Notify>, Arc<dyn ShipSource>) {
        let gate = Arc::new(Notify::new());
        let source = GatedSource {
            gate: gate.clone(),
            ships: vec![VesselSummary {
                id: "A".into(),
                name: "Alpha".into(),
                ..Default::default()
            }],
        };
        (gate, Arc::new(source))
    }

    #[test]
    fn test_fetch_state_transitions() {
        let mut state: FetchState<u32> = FetchState::default();
        assert!(!state.resolve(Ok(1)));
        assert!(state.begin());
        assert!(!state.begin());
        assert!(state.resolve(Ok(7)));
        assert_eq!(state.data(), Some(&7));
        assert!(!state.resolve(Ok(8)));
    }

    #[test]
    fn test_fetch_state_records_failure() {
        let mut state: FetchState<u32> = FetchState::Idle;
        state.begin();
        state.resolve(Err(ApiError::NotFound("ship X".into())));
        match state {
            FetchState::Failed { code, not_found, .. } => {
                assert_eq!(code, "NOT_FOUND");
                assert!(not_found);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_activation_drop_clears_guard() {
        let first = Activation::new();
        let second = Activation::new();
        assert_ne!(first.id(), second.id());

        let guard = first.guard();
        assert!(guard.is_live());
        drop(first);
        assert!(!guard.is_live());
    }

    #[tokio::test]
    async fn test_live_activation_receives_result() {
        let (gate, source) = gated();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let service = FleetService::new(source, tx);

        let activation = Activation::new();
        service.load_ships(activation.guard());
        gate.notify_one();

        let outcome = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.activation(), activation.id());
        match outcome {
            FetchOutcome::Ships { result, .. } => assert_eq!(result.unwrap().len(), 1),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_result_for_dropped_activation_is_discarded() {
        let (gate, source) = gated();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let service = FleetService::new(source, tx);

        let activation = Activation::new();
        service.load_ship("GONE".into(), activation.guard());
        drop(activation);
        gate.notify_one();
        drop(service);

        // the only sender left belongs to the task, so the channel closes without a message
        let received = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap();
        assert!(received.is_none());
    }
}
