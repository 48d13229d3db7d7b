//! Background execution of one calculation request.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::thread::{self, JoinHandle};

use hv_project::ProjectSpecification;
use hv_results::{CalculationResults, RequestId};
use tracing::{info, warn};

use crate::calc_service::{CalculationError, CalculationService};

const WORKER_LOST: &str = "calculation worker exited without reporting";

#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Complete {
        request_id: RequestId,
        results: CalculationResults,
    },
    Error {
        request_id: RequestId,
        error: CalculationError,
    },
}

impl WorkerMessage {
    pub fn request_id(&self) -> &RequestId {
        match self {
            WorkerMessage::Complete { request_id, .. } | WorkerMessage::Error { request_id, .. } => {
                request_id
            }
        }
    }

    pub fn into_outcome(self) -> Result<CalculationResults, CalculationError> {
        match self {
            WorkerMessage::Complete { results, .. } => Ok(results),
            WorkerMessage::Error { error, .. } => Err(error),
        }
    }
}

/// Runs a single service call on its own thread and reports once.
pub struct CalculationWorker {
    request_id: RequestId,
    rx: Receiver<WorkerMessage>,
    _handle: JoinHandle<()>,
}

impl CalculationWorker {
    pub fn start(
        service: Arc<dyn CalculationService>,
        request_id: RequestId,
        spec: ProjectSpecification,
    ) -> Self {
        let (tx, rx) = channel();
        let worker_request_id = request_id.clone();

        let handle = thread::spawn(move || {
            let request_id = worker_request_id;
            info!(service = service.name(), request = request_id.short(), "calculation started");
            let message = match service.calculate(&spec) {
                Ok(results) => WorkerMessage::Complete {
                    request_id,
                    results,
                },
                Err(error) => {
                    warn!(request = request_id.short(), %error, "calculation failed");
                    WorkerMessage::Error { request_id, error }
                }
            };
            // The receiver may already be gone if the session was dropped.
            let _ = tx.send(message);
        });

        Self {
            request_id,
            rx,
            _handle: handle,
        }
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Non-blocking check for the result.
    pub fn poll(&self) -> Option<WorkerMessage> {
        match self.rx.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(WorkerMessage::Error {
                request_id: self.request_id.clone(),
                error: CalculationError::new(WORKER_LOST),
            }),
        }
    }

    /// Block until the worker reports.
    pub fn wait(self) -> Result<WorkerMessage, CalculationError> {
        self.rx
            .recv()
            .map_err(|_| CalculationError::new(WORKER_LOST))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_service::MockCalculationService;
    use hv_project::default_specification;
    use hv_results::compute_request_id;

    #[test]
    fn worker_reports_results() {
        let spec = default_specification();
        let id = compute_request_id(&spec);
        let worker = CalculationWorker::start(
            Arc::new(MockCalculationService::instant()),
            id.clone(),
            spec,
        );
        let message = worker.wait().unwrap();
        assert_eq!(message.request_id(), &id);
        assert_eq!(
            message.into_outcome().unwrap(),
            CalculationResults::reference()
        );
    }
}
