use job_board::board::{ActorId, Notification, Notifier, NotifyError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) outbox: Arc<OutboxNotifier>,
}

/// Per-actor queue of notifications waiting for the transport to pick them up.
/// A full queue refuses further notifications for that actor.
#[derive(Debug)]
pub(crate) struct OutboxNotifier {
    capacity: usize,
    queues: Mutex<HashMap<ActorId, VecDeque<Notification>>>,
}

impl OutboxNotifier {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queues: Mutex::new(HashMap::new()),
        }
    }

    fn queues(&self) -> MutexGuard<'_, HashMap<ActorId, VecDeque<Notification>>> {
        self.queues.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes and returns everything queued for `actor`, oldest first.
    pub(crate) fn drain(&self, actor: ActorId) -> Vec<Notification> {
        self.queues()
            .remove(&actor)
            .map(Vec::from)
            .unwrap_or_default()
    }

    pub(crate) fn pending(&self, actor: ActorId) -> usize {
        self.queues().get(&actor).map_or(0, VecDeque::len)
    }
}

impl Notifier for OutboxNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        let mut queues = self.queues();
        let queue = queues.entry(notification.recipient).or_default();
        if queue.len() >= self.capacity {
            return Err(NotifyError::Transport(format!(
                "outbox for {} is full ({} pending)",
                notification.recipient,
                queue.len()
            )));
        }
        queue.push_back(notification);
        Ok(())
    }
}
