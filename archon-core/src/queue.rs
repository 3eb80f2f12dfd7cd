//! Tailer → dispatcher handoff.
//!
//! One producer, one consumer. The consumer side never blocks; the producer
//! side blocks only when a bounded queue is full, and never drops an item.

use crate::record::Ingested;
use crate::shutdown::ShutdownSignal;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::SendTimeoutError};

pub use tokio::sync::mpsc::error::TryRecvError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueuePolicy {
    Bounded(usize),
    Unbounded,
}

impl QueuePolicy {
    /// `0` selects an unbounded queue.
    pub fn from_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            Self::Unbounded
        } else {
            Self::Bounded(capacity)
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        match self {
            Self::Bounded(capacity) => Some(*capacity),
            Self::Unbounded => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("ingest queue closed by consumer")]
    Closed,

    #[error("push abandoned: shutdown in progress")]
    Cancelled,
}

pub fn ingest_queue(policy: QueuePolicy) -> (IngestSender, IngestReceiver) {
    match policy {
        QueuePolicy::Bounded(capacity) => {
            let (tx, rx) = mpsc::channel(capacity);
            (
                IngestSender {
                    inner: SenderInner::Bounded(tx),
                },
                IngestReceiver {
                    inner: ReceiverInner::Bounded(rx),
                },
            )
        }
        QueuePolicy::Unbounded => {
            let (tx, rx) = mpsc::unbounded_channel();
            (
                IngestSender {
                    inner: SenderInner::Unbounded(tx),
                },
                IngestReceiver {
                    inner: ReceiverInner::Unbounded(rx),
                },
            )
        }
    }
}

enum SenderInner {
    Bounded(mpsc::Sender<Ingested>),
    Unbounded(mpsc::UnboundedSender<Ingested>),
}

pub struct IngestSender {
    inner: SenderInner,
}

impl IngestSender {
    /// Enqueue one item.
    ///
    /// On a full bounded queue this waits `grace`, then keeps waiting until
    /// the consumer frees a slot or shutdown is signaled.
    pub async fn push(
        &self,
        item: Ingested,
        grace: Duration,
        shutdown: &mut ShutdownSignal,
    ) -> Result<(), QueueError> {
        let tx = match &self.inner {
            SenderInner::Unbounded(tx) => return tx.send(item).map_err(|_| QueueError::Closed),
            SenderInner::Bounded(tx) => tx,
        };

        let item = match tx.send_timeout(item, grace).await {
            Ok(()) => return Ok(()),
            Err(SendTimeoutError::Closed(_)) => return Err(QueueError::Closed),
            Err(SendTimeoutError::Timeout(item)) => item,
        };

        tracing::warn!(
            capacity = tx.max_capacity(),
            grace_ms = grace.as_millis() as u64,
            "ingest queue full; applying backpressure"
        );

        tokio::select! {
            sent = tx.send(item) => sent.map_err(|_| QueueError::Closed),
            _ = shutdown.triggered() => Err(QueueError::Cancelled),
        }
    }

    pub fn is_closed(&self) -> bool {
        match &self.inner {
            SenderInner::Bounded(tx) => tx.is_closed(),
            SenderInner::Unbounded(tx) => tx.is_closed(),
        }
    }
}

enum ReceiverInner {
    Bounded(mpsc::Receiver<Ingested>),
    Unbounded(mpsc::UnboundedReceiver<Ingested>),
}

pub struct IngestReceiver {
    inner: ReceiverInner,
}

impl IngestReceiver {
    /// Non-blocking pop in FIFO order.
    pub fn try_pop(&mut self) -> Result<Ingested, TryRecvError> {
        match &mut self.inner {
            ReceiverInner::Bounded(rx) => rx.try_recv(),
            ReceiverInner::Unbounded(rx) => rx.try_recv(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.inner {
            ReceiverInner::Bounded(rx) => rx.len(),
            ReceiverInner::Unbounded(rx) => rx.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The producer is gone and nothing is left to pop.
    pub fn is_disconnected(&self) -> bool {
        let closed = match &self.inner {
            ReceiverInner::Bounded(rx) => rx.is_closed(),
            ReceiverInner::Unbounded(rx) => rx.is_closed(),
        };
        closed && self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FsmState, Record};
    use crate::shutdown::ShutdownHandle;
    use pretty_assertions::assert_eq;

    fn item(cycle: u64) -> Ingested {
        Ingested::Record(Record::new(cycle, FsmState::Ok, 10, "ML"))
    }

    #[test]
    fn zero_capacity_means_unbounded() {
        assert_eq!(QueuePolicy::from_capacity(0), QueuePolicy::Unbounded);
        assert_eq!(QueuePolicy::from_capacity(8), QueuePolicy::Bounded(8));
    }

    #[tokio::test]
    async fn try_pop_preserves_fifo_order() {
        // Arrange
        let shutdown = ShutdownHandle::new();
        let mut signal = shutdown.subscribe();
        let (tx, mut rx) = ingest_queue(QueuePolicy::Bounded(8));

        // Act
        for cycle in 1..=5 {
            tx.push(item(cycle), Duration::from_millis(10), &mut signal)
                .await
                .unwrap();
        }

        // Assert
        let mut seen = Vec::new();
        while let Ok(Ingested::Record(r)) = rx.try_pop() {
            seen.push(r.cycle);
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(rx.try_pop(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn try_pop_reports_disconnect_after_drain() {
        let shutdown = ShutdownHandle::new();
        let mut signal = shutdown.subscribe();
        let (tx, mut rx) = ingest_queue(QueuePolicy::Unbounded);

        tx.push(item(1), Duration::ZERO, &mut signal).await.unwrap();
        drop(tx);

        assert_eq!(rx.try_pop(), Ok(item(1)));
        assert_eq!(rx.try_pop(), Err(TryRecvError::Disconnected));
    }

    #[tokio::test]
    async fn disconnected_only_once_drained() {
        let shutdown = ShutdownHandle::new();
        let mut signal = shutdown.subscribe();
        let (tx, mut rx) = ingest_queue(QueuePolicy::Bounded(4));

        tx.push(item(1), Duration::ZERO, &mut signal).await.unwrap();
        assert!(!rx.is_disconnected());
        drop(tx);

        assert!(!rx.is_disconnected());
        assert_eq!(rx.try_pop(), Ok(item(1)));
        assert!(rx.is_disconnected());
    }

    #[tokio::test]
    async fn full_queue_blocks_until_consumer_frees_a_slot() {
        // Arrange
        let shutdown = ShutdownHandle::new();
        let (tx, mut rx) = ingest_queue(QueuePolicy::Bounded(1));
        let mut signal = shutdown.subscribe();
        tx.push(item(1), Duration::from_millis(5), &mut signal)
            .await
            .unwrap();

        // Act
        let mut producer_signal = shutdown.subscribe();
        let producer = tokio::spawn(async move {
            tx.push(item(2), Duration::from_millis(5), &mut producer_signal)
                .await
        });
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!producer.is_finished());
        assert_eq!(rx.try_pop(), Ok(item(1)));

        // Assert
        assert_eq!(producer.await.unwrap(), Ok(()));
        assert_eq!(rx.try_pop(), Ok(item(2)));
    }

    #[tokio::test]
    async fn blocked_push_gives_up_on_shutdown() {
        let shutdown = ShutdownHandle::new();
        let (tx, _rx) = ingest_queue(QueuePolicy::Bounded(1));
        let mut signal = shutdown.subscribe();
        tx.push(item(1), Duration::ZERO, &mut signal).await.unwrap();

        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.trigger();
        });

        let result = tx.push(item(2), Duration::from_millis(5), &mut signal).await;

        assert_eq!(result, Err(QueueError::Cancelled));
    }

    #[tokio::test]
    async fn push_fails_once_consumer_is_gone() {
        let shutdown = ShutdownHandle::new();
        let mut signal = shutdown.subscribe();
        let (tx, rx) = ingest_queue(QueuePolicy::Bounded(4));
        drop(rx);

        let result = tx.push(item(1), Duration::ZERO, &mut signal).await;

        assert_eq!(result, Err(QueueError::Closed));
        assert!(tx.is_closed());
    }
}
