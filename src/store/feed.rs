//! Broadcast hub for the live job feed.
//!
//! Every write to the job collection republishes the entire ordered
//! collection; subscribers never see deltas or partial states. Dropping the
//! receiver is the teardown contract.

use crate::models::job::Job;
use std::sync::Arc;
use tokio::sync::broadcast;

pub type JobSnapshot = Arc<Vec<Job>>;

#[derive(Clone)]
pub struct FeedHub {
    tx: broadcast::Sender<JobSnapshot>,
}

impl FeedHub {
    /// Default capacity of 64 buffered snapshots per subscriber. A lagging
    /// subscriber loses intermediate snapshots, which is harmless here: the
    /// latest snapshot is always the full collection state.
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a full collection snapshot. No-op when nobody is subscribed.
    pub fn publish(&self, snapshot: JobSnapshot) {
        let _ = self.tx.send(snapshot);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobSnapshot> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for FeedHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobType;
    use chrono::Utc;
    use uuid::Uuid;

    fn job(title: &str) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: title.into(),
            company: "Acme".into(),
            description: "desc".into(),
            requirements: None,
            procedure: None,
            location: "Lagos, Ikeja".into(),
            job_type: JobType::Gig,
            category: "Sales".into(),
            salary: None,
            posted_at: Utc::now(),
            is_admin_posted: false,
            tags: vec![],
            creator_id: Uuid::new_v4(),
            creator_name: "Ada".into(),
            logo: None,
            whatsapp: None,
            phone: None,
            email: None,
            link: None,
        }
    }

    #[tokio::test]
    async fn subscribers_receive_full_snapshots() {
        let hub = FeedHub::new();
        let mut rx = hub.subscribe();

        hub.publish(Arc::new(vec![job("one"), job("two")]));

        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.len(), 2);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_noop() {
        let hub = FeedHub::new();
        hub.publish(Arc::new(vec![job("dropped")]));
    }

    #[tokio::test]
    async fn every_subscriber_sees_every_snapshot() {
        let hub = FeedHub::new();
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        hub.publish(Arc::new(vec![job("broadcast")]));

        assert_eq!(rx1.recv().await.unwrap().len(), 1);
        assert_eq!(rx2.recv().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn dropping_the_receiver_tears_down_the_subscription() {
        let hub = FeedHub::new();
        let rx = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);
        drop(rx);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
