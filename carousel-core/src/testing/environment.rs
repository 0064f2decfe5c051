//! Recording environment port

use std::collections::BTreeMap;

use crate::ports::{EnvSource, EnvironmentPort, SubscriptionId};

#[derive(Debug, Clone, Default)]
pub struct RecordingEnvironment {
    active: BTreeMap<SubscriptionId, EnvSource>,
    next_id: u64,
    /// Every source ever subscribed, in order.
    history: Vec<EnvSource>,
}

impl RecordingEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_subscribed(&self, source: EnvSource) -> bool {
        self.active.values().any(|&s| s == source)
    }

    /// Number of live registrations.
    pub fn active(&self) -> usize {
        self.active.len()
    }

    pub fn history(&self) -> &[EnvSource] {
        &self.history
    }
}

impl EnvironmentPort for RecordingEnvironment {
    fn subscribe(&mut self, source: EnvSource) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.active.insert(id, source);
        self.history.push(source);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.active.remove(&id);
    }
}
