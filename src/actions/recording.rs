use super::Host;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// One call made against a [`RecordingHost`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Debug(String),
    Info(String),
    Failed(String),
    Output { name: String, value: String },
}

/// [`Host`] that keeps every event in memory
#[derive(Default)]
pub struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
    failed: AtomicBool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Messages passed to `set_failed`, in order
    pub fn failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Failed(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Info(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Every value set for `name`, oldest first
    pub fn output_history(&self, name: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Output { name: n, value } if n == name => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Last value of each output
    pub fn outputs(&self) -> HashMap<String, String> {
        let mut outputs = HashMap::new();
        for event in self.events() {
            if let HostEvent::Output { name, value } = event {
                outputs.insert(name, value);
            }
        }
        outputs
    }

    fn push(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Host for RecordingHost {
    fn debug(&self, message: &str) {
        self.push(HostEvent::Debug(message.to_string()));
    }

    fn info(&self, message: &str) {
        self.push(HostEvent::Info(message.to_string()));
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        self.push(HostEvent::Failed(message.to_string()));
    }

    fn set_output(&self, name: &str, value: &str) {
        self.push(HostEvent::Output {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}
