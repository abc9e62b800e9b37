//! In-process engine for tests: records jobs and replays scripted events

use super::{EngineError, EngineEvent, EngineJob, EngineOutcome, FontEngine};
use std::cell::RefCell;

#[derive(Debug, Default)]
pub struct FakeEngine {
    pub events: Vec<EngineEvent>,
    /// Bytes written to the job's output path, unless `None`.
    pub output: Option<Vec<u8>>,
    pub fail_with: Option<String>,
    pub jobs: RefCell<Vec<EngineJob>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(mut self, events: impl IntoIterator<Item = EngineEvent>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn writing(mut self, output: impl Into<Vec<u8>>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn failing(mut self, stderr: &str) -> Self {
        self.fail_with = Some(stderr.to_string());
        self
    }

    pub fn last_job(&self) -> Option<EngineJob> {
        self.jobs.borrow().last().cloned()
    }
}

impl FontEngine for FakeEngine {
    async fn run(
        &self,
        job: &EngineJob,
        observer: &mut dyn FnMut(&EngineEvent),
    ) -> Result<EngineOutcome, EngineError> {
        self.jobs.borrow_mut().push(job.clone());
        let mut outcome = EngineOutcome::default();
        for event in &self.events {
            outcome.record(event);
            observer(event);
        }
        if let Some(stderr) = &self.fail_with {
            return Err(EngineError::Failed {
                status: "exit status: 1".to_string(),
                stderr: stderr.clone(),
            });
        }
        if let Some(bytes) = &self.output {
            std::fs::write(&job.output.path, bytes)?;
            outcome.generated = Some(job.output.path.clone());
        }
        Ok(outcome)
    }
}
