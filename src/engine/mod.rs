//! Font engine abstraction
//!
//! Format generation and outline cleanup are delegated to an external font
//! engine. Commands describe what they want as an [`EngineJob`]; a
//! [`FontEngine`] runs it and reports [`EngineEvent`]s as it goes.

pub mod events;
#[cfg(test)]
pub mod fake;
pub mod fontforge;
pub mod job;

pub use events::{EngineEvent, EngineOutcome};
pub use fontforge::FontForgeEngine;
pub use job::{
    EngineJob, FontOp, GaspFlag, GaspRange, GenerateFlag, GenerateTarget, GlyphErrorPolicy,
    GlyphOp, SimplifyFlag, SimplifyParams,
};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("FontForge not found (searched {searched}). Install FontForge or set `fontforge_path` in settings.json")]
    NotFound { searched: String },
    #[error("failed to start {}: {source}", executable.display())]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("engine {0} was not captured")]
    MissingPipe(&'static str),
    #[error("engine exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("failed to encode engine job: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Something that can execute an [`EngineJob`].
#[allow(async_fn_in_trait)]
pub trait FontEngine {
    /// Run `job`, calling `observer` for every event as it arrives.
    async fn run(
        &self,
        job: &EngineJob,
        observer: &mut dyn FnMut(&EngineEvent),
    ) -> Result<EngineOutcome, EngineError>;
}
