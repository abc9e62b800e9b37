//! FontForge as an external engine process
//!
//! Each job runs one `fontforge -script` process with an embedded driver
//! script. The job goes in as a JSON file; progress comes back as JSON lines
//! on stdout, which are forwarded to the caller while the process runs.

use crate::engine::{EngineError, EngineEvent, EngineJob, EngineOutcome, FontEngine};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

const DRIVER_SCRIPT: &str = include_str!("driver.py");

/// Environment variable that may point at the FontForge executable.
pub const FONTFORGE_ENV: &str = "FONTFORGE";

#[derive(Debug, Clone)]
pub struct FontForgeEngine {
    executable: PathBuf,
}

impl FontForgeEngine {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Find FontForge: the configured path first, then `$FONTFORGE`, then
    /// `fontforge` on `PATH`.
    pub fn locate(configured: Option<&Path>) -> Result<Self, EngineError> {
        if let Some(path) = configured {
            if path.is_file() {
                return Ok(Self::new(path));
            }
            return Err(EngineError::NotFound {
                searched: format!("configured path {}", path.display()),
            });
        }

        if let Some(path) = std::env::var_os(FONTFORGE_ENV) {
            let path = PathBuf::from(path);
            if path.is_file() {
                return Ok(Self::new(path));
            }
            return Err(EngineError::NotFound {
                searched: format!("${FONTFORGE_ENV} = {}", path.display()),
            });
        }

        search_path(OsStr::new("fontforge"))
            .map(Self::new)
            .ok_or_else(|| EngineError::NotFound {
                searched: "PATH".to_string(),
            })
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

/// Look `program` up in the directories of `PATH`.
fn search_path(program: &OsStr) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        let exe = candidate.with_extension("exe");
        exe.is_file().then_some(exe)
    })
}

impl FontEngine for FontForgeEngine {
    async fn run(
        &self,
        job: &EngineJob,
        observer: &mut dyn FnMut(&EngineEvent),
    ) -> Result<EngineOutcome, EngineError> {
        let workdir = tempfile::tempdir()?;
        let driver_path = workdir.path().join("fontsmith_driver.py");
        let job_path = workdir.path().join("job.json");
        tokio::fs::write(&driver_path, DRIVER_SCRIPT).await?;
        tokio::fs::write(&job_path, serde_json::to_vec_pretty(job)?).await?;

        info!(
            "Running {} on {}",
            self.executable.display(),
            job.source.display()
        );
        let mut child = Command::new(&self.executable)
            .arg("-quiet")
            .arg("-lang=py")
            .arg("-script")
            .arg(&driver_path)
            .arg(&job_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::Spawn {
                executable: self.executable.clone(),
                source,
            })?;

        let stdout = child.stdout.take().ok_or(EngineError::MissingPipe("stdout"))?;
        let mut stderr = child.stderr.take().ok_or(EngineError::MissingPipe("stderr"))?;

        let mut outcome = EngineOutcome::default();
        let read_events = async {
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines.next_line().await? {
                match EngineEvent::parse_line(&line) {
                    Some(event) => {
                        outcome.record(&event);
                        observer(&event);
                    }
                    None if !line.trim().is_empty() => debug!(target: "fontforge", "{}", line),
                    None => {}
                }
            }
            Ok::<_, std::io::Error>(())
        };
        let read_stderr = async {
            let mut buffer = String::new();
            stderr.read_to_string(&mut buffer).await.map(|_| buffer)
        };
        let (events, stderr_text) = tokio::join!(read_events, read_stderr);
        events?;
        let stderr_text = stderr_text?;

        let status = child.wait().await?;
        if !status.success() {
            return Err(EngineError::Failed {
                status: status.to_string(),
                stderr: stderr_text.trim().to_string(),
            });
        }
        for line in stderr_text.lines().filter(|line| !line.trim().is_empty()) {
            debug!(target: "fontforge", "{}", line);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_handles_every_operation() {
        for op in [
            "set_names",
            "set_version",
            "optimize_for_cleartype",
            "sync_vertical_metrics",
            "set_gasp",
            "unlink_references",
            "simplify",
            "corner_near_axis_segments",
            "canonical_contours",
            "canonical_start",
            "remove_overlap",
            "correct_direction",
            "round",
            "auto_hint",
            "round_width",
            "balance",
            "cluster",
        ] {
            assert!(
                DRIVER_SCRIPT.contains(&format!("\"{op}\"")),
                "driver does not handle {op}"
            );
        }
    }

    #[test]
    fn configured_path_must_exist() {
        let result = FontForgeEngine::locate(Some(Path::new("/nonexistent/fontforge")));
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn configured_path_is_used_when_present() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let engine = FontForgeEngine::locate(Some(file.path())).unwrap();
        assert_eq!(engine.executable(), file.path());
    }
}
