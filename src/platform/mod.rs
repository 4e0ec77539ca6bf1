// Platform capabilities the composer hands its poem to: the system
// clipboard and an external "share to apps" command.

pub mod clipboard;
pub mod share;

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

/// How long to wait for stderr once a failed command has exited.
const STDERR_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("{0}")]
    Unavailable(String),
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Run `argv`, feeding `input` on stdin, and fail on a non-zero exit.
pub(crate) async fn run_with_stdin(
    argv: &[String],
    input: &[u8],
    envs: &[(&str, &str)],
) -> Result<(), PlatformError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(PlatformError::Unavailable("empty command".to_string()));
    };

    let mut child = Command::new(program)
        .args(args)
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| PlatformError::Spawn {
            program: program.clone(),
            source,
        })?;

    // Read stderr alongside the child. Copy tools like xclip fork a helper
    // that keeps the pipe open after the command itself has exited.
    let mut stderr_task = child.stderr.take().map(|mut stderr| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf).await.ok();
            buf
        })
    });

    if let Some(mut stdin) = child.stdin.take() {
        // A command may exit without reading its input; its status decides.
        if let Err(e) = stdin.write_all(input).await {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
        // Dropping stdin closes the pipe so the command sees EOF.
    }

    let status = child.wait().await?;
    if status.success() {
        if let Some(task) = stderr_task {
            task.abort();
        }
        return Ok(());
    }

    let stderr = match stderr_task.as_mut() {
        Some(task) => match tokio::time::timeout(STDERR_GRACE, &mut *task).await {
            Ok(Ok(buf)) => buf,
            _ => {
                task.abort();
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    Err(PlatformError::CommandFailed {
        program: program.clone(),
        status,
        stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
    })
}
