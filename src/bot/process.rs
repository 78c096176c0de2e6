//! Bots that run as external programs, one process per move.
//!
//! The board view is passed as the last command-line argument; the process
//! must print a single integer to standard output and exit with status 0
//! within the move time limit. Anything else is a [`BotFault`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};

use super::{excerpt, parse_move, Bot, BotFault, InvokeError};

/// Time a bot may take to answer a single move.
pub const DEFAULT_MOVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Bytes of standard output a bot may produce for one move. Standard error
/// is captured up to the same size and the rest discarded.
pub const MAX_OUTPUT: usize = 4096;

/// Why reading a bot's pipes stopped early.
enum ReadError {
    Io(std::io::Error),
    Overflow,
}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        ReadError::Io(err)
    }
}

/// An untrusted bot executable.
#[derive(Debug, Clone)]
pub struct ProcessBot {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Duration,
    name: String,
}

impl ProcessBot {
    /// Bot running `program` with the board as its only argument.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.display().to_string());
        Self {
            program,
            args: Vec::new(),
            timeout: DEFAULT_MOVE_TIMEOUT,
            name,
        }
    }

    /// Arguments placed before the board, e.g. the script for an
    /// interpreter.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the program once and return its standard output.
    ///
    /// The child is always reaped before returning: on timeout it is
    /// killed and waited for. If the returned future is dropped early the
    /// child is killed on drop.
    async fn invoke(&self, board: &str) -> Result<String, InvokeError> {
        let started = Instant::now();
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(board)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn bot {}", self.program.display()))
            .map_err(InvokeError::Host)?;

        let mut stdout = child
            .stdout
            .take()
            .context("bot stdout was not captured")
            .map_err(InvokeError::Host)?;
        let mut stderr = child
            .stderr
            .take()
            .context("bot stderr was not captured")
            .map_err(InvokeError::Host)?;

        let mut out = Vec::new();
        let mut err = Vec::new();
        let run = async {
            let read_out = async {
                let read = (&mut stdout)
                    .take(MAX_OUTPUT as u64 + 1)
                    .read_to_end(&mut out)
                    .await?;
                if read > MAX_OUTPUT {
                    return Err(ReadError::Overflow);
                }
                Ok::<_, ReadError>(())
            };
            let read_err = async {
                (&mut stderr)
                    .take(MAX_OUTPUT as u64)
                    .read_to_end(&mut err)
                    .await?;
                // keep the pipe drained so the bot never blocks on it
                tokio::io::copy(&mut stderr, &mut tokio::io::sink()).await?;
                Ok::<_, ReadError>(())
            };
            tokio::try_join!(read_out, read_err)?;
            let status = child.wait().await?;
            Ok::<_, ReadError>(status)
        };
        let finished = tokio::time::timeout(self.timeout, run).await;

        let status = match finished {
            Ok(Ok(status)) => status,
            Ok(Err(ReadError::Overflow)) => {
                log::warn!("{}: more than {} bytes of output, killing", self.name, MAX_OUTPUT);
                reap(&mut child, &self.name).await;
                return Err(BotFault::MalformedOutput {
                    output: excerpt(&String::from_utf8_lossy(&out)),
                }
                .into());
            }
            Ok(Err(ReadError::Io(e))) => {
                reap(&mut child, &self.name).await;
                return Err(InvokeError::Host(
                    anyhow::Error::new(e).context(format!("lost contact with bot {}", self.name)),
                ));
            }
            Err(_) => {
                log::warn!("{}: no answer within {:?}, killing", self.name, self.timeout);
                reap(&mut child, &self.name).await;
                return Err(BotFault::Timeout {
                    limit: self.timeout,
                }
                .into());
            }
        };
        log::debug!(
            "{}: exited with {} after {:?}",
            self.name,
            status,
            started.elapsed()
        );

        if !status.success() {
            let stderr = String::from_utf8_lossy(&err);
            return Err(BotFault::NonZeroExit {
                code: status.code(),
                stderr: excerpt(stderr.trim()),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Kill the child and wait for it so no zombie is left behind.
async fn reap(child: &mut Child, name: &str) {
    if let Err(e) = child.kill().await {
        log::debug!("{}: kill failed: {}", name, e);
    }
}

#[async_trait::async_trait]
impl Bot for ProcessBot {
    fn name(&self) -> &str {
        &self.name
    }

    async fn select_move(&mut self, board: &str) -> Result<u8, InvokeError> {
        let output = self.invoke(board).await?;
        Ok(parse_move(&output)?)
    }
}
