use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::convert::{Conversion, Converter};
use crate::error::Error;
use crate::model::PageRange;
use crate::pdf;

pub const DEFAULT_PROGRAM: &str = "pdf2docx";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const PROGRAM_ENV: &str = "PDF2WORD_CONVERTER";
const TIMEOUT_ENV: &str = "PDF2WORD_TIMEOUT_SECS";
const POLL_INTERVAL: Duration = Duration::from_millis(50);

// <program> [args..] convert <input> <output> --start=N [--end=M]
#[derive(Clone, Debug)]
pub struct CommandConverter {
    program: OsString,
    args: Vec<OsString>,
    timeout: Duration,
}

impl Default for CommandConverter {
    fn default() -> Self {
        CommandConverter::new(DEFAULT_PROGRAM)
    }
}

impl CommandConverter {
    pub fn new(program: impl Into<OsString>) -> Self {
        CommandConverter {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_env() -> Self {
        let mut converter = match std::env::var(PROGRAM_ENV) {
            Ok(val) => {
                let mut parts = val.split_whitespace();
                match parts.next() {
                    Some(program) => CommandConverter::new(program).with_args(parts),
                    None => CommandConverter::default(),
                }
            }
            Err(_) => CommandConverter::default(),
        };

        if let Ok(val) = std::env::var(TIMEOUT_ENV) {
            match val.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => converter.timeout = Duration::from_secs(secs),
                _ => log::warn!(
                    "ignoring {TIMEOUT_ENV}={val:?}, using {}s",
                    DEFAULT_TIMEOUT.as_secs()
                ),
            }
        }
        converter
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Converter for CommandConverter {
    type Handle = CommandConversion;

    fn open(&self, input: &Path) -> Result<CommandConversion, Error> {
        let mut input_file = File::open(input)?;
        let header = pdf::probe(&mut input_file)?;
        log::debug!("{}: PDF {}", input.display(), header.version);

        Ok(CommandConversion {
            converter: self.clone(),
            input: input.to_path_buf(),
            _input_file: input_file,
            child: None,
        })
    }
}

pub struct CommandConversion {
    converter: CommandConverter,
    input: PathBuf,
    _input_file: File,
    child: Option<Child>,
}

pub(crate) fn page_args(pages: PageRange) -> Vec<String> {
    let mut args = vec![format!("--start={}", pages.start)];
    if let Some(end) = pages.end {
        args.push(format!("--end={end}"));
    }
    args
}

fn last_diagnostic(stderr: &str) -> Option<&str> {
    stderr.lines().map(str::trim).filter(|l| !l.is_empty()).last()
}

impl CommandConversion {
    fn program_name(&self) -> String {
        self.converter.program.to_string_lossy().into_owned()
    }

    fn wait(&mut self, deadline: Instant) -> Result<ExitStatus, Error> {
        loop {
            let Some(child) = self.child.as_mut() else {
                return Err(Error::Converter("converter process is not running".into()));
            };
            if let Some(status) = child.try_wait()? {
                self.child = None;
                return Ok(status);
            }
            if Instant::now() >= deadline {
                self.release();
                return Err(Error::Timeout(self.converter.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                log::warn!("failed to kill converter process {}: {e}", child.id());
            }
            let _ = child.wait();
        }
    }
}

impl Conversion for CommandConversion {
    fn convert(&mut self, output: &Path, pages: PageRange) -> Result<(), Error> {
        let mut child = Command::new(&self.converter.program)
            .args(&self.converter.args)
            .arg("convert")
            .arg(&self.input)
            .arg(output)
            .args(page_args(pages))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Spawn(self.program_name(), e))?;

        let deadline = Instant::now() + self.converter.timeout;

        // Drain stderr off-thread so a chatty converter never blocks on a full pipe.
        let (tx, rx) = mpsc::channel();
        if let Some(mut stderr) = child.stderr.take() {
            thread::spawn(move || {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf);
                let _ = tx.send(buf);
            });
        }
        self.child = Some(child);

        let status = self.wait(deadline)?;
        // Stray grandchildren inherit the pipe; the deadline bounds them too.
        let stderr = match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(buf) => buf,
            Err(RecvTimeoutError::Disconnected) => String::new(),
            Err(RecvTimeoutError::Timeout) => {
                log::warn!(
                    "{} exited but a process it started still holds stderr open",
                    self.program_name()
                );
                return Err(Error::Timeout(self.converter.timeout));
            }
        };

        if status.success() {
            return Ok(());
        }
        let detail = last_diagnostic(&stderr).unwrap_or("no diagnostic output");
        Err(Error::Converter(format!(
            "{} exited with {status}: {detail}",
            self.program_name()
        )))
    }
}

impl Drop for CommandConversion {
    fn drop(&mut self) {
        self.release();
    }
}
