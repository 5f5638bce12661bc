//! Interactive mode.
//!
//! Started when the binary is run without arguments. Offers a small menu and
//! collects the same fields as the command line, one prompt at a time. Empty
//! input takes the default; invalid input is explained and asked again. The
//! answers go through the same [`ScanConfig`] builder as parsed arguments.
//!
//! Lines are read on a dedicated thread and handed over through a channel,
//! so every prompt can be raced against Ctrl-C. Ctrl-C while answering the
//! prompts returns to the menu; at the menu or during a scan it ends
//! interactive mode.

use crate::cli::{interrupt, ScanCommand};
use crate::config::{AppSettings, ScanConfig, Verbosity};
use crate::error::{CliError, CliResult};
use crate::logging;
use crate::output::{self, OutputFormat};
use crate::resolver::AddressResolver;
use crate::types::{Port, ResolvedTarget};
use std::fmt::Display;
use std::future::Future;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::thread;
use tokio::sync::mpsc;

/// What the operator picked from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    Scan,
}

/// Everything collected for one scan.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub config: ScanConfig,
    pub target: ResolvedTarget,
}

/// Line-oriented prompts over a channel of input lines.
///
/// A closed channel is treated as a request to leave interactive mode.
pub struct Prompter<W> {
    input: mpsc::Receiver<String>,
    output: W,
}

impl<W: Write> Prompter<W> {
    pub fn new(input: mpsc::Receiver<String>, output: W) -> Self {
        Self { input, output }
    }

    /// Prompter reading from the process's standard input.
    pub fn stdin(output: W) -> Self {
        Self::new(spawn_stdin_reader(), output)
    }

    /// Print the greeting shown once on start-up.
    pub fn welcome(&mut self) -> io::Result<()> {
        let version = format!("Version: {}", env!("CARGO_PKG_VERSION"));
        writeln!(self.output, "*******SimplePortScanner*******")?;
        writeln!(self.output, "*   {:<26}*", version)?;
        writeln!(self.output, "*******************************")?;
        writeln!(self.output, "Welcome to Simple Port Scanner!")
    }

    /// Ask until a valid menu entry is given. End of input means exit.
    pub async fn menu_choice(&mut self) -> io::Result<MenuChoice> {
        loop {
            writeln!(self.output, "Type in the number corresponding to desired action:")?;
            writeln!(self.output, "0 - Exit")?;
            writeln!(self.output, "1 - Scan host")?;
            match self.ask("Enter your choice:").await?.as_deref() {
                None | Some("0") => return Ok(MenuChoice::Exit),
                Some("1") => return Ok(MenuChoice::Scan),
                Some(_) => writeln!(self.output, "Please enter the correct choice number.")?,
            }
        }
    }

    /// Collect every scan parameter. The host is resolved as soon as it is
    /// entered. `None` if input ends part-way.
    pub async fn scan_request(
        &mut self,
        settings: &AppSettings,
        resolver: &dyn AddressResolver,
    ) -> CliResult<Option<ScanRequest>> {
        let Some(target) = self.ask_host(resolver).await? else {
            return Ok(None);
        };
        let Some(start) = self
            .ask_value(
                "Enter the first port in scanning range",
                "first port",
                Port::new(Port::MIN),
                |p: Port| Ok(p),
            )
            .await?
        else {
            return Ok(None);
        };
        let Some(end) = self
            .ask_value(
                "Enter the last port in scanning range",
                "last port",
                Port::new(Port::MAX),
                |p: Port| {
                    if p < start {
                        Err(format!("must not be less than the first port ({start})"))
                    } else {
                        Ok(p)
                    }
                },
            )
            .await?
        else {
            return Ok(None);
        };
        let Some(timeout) = self
            .ask_value(
                "Enter the connection timeout to use in seconds",
                "timeout",
                Some(settings.timeout_secs),
                non_negative_secs,
            )
            .await?
        else {
            return Ok(None);
        };
        let Some(verbosity) = self.ask_verbosity().await? else {
            return Ok(None);
        };
        let Some(batch) = self
            .ask_value(
                "Enter the maximum size of a batch of concurrent port scans",
                "batch",
                Some(settings.batch_size),
                |n: usize| {
                    if n == 0 {
                        Err("must be a positive integer number".to_string())
                    } else {
                        Ok(n)
                    }
                },
            )
            .await?
        else {
            return Ok(None);
        };
        let Some(interval) = self
            .ask_value(
                "Enter the time interval in seconds between successive batches of concurrent port scans",
                "interval",
                Some(settings.interval_secs),
                non_negative_secs,
            )
            .await?
        else {
            return Ok(None);
        };

        let config = ScanConfig::builder(target.host.as_str())
            .with_start_port(start.as_u16())
            .with_end_port(end.as_u16())
            .with_timeout_secs(timeout)
            .with_batch_size(batch)
            .with_interval_secs(interval)
            .with_verbosity(verbosity)
            .build()?;
        Ok(Some(ScanRequest { config, target }))
    }

    async fn ask_host(
        &mut self,
        resolver: &dyn AddressResolver,
    ) -> io::Result<Option<ResolvedTarget>> {
        loop {
            let Some(host) = self.ask("Enter host name or IP for scanning:").await? else {
                return Ok(None);
            };
            match resolver.resolve(&host).await {
                Ok(target) => return Ok(Some(target)),
                Err(e) => writeln!(self.output, "Invalid host value: {e}")?,
            }
        }
    }

    async fn ask_verbosity(&mut self) -> io::Result<Option<Verbosity>> {
        loop {
            let answer = self
                .ask("Display detailed information during execution?[(Y)es/(N)o] (default: No):")
                .await?;
            match answer.map(|a| a.to_lowercase()).as_deref() {
                None => return Ok(None),
                Some("y" | "yes") => return Ok(Some(Verbosity::Verbose)),
                Some("" | "n" | "no") => return Ok(Some(Verbosity::Normal)),
                Some(_) => writeln!(
                    self.output,
                    "Please enter (Y)es or (N)o, or press [Enter] for default."
                )?,
            }
        }
    }

    /// Prompt for a value of type `T`, showing `default` and re-asking until
    /// the input parses and passes `check`.
    async fn ask_value<T, F>(
        &mut self,
        prompt: &str,
        name: &str,
        default: Option<T>,
        check: F,
    ) -> io::Result<Option<T>>
    where
        T: FromStr + Display + Copy,
        T::Err: Display,
        F: Fn(T) -> Result<T, String>,
    {
        let prompt = match default {
            Some(d) => format!("{prompt} (default: {d}):"),
            None => format!("{prompt}:"),
        };
        loop {
            let Some(answer) = self.ask(&prompt).await? else {
                return Ok(None);
            };
            let parsed = if answer.is_empty() {
                default.ok_or_else(|| "a value is required".to_string())
            } else {
                answer.parse::<T>().map_err(|e| e.to_string())
            };
            match parsed.and_then(&check) {
                Ok(value) => return Ok(Some(value)),
                Err(reason) => writeln!(self.output, "Invalid {name} value: {reason}")?,
            }
        }
    }

    /// Print `prompt` and wait for one trimmed line. `None` on end of input.
    async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        match self.input.recv().await {
            Some(line) => Ok(Some(line.trim().to_string())),
            None => {
                writeln!(self.output)?;
                Ok(None)
            }
        }
    }
}

/// Forward stdin lines into a channel from a plain thread.
///
/// The thread is never joined; it ends with the process or at end of input.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(1);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn non_negative_secs(secs: f64) -> Result<f64, String> {
    if secs.is_finite() && secs >= 0.0 {
        Ok(secs)
    } else {
        Err("must be a non-negative floating point number".to_string())
    }
}

/// Run the menu loop until the operator exits, input ends, or Ctrl-C is
/// pressed outside the prompts.
pub async fn run<W: Write>(
    prompter: &mut Prompter<W>,
    settings: &AppSettings,
    resolver: &dyn AddressResolver,
) -> CliResult<()> {
    run_until(prompter, settings, resolver, interrupt::ctrl_c).await
}

/// [`run`] with the interrupt source supplied by the caller. `interrupt` is
/// called afresh for every wait on the operator.
///
/// A failed scan is reported and the menu shown again.
pub async fn run_until<W, F, Fut>(
    prompter: &mut Prompter<W>,
    settings: &AppSettings,
    resolver: &dyn AddressResolver,
    mut interrupt: F,
) -> CliResult<()>
where
    W: Write,
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    prompter.welcome()?;
    loop {
        let choice = tokio::select! {
            biased;
            () = interrupt() => return Err(CliError::Cancelled),
            choice = prompter.menu_choice() => choice?,
        };
        if choice == MenuChoice::Exit {
            return Ok(());
        }

        let request = tokio::select! {
            biased;
            () = interrupt() => {
                writeln!(prompter.output)?;
                continue;
            }
            request = prompter.scan_request(settings, resolver) => request?,
        };
        let Some(request) = request else {
            return Ok(());
        };

        logging::set_verbosity(request.config.verbosity());
        let command = ScanCommand::new(request.config, OutputFormat::Plain);
        match command.execute_until(&request.target, interrupt()).await {
            Ok(_) => {}
            Err(e @ CliError::Interrupted(_)) => return Err(e),
            Err(e) => output::print_error(&e.to_string()),
        }
    }
}
