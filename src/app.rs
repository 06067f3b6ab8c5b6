use std::time::Duration;

use crate::action::{MenuChoice, MenuInput, Operation, OutputFormat, parse_menu_input};
use crate::activity::ActivityLog;
use crate::config::parse_interval;
use crate::event::InputSource;
use crate::shutdown::Shutdown;
use crate::system::collector::Collector;
use crate::system::metrics::{cpu_utilization, memory_usage};
use crate::system::process::top_n;
use crate::ui::Display;
use crate::ui::report::{self, Report};

/// Gap between the two CPU counter reads.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);
const INVALID_INPUT_PAUSE: Duration = Duration::from_secs(1);

/// Drives sampling operations against a display and an activity log.
///
/// Nothing is carried between operations; each one reads fresh counters.
pub struct App<D: Display> {
    collector: Collector,
    display: D,
    activity: ActivityLog,
    shutdown: Shutdown,
    top_n: usize,
    format: OutputFormat,
}

impl<D: Display> App<D> {
    pub fn new(collector: Collector, display: D, shutdown: Shutdown) -> Self {
        App {
            collector,
            display,
            activity: ActivityLog::disabled(),
            shutdown,
            top_n: 5,
            format: OutputFormat::Text,
        }
    }

    pub fn with_activity(mut self, activity: ActivityLog) -> Self {
        self.activity = activity;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Samples and reports one operation.
    pub async fn run_operation(&mut self, operation: Operation) {
        if operation == Operation::Cpu && self.format == OutputFormat::Text {
            self.display.print(&report::cpu_header());
        }

        let report = self.collect(operation).await;
        if let Some(message) = report.activity_message() {
            self.activity.record(&message);
        }

        let text = match self.format {
            OutputFormat::Text => report::render(&report),
            OutputFormat::Json => match serde_json::to_string(&report) {
                Ok(json) => format!("{json}\n"),
                Err(err) => {
                    tracing::error!(%err, "failed to serialize report");
                    return;
                }
            },
        };
        self.display.print(&text);
    }

    async fn collect(&self, operation: Operation) -> Report {
        let result = match operation {
            Operation::Cpu => self
                .sample_cpu()
                .await
                .map(|usage_percent| Report::Cpu { usage_percent }),
            Operation::Memory => self
                .collector
                .read_memory_counters()
                .map(|counters| Report::Memory {
                    usage: memory_usage(&counters),
                }),
            Operation::Processes => self.collector.enumerate().map(|records| Report::Processes {
                top: self.top_n,
                processes: top_n(records, self.top_n),
            }),
        };

        result.unwrap_or_else(|err| {
            tracing::warn!(?operation, %err, "sampling failed");
            Report::Error {
                operation,
                message: err.to_string(),
            }
        })
    }

    /// CPU utilization over one sample window.
    ///
    /// A cancelled window still takes the second reading, over a shorter span.
    async fn sample_cpu(&self) -> Result<f64, crate::error::SampleError> {
        let prev = self.collector.read_cpu_counters()?;
        self.shutdown.sleep(CPU_SAMPLE_WINDOW).await;
        let curr = self.collector.read_cpu_counters()?;
        Ok(cpu_utilization(&prev, &curr))
    }

    /// Refreshes every operation each `interval_secs` until cancelled.
    ///
    /// Cancellation is checked before each cycle and cuts the interval sleep
    /// short, so no new cycle starts after it. In JSON mode only the reports
    /// are written, one object per line.
    pub async fn run_continuous(&mut self, interval_secs: u64) {
        let text = self.format == OutputFormat::Text;
        if text {
            self.display.print("\nStarting Continuous Monitoring... (Press Ctrl+C to stop)\n");
        }
        self.activity.record("Started Continuous Monitoring.");

        while !self.shutdown.is_cancelled() {
            if text {
                self.display.clear();
                self.display.print(&report::continuous_banner(interval_secs));
            }

            for operation in [Operation::Cpu, Operation::Memory, Operation::Processes] {
                self.run_operation(operation).await;
            }

            if text {
                self.display.print(&report::refreshing_in(interval_secs));
            }
            self.shutdown.sleep(Duration::from_secs(interval_secs)).await;
        }

        if text {
            self.display.print("\nContinuous monitoring stopped.\n");
        }
    }

    /// Continuous mode as a whole session: runs until cancelled, then logs
    /// the session end.
    pub async fn run_monitor(&mut self, interval_secs: u64) {
        self.run_continuous(interval_secs).await;
        self.activity.record("System Monitor terminated (Continuous Mode).");
    }

    /// Interactive menu loop. Ends on Exit, end of input, or cancellation.
    pub async fn run_menu<I: InputSource>(&mut self, input: &mut I) {
        self.activity.record("System Monitor started.");

        while !self.shutdown.is_cancelled() {
            self.display.clear();
            self.display.print(&report::menu(self.top_n));
            self.display.print("Enter your choice: ");

            let Some(line) = self.read_line(input).await else {
                break;
            };

            match parse_menu_input(&line) {
                MenuInput::Invalid => {
                    self.display.print("Invalid input. Please enter a number.\n");
                    self.shutdown.sleep(INVALID_INPUT_PAUSE).await;
                    continue;
                }
                MenuInput::Unknown(_) => {
                    self.display.print("Invalid choice. Please try again.\n");
                }
                MenuInput::Choice(MenuChoice::Run(operation)) => {
                    self.run_operation(operation).await;
                }
                MenuInput::Choice(MenuChoice::Continuous) => {
                    self.display.print("Enter refresh interval (seconds): ");
                    let Some(line) = self.read_line(input).await else {
                        break;
                    };
                    match parse_interval(&line) {
                        Ok(secs) => self.run_continuous(secs).await,
                        Err(reason) => {
                            self.display.print(&format!("Invalid interval: {reason}\n"));
                        }
                    }
                }
                MenuInput::Choice(MenuChoice::Exit) => {
                    self.display.print("Exiting sysmon...\n");
                    self.activity.record("System Monitor exited by user.");
                    return;
                }
            }

            if !self.shutdown.is_cancelled() {
                self.display.print("\nPress Enter to return to menu...");
                if self.read_line(input).await.is_none() {
                    break;
                }
            }
        }

        self.activity.record("System Monitor terminated.");
    }

    async fn read_line<I: InputSource>(&self, input: &mut I) -> Option<String> {
        tokio::select! {
            line = input.next_line() => line,
            _ = self.shutdown.cancelled() => None,
        }
    }
}
