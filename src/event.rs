use std::collections::VecDeque;
use std::io::BufRead;

use tokio::sync::mpsc;

/// Line-oriented source of user choices.
#[allow(async_fn_in_trait)]
pub trait InputSource {
    /// Next line without its terminator, `None` once input is exhausted.
    async fn next_line(&mut self) -> Option<String>;
}

/// Reads stdin on a dedicated thread so a pending read never blocks the runtime.
pub struct StdinInput {
    rx: mpsc::UnboundedReceiver<String>,
}

impl Default for StdinInput {
    fn default() -> Self {
        Self::new()
    }
}

impl StdinInput {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<String>();

        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl InputSource for StdinInput {
    async fn next_line(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}

/// Replays a fixed list of lines.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    async fn next_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}
