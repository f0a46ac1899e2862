use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Accepts one alert string at a time. Fire-and-forget: implementations
/// must return immediately and never block the tick.
pub trait VoiceSink: Send {
    fn announce(&self, message: &str);
}

/// Discards alerts; for tests and headless runs.
pub struct NullVoice;

impl VoiceSink for NullVoice {
    fn announce(&self, _message: &str) {}
}

/// Queue-backed annunciator: `announce` pushes onto an unbounded channel
/// and a background task drains it, speaking each phrase through the OS
/// `say` command where available. Phrases play sequentially so overlapping
/// alerts do not talk over each other.
pub struct WorkerVoice {
    tx: mpsc::UnboundedSender<String>,
}

impl WorkerVoice {
    /// Spawns the speaker task onto the current tokio runtime.
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        tokio::spawn(async move {
            while let Some(text) = rx.recv().await {
                match tokio::process::Command::new("say")
                    .arg(&text)
                    .kill_on_drop(true)
                    .spawn()
                {
                    Ok(mut child) => {
                        let _ = child.wait().await;
                    }
                    Err(e) => debug!("no 'say' binary, voice alert logged only: {e}"),
                }
            }
        });
        Self { tx }
    }
}

impl VoiceSink for WorkerVoice {
    fn announce(&self, message: &str) {
        info!("[VOICE] {message}");
        if self.tx.send(message.to_string()).is_err() {
            warn!("voice worker gone; dropping alert");
        }
    }
}
