use std::sync::{mpsc, Arc};
use std::thread;

use crate::stream::{ChannelDeploySink, DeployStreamer, ReqwestDeployStreamer, StreamSettings};
use crate::DeployEvent;

enum EngineCommand {
    Deploy { url: String },
}

/// Bridge between a synchronous host and the async deploy stream.
///
/// One background thread owns a tokio runtime; commands go in over a channel
/// and `DeployEvent`s come back out, ending with exactly one `Closed` per
/// deploy.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<DeployEvent>,
}

impl EngineHandle {
    pub fn new(settings: StreamSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let streamer = Arc::new(ReqwestDeployStreamer::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let streamer = streamer.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(streamer.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn deploy(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Deploy { url: url.into() });
    }

    pub fn try_recv(&self) -> Option<DeployEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    streamer: &dyn DeployStreamer,
    command: EngineCommand,
    event_tx: mpsc::Sender<DeployEvent>,
) {
    match command {
        EngineCommand::Deploy { url } => {
            let sink = ChannelDeploySink::new(event_tx.clone());
            let result = streamer.deploy(&url, &sink).await;
            let _ = event_tx.send(DeployEvent::Closed { result });
        }
    }
}
