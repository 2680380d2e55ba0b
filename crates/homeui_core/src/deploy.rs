/// First line written to the output panel when a deploy starts.
pub const BUILD_START_MESSAGE: &str = "Building....\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeployPhase {
    #[default]
    Idle,
    Streaming,
}

/// Deploy form with a streamed build-output panel.
///
/// The submit control is disabled for the whole lifetime of a request and
/// re-enabled exactly once on the terminal outcome, success or failure, so
/// the user is never locked out of retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployState {
    action_url: String,
    phase: DeployPhase,
    transcript: String,
    submit_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployMsg {
    /// User submitted the deploy form.
    SubmitPressed,
    /// One decoded chunk of build output arrived.
    ChunkReceived(String),
    /// The response stream terminated; `error` is set on failure.
    StreamClosed { error: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEffect {
    /// Issue the POST and stream the response back as `ChunkReceived`.
    StartRequest { url: String },
    /// Scroll the output panel to its bottom.
    ScrollOutput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployView {
    pub transcript: String,
    pub submit_enabled: bool,
    pub streaming: bool,
}

impl DeployState {
    pub fn new(action_url: impl Into<String>) -> Self {
        Self {
            action_url: action_url.into(),
            phase: DeployPhase::Idle,
            transcript: String::new(),
            submit_enabled: true,
        }
    }

    pub fn view(&self) -> DeployView {
        DeployView {
            transcript: self.transcript.clone(),
            submit_enabled: self.submit_enabled,
            streaming: self.phase == DeployPhase::Streaming,
        }
    }
}

/// Pure update function: applies a message to the viewer and returns any effects.
pub fn update_deploy(mut state: DeployState, msg: DeployMsg) -> (DeployState, Vec<DeployEffect>) {
    let effects = match msg {
        DeployMsg::SubmitPressed => {
            if state.phase == DeployPhase::Streaming {
                return (state, Vec::new());
            }
            state.phase = DeployPhase::Streaming;
            state.submit_enabled = false;
            state.transcript.clear();
            state.transcript.push_str(BUILD_START_MESSAGE);
            vec![DeployEffect::StartRequest {
                url: state.action_url.clone(),
            }]
        }
        DeployMsg::ChunkReceived(text) => {
            // A chunk arriving after the stream closed has nowhere to go.
            if state.phase != DeployPhase::Streaming {
                return (state, Vec::new());
            }
            state.transcript.push_str(&text);
            vec![DeployEffect::ScrollOutput]
        }
        DeployMsg::StreamClosed { error } => {
            if state.phase != DeployPhase::Streaming {
                return (state, Vec::new());
            }
            state.phase = DeployPhase::Idle;
            state.submit_enabled = true;
            match error {
                Some(message) => {
                    state.transcript.push_str("\nDeploy failed: ");
                    state.transcript.push_str(&message);
                    state.transcript.push('\n');
                    vec![DeployEffect::ScrollOutput]
                }
                None => Vec::new(),
            }
        }
    };

    (state, effects)
}
