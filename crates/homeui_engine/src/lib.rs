//! Home-page UI engine: streaming deploy IO and screenshot capture.
mod capture;
mod decode;
mod engine;
mod persist;
mod stream;
mod types;

pub use capture::{
    run_capture, CaptureConfig, ChromiumPageDriver, PageDriver, DEFAULT_OUTPUT_PATH,
    DEFAULT_TARGET_URL, VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};
pub use decode::ChunkDecoder;
pub use engine::EngineHandle;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use stream::{
    ChannelDeploySink, DeploySink, DeployStreamer, ReqwestDeployStreamer, StreamSettings,
};
pub use types::{
    CaptureError, CaptureOutcome, DeployEvent, NavigationOutcome, StreamError, StreamFailureKind,
};
