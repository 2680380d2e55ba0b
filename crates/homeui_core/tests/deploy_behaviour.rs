use std::sync::Once;

use homeui_core::{
    update_deploy, DeployEffect, DeployMsg, DeployState, BUILD_START_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(ui_logging::initialize_for_tests);
}

fn submit(state: DeployState) -> DeployState {
    let (state, _) = update_deploy(state, DeployMsg::SubmitPressed);
    state
}

#[test]
fn submit_seeds_output_and_starts_request() {
    init_logging();
    let state = DeployState::new("/apps/my-app/deploy");
    let (state, effects) = update_deploy(state, DeployMsg::SubmitPressed);
    let view = state.view();

    assert_eq!(view.transcript, BUILD_START_MESSAGE);
    assert!(!view.submit_enabled);
    assert!(view.streaming);
    assert_eq!(
        effects,
        vec![DeployEffect::StartRequest {
            url: "/apps/my-app/deploy".to_string(),
        }]
    );
}

#[test]
fn submit_while_streaming_is_ignored() {
    init_logging();
    let state = submit(DeployState::new("/deploy"));
    let before = state.view();

    let (state, effects) = update_deploy(state, DeployMsg::SubmitPressed);
    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}

#[test]
fn resubmit_clears_previous_transcript() {
    init_logging();
    let state = submit(DeployState::new("/deploy"));
    let (state, _) = update_deploy(state, DeployMsg::ChunkReceived("old run\n".to_string()));
    let (state, _) = update_deploy(state, DeployMsg::StreamClosed { error: None });

    let state = submit(state);
    assert_eq!(state.view().transcript, BUILD_START_MESSAGE);
}

#[test]
fn chunks_append_in_arrival_order() {
    init_logging();
    let state = submit(DeployState::new("/deploy"));

    let chunks = ["fetching\n", "compiling\n", "done\n"];
    let mut state = state;
    for chunk in chunks {
        let (next, effects) = update_deploy(state, DeployMsg::ChunkReceived(chunk.to_string()));
        assert_eq!(effects, vec![DeployEffect::ScrollOutput]);
        state = next;
    }

    let expected = format!("{BUILD_START_MESSAGE}{}", chunks.concat());
    assert_eq!(state.view().transcript, expected);
}

#[test]
fn close_reenables_submit_exactly_once() {
    init_logging();
    let state = submit(DeployState::new("/deploy"));
    let (state, effects) = update_deploy(state, DeployMsg::StreamClosed { error: None });
    assert!(effects.is_empty());
    assert!(state.view().submit_enabled);
    assert!(!state.view().streaming);

    // A second close is a stray event and must not disturb anything.
    let before = state.view();
    let (state, effects) = update_deploy(state, DeployMsg::StreamClosed { error: None });
    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}

#[test]
fn failed_stream_reenables_submit_and_reports() {
    init_logging();
    let state = submit(DeployState::new("/deploy"));
    let (state, _) = update_deploy(state, DeployMsg::ChunkReceived("partial".to_string()));
    let (state, effects) = update_deploy(
        state,
        DeployMsg::StreamClosed {
            error: Some("connection reset".to_string()),
        },
    );
    let view = state.view();

    assert!(view.submit_enabled);
    assert!(view.transcript.contains("partial"));
    assert!(view.transcript.contains("Deploy failed: connection reset"));
    assert_eq!(effects, vec![DeployEffect::ScrollOutput]);
}

#[test]
fn chunk_after_close_is_dropped() {
    init_logging();
    let state = submit(DeployState::new("/deploy"));
    let (state, _) = update_deploy(state, DeployMsg::StreamClosed { error: None });
    let before = state.view();

    let (state, effects) = update_deploy(state, DeployMsg::ChunkReceived("late".to_string()));
    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}
