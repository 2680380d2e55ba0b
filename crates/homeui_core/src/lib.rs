//! Home-page UI core: pure state machines for the page components.
//!
//! The two components here (app filter, deploy stream viewer) are modelled as
//! `State` + `Msg` + `update` with explicit effects, so the IO layer and any
//! host can drive them without the core ever touching a clock or the network.
mod deploy;
mod filter;

pub use deploy::{
    update_deploy, DeployEffect, DeployMsg, DeployPhase, DeployState, DeployView,
    BUILD_START_MESSAGE,
};
pub use filter::{
    app_noun, normalize, update_filter, AppItem, AppRowView, FilterEffect, FilterMsg, FilterState,
    FilterView, DEBOUNCE_MS,
};
