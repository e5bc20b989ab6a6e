use bevy::prelude::*;

/// `Loading` waits on `viewer_config.json`; everything interactive runs in `Running`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}
