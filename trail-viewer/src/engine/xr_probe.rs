//! WebXR capability probe and control-mode selection.
//!
//! The browser is asked once whether `immersive-vr` sessions are supported.
//! The answer only picks the control scheme and instruction text; XR sessions
//! themselves are left to the browser and headset runtime.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::engine::assets::viewer_config::{ControlPreference, ViewerConfig};
use crate::ui::hud::{DESKTOP_INSTRUCTIONS, HudState, XR_INSTRUCTIONS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlMode {
    #[default]
    Desktop,
    Xr,
}

impl ControlMode {
    pub fn instructions(self) -> &'static str {
        match self {
            ControlMode::Desktop => DESKTOP_INSTRUCTIONS,
            ControlMode::Xr => XR_INSTRUCTIONS,
        }
    }
}

/// Resolved control mode. `None` until the probe answers or the config forces a mode.
#[derive(Resource, Debug, Default)]
pub struct ControlModeState {
    pub mode: Option<ControlMode>,
}

/// Probe result written from the browser callback and drained by `resolve_control_mode`.
#[derive(Resource, Clone, Default)]
pub struct XrProbe(Arc<Mutex<Option<bool>>>);

impl XrProbe {
    pub fn report(&self, supported: bool) {
        if let Ok(mut result) = self.0.lock() {
            *result = Some(supported);
        }
    }

    pub fn result(&self) -> Option<bool> {
        self.0.lock().ok().and_then(|result| *result)
    }
}

/// `None` while an `Auto` preference still waits on the probe.
pub fn choose_control_mode(
    preference: ControlPreference,
    xr_supported: Option<bool>,
) -> Option<ControlMode> {
    match preference {
        ControlPreference::Desktop => Some(ControlMode::Desktop),
        ControlPreference::Xr => Some(ControlMode::Xr),
        ControlPreference::Auto => xr_supported.map(|supported| {
            if supported {
                ControlMode::Xr
            } else {
                ControlMode::Desktop
            }
        }),
    }
}

pub fn start_xr_probe(probe: Res<XrProbe>) {
    #[cfg(target_arch = "wasm32")]
    {
        let probe = probe.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let supported = match probe_immersive_vr().await {
                Ok(supported) => supported,
                Err(e) => {
                    warn!("navigator.xr unavailable or isSessionSupported failed: {:?}", e);
                    false
                }
            };
            probe.report(supported);
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        probe.report(false);
    }
}

#[cfg(target_arch = "wasm32")]
async fn probe_immersive_vr() -> Result<bool, wasm_bindgen::JsValue> {
    use js_sys::{Function, Promise, Reflect};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let navigator = window.navigator();

    let xr = Reflect::get(&navigator, &JsValue::from_str("xr"))?;
    if xr.is_undefined() || xr.is_null() {
        return Ok(false);
    }

    let is_session_supported: Function =
        Reflect::get(&xr, &JsValue::from_str("isSessionSupported"))?.dyn_into()?;
    let promise: Promise = is_session_supported
        .call1(&xr, &JsValue::from_str("immersive-vr"))?
        .dyn_into()?;

    let supported = JsFuture::from(promise).await?;
    Ok(supported.as_bool().unwrap_or(false))
}

pub fn resolve_control_mode(
    probe: Res<XrProbe>,
    config: Res<ViewerConfig>,
    mut state: ResMut<ControlModeState>,
    mut hud: ResMut<HudState>,
) {
    if state.mode.is_some() {
        return;
    }
    let Some(mode) = choose_control_mode(config.control_mode, probe.result()) else {
        return;
    };

    match mode {
        ControlMode::Xr => info!("Immersive VR supported, using XR instructions"),
        ControlMode::Desktop => {
            info!("VR not supported or XR context failed, setting up Desktop controls.")
        }
    }

    state.mode = Some(mode);
    hud.set_instructions(mode.instructions());
}

/// Run condition for pointer-lock movement.
pub fn desktop_controls_active(state: Res<ControlModeState>) -> bool {
    state.mode == Some(ControlMode::Desktop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_follows_the_probe() {
        assert_eq!(choose_control_mode(ControlPreference::Auto, None), None);
        assert_eq!(
            choose_control_mode(ControlPreference::Auto, Some(true)),
            Some(ControlMode::Xr)
        );
        assert_eq!(
            choose_control_mode(ControlPreference::Auto, Some(false)),
            Some(ControlMode::Desktop)
        );
    }

    #[test]
    fn forced_modes_ignore_the_probe() {
        assert_eq!(
            choose_control_mode(ControlPreference::Desktop, Some(true)),
            Some(ControlMode::Desktop)
        );
        assert_eq!(
            choose_control_mode(ControlPreference::Xr, None),
            Some(ControlMode::Xr)
        );
    }

    #[test]
    fn probe_result_is_shared_between_clones() {
        let probe = XrProbe::default();
        let callback_side = probe.clone();
        assert_eq!(probe.result(), None);

        callback_side.report(true);
        assert_eq!(probe.result(), Some(true));
    }

    #[test]
    fn native_probe_resolves_to_desktop_instructions() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<XrProbe>()
            .init_resource::<ViewerConfig>()
            .init_resource::<ControlModeState>()
            .init_resource::<HudState>()
            .add_systems(Startup, start_xr_probe)
            .add_systems(Update, resolve_control_mode);
        app.update();

        assert_eq!(
            app.world().resource::<ControlModeState>().mode,
            Some(ControlMode::Desktop)
        );
        assert_eq!(
            app.world().resource::<HudState>().instructions,
            DESKTOP_INSTRUCTIONS
        );
    }
}
