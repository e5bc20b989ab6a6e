use bevy::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::html::multiline_html;
use super::hud::HudState;

const RECORD_INDICATOR_ID: &str = "record-indicator";
const SAMPLE_RATE_ID: &str = "sample-rate";
const TOAST_ID: &str = "toast";
const INSTRUCTIONS_ID: &str = "instructions";

/// Handles to the host page's status elements. Missing ones stay `None` and are skipped.
pub struct DomOverlay {
    record_indicator: Option<HtmlElement>,
    sample_rate: Option<HtmlElement>,
    toast: Option<HtmlElement>,
    instructions: Option<HtmlElement>,
}

impl DomOverlay {
    pub fn locate() -> Self {
        let document = web_sys::window().and_then(|window| window.document());
        if document.is_none() {
            warn!("HUD: document not available, status elements disabled");
        }

        let find = |id: &str| -> Option<HtmlElement> {
            let element = document
                .as_ref()?
                .get_element_by_id(id)
                .and_then(|element| element.dyn_into::<HtmlElement>().ok());
            if element.is_none() {
                warn!("HUD: element #{} not found, skipping", id);
            }
            element
        };

        Self {
            record_indicator: find(RECORD_INDICATOR_ID),
            sample_rate: find(SAMPLE_RATE_ID),
            toast: find(TOAST_ID),
            instructions: find(INSTRUCTIONS_ID),
        }
    }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        error!("HUD: failed to set {}: {:?}", property, e);
    }
}

pub fn setup_dom_overlay(world: &mut World) {
    world.insert_non_send_resource(DomOverlay::locate());
}

/// Mirror `HudState` into the page whenever it changes.
pub fn sync_dom_overlay(hud: Res<HudState>, overlay: NonSend<DomOverlay>) {
    if !hud.is_changed() {
        return;
    }

    if let Some(indicator) = &overlay.record_indicator {
        let border = hud.indicator_border().to_srgba().to_hex();
        set_style(indicator, "border-color", &border);
        indicator.set_text_content(Some(hud.indicator_label()));
    }

    if let Some(sample_rate) = &overlay.sample_rate {
        sample_rate.set_text_content(Some(&hud.sample_rate_label()));
    }

    if let Some(toast) = &overlay.toast {
        match hud.visible_toast() {
            Some(message) => {
                toast.set_text_content(Some(message));
                set_style(toast, "opacity", "1");
            }
            None => set_style(toast, "opacity", "0"),
        }
    }

    if let Some(instructions) = &overlay.instructions {
        instructions.set_inner_html(&multiline_html(&hud.instructions));
    }
}
