use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

fn is_mobile_now(breakpoint_px: u32) -> bool {
    web_sys::window()
        .and_then(|win| win.inner_width().ok())
        .and_then(|w| w.as_f64())
        .map(|w| w < breakpoint_px as f64)
        .unwrap_or(false)
}

/// `true` while the window is narrower than `breakpoint_px`, tracked across resizes.
#[hook]
pub fn use_is_mobile(breakpoint_px: u32) -> bool {
    let is_mobile = use_state_eq(|| is_mobile_now(breakpoint_px));
    {
        let is_mobile = is_mobile.clone();
        use_effect_with(breakpoint_px, move |&bp| {
            is_mobile.set(is_mobile_now(bp));
            let window = web_sys::window();
            let resize_cb = Closure::wrap(Box::new(move || {
                is_mobile.set(is_mobile_now(bp));
            }) as Box<dyn FnMut()>);
            if let Some(win) = &window {
                win.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                    .ok();
            }
            move || {
                if let Some(win) = &window {
                    let _ = win.remove_event_listener_with_callback(
                        "resize",
                        resize_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }
    *is_mobile
}
