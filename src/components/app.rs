use super::{
    pinch_zoom_view::PinchZoomView,
    result_card::{PLACEHOLDER_RESULTS, ResultCard},
    swipe_area::SwipeGestureArea,
    viewport::use_is_mobile,
};
use crate::config::GestureConfig;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| GestureConfig::load());
    let is_mobile = use_is_mobile(config.mobile_breakpoint_px);
    let index = use_state(|| 0_usize);
    let expanded = use_state(|| false);
    let zoom = use_state(|| 1.0_f64);
    let status = use_state(String::new);
    let total = PLACEHOLDER_RESULTS.len();

    let next = {
        let index = index.clone();
        let expanded = expanded.clone();
        let status = status.clone();
        Callback::from(move |_: ()| {
            index.set((*index + 1) % total);
            expanded.set(false);
            status.set("Swiped left".into());
        })
    };
    let prev = {
        let index = index.clone();
        let expanded = expanded.clone();
        let status = status.clone();
        Callback::from(move |_: ()| {
            index.set((*index + total - 1) % total);
            expanded.set(false);
            status.set("Swiped right".into());
        })
    };
    let back_to_first = {
        let index = index.clone();
        let status = status.clone();
        Callback::from(move |_: ()| {
            index.set(0);
            status.set("Double tap".into());
        })
    };
    let toggle_details = {
        let expanded = expanded.clone();
        let status = status.clone();
        Callback::from(move |_: ()| {
            expanded.set(!*expanded);
            status.set("Long press".into());
        })
    };
    let on_pinch = {
        let status = status.clone();
        Callback::from(move |scale: f64| status.set(format!("Pinch {:.2}x", scale)))
    };
    let on_zoom = {
        let zoom = zoom.clone();
        Callback::from(move |scale: f64| zoom.set(scale))
    };

    let hint = if is_mobile {
        "Swipe to browse, double tap for the first result, long press for details."
    } else {
        "Gestures are available on mobile viewports."
    };

    html! {
        <div style="max-width:520px; margin:0 auto; padding:16px; display:flex; flex-direction:column; gap:14px; color:#c9d1d9; background:#0d1117;">
            <h2 style="margin:0;">{"Analysis results"}</h2>
            <div style="font-size:12px; opacity:0.7;">{ hint }</div>
            <SwipeGestureArea
                is_mobile={is_mobile}
                on_swipe_left={next}
                on_swipe_right={prev}
                on_double_tap={back_to_first}
                on_long_press={toggle_details}
                on_pinch_zoom={on_pinch}
            >
                <ResultCard
                    result={PLACEHOLDER_RESULTS[*index].clone()}
                    position={*index}
                    total={total}
                    expanded={*expanded}
                />
            </SwipeGestureArea>
            <PinchZoomView bounds={config.zoom_bounds()} on_zoom_change={on_zoom}>
                <div style="height:220px; display:flex; align-items:center; justify-content:center; border:1px dashed #30363d; border-radius:8px;">
                    {"Chart placeholder"}
                </div>
            </PinchZoomView>
            <div style="display:flex; justify-content:space-between; font-size:12px;">
                <span>{ format!("Zoom: {:.1}x", *zoom) }</span>
                <span>{ (*status).clone() }</span>
            </div>
        </div>
    }
}
