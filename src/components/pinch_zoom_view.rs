use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlElement;
use yew::prelude::*;

use super::swipe_area::TOUCH_EVENTS;
use crate::model::{Point, TouchEvent, Transform};
use crate::state::{PinchZoomController, ZoomBounds};

#[derive(Properties, PartialEq, Clone)]
pub struct PinchZoomViewProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub bounds: Option<ZoomBounds>,
    #[prop_or_default]
    pub on_zoom_change: Option<Callback<f64>>,
}

/// Zoomable viewport: two-finger pinch scales, one finger pans once zoomed,
/// double-tap or double-click toggles 1x/2x.
#[function_component]
pub fn PinchZoomView(props: &PinchZoomViewProps) -> Html {
    let node = use_node_ref();
    let bounds = props.bounds.unwrap_or_default();
    let controller = use_mut_ref(|| PinchZoomController::new(bounds));
    let transform = use_state_eq(Transform::default);
    let on_zoom_ref = use_mut_ref(|| None::<Callback<f64>>);
    *on_zoom_ref.borrow_mut() = props.on_zoom_change.clone();

    if let Ok(mut c) = controller.try_borrow_mut() {
        if c.bounds() != bounds {
            c.set_bounds(bounds);
        }
    }

    {
        let node = node.clone();
        let controller = controller.clone();
        let transform = transform.clone();
        let on_zoom_ref = on_zoom_ref.clone();
        use_effect_with((), move |_| {
            let listener = node.cast::<HtmlElement>().map(|el| {
                let el_tc = el.clone();
                let cb = Closure::wrap(Box::new(move |e: web_sys::TouchEvent| {
                    // This view owns the gesture; the page must not scroll or zoom.
                    if e.type_() == "touchmove" {
                        e.prevent_default();
                    }
                    let rect = el_tc.get_bounding_client_rect();
                    let Some(ev) = TouchEvent::from_dom(&e, Point::new(rect.left(), rect.top()))
                    else {
                        return;
                    };
                    let (changed, t) = {
                        let mut c = controller.borrow_mut();
                        (c.handle(&ev), c.transform())
                    };
                    transform.set(t);
                    // A touch double tap already toggled; suppress the emulated dblclick.
                    if changed.is_some() && e.type_() == "touchend" {
                        e.prevent_default();
                    }
                    if let Some(scale) = changed {
                        let cb = on_zoom_ref.borrow().clone();
                        if let Some(cb) = cb {
                            cb.emit(scale);
                        }
                    }
                }) as Box<dyn FnMut(_)>);
                for name in TOUCH_EVENTS {
                    el.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
                        .ok();
                }
                (el, cb)
            });
            move || {
                if let Some((el, cb)) = listener {
                    for name in TOUCH_EVENTS {
                        let _ = el
                            .remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
                    }
                }
            }
        });
    }

    let on_dblclick = {
        let controller = controller.clone();
        let transform = transform.clone();
        let on_zoom_ref = on_zoom_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let (scale, t) = {
                let mut c = controller.borrow_mut();
                (c.on_double_activate(), c.transform())
            };
            transform.set(t);
            let cb = on_zoom_ref.borrow().clone();
            if let Some(cb) = cb {
                cb.emit(scale);
            }
        })
    };

    html! {
        <div ref={node} ondblclick={on_dblclick}
            style="overflow:hidden; touch-action:none; position:relative;">
            <div style={format!("transform:{}; transform-origin:center center; transition:transform 0.05s linear;", transform.to_css())}>
                { for props.children.iter() }
            </div>
        </div>
    }
}
