use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::model::{Point, TouchEvent};
use crate::state::{
    BrowserClock, BrowserScheduler, Clock, Scheduler, SwipeGestureRecognizer, SwipeHandlers,
};

pub const TOUCH_EVENTS: [&str; 4] = ["touchstart", "touchmove", "touchend", "touchcancel"];

#[derive(Properties, PartialEq, Clone)]
pub struct SwipeGestureAreaProps {
    /// Capability flag; when false children render unwrapped and no listeners are attached.
    pub is_mobile: bool,
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub on_swipe_left: Option<Callback<()>>,
    #[prop_or_default]
    pub on_swipe_right: Option<Callback<()>>,
    #[prop_or_default]
    pub on_pinch_zoom: Option<Callback<f64>>,
    #[prop_or_default]
    pub on_double_tap: Option<Callback<()>>,
    #[prop_or_default]
    pub on_long_press: Option<Callback<()>>,
}

fn new_recognizer() -> Option<SwipeGestureRecognizer> {
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new()?);
    let clock: Rc<dyn Clock> = Rc::new(BrowserClock);
    Some(SwipeGestureRecognizer::new(clock, scheduler, SwipeHandlers::default()))
}

#[function_component]
pub fn SwipeGestureArea(props: &SwipeGestureAreaProps) -> Html {
    let node = use_node_ref();
    let recognizer = use_mut_ref(new_recognizer);

    // Refresh consumers and capability every render.
    if let Ok(mut slot) = recognizer.try_borrow_mut() {
        if let Some(r) = slot.as_mut() {
            r.set_handlers(SwipeHandlers {
                on_swipe_left: props.on_swipe_left.clone(),
                on_swipe_right: props.on_swipe_right.clone(),
                on_pinch_zoom: props.on_pinch_zoom.clone(),
                on_double_tap: props.on_double_tap.clone(),
                on_long_press: props.on_long_press.clone(),
            });
            r.set_enabled(props.is_mobile);
        }
    }

    {
        let node = node.clone();
        let recognizer = recognizer.clone();
        use_effect_with(props.is_mobile, move |&is_mobile| {
            let element = node.cast::<HtmlElement>().filter(|_| is_mobile);
            let listener = element.map(|el| {
                let el_tc = el.clone();
                let recognizer_tc = recognizer.clone();
                let cb = Closure::wrap(Box::new(move |e: web_sys::TouchEvent| {
                    let rect = el_tc.get_bounding_client_rect();
                    let Some(ev) = TouchEvent::from_dom(&e, Point::new(rect.left(), rect.top()))
                    else {
                        return;
                    };
                    // Release the borrow before emitting: a consumer may re-render us.
                    let (gestures, handlers) = {
                        let mut slot = recognizer_tc.borrow_mut();
                        let Some(r) = slot.as_mut() else {
                            return;
                        };
                        (r.handle(&ev), r.handlers().clone())
                    };
                    for g in gestures {
                        handlers.emit(g);
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
                if let Ok(mut slot) = recognizer.try_borrow_mut() {
                    if let Some(r) = slot.as_mut() {
                        r.on_touch_end();
                    }
                }
            }
        });
    }

    if !props.is_mobile {
        return html! { <>{ for props.children.iter() }</> };
    }
    html! {
        <div ref={node} style="touch-action:pan-y; user-select:none; -webkit-user-select:none;">
            { for props.children.iter() }
        </div>
    }
}
