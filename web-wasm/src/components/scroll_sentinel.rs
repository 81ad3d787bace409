//! スクロール番兵
//!
//! リスト末尾に置いた要素がビューポートに完全に入った
//! （threshold 1.0）ときコールバックを呼ぶ。読込中の多重発火を
//! 抑えるのはフィード状態機械側の責務

use gloo::console::warn;
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

#[component]
pub fn ScrollSentinel<F>(on_reach: F) -> impl IntoView
where
    F: Fn() + Clone + 'static,
{
    let node = NodeRef::<Div>::new();

    Effect::new(move |_| {
        let Some(el) = node.get() else {
            return;
        };
        let on_reach = on_reach.clone();

        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        on_reach();
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(1.0));

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => {
                observer.observe(&el);
                // ページが生きている間オブザーバを維持する（解除はしない）
                callback.forget();
            }
            Err(err) => warn!(format!("IntersectionObserver生成に失敗: {:?}", err)),
        }
    });

    view! { <div class="scroll-sentinel" node_ref=node></div> }
}
