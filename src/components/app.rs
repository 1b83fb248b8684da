use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlElement;
use yew::prelude::*;

use tap_grid::grid::{GridDims, fit_grid};
use tap_grid::persist::{KeyValueStore, LocalStore, MemoryStore};
use tap_grid::ports::{BrowserClock, BrowserRng};
use tap_grid::util::{clog, cwarn};
use tap_grid::config::SERVICE_WORKER;
use tap_grid::{Game, GameConfig, GridConfig, ViewModel};

use super::{
    reward_overlay::RewardOverlay, speedup_flash::SpeedupFlash, status_bar::StatusBar,
    tile_grid::TileGrid,
};
use crate::state::{Host, WebTimers};

fn current_grid() -> GridDims {
    let cfg = GridConfig::default();
    let Some(win) = web_sys::window() else {
        return fit_grid(&cfg, 0.0, 0.0, None);
    };
    let bar_px = win
        .document()
        .and_then(|d| d.get_element_by_id("tap-timer-bar"))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| el.offset_height() as f64);
    let w = win
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let h = win
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    fit_grid(&cfg, w, h, bar_px)
}

fn open_store() -> Box<dyn KeyValueStore> {
    match LocalStore::open() {
        Some(store) => Box::new(store),
        None => {
            cwarn("localStorage unavailable; progress will not survive a reload");
            Box::new(MemoryStore::new())
        }
    }
}

fn register_service_worker(window: &web_sys::Window) {
    let navigator = window.navigator();
    // Absent outside secure contexts.
    if !js_sys::Reflect::has(&navigator, &"serviceWorker".into()).unwrap_or(false) {
        clog("service worker unsupported; running without offline cache");
        return;
    }
    let _ = navigator.service_worker().register(SERVICE_WORKER);
}

fn document_hidden() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.hidden())
        .unwrap_or(false)
}

#[function_component(App)]
pub fn app() -> Html {
    let view = use_reducer(ViewModel::default);
    let dims = use_state(current_grid);
    let game = {
        let tile_count = dims.tile_count();
        use_mut_ref(move || {
            Game::new(
                GameConfig::default(),
                tile_count,
                open_store(),
                Box::new(BrowserClock),
                Box::new(BrowserRng),
            )
        })
    };
    let timers = use_mut_ref(WebTimers::default);
    let host = Host {
        game,
        timers,
        view: view.dispatcher(),
    };

    // Boot + listeners + progress loop, once.
    {
        let host = host.clone();
        let dims = dims.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let document = window.document().expect("should have a document on window");

            host.run(|g| g.boot(document_hidden()));
            clog("tap grid booted");
            register_service_worker(&window);

            let visibility_cb = {
                let host = host.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    if document_hidden() {
                        host.run(|g| g.on_hidden());
                    } else {
                        host.run(|g| g.on_shown());
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                visibility_cb.as_ref().unchecked_ref(),
            );

            let resize_cb = {
                let host = host.clone();
                let dims = dims.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    let next = current_grid();
                    host.run(|g| g.resize(next.tile_count()));
                    dims.set(next);
                }) as Box<dyn FnMut(_)>)
            };
            for ev in ["resize", "orientationchange"] {
                let _ = window
                    .add_event_listener_with_callback(ev, resize_cb.as_ref().unchecked_ref());
            }

            let unload_cb = {
                let host = host.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    host.run(|g| g.on_unload());
                }) as Box<dyn FnMut(_)>)
            };
            let _ = window
                .add_event_listener_with_callback("beforeunload", unload_cb.as_ref().unchecked_ref());

            // RAF loop for the deadline bar
            let raf_id = Rc::new(RefCell::new(None::<i32>));
            let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                Rc::new(RefCell::new(None));
            {
                let raf_id = raf_id.clone();
                let cell = closure_cell.clone();
                let window_loop = window.clone();
                let host = host.clone();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    host.run(|g| g.refresh_progress());
                    if let Some(cb) = cell.borrow().as_ref() {
                        if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            *raf_id.borrow_mut() = Some(id);
                        }
                    }
                }) as Box<dyn FnMut()>));
            }
            if let Some(cb) = closure_cell.borrow().as_ref() {
                if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }

            move || {
                let _ = document.remove_event_listener_with_callback(
                    "visibilitychange",
                    visibility_cb.as_ref().unchecked_ref(),
                );
                for ev in ["resize", "orientationchange"] {
                    let _ = window
                        .remove_event_listener_with_callback(ev, resize_cb.as_ref().unchecked_ref());
                }
                let _ = window.remove_event_listener_with_callback(
                    "beforeunload",
                    unload_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = raf_id.borrow_mut().take() {
                    let _ = window.cancel_animation_frame(id);
                }
                closure_cell.borrow_mut().take();
            }
        });
    }

    let on_tap = {
        let host = host.clone();
        Callback::from(move |idx: usize| host.run(|g| g.tap(idx)))
    };

    html! {
        <div id="app" style="position:relative; width:100vw; height:100vh; display:flex; flex-direction:column; align-items:center; background:#0e1116; color:#e6edf3; overflow:hidden;">
            <StatusBar
                counter_text={view.counter_text.clone()}
                progress_fraction={view.progress_fraction}
                remaining_ms_text={view.remaining_ms_text.clone()}
            />
            <SpeedupFlash epoch={view.speedup_epoch} />
            <TileGrid
                columns={dims.columns}
                tile_count={view.tile_count}
                highlighted={view.highlighted}
                width_px={dims.width_px}
                height_px={dims.height_px}
                on_tap={on_tap}
            />
            <RewardOverlay show={view.overlay_visible} />
        </div>
    }
}
