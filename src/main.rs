//! Scroll Reflex entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, WheelEvent, Window};

    use scroll_reflex::hud::{FpsCounter, HudScreen, HudView};
    use scroll_reflex::overlay::{OverlayAction, OverlayState};
    use scroll_reflex::platform::FrameScheduler;
    use scroll_reflex::renderer::Reconciler;
    use scroll_reflex::renderer::dom::DomRenderer;
    use scroll_reflex::sim::{GameEvent, accepts_input};
    use scroll_reflex::{Session, Settings, Tuning};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// requestAnimationFrame-backed scheduler
    struct RafScheduler {
        window: Window,
        callback: FrameCallback,
    }

    impl FrameScheduler for RafScheduler {
        type Handle = i32;

        fn request_frame(&mut self) -> Option<i32> {
            let callback = self.callback.borrow();
            let Some(cb) = callback.as_ref() else {
                log::error!("Frame requested before callback was installed");
                return None;
            };
            self.window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(|e| log::error!("requestAnimationFrame failed: {:?}", e))
                .ok()
        }

        fn cancel_frame(&mut self, handle: i32) {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<RafScheduler>,
        renderer: DomRenderer,
        reconciler: Reconciler,
        fps: FpsCounter,
        overlay: OverlayState,
        document: Document,
        root: HtmlElement,
        /// Whether the wheel listener is attached
        wheel_attached: bool,
    }

    impl Game {
        /// Push simulation state to the page
        fn present(&mut self) {
            for event in self.session.drain_events() {
                if let GameEvent::GameOver { final_score } = event {
                    log::info!("Survived {:.2}s", final_score);
                }
            }

            let snapshot = self.session.render_snapshot();
            let ops = self.reconciler.reconcile(&snapshot.obstacles);
            if let Err(e) = self.renderer.apply(&ops) {
                log::warn!("Render error: {:?}", e);
            }
            if let Err(e) = self.renderer.draw_player(&snapshot.player) {
                log::warn!("Render error: {:?}", e);
            }

            self.update_hud();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let state = self.session.state();
            let hud = HudView::from_state(state.phase, state.score);

            if let Some(el) = self.document.get_element_by_id("hud-score") {
                el.set_text_content(hud.score_text.as_deref());
            }
            set_hidden(&self.document, "start-screen", hud.screen != HudScreen::Start);
            set_hidden(&self.document, "game-over-screen", hud.screen != HudScreen::GameOver);
            if let Some(el) = self.document.get_element_by_id("final-score") {
                el.set_text_content(hud.result_text.as_deref());
            }

            if let Some(el) = self.document.get_element_by_id("hud-fps") {
                if state.settings.show_fps {
                    el.set_text_content(Some(&format!("{} FPS", self.fps.fps())));
                } else {
                    el.set_text_content(None);
                }
            }
        }

        fn resize_to_window(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            self.session.resize(width as f32, height as f32);
        }

        /// Open, close or toggle the overlay
        fn dispatch(&mut self, action: OverlayAction) {
            let next = self.overlay.reduce(action);
            if self.overlay.closes(next) {
                self.session.close();
                let ops = self.reconciler.clear();
                if let Err(e) = self.renderer.apply(&ops) {
                    log::warn!("Render error: {:?}", e);
                }
            }
            self.overlay = next;
            if let Err(e) = self.root.class_list().toggle_with_force("hidden", !next.open) {
                log::warn!("Failed to toggle overlay: {:?}", e);
            }
            self.present();
        }

        /// Whether the wheel listener should be attached right now
        fn wants_wheel(&self) -> bool {
            self.overlay.open && accepts_input(self.session.phase())
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            if let Err(e) = el.class_list().toggle_with_force("hidden", hidden) {
                log::warn!("Failed to toggle #{}: {:?}", id, e);
            }
        }
    }

    fn element(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?
            .dyn_into::<HtmlElement>()
            .map_err(JsValue::from)
    }

    /// Attach or detach the wheel listener to match the game phase
    fn sync_wheel_listener(
        game: &Rc<RefCell<Game>>,
        window: &Window,
        wheel: &Closure<dyn FnMut(WheelEvent)>,
    ) {
        let mut g = game.borrow_mut();
        let wants = g.wants_wheel();
        if wants == g.wheel_attached {
            return;
        }
        let result = if wants {
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            window.add_event_listener_with_callback_and_add_event_listener_options(
                "wheel",
                wheel.as_ref().unchecked_ref(),
                &options,
            )
        } else {
            window.remove_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref())
        };
        match result {
            Ok(()) => {
                g.wheel_attached = wants;
                log::debug!("Wheel listener {}", if wants { "attached" } else { "detached" });
            }
            Err(e) => log::warn!("Failed to update wheel listener: {:?}", e),
        }
    }

    fn on_click(
        document: &Document,
        id: &str,
        mut handler: impl FnMut() + 'static,
    ) -> Result<(), JsValue> {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("No #{} element, skipping", id);
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&format!("logger init failed: {}", e)));
        }

        log::info!("Scroll Reflex starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let root = element(&document, "scroll-reflex")?;
        let tuning = root
            .get_attribute("data-tuning")
            .map(|json| Tuning::from_json_or_default(&json))
            .unwrap_or_default();
        let settings = root
            .get_attribute("data-settings")
            .map(|json| Settings::from_json_or_default(&json))
            .unwrap_or_default();

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            window: window.clone(),
            callback: callback.clone(),
        };

        let seed = js_sys::Date::now() as u64;
        let renderer = DomRenderer::new(
            document.clone(),
            element(&document, "obstacles-layer")?,
            element(&document, "player-orb")?,
        );
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed, tuning, settings, scheduler),
            renderer,
            reconciler: Reconciler::new(),
            fps: FpsCounter::new(),
            overlay: OverlayState::default(),
            document: document.clone(),
            root,
            wheel_attached: false,
        }));
        game.borrow_mut().resize_to_window();

        // Wheel input
        let wheel: Rc<Closure<dyn FnMut(WheelEvent)>> = {
            let game = game.clone();
            Rc::new(Closure::new(move |event: WheelEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.session.on_wheel(event.delta_y() as f32);
                g.present();
            }))
        };

        // Frame loop
        {
            let game = game.clone();
            let window = window.clone();
            let wheel = wheel.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                {
                    let mut g = game.borrow_mut();
                    g.fps.record(time);
                    g.session.on_frame(time);
                    g.present();
                }
                sync_wheel_listener(&game, &window, &wheel);
            }));
        }

        // Buttons
        for id in ["start-button", "restart-button"] {
            let game = game.clone();
            let window = window.clone();
            let wheel = wheel.clone();
            on_click(&document, id, move || {
                {
                    let mut g = game.borrow_mut();
                    g.session.start();
                    g.present();
                }
                sync_wheel_listener(&game, &window, &wheel);
            })?;
        }
        for (id, action) in [
            ("game-toggle", OverlayAction::Toggle),
            ("close-button", OverlayAction::Close),
        ] {
            let game = game.clone();
            let window = window.clone();
            let wheel = wheel.clone();
            on_click(&document, id, move || {
                game.borrow_mut().dispatch(action);
                sync_wheel_listener(&game, &window, &wheel);
            })?;
        }

        // Resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize_to_window();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().session.on_hidden();
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        game.borrow_mut().present();
        log::info!("Scroll Reflex ready");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Scroll Reflex (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the wasm build for the real game");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => scroll_reflex::Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {} ({}), using default tuning", path, e);
                scroll_reflex::Tuning::default()
            }
        },
        None => scroll_reflex::Tuning::default(),
    };

    let score = headless::run(tuning, 0x5C_2011, 120_000.0);
    println!("Autopilot survived {:.2}s", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frame-accurate headless run with a simple dodging autopilot
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use scroll_reflex::platform::ManualScheduler;
    use scroll_reflex::sim::{GameEvent, GamePhase, GameState};
    use scroll_reflex::{Session, Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Play until game over or `limit_ms`; returns the final score
    pub fn run(tuning: Tuning, seed: u64, limit_ms: f64) -> f64 {
        let mut session = Session::new(seed, tuning, Settings::default(), ManualScheduler::new());
        session.start();

        let mut time = 0.0;
        while session.phase() == GamePhase::Playing && time < limit_ms {
            if session.game_loop_mut().scheduler_mut().fire().is_some() {
                session.on_frame(time);
            }
            let delta = steer(session.state());
            session.on_wheel(delta);
            time += FRAME_MS;
        }

        for event in session.drain_events() {
            if let GameEvent::GameOver { final_score } = event {
                log::info!("Autopilot hit an obstacle after {:.2}s", final_score);
            }
        }
        match session.render_snapshot().to_json() {
            Ok(json) => log::debug!("Final frame: {}", json),
            Err(e) => log::warn!("Could not serialize final frame: {}", e),
        }
        session.state().score
    }

    /// Wheel delta moving the orb away from the nearest incoming obstacle
    fn steer(state: &GameState) -> f32 {
        let player_y = state.player.raw();
        let threat = state
            .obstacles
            .obstacles()
            .iter()
            .filter(|o| o.x > 0.0 && o.x < 40.0)
            .min_by(|a, b| a.x.total_cmp(&b.x));

        let Some(obstacle) = threat else {
            // Drift back toward the middle
            return (50.0 - player_y) * 2.0;
        };

        let height_pct = obstacle.height / state.viewport.height * 100.0;
        let center = obstacle.y + height_pct / 2.0;
        let away = if player_y >= center { 1.0 } else { -1.0 };
        // Near the edges, dodge the other way
        let away = if (player_y < 8.0 && away < 0.0) || (player_y > 92.0 && away > 0.0) {
            -away
        } else {
            away
        };
        away * 120.0
    }
}
