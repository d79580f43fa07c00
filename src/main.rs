//! Egg Catcher entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::NaiveDate;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, HtmlAnchorElement, HtmlCanvasElement, HtmlElement, HtmlImageElement,
        HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use egg_catcher::audio::AudioManager;
    use egg_catcher::certificate::render_to_canvas;
    use egg_catcher::consts::*;
    use egg_catcher::platform::EffectOverlay;
    use egg_catcher::renderer::CanvasRenderer;
    use egg_catcher::sim::Viewport;
    use egg_catcher::{
        Certificate, CertificateLayout, Session, Settings, canvas_width_for_window,
    };

    const CERT_TEMPLATE: &str = "images/certi.jpg";
    /// Orientation changes report stale sizes for a moment
    const ORIENTATION_SETTLE_MS: i32 = 200;

    /// Full-screen tint element toggled by magnet and bomb pickups
    struct DomOverlay {
        el: Option<HtmlElement>,
        magnet: bool,
        hazard: bool,
    }

    impl DomOverlay {
        fn new(document: &Document) -> Self {
            let el = document
                .get_element_by_id("effect-overlay")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if el.is_none() {
                log::warn!("No #effect-overlay element - effect tint disabled");
            }
            Self {
                el,
                magnet: false,
                hazard: false,
            }
        }

        fn apply(&self) {
            let Some(el) = &self.el else { return };
            let classes = el.class_list();
            let _ = classes.toggle_with_force("effect-magnet", self.magnet);
            let _ = classes.toggle_with_force("effect-bomb", self.hazard);
            let opacity = if self.magnet || self.hazard { "1" } else { "0" };
            let _ = el.style().set_property("opacity", opacity);
        }
    }

    impl EffectOverlay for DomOverlay {
        fn set_magnet_active(&mut self, active: bool) {
            self.magnet = active;
            self.apply();
        }

        fn set_hazard_active(&mut self, active: bool) {
            self.hazard = active;
            self.apply();
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<AudioManager, DomOverlay>,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        cert_template: Option<HtmlImageElement>,
        cert_layout: CertificateLayout,
        /// A requestAnimationFrame chain is active
        loop_running: bool,
    }

    impl Game {
        /// Canvas-relative x of a viewport coordinate
        fn canvas_x(&self, client_x: i32) -> f32 {
            let rect = self.canvas.get_bounding_client_rect();
            client_x as f32 - rect.left() as f32
        }

        fn resume_audio(&self) {
            self.session.audio().resume();
        }
    }

    /// Today's date from the browser clock
    fn today() -> NaiveDate {
        let now = js_sys::Date::new_0();
        NaiveDate::from_ymd_opt(
            now.get_full_year() as i32,
            now.get_month() + 1,
            now.get_date(),
        )
        .unwrap_or_default()
    }

    fn window_viewport(window: &web_sys::Window) -> Viewport {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(MAX_CANVAS_WIDTH as f64) as f32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(DEFAULT_VIEWPORT_HEIGHT as f64) as f32;
        Viewport {
            width: canvas_width_for_window(width),
            height,
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn get_document() -> Result<Document, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Egg Catcher starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas")?
            .dyn_into()?;

        let settings = Settings::load();
        let viewport = window_viewport(&window);
        let renderer = CanvasRenderer::new(canvas.clone(), settings.clone())?;
        renderer.resize(viewport.width, viewport.height);

        let cert_template = HtmlImageElement::new().ok();
        if let Some(img) = &cert_template {
            img.set_src(CERT_TEMPLATE);
        }

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(
            seed,
            viewport,
            today(),
            AudioManager::new(settings),
            DomOverlay::new(&document),
        );
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            canvas: canvas.clone(),
            cert_template,
            cert_layout: CertificateLayout::default(),
            loop_running: false,
        }));

        update_viewport_height(&window);
        setup_input_handlers(&canvas, game.clone())?;
        setup_resize_handlers(game.clone())?;
        setup_buttons(game)?;

        log::info!("Egg Catcher ready");
        Ok(())
    }

    /// Publish 1% of the real window height as the `--vh` CSS variable
    fn update_viewport_height(window: &web_sys::Window) {
        let Some(height) = window.inner_height().ok().and_then(|v| v.as_f64()) else {
            return;
        };
        let root = window
            .document()
            .and_then(|d| d.document_element())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(root) = root {
            let _ = root
                .style()
                .set_property("--vh", &format!("{}px", height * 0.01));
        }
    }

    fn apply_resize(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        update_viewport_height(&window);
        let viewport = window_viewport(&window);
        let mut g = game.borrow_mut();
        g.renderer.resize(viewport.width, viewport.height);
        g.session.resize(viewport);
    }

    fn setup_resize_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                apply_resize(&game);
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else { return };
                let game = game.clone();
                let settle = Closure::once(move || apply_resize(&game));
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    settle.as_ref().unchecked_ref(),
                    ORIENTATION_SETTLE_MS,
                );
                settle.forget();
            });
            window.add_event_listener_with_callback(
                "orientationchange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let x = g.canvas_x(event.client_x());
                g.session.set_player_target_x(x);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if !g.session.is_running() {
                    return;
                }
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let x = g.canvas_x(touch.client_x());
                    g.session.set_player_target_x(x);
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if !g.session.is_running() {
                    return;
                }
                g.resume_audio();
                if let Some(touch) = event.touches().get(0) {
                    let x = g.canvas_x(touch.client_x());
                    g.session.set_player_target_x(x);
                }
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click unlocks audio
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow().resume_audio();
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if !g.session.is_running() {
                    return;
                }
                g.resume_audio();
                match event.key().as_str() {
                    "ArrowLeft" => g.session.nudge_player_target(-KEY_NUDGE),
                    "ArrowRight" => g.session.nudge_player_target(KEY_NUDGE),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn on_click(
        document: &Document,
        id: &str,
        mut handler: impl FnMut() + 'static,
    ) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("No #{} button", id);
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = get_document()?;

        {
            let game = game.clone();
            on_click(&document, "startBtn", move || start_game(&game))?;
        }
        {
            let game = game.clone();
            on_click(&document, "restartBtn", move || start_game(&game))?;
        }
        {
            let game = game.clone();
            on_click(&document, "audioBtn", move || {
                let muted = game.borrow_mut().session.audio_mut().toggle_mute();
                if let Ok(document) = get_document() {
                    if let Some(btn) = document.get_element_by_id("audioBtn") {
                        btn.set_text_content(Some(if muted { "🔇" } else { "🔊" }));
                    }
                }
            })?;
        }
        on_click(&document, "certBtn", move || generate_certificate(&game))?;

        Ok(())
    }

    fn start_game(game: &Rc<RefCell<Game>>) {
        let Ok(document) = get_document() else { return };
        set_hidden(&document, "startScreen", true);
        set_hidden(&document, "gameOverScreen", true);
        set_hidden(&document, "gameOverUI", false);
        set_hidden(&document, "certUI", true);
        set_hidden(&document, "inGameUI", false);

        let already_looping = {
            let mut g = game.borrow_mut();
            g.resume_audio();
            g.session.set_date(today());
            g.session.start_game();
            std::mem::replace(&mut g.loop_running, true)
        };
        if !already_looping {
            request_animation_frame(game.clone());
        }
    }

    fn show_game_over(final_score: i64) {
        let Ok(document) = get_document() else { return };
        set_hidden(&document, "inGameUI", true);
        set_hidden(&document, "gameOverScreen", false);
        if let Some(el) = document.get_element_by_id("finalScore") {
            el.set_text_content(Some(&final_score.to_string()));
        }
        if let Some(input) = document
            .get_element_by_id("playerName")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value("");
        }
        if let Some(screen) = document.get_element_by_id("gameOverScreen") {
            screen.set_scroll_top(0);
        }
    }

    fn generate_certificate(game: &Rc<RefCell<Game>>) {
        let Ok(document) = get_document() else { return };
        let name = document
            .get_element_by_id("playerName")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default();

        let g = game.borrow();
        let score = g.session.final_score().unwrap_or(g.session.score());
        let result = Certificate::new(&name, score, today()).and_then(|cert| {
            let template = g
                .cert_template
                .as_ref()
                .ok_or_else(|| egg_catcher::CertificateError::Canvas("no template".into()))?;
            let canvas = document
                .get_element_by_id("certCanvas")
                .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
                .ok_or_else(|| egg_catcher::CertificateError::Canvas("no #certCanvas".into()))?;
            render_to_canvas(&cert, &g.cert_layout, template, &canvas)
        });

        match result {
            Ok(data_url) => {
                if let Some(preview) = document
                    .get_element_by_id("cert-preview")
                    .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
                {
                    preview.set_src(&data_url);
                    let _ = preview.style().set_property("display", "block");
                }
                if let Some(link) = document
                    .get_element_by_id("downloadLink")
                    .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
                {
                    link.set_href(&data_url);
                }
                set_hidden(&document, "gameOverUI", true);
                set_hidden(&document, "certUI", false);
                if let Some(screen) = document.get_element_by_id("gameOverScreen") {
                    screen.set_scroll_top(0);
                }
                log::info!("Certificate generated for score {}", score);
            }
            Err(e) => {
                log::warn!("Certificate failed: {}", e);
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&e.to_string());
                }
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let (keep_going, final_score) = {
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            // Runs left open past midnight stamp the new day
            g.session.set_date(today());
            let keep_going = g.session.frame(&mut g.renderer);
            if !keep_going {
                g.loop_running = false;
            }
            (keep_going, g.session.final_score())
        };

        if keep_going {
            request_animation_frame(game);
        } else if let Some(score) = final_score {
            show_game_over(score);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Egg Catcher (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play in the browser");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use egg_catcher::Session;
    use egg_catcher::platform::{NullAudio, NullOverlay, NullRenderer};
    use egg_catcher::sim::{GameState, Viewport};

    /// Two minutes of play at 60 fps
    const MAX_FRAMES: u64 = 60 * 120;

    /// Chase the lowest good egg, ignore everything else
    fn autopilot_target(state: &GameState) -> Option<f32> {
        state
            .eggs
            .iter()
            .filter(|egg| egg.kind.is_good())
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|egg| egg.center().x)
    }

    pub fn run(seed: u64) {
        let date = chrono::Local::now().date_naive();
        let mut session = Session::new(seed, Viewport::default(), date, NullAudio, NullOverlay);
        let mut renderer = NullRenderer;

        session.start_game();
        while session.state().frame < MAX_FRAMES {
            if let Some(x) = autopilot_target(session.state()) {
                session.set_player_target_x(x);
            }
            if !session.frame(&mut renderer) {
                break;
            }
        }

        let state = session.state();
        log::info!(
            "Seed {}: score {} after {} frames ({} cages, {})",
            seed,
            state.score,
            state.frame,
            state.cages,
            if state.is_running() { "still running" } else { "game over" }
        );
    }
}
