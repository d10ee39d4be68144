//! Snake Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Context, anyhow};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use snake_arcade::audio::{AudioManager, SoundEffect};
    use snake_arcade::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use snake_arcade::platform::{Key, LocalStorage, Storage};
    use snake_arcade::renderer::{RenderState, build_frame};
    use snake_arcade::sim::{GameEvent, GamePhase, GameState, Playfield, tick};
    use snake_arcade::ui::overlay;
    use snake_arcade::{HighScores, Settings, Tuning, snap_to_tiles};

    /// Last markup pushed to each overlay, to skip redundant DOM writes
    #[derive(Default)]
    struct OverlayCache {
        menu: String,
        high_scores: String,
        game_over: String,
        score: String,
        phase: Option<GamePhase>,
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        storage: Option<LocalStorage>,
        /// Timestamp of the current frame (ms), shared with key handling
        now: u64,
        overlays: OverlayCache,
    }

    impl Game {
        fn new(seed: u64, field: Playfield) -> Self {
            let mut storage = LocalStorage::open();
            let (high_scores, settings) = match storage.as_mut() {
                Some(store) => {
                    let settings = Settings::load_from(store);
                    // Write the defaults once so players can edit them in place
                    if store.get_item(Settings::STORAGE_KEY).is_none() {
                        settings.save_to(store);
                    }
                    (HighScores::load_from(store), settings)
                }
                None => {
                    log::warn!("LocalStorage unavailable - scores will not persist");
                    (HighScores::new(), Settings::default())
                }
            };

            let mut state = GameState::new(seed, field, Tuning::default(), high_scores);
            state.apply_settings(&settings);
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);

            Self {
                state,
                settings,
                render_state: None,
                audio,
                storage,
                now: 0,
                overlays: OverlayCache::default(),
            }
        }

        fn on_key(&mut self, key: Key) {
            self.audio.resume();
            self.state.handle_key(key, self.now);
            self.process_events();
        }

        /// Run one simulation step at frame time `time`
        fn update(&mut self, time: f64) {
            self.now = time.max(0.0) as u64;
            tick(&mut self.state, self.now);
            self.process_events();
        }

        /// Route game events to audio and the score ledger
        fn process_events(&mut self) {
            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                match event {
                    GameEvent::SessionStarted(_) => self.audio.start_music(),
                    GameEvent::GameOver { rank, .. } => {
                        self.audio.stop_music();
                        if rank.is_some()
                            && let Some(store) = self.storage.as_mut()
                        {
                            self.state.high_scores.save_to(store);
                        }
                    }
                    GameEvent::Ate { .. }
                    | GameEvent::LevelUp(_)
                    | GameEvent::PowerUpCollected(_)
                    | GameEvent::PowerUpExpired(_)
                    | GameEvent::MongooseBehavior(_)
                    | GameEvent::Quit => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_frame(&self.state, self.now, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update overlay elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let phase = self.state.phase;
            if self.overlays.phase != Some(phase) {
                set_visible(document, "menu", phase == GamePhase::Menu);
                set_visible(document, "high-scores", phase == GamePhase::HighScores);
                set_visible(document, "game-over", phase == GamePhase::GameOver);
                set_visible(
                    document,
                    "hud-score",
                    matches!(phase, GamePhase::Playing | GamePhase::GameOver),
                );
                self.overlays.phase = Some(phase);
            }

            match phase {
                GamePhase::Menu => {
                    let html = overlay::menu_html(&self.state.menu);
                    set_html(document, "menu", &mut self.overlays.menu, html);
                }
                GamePhase::HighScores => {
                    let html = overlay::high_scores_html(&self.state.high_scores);
                    set_html(document, "high-scores", &mut self.overlays.high_scores, html);
                }
                GamePhase::Playing => {}
                GamePhase::GameOver => {
                    if let Some(result) = self.state.last_result.as_ref() {
                        let html = overlay::game_over_html(result);
                        set_html(document, "game-over", &mut self.overlays.game_over, html);
                    }
                    if let (Some(el), Some(session)) = (
                        document.get_element_by_id("game-over"),
                        self.state.session.as_ref(),
                    ) {
                        let _ = el.set_attribute("style", &overlay::game_over_style(&session.game_over));
                    }
                }
            }

            if let Some(session) = self.state.session.as_ref() {
                let text = overlay::score_text(session.score, &session.snake.power_ups, self.now);
                if text != self.overlays.score
                    && let Some(el) = document.get_element_by_id("hud-score")
                {
                    el.set_text_content(Some(&text));
                    self.overlays.score = text;
                }
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_html(document: &Document, id: &str, cache: &mut String, html: String) {
        if *cache == html {
            return;
        }
        if let Some(el) = document.get_element_by_id(id) {
            el.set_inner_html(&html);
        }
        *cache = html;
    }

    pub async fn run() -> anyhow::Result<()> {
        log::info!("Snake Arcade starting...");

        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .context("canvas #gameCanvas not found")?
            .dyn_into()
            .map_err(|_| anyhow!("#gameCanvas is not a canvas element"))?;

        // Playfield from the canvas attributes, floored to whole tiles
        let field = match (canvas.width() as i32, canvas.height() as i32) {
            (w, h) if snap_to_tiles(w) > 0 && snap_to_tiles(h) > 0 => {
                Playfield::new(snap_to_tiles(w), snap_to_tiles(h))
            }
            _ => Playfield::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
        };

        // Backing store at device resolution
        let dpr = window.device_pixel_ratio();
        let width = (field.width as f64 * dpr) as u32;
        let height = (field.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, field)));
        log::info!(
            "Game initialized with seed {} on a {}x{} playfield",
            seed,
            field.width,
            field.height
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| anyhow!("failed to create surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("no suitable GPU adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, field)
            .await
            .context("failed to set up the render pipeline")?;
        game.borrow_mut().render_state = Some(render_state);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(&document, game.clone());
        setup_focus_handlers(&window, game.clone());

        request_animation_frame(game);
        Ok(())
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if let Some(key) = Key::from_key_name(&event.key()) {
                event.prevent_default();
                game.borrow_mut().on_key(key);
            }
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_focus_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                    log::info!("Muted (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            game.borrow_mut().audio.set_muted(false);
        });
        let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
    }

    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:#}", e);
    }
}

/// Headless demo: an autopilot plays one session on a fake clock
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use snake_arcade::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use snake_arcade::platform::MemoryStorage;
    use snake_arcade::sim::{
        Direction, GameEvent, GameMode, GamePhase, GameState, Playfield, Position, Session, tick,
    };
    use snake_arcade::{HighScores, Tuning};

    /// Simulated frame length (ms)
    const FRAME_MS: u64 = 16;
    /// Give up after this much simulated time
    const MAX_DEMO_MS: u64 = 120_000;

    fn is_safe(session: &Session, pos: Position) -> bool {
        let target = if session.mode.wraps() {
            session.field.wrap(pos)
        } else {
            pos
        };
        session.field.contains(target)
            && !session.snake.occupies(target)
            && !session.obstacles.iter().any(|o| o.contains(target))
    }

    /// Greedy steering toward the food that avoids immediate death
    pub fn autopilot(session: &Session) -> Option<Direction> {
        let head = session.snake.head();
        let food = session.food.pos;
        let current = session.snake.direction;

        let mut options = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        options.sort_by_key(|dir| {
            let next = head.offset(dir.delta());
            (next.x - food.x).abs() + (next.y - food.y).abs()
        });
        options
            .into_iter()
            .filter(|&dir| dir != current.opposite())
            .find(|&dir| is_safe(session, head.offset(dir.delta())))
    }

    /// Play one session; the ledger in `storage` carries over between runs
    pub fn run(mode: GameMode, tuning: Tuning, storage: &mut MemoryStorage) -> u32 {
        let field = Playfield::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let mut state = GameState::new(2024, field, tuning, HighScores::load_from(storage));
        state.start_session(mode, 0);

        let mut now = 0;
        while state.phase == GamePhase::Playing && now < MAX_DEMO_MS {
            if let Some(session) = state.session.as_mut()
                && let Some(dir) = autopilot(session)
            {
                session.snake.set_direction(dir);
            }
            now += FRAME_MS;
            tick(&mut state, now);

            for event in state.drain_events() {
                match event {
                    GameEvent::Ate { score, .. } => log::debug!("Ate food, score {}", score),
                    GameEvent::LevelUp(level) => log::info!("Level {}", level),
                    GameEvent::GameOver { rank, .. } => {
                        if rank.is_some() {
                            state.high_scores.save_to(&mut *storage);
                        }
                    }
                    _ => {}
                }
            }
        }

        let score = state.score();
        log::info!(
            "{} demo finished after {} s with score {} on a {}x{} grid",
            mode,
            now / 1000,
            score,
            field.columns(),
            field.rows()
        );
        score
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use snake_arcade::platform::MemoryStorage;
    use snake_arcade::sim::GameMode;
    use snake_arcade::{HighScores, Tuning};

    env_logger::init();
    log::info!("Snake Arcade (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable game");

    let tuning = match std::env::var("SNAKE_TUNING") {
        Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring SNAKE_TUNING: {}", e);
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    };

    // SNAKE_MODE narrows the demo to one mode, by display name
    let modes: Vec<GameMode> = match std::env::var("SNAKE_MODE") {
        Ok(name) => match GameMode::from_name(&name) {
            Some(mode) => vec![mode],
            None => {
                log::warn!("Unknown SNAKE_MODE {:?}, running every mode", name);
                GameMode::ALL.to_vec()
            }
        },
        Err(_) => GameMode::ALL.to_vec(),
    };

    let mut storage = MemoryStorage::new();
    for mode in modes {
        let score = demo::run(mode, tuning.clone(), &mut storage);
        println!("{:<18} {:>5}", mode.name(), score);
    }

    let ledger = HighScores::load_from(&storage);
    match ledger.top_score() {
        Some(best) => println!("{:<18} {:>5}", "Best", best),
        None => println!("No scores recorded"),
    }
}
