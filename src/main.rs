//! Motion Lab entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement, KeyboardEvent};

    use motion_lab::progress::TallySink;
    use motion_lab::renderer::{draw_course, draw_demo};
    use motion_lab::sim::{
        DemoEvent, DemoKind, DemoState, GameEvent, RunPhase, RunState, TickInput, evaluate,
        submit_answer, tick,
    };
    use motion_lab::{BestScores, ProgressSink, Settings};

    /// Which canvas view is mounted
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum View {
        Lessons,
        Course,
    }

    /// Application state driving the single animation loop
    struct App {
        view: View,
        demo: DemoState,
        run: RunState,
        settings: Settings,
        best: BestScores,
        /// Progress rewards flow through this sink, never a global
        sink: TallySink,
        input: TickInput,
        /// Key-down tracking so held lane keys emit one edge per press
        lane_key_down: (bool, bool),
        course_paused: bool,
        /// Loop liveness: cleared on teardown so the callback chain stops
        active: bool,
        raf_id: Option<i32>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(seed: u64) -> Self {
            Self {
                view: View::Lessons,
                demo: DemoState::new(),
                run: RunState::new(seed),
                settings: Settings::load(),
                best: BestScores::load(),
                sink: TallySink::default(),
                input: TickInput::default(),
                lane_key_down: (false, false),
                course_paused: false,
                active: true,
                raf_id: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// One scheduler callback: advance whichever view is mounted, then
        /// paint. A missing canvas context skips the paint and retries next
        /// frame.
        fn frame(&mut self, now: f64) {
            match self.view {
                View::Lessons => {
                    self.demo.frame(now);
                    let params = self.settings.demo_params();
                    let body = evaluate(self.demo.selected, self.demo.time, &params);
                    if body.landed {
                        if let Some(DemoEvent::LessonCompleted { reward }) = self.demo.mark_landed()
                        {
                            self.sink.on_reward(reward);
                        }
                    }
                    if let Some(ctx) = canvas_context() {
                        draw_demo(&ctx, &self.demo, &body, &params, self.settings.reduced_motion);
                    }
                }
                View::Course => {
                    if !self.course_paused {
                        let input = self.input;
                        tick(&mut self.run, &input);
                        // Lane edges are one press each; the jump latch stays
                        self.input.lane_left = false;
                        self.input.lane_right = false;
                        self.handle_events();
                    }
                    if let Some(ctx) = canvas_context() {
                        draw_course(&ctx, &self.run, self.settings.reduced_motion);
                    }
                }
            }

            self.track_fps(now);
        }

        /// Forward engine events to the progress sink and score table
        fn handle_events(&mut self) {
            for event in self.run.drain_events() {
                match event {
                    GameEvent::AnswerCorrect { reward } => self.sink.on_reward(reward),
                    GameEvent::RunOver { score } => {
                        if let Some(rank) = self.best.add_score(score, js_sys::Date::now()) {
                            log::info!("score {score} ranked #{rank}");
                            self.best.save();
                        }
                    }
                }
            }
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Update DOM HUD elements outside the canvas
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-xp") {
                el.set_text_content(Some(&self.sink.total.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                let best = self.best.top_score().unwrap_or(0);
                el.set_text_content(Some(&best.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    el.set_text_content(Some(""));
                }
            }

            // Question panel mirrors the engine's pending question; the
            // buttons call submit_answer back in
            if let Some(panel) = document.get_element_by_id("question-panel") {
                if let Some(question) =
                    self.run.pending_question().and_then(|o| o.question.as_ref())
                {
                    let _ = panel.set_attribute("class", "");
                    if let Some(el) = document.get_element_by_id("question-prompt") {
                        el.set_text_content(Some(&question.prompt));
                    }
                    for (i, option) in question.options.iter().enumerate() {
                        if let Some(btn) = document.get_element_by_id(&format!("answer-{i}")) {
                            btn.set_text_content(Some(option));
                        }
                    }
                } else {
                    let _ = panel.set_attribute("class", "hidden");
                }
            }
        }

        /// Stop the callback chain and release the scheduled handle
        fn shutdown(&mut self) {
            self.active = false;
            if let Some(id) = self.raf_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            log::info!("animation loop released");
        }
    }

    /// Fetch the 2D context; None means the surface is not mounted yet
    fn canvas_context() -> Option<CanvasRenderingContext2d> {
        let document = web_sys::window()?.document()?;
        let canvas: HtmlCanvasElement = document.get_element_by_id("canvas")?.dyn_into().ok()?;
        canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Motion Lab starting...");

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));
        log::info!("initialized with seed {seed}");

        setup_keyboard(app.clone());
        setup_controls(app.clone());
        setup_auto_pause(app.clone());
        setup_teardown(app.clone());

        request_frame(app);

        log::info!("Motion Lab running");
    }

    fn request_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let app_for_cb = app.clone();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app_for_cb, time);
        });
        if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            app.borrow_mut().raf_id = Some(id);
        }
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if !a.active {
                return; // cancelled: break the callback chain
            }
            a.frame(time);
            a.update_hud();
        }
        request_frame(app);
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key-down: jump latch, single lane edges, answers, play toggle
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "w" => {
                        a.input.jump = true;
                        event.prevent_default();
                    }
                    "a" => {
                        if !a.lane_key_down.0 {
                            a.lane_key_down.0 = true;
                            a.input.lane_left = true;
                        }
                        event.prevent_default();
                    }
                    "d" => {
                        if !a.lane_key_down.1 {
                            a.lane_key_down.1 = true;
                            a.input.lane_right = true;
                        }
                        event.prevent_default();
                    }
                    " " => {
                        match a.view {
                            View::Lessons => a.demo.toggle_play(),
                            View::Course => a.course_paused = !a.course_paused,
                        }
                        event.prevent_default();
                    }
                    key @ ("1" | "2" | "3") => {
                        if a.view == View::Course {
                            let index = key.parse::<usize>().unwrap_or(1) - 1;
                            submit_answer(&mut a.run, index);
                            a.handle_events();
                            event.prevent_default();
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key-up: release the jump latch and re-arm lane edges
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "w" => a.input.jump = false,
                    "a" => a.lane_key_down.0 = false,
                    "d" => a.lane_key_down.1 = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire buttons, sliders, and the demo selector
    fn setup_controls(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        on_click(&document, "play-btn", {
            let app = app.clone();
            move || app.borrow_mut().demo.toggle_play()
        });

        on_click(&document, "reset-btn", {
            let app = app.clone();
            move || {
                let mut a = app.borrow_mut();
                a.demo.reset();
                // One synchronous redraw so the rewound state shows while paused
                let params = a.settings.demo_params();
                let body = evaluate(a.demo.selected, a.demo.time, &params);
                if let Some(ctx) = canvas_context() {
                    draw_demo(&ctx, &a.demo, &body, &params, a.settings.reduced_motion);
                }
            }
        });

        on_click(&document, "start-btn", {
            let app = app.clone();
            move || {
                let mut a = app.borrow_mut();
                a.course_paused = false;
                a.run.start();
            }
        });

        on_click(&document, "tab-lessons", {
            let app = app.clone();
            move || app.borrow_mut().view = View::Lessons
        });

        on_click(&document, "tab-course", {
            let app = app.clone();
            move || app.borrow_mut().view = View::Course
        });

        for i in 0..3 {
            on_click(&document, &format!("answer-{i}"), {
                let app = app.clone();
                move || {
                    let mut a = app.borrow_mut();
                    submit_answer(&mut a.run, i);
                    a.handle_events();
                }
            });
        }

        // Demo selector
        if let Some(el) = document.get_element_by_id("demo-select") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(select) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                else {
                    return;
                };
                if let Some(kind) = DemoKind::from_str(&select.value()) {
                    app.borrow_mut().demo.set_demo(kind);
                }
            });
            let _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        setup_slider(&document, "angle-input", app.clone(), |settings, value| {
            settings.set_angle(value)
        });
        setup_slider(&document, "speed-input", app, |settings, value| {
            settings.set_launch_speed(value)
        });
    }

    fn on_click(document: &web_sys::Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handler();
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_slider(
        document: &web_sys::Document,
        id: &str,
        app: Rc<RefCell<App>>,
        apply: impl Fn(&mut Settings, f32) + 'static,
    ) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(input) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                if let Ok(value) = input.value().parse::<f32>() {
                    let mut a = app.borrow_mut();
                    apply(&mut a.settings, value);
                    a.settings.save();
                }
            });
            let _ = el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Pause both views when the tab is hidden
    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut a = app.borrow_mut();
                a.demo.is_playing = false;
                if a.run.phase == RunPhase::Running {
                    a.course_paused = true;
                }
                log::info!("auto-paused (tab hidden)");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Release the scheduled callback when the page goes away; an
    /// un-cancelled handle would keep the chain alive
    fn setup_teardown(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().shutdown();
        });
        let _ =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use motion_lab::progress::TallySink;
    use motion_lab::sim::{
        DemoKind, GameEvent, RunPhase, RunState, TickInput, evaluate, submit_answer, tick,
    };
    use motion_lab::{ProgressSink, Settings};

    env_logger::init();
    log::info!("Motion Lab (native) starting...");

    // Kinematics sweep
    let params = Settings::default().demo_params();
    for kind in [DemoKind::FreeFall, DemoKind::Projectile, DemoKind::Uniform] {
        let body = evaluate(kind, 1.0, &params);
        println!(
            "{:>10} t=1.0s  pos=({:.1}, {:.1})  speed={:.1}",
            kind.as_str(),
            body.pos.x,
            body.pos.y,
            body.speed()
        );
    }

    // Headless course run: periodic jumps, always answer correctly
    let mut sink = TallySink::default();
    let mut run = RunState::new(7);
    run.start();

    let mut steps = 0u32;
    while run.phase != RunPhase::Over && steps < 5000 {
        let input = TickInput {
            jump: steps % 40 < 2,
            ..Default::default()
        };
        tick(&mut run, &input);
        if run.phase == RunPhase::AwaitingAnswer {
            let answer = run
                .pending_question()
                .and_then(|o| o.question.as_ref())
                .map(|q| q.correct)
                .unwrap_or(0);
            submit_answer(&mut run, answer);
        }
        for event in run.drain_events() {
            match event {
                GameEvent::AnswerCorrect { reward } => sink.on_reward(reward),
                GameEvent::RunOver { score } => log::info!("run over, final score {score}"),
            }
        }
        steps += 1;
    }

    println!(
        "headless run: {} ticks, score {}, speed {:.1}, xp {}",
        run.ticks, run.score, run.speed, sink.total
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
