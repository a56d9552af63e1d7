//! Be Mine entry point
//!
//! Wires the page's buttons to the prompt simulation and drives the
//! confetti frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        AddEventListenerOptions, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement,
        KeyboardEvent, MouseEvent, Response, TouchEvent, Window,
    };

    use be_mine::Settings;
    use be_mine::celebration::{self, EMOJI_FALLBACK, GifChoice};
    use be_mine::consts::*;
    use be_mine::hearts;
    use be_mine::messages;
    use be_mine::renderer::ConfettiCanvas;
    use be_mine::sim::{
        DodgeGeometry, FieldFrame, Placement, PromptEvent, PromptState, Rect, TickInput,
        VisualSnapshot, tick,
    };

    /// Page elements the prompt touches
    struct Elements {
        yes: HtmlElement,
        no: HtmlElement,
        subtitle: HtmlElement,
        overlay: HtmlElement,
        gif: HtmlImageElement,
        gif_loading: HtmlElement,
        hearts: HtmlElement,
        confetti: ConfettiCanvas,
    }

    impl Elements {
        fn find(document: &Document) -> Result<Self, JsValue> {
            let canvas: HtmlCanvasElement = element(document, "confettiCanvas")?;
            Ok(Self {
                yes: element(document, "btnYes")?,
                no: element(document, "btnNo")?,
                subtitle: element(document, "subtitle")?,
                overlay: element(document, "successOverlay")?,
                gif: element(document, "successGif")?,
                gif_loading: element(document, "gifLoading")?,
                hearts: element(document, "floatingHearts")?,
                confetti: ConfettiCanvas::new(canvas)?,
            })
        }
    }

    /// Prompt instance holding all state
    struct App {
        state: PromptState,
        settings: Settings,
        el: Elements,
    }

    impl App {
        /// Current geometry for a dodge
        fn dodge_geometry(&self) -> Result<DodgeGeometry, JsValue> {
            let (w, h) = inner_size(&window()?);
            Ok(DodgeGeometry {
                button: rect_of(&self.el.no),
                target: rect_of(&self.el.yes),
                viewport: Rect::viewport(w, h),
            })
        }

        /// Fit the confetti canvas to the window
        fn fit_canvas(&mut self) -> Result<(), JsValue> {
            let (w, h) = inner_size(&window()?);
            self.el.confetti.resize(w as u32, h as u32);
            self.state.set_canvas(w, h);
            Ok(())
        }
    }

    fn window() -> Result<Window, JsValue> {
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?
            .dyn_into::<T>()
            .map_err(|_| JsValue::from_str(&format!("#{} has the wrong element type", id)))
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn inner_size(window: &Window) -> (f32, f32) {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (dim(window.inner_width()) as f32, dim(window.inner_height()) as f32)
    }

    fn rect_of(el: &HtmlElement) -> Rect {
        let r = el.get_bounding_client_rect();
        Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
    }

    fn set_style(el: &HtmlElement, property: &str, value: &str) {
        if let Err(e) = el.style().set_property(property, value) {
            log::warn!("Failed to set {}: {:?}", property, e);
        }
    }

    /// Run `f` once after `ms` milliseconds
    fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(f);
        if let Err(e) =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)
        {
            log::warn!("setTimeout failed: {:?}", e);
        }
    }

    /// Feed one input batch through the simulation and apply the results
    fn dispatch(app: &Rc<RefCell<App>>, input: TickInput) {
        let events = {
            let mut a = app.borrow_mut();
            tick(&mut a.state, &input, now_ms())
        };

        for event in events {
            match event {
                PromptEvent::Visuals(snapshot) => apply_visuals(&app.borrow().el, &snapshot),
                PromptEvent::Relocate(placement) => apply_placement(&app.borrow().el.no, &placement),
                PromptEvent::Accepted { rejections } => {
                    log::info!("Yes! (after {} rejections)", rejections);
                    show_success(app);
                }
                PromptEvent::ConfettiStarted { generation } => {
                    let app = app.clone();
                    set_timeout(CONFETTI_DELAY_MS, move || request_frame(app, generation));
                }
            }
        }
    }

    fn apply_visuals(el: &Elements, snap: &VisualSnapshot) {
        update_subtitle(&el.subtitle, snap.message_index);

        // Grow YES
        set_style(&el.yes, "transform", &format!("scale({})", snap.accept_scale));
        set_style(&el.yes, "transition", "transform 0.4s cubic-bezier(0.34, 1.56, 0.64, 1)");
        let (pad_h, pad_v) = snap.padding_px;
        set_style(&el.yes, "padding", &format!("{}px {}px", pad_v, pad_h));
        set_style(&el.yes, "font-size", &format!("{}px", snap.font_size_px));
        if let Some(secs) = snap.pulse_tier.duration_secs() {
            set_style(&el.yes, "animation-duration", &format!("{}s", secs));
        }

        // Shrink NO
        set_style(&el.no, "transform", &format!("scale({})", snap.reject_scale));
        set_style(&el.no, "transition", "transform 0.3s cubic-bezier(0.34, 1.56, 0.64, 1)");
        set_style(&el.no, "opacity", &snap.reject_opacity.to_string());

        if snap.dodge_eligible {
            let _ = el.no.class_list().add_1("dodging");
        }
    }

    /// Cross-fade the subtitle to a new message
    fn update_subtitle(subtitle: &HtmlElement, index: usize) {
        let _ = subtitle.class_list().add_1("fade-out");

        let subtitle = subtitle.clone();
        set_timeout(SUBTITLE_FADE_OUT_MS, move || {
            let html = messages::lines(index).collect::<Vec<_>>().join("<br>");
            subtitle.set_inner_html(&html);
            let _ = subtitle.class_list().remove_1("fade-out");
            let _ = subtitle.class_list().add_1("fade-in");

            set_timeout(SUBTITLE_FADE_IN_MS, move || {
                let _ = subtitle.class_list().remove_1("fade-in");
            });
        });
    }

    fn apply_placement(no: &HtmlElement, placement: &Placement) {
        set_style(no, "position", "fixed");
        set_style(no, "left", &format!("{}px", placement.pos.x));
        set_style(no, "top", &format!("{}px", placement.pos.y));
        set_style(no, "z-index", "100");
        set_style(
            no,
            "transition",
            "left 0.3s cubic-bezier(0.34, 1.56, 0.64, 1), top 0.3s cubic-bezier(0.34, 1.56, 0.64, 1)",
        );
    }

    fn show_success(app: &Rc<RefCell<App>>) {
        {
            let a = app.borrow();
            let _ = a.el.overlay.class_list().add_1("active");
            let _ = a.el.overlay.set_attribute("aria-hidden", "false");
        }

        // Prevent scrolling
        if let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        {
            set_style(&body, "overflow", "hidden");
        }

        let app = app.clone();
        wasm_bindgen_futures::spawn_local(async move {
            load_celebration_gif(app).await;
        });
    }

    async fn fetch_text(url: &str) -> Result<String, JsValue> {
        let response: Response = JsFuture::from(window()?.fetch_with_str(url))
            .await?
            .dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
        }
        let body = JsFuture::from(response.text()?).await?;
        body.as_string()
            .ok_or_else(|| JsValue::from_str("response body is not text"))
    }

    /// Search first, fixed list on any failure
    async fn load_celebration_gif(app: Rc<RefCell<App>>) {
        let url = celebration::search_url(&app.borrow().settings.gif);

        let body = match url {
            Some(url) => match fetch_text(&url).await {
                Ok(body) => Some(body),
                Err(e) => {
                    log::warn!("GIF search failed: {:?}", e);
                    None
                }
            },
            None => None,
        };

        let choice = {
            let mut a = app.borrow_mut();
            match body {
                Some(body) => celebration::choose_from_response(&body, a.state.rng()),
                None => celebration::fallback(a.state.rng()),
            }
        };
        if let GifChoice::Fallback(_) = choice {
            log::info!("Using fallback celebration GIF");
        }

        let a = app.borrow();
        set_gif(&a.el, choice.url());
    }

    fn set_gif(el: &Elements, url: &str) {
        el.gif.set_src(url);

        {
            let gif = el.gif.clone();
            let loading = el.gif_loading.clone();
            let onload = Closure::<dyn FnMut()>::new(move || {
                let _ = gif.class_list().add_1("loaded");
                let _ = loading.class_list().add_1("hidden");
            });
            el.gif.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
        }

        {
            let loading = el.gif_loading.clone();
            let onerror = Closure::<dyn FnMut()>::new(move || {
                log::warn!("Celebration GIF failed to load");
                loading.set_text_content(Some(EMOJI_FALLBACK));
                set_style(&loading, "font-size", "48px");
            });
            el.gif.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        }
    }

    fn request_frame(app: Rc<RefCell<App>>, generation: u64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(move |_time: f64| {
            confetti_frame(app, generation);
        });
        if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }

    fn confetti_frame(app: Rc<RefCell<App>>, generation: u64) {
        {
            let mut a = app.borrow_mut();

            // A newer run (or a cancel) supersedes this continuation
            if a.state.confetti.generation() != generation {
                return;
            }

            let next = a.state.confetti.next_frame();
            match next {
                FieldFrame::Draw(frame) => {
                    if let Err(e) = a.el.confetti.draw(&frame) {
                        log::warn!("Confetti draw error: {:?}", e);
                    }
                }
                FieldFrame::Clear => {
                    a.el.confetti.clear();
                    return;
                }
                FieldFrame::Idle => return,
            }
        }

        request_frame(app, generation);
    }

    fn create_floating_hearts(app: &Rc<RefCell<App>>, document: &Document) -> Result<(), JsValue> {
        let mut a = app.borrow_mut();
        let count = a.settings.floating_hearts();
        let scattered = hearts::scatter(count, a.state.rng());

        for heart in scattered {
            let span = document.create_element("span")?;
            span.class_list().add_1("floating-heart")?;
            span.set_text_content(Some(heart.glyph));
            span.set_attribute("style", &heart.style())?;
            a.el.hearts.append_child(&span)?;
        }
        log::debug!("Created {} floating hearts", count);
        Ok(())
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>, document: &Document) -> Result<(), JsValue> {
        let (yes, no) = {
            let a = app.borrow();
            (a.el.yes.clone(), a.el.no.clone())
        };

        // YES click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(
                    &app,
                    TickInput {
                        accept: true,
                        ..Default::default()
                    },
                );
            });
            yes.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // NO click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(
                    &app,
                    TickInput {
                        reject: true,
                        ..Default::default()
                    },
                );
            });
            no.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Dodge on hover (the simulation gates on the rejection count)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let geometry = app.borrow().dodge_geometry();
                match geometry {
                    Ok(geometry) => dispatch(
                        &app,
                        TickInput {
                            proximity: Some(geometry),
                            ..Default::default()
                        },
                    ),
                    Err(e) => log::warn!("No dodge geometry: {:?}", e),
                }
            });
            no.add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch dodge for mobile: dodge now, still count the "No" shortly after
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let eligible = app.borrow().state.tracker.dodge_eligible();
                if !eligible {
                    return;
                }
                event.prevent_default();

                let geometry = app.borrow().dodge_geometry();
                if let Ok(geometry) = geometry {
                    dispatch(
                        &app,
                        TickInput {
                            proximity: Some(geometry),
                            ..Default::default()
                        },
                    );
                }

                let app = app.clone();
                set_timeout(TOUCH_REJECT_DELAY_MS, move || {
                    dispatch(
                        &app,
                        TickInput {
                            reject: true,
                            ..Default::default()
                        },
                    );
                });
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            no.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        // Keyboard: Enter on the focused YES button
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() != "Enter" {
                    return;
                }
                let yes_focused = document_clone
                    .active_element()
                    .map(|active| active.id() == "btnYes")
                    .unwrap_or(false);
                if yes_focused {
                    dispatch(
                        &app,
                        TickInput {
                            accept: true,
                            ..Default::default()
                        },
                    );
                }
            });
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize keeps the confetti canvas full-window
        {
            let window = window()?;
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Err(e) = app.borrow_mut().fit_canvas() {
                    log::warn!("Resize failed: {:?}", e);
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&format!("Logger init failed: {}", e)));
        }

        log::info!("Be Mine starting...");

        let document = window()?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let state = PromptState::new(seed).with_confetti_particles(settings.confetti_particles());
        log::info!(
            "Prompt initialized with seed {} ({} quality)",
            seed,
            settings.quality.as_str()
        );

        let app = Rc::new(RefCell::new(App {
            state,
            settings,
            el: Elements::find(&document)?,
        }));
        app.borrow_mut().fit_canvas()?;

        setup_input_handlers(app.clone(), &document)?;
        create_floating_hearts(&app, &document)?;

        log::info!("Be Mine ready");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Be Mine (native) starting...");
    log::info!("The prompt needs a browser - run with `trunk serve` for the web version");

    println!("\nPlaying a scripted session...");
    demo_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Reject a few times, chase the button around, then accept
#[cfg(not(target_arch = "wasm32"))]
fn demo_session() {
    use be_mine::Settings;
    use be_mine::messages;
    use be_mine::sim::{
        DodgeGeometry, FieldFrame, PromptEvent, PromptState, Rect, TickInput, tick,
    };

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or(14);
    let mut state = PromptState::new(seed).with_confetti_particles(settings.confetti_particles());
    state.set_canvas(1280.0, 720.0);

    let mut no_button = Rect::new(700.0, 400.0, 100.0, 44.0);
    let yes_button = Rect::new(520.0, 400.0, 120.0, 44.0);
    let mut now = 0.0;

    for _ in 0..8 {
        let hover = TickInput {
            proximity: Some(DodgeGeometry {
                button: no_button,
                target: yes_button,
                viewport: Rect::viewport(1280.0, 720.0),
            }),
            ..Default::default()
        };
        let reject = TickInput {
            reject: true,
            ..Default::default()
        };

        for input in [hover, reject] {
            for event in tick(&mut state, &input, now) {
                match event {
                    PromptEvent::Visuals(snap) => println!(
                        "  no #{:<2} yes x{:.3}  no x{:.3} (opacity {:.2})  \"{}\"",
                        snap.rejection_count,
                        snap.accept_scale,
                        snap.reject_scale,
                        snap.reject_opacity,
                        messages::message(snap.message_index).replace('\n', " / ")
                    ),
                    PromptEvent::Relocate(p) => {
                        no_button.x = p.pos.x;
                        no_button.y = p.pos.y;
                        println!(
                            "  dodged to ({:.0}, {:.0}) in {} attempt(s)",
                            p.pos.x, p.pos.y, p.attempts
                        );
                        if state.is_dodge_active(now + 100.0) {
                            println!("  (still settling, hovers ignored for now)");
                        }
                    }
                    other => println!("  {:?}", other),
                }
            }
            now += 400.0;
        }
    }

    let accept = TickInput {
        accept: true,
        ..Default::default()
    };
    for event in tick(&mut state, &accept, now) {
        println!("  {:?}", event);
    }

    let mut frames = 0;
    while let FieldFrame::Draw(_) = state.confetti.next_frame() {
        frames += 1;
    }
    println!("✓ No dodged {} times", state.placer.dodge_count());
    println!("✓ Confetti ran {} frames", frames);
}
