use crate::config::{
    parse_log_level, parse_phrases, parse_u32_with_bounds, DEFAULT_ERASING_SPEED_MS,
    DEFAULT_HOLD_DELAY_MS, DEFAULT_LOG_LEVEL, DEFAULT_TYPING_SPEED_MS, ERASING_SPEED_MS_BOUNDS,
    HOLD_DELAY_MS_BOUNDS, TYPING_SPEED_MS_BOUNDS,
};
use crate::contact::{SubmitControl, SubmitOutcome, ACCEPT_JSON};
use crate::glow::{format_px, next_glow_position, parse_px, GlowBox, PointerState, StopToken};
use crate::log::Logger;
use crate::nav::{anchor_target, scroll_top_display, MenuEvent, MenuState, ACTIVE_CLASS};
use crate::particles::{ParticlesConfig, PARTICLES_CONTAINER_ID, PARTICLES_GLOBAL};
use crate::skills::{
    is_fully_in_viewport, plan_bars, BarStep, Rect, SkillBoard, BAR_TRANSITION, COLLAPSED_WIDTH,
    SETTLE_DELAY_MS, SKILLS_ROOT_MARGIN, SKILLS_THRESHOLD,
};
use crate::theme::{next_theme, Theme, DARK_CLASS};
use crate::typing::{TypingSession, TypingTiming};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, convert::FromWasmAbi, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, Document, Element, Event, EventTarget, FormData, HtmlButtonElement, HtmlElement,
    HtmlFormElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    MouseEvent, Node, PageTransitionEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions,
};
use yew::prelude::*;
use yew::AppHandle;

const CURSOR_BLINK_CLASS: &str = "cursor-blink";

type Wire = fn(&Logger) -> Result<(), JsValue>;

/// Loops that would otherwise outlive the page.
#[derive(Default)]
struct PageHandles {
    typing: Option<AppHandle<TypingText>>,
    glow: Option<StopToken>,
}

thread_local! {
    static PAGE: RefCell<PageHandles> = RefCell::new(PageHandles::default());
}

fn document() -> Option<Document> {
    window()?.document()
}

fn missing(what: &str) -> JsValue {
    JsValue::from_str(&format!("missing {what}"))
}

fn describe(error: &JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{error:?}"))
}

fn by_id(id: &str) -> Result<Element, JsValue> {
    document()
        .and_then(|d| d.get_element_by_id(id))
        .ok_or_else(|| missing(&format!("#{id}")))
}

fn by_id_typed<T: JsCast>(id: &str) -> Result<T, JsValue> {
    by_id(id)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has an unexpected element type")))
}

fn query(selector: &str) -> Result<Element, JsValue> {
    document()
        .and_then(|d| d.query_selector(selector).ok().flatten())
        .ok_or_else(|| missing(selector))
}

fn collect_elements(list: Option<web_sys::NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_all(selector: &str) -> Vec<Element> {
    collect_elements(document().and_then(|d| d.query_selector_all(selector).ok()))
}

fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    collect_elements(parent.query_selector_all(selector).ok())
}

fn html_elements(elements: Vec<Element>) -> Vec<HtmlElement> {
    elements
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Attaches a listener for the lifetime of the page.
fn listen<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn page_logger() -> Logger {
    let configured = document()
        .and_then(|d| d.document_element())
        .and_then(|root| root.get_attribute("data-log-level"));
    Logger::new(parse_log_level(configured, DEFAULT_LOG_LEVEL))
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn viewport_size() -> (f64, f64) {
    let fallback = document()
        .and_then(|d| d.document_element())
        .map(|root| (f64::from(root.client_width()), f64::from(root.client_height())))
        .unwrap_or((0.0, 0.0));

    let Some(win) = window() else {
        return fallback;
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .filter(|value| *value > 0.0)
        .unwrap_or(fallback.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .filter(|value| *value > 0.0)
        .unwrap_or(fallback.1);

    (width, height)
}

// Theme

#[derive(Clone)]
struct ThemeTargets {
    body: HtmlElement,
    icon: Element,
}

fn apply_theme(targets: &ThemeTargets, theme: Theme) {
    let _ = targets
        .body
        .class_list()
        .toggle_with_force(DARK_CLASS, theme.is_dark());
    targets.icon.set_text_content(Some(theme.icon()));
}

fn apply_theme_with_transition(targets: &ThemeTargets, theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(targets, theme);
        return;
    }

    let Some(document) = document() else {
        apply_theme(targets, theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(targets, theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(targets, theme);
        return;
    };

    let deferred = targets.clone();
    let callback = Closure::once_into_js(move || apply_theme(&deferred, theme));

    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(targets, theme);
    }
}

/// Leaves the rendered class and icon alone until the first click.
fn wire_theme_toggle(logger: &Logger) -> Result<(), JsValue> {
    let targets = ThemeTargets {
        body: document()
            .and_then(|d| d.body())
            .ok_or_else(|| missing("<body>"))?,
        icon: query(".toggle-icon")?,
    };
    let toggle = by_id("theme-toggle")?;

    let logger = *logger;
    listen(&toggle, "click", move |_: MouseEvent| {
        let next = next_theme(targets.body.class_list().contains(DARK_CLASS));
        apply_theme_with_transition(&targets, next);
        logger.debug("theme_changed", json!({ "theme": next.as_str() }));
    })
}

// Smooth scrolling

fn wire_smooth_scroll(logger: &Logger) -> Result<(), JsValue> {
    let anchors = query_all("a[href^=\"#\"]");

    for anchor in &anchors {
        let link = anchor.clone();
        listen(anchor, "click", move |event: MouseEvent| {
            event.prevent_default();

            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(selector) = anchor_target(&href) else {
                return;
            };
            let Some(target) = document().and_then(|d| d.query_selector(selector).ok().flatten())
            else {
                return;
            };

            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        })?;
    }

    logger.debug("anchors_bound", json!({ "count": anchors.len() }));
    Ok(())
}

// Skill bars

struct SkillSectionNodes {
    section: Element,
    bars: Vec<HtmlElement>,
}

fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        top: rect.top(),
        left: rect.left(),
        bottom: rect.bottom(),
        right: rect.right(),
    }
}

fn expand_on_next_frame(bar: HtmlElement, target: String) {
    let Some(win) = window() else {
        return;
    };

    let callback = Closure::once_into_js(move || {
        let _ = bar.style().set_property("width", &target);
    });
    let _ = win.request_animation_frame(callback.unchecked_ref());
}

/// Reads each bar's `data-width` now, so replays follow the current markup.
fn run_bar_animations(bars: &[HtmlElement]) -> usize {
    let plan = plan_bars(
        bars.iter()
            .map(|bar| bar.get_attribute("data-width"))
            .collect(),
    );

    for animation in &plan {
        let Some(bar) = bars.get(animation.bar) else {
            continue;
        };

        for step in animation.steps() {
            match step {
                BarStep::Collapse => {
                    let _ = bar.style().set_property("width", COLLAPSED_WIDTH);
                }
                BarStep::ForceLayout => {
                    let _ = bar.offset_height();
                }
                BarStep::ApplyTransition => {
                    let _ = bar.style().set_property("transition", BAR_TRANSITION);
                }
                BarStep::ExpandOnNextFrame(target) => expand_on_next_frame(bar.clone(), target),
            }
        }
    }
    plan.len()
}

fn schedule_bar_animations(sections: Rc<Vec<SkillSectionNodes>>, section: usize, logger: Logger) {
    Timeout::new(SETTLE_DELAY_MS, move || {
        if let Some(nodes) = sections.get(section) {
            let bars = run_bar_animations(&nodes.bars);
            logger.debug("skills_revealed", json!({ "section": section, "bars": bars }));
        }
    })
    .forget();
}

fn wire_skill_bars(logger: &Logger) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| missing("window"))?;
    let sections: Vec<SkillSectionNodes> = query_all(".skills")
        .into_iter()
        .map(|section| SkillSectionNodes {
            bars: html_elements(query_all_within(&section, ".progress")),
            section,
        })
        .collect();

    if sections.is_empty() {
        return Err(missing(".skills"));
    }

    let board = Rc::new(RefCell::new(SkillBoard::new(sections.len())));
    let sections = Rc::new(sections);

    let on_entries = {
        let board = board.clone();
        let sections = sections.clone();
        let logger = *logger;
        Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let target_node: &Node = &target;
                let Some(section) = sections
                    .iter()
                    .position(|nodes| nodes.section.is_same_node(Some(target_node)))
                else {
                    continue;
                };

                if !board
                    .borrow_mut()
                    .on_intersection(section, entry.is_intersecting())
                {
                    continue;
                }

                observer.unobserve(&target);
                schedule_bar_animations(sections.clone(), section, logger);
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>)
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(SKILLS_THRESHOLD));
    options.set_root_margin(SKILLS_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &options)?;
    on_entries.forget();

    for nodes in sections.iter() {
        observer.observe(&nodes.section);
    }

    let logger = *logger;
    listen(&win, "orientationchange", move |_: Event| {
        let board = board.clone();
        let sections = sections.clone();
        Timeout::new(SETTLE_DELAY_MS, move || {
            let (width, height) = viewport_size();
            let replays = board.borrow().on_orientation_change(|section| {
                sections
                    .get(section)
                    .is_some_and(|nodes| is_fully_in_viewport(element_rect(&nodes.section), width, height))
            });

            for section in replays {
                if let Some(nodes) = sections.get(section) {
                    let bars = run_bar_animations(&nodes.bars);
                    logger.debug("skills_replayed", json!({ "section": section, "bars": bars }));
                }
            }
        })
        .forget();
    })
}

// Contact form

async fn post_form(form: &HtmlFormElement) -> Result<bool, JsValue> {
    let body = FormData::new_with_form(form)?;
    let response = Request::post(&form.action())
        .header("Accept", ACCEPT_JSON)
        .body(body)
        .map_err(|error| JsValue::from_str(&error.to_string()))?
        .send()
        .await
        .map_err(|error| JsValue::from_str(&error.to_string()))?;

    Ok(response.ok())
}

fn render_submit_control(button: &HtmlButtonElement, control: &SubmitControl) {
    button.set_text_content(Some(control.label()));
    button.set_disabled(control.is_disabled());
}

async fn submit_contact_form(form: HtmlFormElement, logger: Logger) {
    let Some(button) = form
        .query_selector(".form-submit")
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok())
    else {
        logger.warn("contact_submit_skipped", json!({ "reason": "missing .form-submit" }));
        return;
    };

    let mut control = SubmitControl::new(button.text_content().unwrap_or_default());
    control.begin();
    render_submit_control(&button, &control);

    let response = post_form(&form).await;
    if let Err(error) = response.as_ref() {
        logger.warn("contact_request_failed", json!({ "reason": describe(error) }));
    }

    let outcome = SubmitOutcome::from_response(response.ok());
    logger.info(
        "contact_submitted",
        json!({ "sent": outcome == SubmitOutcome::Sent }),
    );

    if let Some(win) = window() {
        let _ = win.alert_with_message(outcome.message());
    }
    if outcome.clears_form() {
        form.reset();
    }

    control.finish();
    render_submit_control(&button, &control);
}

fn wire_contact_form(logger: &Logger) -> Result<(), JsValue> {
    let form: HtmlFormElement = by_id_typed("contact-form")?;
    let logger = *logger;
    let target = form.clone();

    listen(&target, "submit", move |event: Event| {
        event.prevent_default();
        let form = form.clone();
        spawn_local(async move {
            submit_contact_form(form, logger).await;
        });
    })
}

// Glow follower

fn glow_frame(elements: &[HtmlElement], pointer: &PointerState) {
    let pointer = pointer.get();

    for (index, element) in elements.iter().enumerate() {
        let rect = element.get_bounding_client_rect();
        let style = element.style();
        let layout = GlowBox {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        };
        let inline_left = style
            .get_property_value("left")
            .ok()
            .and_then(|value| parse_px(&value));
        let inline_top = style
            .get_property_value("top")
            .ok()
            .and_then(|value| parse_px(&value));

        let (x, y) = next_glow_position(index, pointer, layout, inline_left, inline_top);
        let _ = style.set_property("left", &format_px(x));
        let _ = style.set_property("top", &format_px(y));
    }
}

fn start_glow_loop(elements: Vec<HtmlElement>, pointer: PointerState, stop: StopToken) {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next_frame = frame.clone();

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if stop.is_stopped() {
            let _ = next_frame.borrow_mut().take();
            return;
        }

        glow_frame(&elements, &pointer);

        if let (Some(win), Some(callback)) = (window(), next_frame.borrow().as_ref()) {
            let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));

    if let (Some(win), Some(callback)) = (window(), frame.borrow().as_ref()) {
        let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

fn wire_glow_follower(logger: &Logger) -> Result<(), JsValue> {
    let elements = html_elements(query_all(".glow-element"));
    if elements.is_empty() {
        return Err(missing(".glow-element"));
    }

    let document = document().ok_or_else(|| missing("document"))?;
    let pointer = PointerState::default();
    {
        let pointer = pointer.clone();
        listen(&document, "mousemove", move |event: MouseEvent| {
            pointer.update(f64::from(event.client_x()), f64::from(event.client_y()));
        })?;
    }

    logger.debug("glow_started", json!({ "elements": elements.len() }));
    let stop = StopToken::default();
    start_glow_loop(elements, pointer, stop.clone());
    PAGE.with(|page| page.borrow_mut().glow = Some(stop));
    Ok(())
}

// Particles

fn wire_particles(_logger: &Logger) -> Result<(), JsValue> {
    by_id(PARTICLES_CONTAINER_ID)?;

    let window_js: JsValue = window().ok_or_else(|| missing("window"))?.into();
    let particles_js = Reflect::get(&window_js, &JsValue::from_str(PARTICLES_GLOBAL))?;
    let particles_js = particles_js
        .dyn_ref::<Function>()
        .ok_or_else(|| missing(PARTICLES_GLOBAL))?;

    let config = ParticlesConfig::default()
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)?;
    particles_js.call2(&window_js, &JsValue::from_str(PARTICLES_CONTAINER_ID), &config)?;
    Ok(())
}

// Scroll to top

fn wire_scroll_to_top(_logger: &Logger) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| missing("window"))?;
    let button: HtmlElement = by_id_typed("scrollToTopBtn")?;

    {
        let button = button.clone();
        let reader = win.clone();
        listen(&win, "scroll", move |_: Event| {
            let scroll_y = reader.scroll_y().unwrap_or(0.0);
            let _ = button
                .style()
                .set_property("display", scroll_top_display(scroll_y));
        })?;
    }

    listen(&button, "click", move |_: MouseEvent| {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    })
}

// Mobile menu

fn wire_mobile_menu(_logger: &Logger) -> Result<(), JsValue> {
    let toggle = by_id("menuToggle")?;
    let nav_links = by_id("navLinks")?;
    let overlay = by_id("overlay")?;

    let apply: Rc<dyn Fn(MenuEvent)> = {
        let nav_links = nav_links.clone();
        let overlay = overlay.clone();
        Rc::new(move |event: MenuEvent| {
            let next = MenuState::from_open(nav_links.class_list().contains(ACTIVE_CLASS)).on(event);
            for element in [&nav_links, &overlay] {
                let _ = element
                    .class_list()
                    .toggle_with_force(ACTIVE_CLASS, next.is_open());
            }
        })
    };

    {
        let apply = apply.clone();
        listen(&toggle, "click", move |_: MouseEvent| apply(MenuEvent::ToggleClicked))?;
    }

    for link in query_all(".nav-links a") {
        let apply = apply.clone();
        listen(&link, "click", move |_: MouseEvent| apply(MenuEvent::LinkClicked))?;
    }

    listen(&overlay, "click", move |_: MouseEvent| apply(MenuEvent::OverlayClicked))
}

// Typing text

#[derive(Clone, Copy)]
enum TypingAction {
    Tick,
}

impl Reducible for TypingSession {
    type Action = TypingAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            TypingAction::Tick => {
                next.tick();
            }
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
struct TypingTextProps {
    session: TypingSession,
}

#[function_component(TypingText)]
fn typing_text(props: &TypingTextProps) -> Html {
    let session = use_reducer({
        let initial = props.session.clone();
        move || initial
    });

    {
        let dispatcher = session.dispatcher();
        let delay = session.next_delay_ms();
        use_effect_with(session.ticks(), move |_| {
            let timeout = Timeout::new(delay, move || dispatcher.dispatch(TypingAction::Tick));
            move || drop(timeout)
        });
    }

    html! { <>{ session.display().to_string() }</> }
}

fn typing_timing(host: &Element) -> TypingTiming {
    TypingTiming {
        typing_speed_ms: parse_u32_with_bounds(
            host.get_attribute("data-typing-speed"),
            DEFAULT_TYPING_SPEED_MS,
            TYPING_SPEED_MS_BOUNDS,
        ),
        erasing_speed_ms: parse_u32_with_bounds(
            host.get_attribute("data-erasing-speed"),
            DEFAULT_ERASING_SPEED_MS,
            ERASING_SPEED_MS_BOUNDS,
        ),
        hold_delay_ms: parse_u32_with_bounds(
            host.get_attribute("data-hold-delay"),
            DEFAULT_HOLD_DELAY_MS,
            HOLD_DELAY_MS_BOUNDS,
        ),
    }
}

fn start_typing(host: Element, session: TypingSession, logger: Logger) {
    let _ = host.class_list().add_1(CURSOR_BLINK_CLASS);
    host.set_text_content(None);

    let handle =
        yew::Renderer::<TypingText>::with_root_and_props(host, TypingTextProps { session }).render();
    PAGE.with(|page| page.borrow_mut().typing = Some(handle));
    logger.debug("typing_started", json!({}));
}

/// Runs `start` now if the page has finished loading, otherwise on `load`.
fn on_page_load(start: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let document = document().ok_or_else(|| missing("document"))?;
    if document.ready_state() == "complete" {
        start();
        return Ok(());
    }

    let win = window().ok_or_else(|| missing("window"))?;
    let callback = Closure::once_into_js(start);
    win.add_event_listener_with_callback("load", callback.unchecked_ref())
}

fn wire_typing_text(logger: &Logger) -> Result<(), JsValue> {
    let host = query(".typing-text")?;
    let timing = typing_timing(&host);
    let texts = parse_phrases(host.get_attribute("data-texts"));
    let session = TypingSession::new(texts, timing).ok_or_else(|| missing("typing phrases"))?;

    let logger = *logger;
    on_page_load(move || start_typing(host, session, logger))
}

// Teardown

/// Stops the typing and glow loops.
pub fn teardown() {
    PAGE.with(|page| {
        let mut page = page.borrow_mut();
        if let Some(handle) = page.typing.take() {
            handle.destroy();
        }
        if let Some(stop) = page.glow.take() {
            stop.stop();
        }
    });
}

fn wire_teardown(logger: &Logger) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| missing("window"))?;
    let logger = *logger;

    listen(&win, "pagehide", move |event: PageTransitionEvent| {
        if event.persisted() {
            return;
        }
        teardown();
        logger.debug("page_teardown", json!({}));
    })
}

pub fn run() {
    console_error_panic_hook::set_once();
    let logger = page_logger();

    let features: [(&str, Wire); 10] = [
        ("theme_toggle", wire_theme_toggle),
        ("smooth_scroll", wire_smooth_scroll),
        ("skill_bars", wire_skill_bars),
        ("contact_form", wire_contact_form),
        ("glow_follower", wire_glow_follower),
        ("particles", wire_particles),
        ("scroll_to_top", wire_scroll_to_top),
        ("mobile_menu", wire_mobile_menu),
        ("typing_text", wire_typing_text),
        ("teardown", wire_teardown),
    ];

    for (feature, wire) in features {
        match wire(&logger) {
            Ok(()) => logger.debug("feature_wired", json!({ "feature": feature })),
            Err(error) => logger.warn(
                "feature_unavailable",
                json!({ "feature": feature, "reason": describe(&error) }),
            ),
        }
    }
}
