//! DOM wiring for the marketing site: navigation, scroll effects, the
//! contact form, reveal animations, counters, call tracking, the quote
//! calculator and lazy images.

use std::cell::Cell;
use std::rc::Rc;

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlAnchorElement, HtmlButtonElement, HtmlElement,
    HtmlFormElement, HtmlImageElement, HtmlSelectElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::controller::form::{
    self, FormMessage, SubmitButton, MESSAGE_SLIDE_IN_MS, MESSAGE_SLIDE_OUT_MS,
    MESSAGE_VISIBLE_MS, SUBMIT_DELAY_MS,
};
use crate::controller::nav::{anchor_target, NavMenu, ICON_CLOSE, ICON_OPEN, SHOW_MENU_CLASS};
use crate::controller::scroll::{active_sections, ScrollState, SectionBounds};
use crate::error::{SiteError, SiteResult};
use crate::model::counter::COUNTER_INTERVAL_MS;
use crate::model::{estimate, CounterAnimation};
use crate::utils;

const REVEAL_SELECTOR: &str = ".card, .service__card, .testimonial__card, .feature";
const REVEAL_CLASS: &str = "animate-fadeInUp";

/// Wire every site behaviour that finds its elements on the page.
///
/// Each section is independent: a failure is logged and the rest still run.
pub fn init_site(window: &Window, document: &Document) -> SiteResult<()> {
    let sections: [(&str, SiteResult<()>); 8] = [
        ("navigation", setup_navigation(document)),
        ("scroll effects", setup_scroll_effects(window, document)),
        ("forms", setup_forms(document)),
        ("reveal animations", setup_reveal_animations(document)),
        ("counters", setup_counters(window, document)),
        ("call tracking", setup_call_tracking(window, document)),
        ("quote calculator", setup_quote_calculator(document)),
        ("lazy images", setup_lazy_images(document)),
    ];
    for (name, result) in sections {
        if let Err(e) = result {
            tracing::warn!(section = name, error = %e, "site feature disabled");
        }
    }

    let body = document
        .body()
        .ok_or_else(|| SiteError::MissingElement("body".to_string()))?;
    body.class_list().add_1("loaded")?;
    tracing::info!("site interactivity ready");
    Ok(())
}

fn query_all(root: &Document, selector: &str) -> SiteResult<Vec<Element>> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Attach a listener for the lifetime of the page
fn on(target: &EventTarget, event: &str, f: impl FnMut(Event) + 'static) -> SiteResult<()> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn set_timeout(window: &Window, ms: i32, f: impl FnOnce() + 'static) -> SiteResult<i32> {
    let callback = Closure::once_into_js(f);
    Ok(window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)?)
}

async fn sleep(window: &Window, ms: i32) -> SiteResult<()> {
    let promise = js_sys::Promise::new(&mut |resolve: Function, reject: Function| {
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });
    JsFuture::from(promise).await?;
    Ok(())
}

fn toggle_class(el: Option<&Element>, class: &str, on: bool) {
    if let Some(el) = el {
        if let Err(e) = el.class_list().toggle_with_force(class, on) {
            tracing::warn!(class, error = ?e, "class toggle failed");
        }
    }
}

// Navigation

fn render_menu(menu: &Element, toggle: &Element, nav: &NavMenu) -> SiteResult<()> {
    menu.class_list().toggle_with_force(SHOW_MENU_CLASS, nav.is_open())?;
    if let Some(icon) = toggle.query_selector("i")? {
        let (old, new) = nav.icon_swap();
        icon.class_list().replace(old, new)?;
    }
    Ok(())
}

fn setup_navigation(document: &Document) -> SiteResult<()> {
    let state = Rc::new(Cell::new(NavMenu::default()));
    let nav_menu = document.get_element_by_id("nav-menu");
    let nav_toggle = document.get_element_by_id("nav-toggle");

    if let (Some(toggle), Some(menu)) = (nav_toggle.clone(), nav_menu.clone()) {
        let state = state.clone();
        let toggle_el = toggle.clone();
        on(&toggle, "click", move |_| {
            let mut nav = state.get();
            nav.toggle();
            state.set(nav);
            if let Err(e) = render_menu(&menu, &toggle_el, &nav) {
                tracing::warn!(error = %e, "menu toggle failed");
            }
        })?;
    }

    for link in query_all(document, ".nav__link")? {
        let state = state.clone();
        let menu = nav_menu.clone();
        let toggle = nav_toggle.clone();
        let document = document.clone();
        let href = link.get_attribute("href").unwrap_or_default();

        on(&link, "click", move |e| {
            let mut nav = state.get();
            nav.close();
            state.set(nav);
            toggle_class(menu.as_ref(), SHOW_MENU_CLASS, false);
            if let Some(icon) = toggle.as_ref().and_then(|t| t.query_selector("i").ok().flatten()) {
                let _ = icon.class_list().replace(ICON_CLOSE, ICON_OPEN);
            }

            let Some(anchor) = anchor_target(&href) else { return };
            e.prevent_default();
            if let Ok(Some(target)) = document.query_selector(anchor) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}

// Scroll effects

fn setup_scroll_effects(window: &Window, document: &Document) -> SiteResult<()> {
    let header = document.get_element_by_id("header");
    let scroll_up = document.get_element_by_id("scroll-up");
    let sections: Vec<HtmlElement> = query_all(document, "section[id]")?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let win = window.clone();
    let document = document.clone();

    on(window, "scroll", move |_| {
        let scroll_y = win.scroll_y().unwrap_or(0.0);
        let state = ScrollState::at(scroll_y);
        toggle_class(header.as_ref(), "scroll-header", state.header_scrolled);
        toggle_class(scroll_up.as_ref(), "show-scroll", state.show_scroll_up);

        // Layout can shift after images load, so measure on every scroll
        let bounds: Vec<SectionBounds> = sections
            .iter()
            .map(|s| SectionBounds::new(s.id(), s.offset_top() as f64, s.offset_height() as f64))
            .collect();
        for (id, active) in active_sections(scroll_y, &bounds) {
            let link = document
                .query_selector(&format!(".nav__link[href*=\"{id}\"]"))
                .ok()
                .flatten();
            toggle_class(link.as_ref(), "active-link", active);
        }
    })
}

// Contact form

fn setup_forms(document: &Document) -> SiteResult<()> {
    for form in query_all(document, "form")? {
        on(&form, "submit", move |e| {
            e.prevent_default();
            let Some(form) = e.target().and_then(|t| t.dyn_into::<HtmlFormElement>().ok()) else {
                return;
            };
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = submit_form(form).await {
                    tracing::warn!(error = %e, "form message could not be shown");
                }
            });
        })?;
    }
    Ok(())
}

async fn submit_form(form: HtmlFormElement) -> SiteResult<()> {
    let window = web_sys::window().ok_or(SiteError::MissingGlobal("window"))?;
    let document = window.document().ok_or(SiteError::MissingGlobal("document"))?;
    let button = form
        .query_selector("button[type=\"submit\"]")?
        .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok());

    let mut state = SubmitButton::Idle;
    if let Some(button) = &button {
        let label = state.begin(button.text_content().unwrap_or_default());
        button.set_text_content(Some(label));
        button.set_disabled(true);
    }

    let outcome = match sleep(&window, SUBMIT_DELAY_MS).await {
        Ok(()) => form::simulate_outcome(js_sys::Math::random()),
        Err(e) => Err(e),
    };
    match &outcome {
        Ok(()) => {
            tracing::info!("contact form submitted");
            form.reset();
        }
        Err(e) => tracing::warn!(error = %e, "contact form submission failed"),
    }

    let shown = show_message(&window, &document, &FormMessage::for_outcome(&outcome));

    if let Some(button) = &button {
        if let Some(label) = state.finish() {
            button.set_text_content(Some(&label));
        }
        button.set_disabled(false);
    }
    shown
}

fn show_message(window: &Window, document: &Document, message: &FormMessage) -> SiteResult<()> {
    if let Some(existing) = document.query_selector(".form-message")? {
        existing.remove();
    }

    let el = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SiteError::Js("created div is not an HtmlElement".to_string()))?;
    el.set_class_name(message.class_name());
    el.set_text_content(Some(message.text));
    let style = el.style();
    for (name, value) in message.styles() {
        style.set_property(name, value)?;
    }
    document
        .body()
        .ok_or_else(|| SiteError::MissingElement("body".to_string()))?
        .append_child(&el)?;

    let slide_in = el.clone();
    set_timeout(window, MESSAGE_SLIDE_IN_MS, move || {
        let _ = slide_in.style().set_property("transform", "translateX(0)");
    })?;

    let win = window.clone();
    set_timeout(window, MESSAGE_VISIBLE_MS, move || {
        let _ = el.style().set_property("transform", "translateX(100%)");
        if let Err(e) = set_timeout(&win, MESSAGE_SLIDE_OUT_MS, move || el.remove()) {
            tracing::warn!(error = %e, "could not schedule message removal");
        }
    })?;
    Ok(())
}

// Intersection observers

fn reveal_options() -> IntersectionObserverInit {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(0.1));
    options.set_root_margin("0px 0px -50px 0px");
    options
}

fn make_observer(
    options: Option<&IntersectionObserverInit>,
    f: impl FnMut(Array, IntersectionObserver) + 'static,
) -> SiteResult<IntersectionObserver> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Array, IntersectionObserver)>);
    let callback: &Function = closure.as_ref().unchecked_ref();
    let observer = match options {
        Some(options) => IntersectionObserver::new_with_options(callback, options)?,
        None => IntersectionObserver::new(callback)?,
    };
    closure.forget();
    Ok(observer)
}

fn intersecting(entries: &Array) -> Vec<Element> {
    entries
        .iter()
        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
        .filter(IntersectionObserverEntry::is_intersecting)
        .map(|entry| entry.target())
        .collect()
}

fn setup_reveal_animations(document: &Document) -> SiteResult<()> {
    let observer = make_observer(Some(&reveal_options()), |entries, _| {
        for el in intersecting(&entries) {
            let _ = el.class_list().add_1(REVEAL_CLASS);
        }
    })?;
    for el in query_all(document, REVEAL_SELECTOR)? {
        observer.observe(&el);
    }
    Ok(())
}

fn setup_counters(window: &Window, document: &Document) -> SiteResult<()> {
    let win = window.clone();
    let observer = make_observer(Some(&reveal_options()), move |entries, observer| {
        for el in intersecting(&entries) {
            observer.unobserve(&el);
            if let Err(e) = animate_counter(&win, el) {
                tracing::warn!(error = %e, "counter animation failed");
            }
        }
    })?;
    for el in query_all(document, ".stat__number")? {
        observer.observe(&el);
    }
    Ok(())
}

fn animate_counter(window: &Window, el: Element) -> SiteResult<()> {
    let Some(mut counter) = CounterAnimation::parse(&el.text_content().unwrap_or_default()) else {
        return Ok(());
    };

    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let handle_in = handle.clone();
    let win = window.clone();
    let tick = Closure::wrap(Box::new(move || {
        el.set_text_content(Some(&counter.step()));
        if counter.is_finished() {
            if let Some(id) = handle_in.take() {
                win.clear_interval_with_handle(id);
            }
        }
    }) as Box<dyn FnMut()>);

    let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        COUNTER_INTERVAL_MS,
    )?;
    handle.set(Some(id));
    tick.forget();
    Ok(())
}

fn setup_lazy_images(document: &Document) -> SiteResult<()> {
    let observer = make_observer(None, |entries, observer| {
        for el in intersecting(&entries) {
            let Some(img) = el.dyn_ref::<HtmlImageElement>() else { continue };
            if let Some(src) = img.dataset().get("src") {
                img.set_src(&src);
            }
            let _ = img.class_list().remove_1("lazy");
            observer.unobserve(img);
        }
    })?;
    for img in query_all(document, "img[data-src]")? {
        observer.observe(&img);
    }
    Ok(())
}

// Emergency call tracking

fn report_emergency_call(window: &Window) -> SiteResult<()> {
    let gtag = Reflect::get(window, &JsValue::from_str("gtag"))?;
    let Some(gtag) = gtag.dyn_ref::<Function>() else {
        return Ok(());
    };
    let params = Object::new();
    Reflect::set(&params, &"event_category".into(), &"engagement".into())?;
    Reflect::set(&params, &"event_label".into(), &"Emergency Phone Call".into())?;
    gtag.call3(&JsValue::NULL, &"event".into(), &"emergency_call".into(), &params)?;
    Ok(())
}

fn setup_call_tracking(window: &Window, document: &Document) -> SiteResult<()> {
    for link in query_all(document, "a[href^=\"tel:\"]")? {
        let href = link
            .dyn_ref::<HtmlAnchorElement>()
            .map(HtmlAnchorElement::href)
            .unwrap_or_default();
        let win = window.clone();
        on(&link, "click", move |_| {
            if let Err(e) = report_emergency_call(&win) {
                tracing::warn!(error = %e, "analytics call failed");
            }
            let width = win.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0);
            if let Some(text) = utils::call_confirmation(&href, width) {
                let _ = win.alert_with_message(&text);
            }
        })?;
    }
    Ok(())
}

// Quote calculator

fn setup_quote_calculator(document: &Document) -> SiteResult<()> {
    let Some(calculator) = document.get_element_by_id("quote-calculator") else {
        return Ok(());
    };
    let select = |selector: &str| {
        calculator
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    };
    let service = select("#service-type");
    let size = select("#property-size");
    let urgency = select("#urgency");
    let display = calculator.query_selector("#estimate-display")?;

    for input in [&service, &size, &urgency].into_iter().flatten() {
        let service = service.clone();
        let size = size.clone();
        let urgency = urgency.clone();
        let display = display.clone();
        on(input, "change", move |_| {
            let value = |s: &Option<HtmlSelectElement>| s.as_ref().map(HtmlSelectElement::value);
            let service = value(&service).unwrap_or_default();
            let size = value(&size).unwrap_or_default();
            let Some(quote) = estimate(&service, &size, value(&urgency).as_deref()) else {
                return;
            };
            tracing::debug!(service = %service, size = %size, low = quote.low, high = quote.high, "quote estimated");
            if let Some(display) = &display {
                display.set_inner_html(&quote.to_html());
            }
        })?;
    }
    Ok(())
}
