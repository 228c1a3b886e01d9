//! Browser bindings: one `LabelGame` or `ClickQuiz` per game section on the page.
//!
//! The exported object owns its session; the animation-frame loop and the
//! resize listener only hold weak references, so dropping the JS object
//! (`game.free()`) stops the loop on the next frame.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::fmt::Display;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, window};

use crate::anchor::{
    ANCHOR_DOT_RADIUS, AnchorProjector, Connector, ConnectorSurface, ILLUSTRATION_SIZE, Rect,
    SceneGeometry,
};
use crate::board::{self, Outcome};
use crate::drag::{DragTracker, ZoneHitBox, hit_test};
use crate::feedback::{FeedbackChannel, IDLE_CLASS};
use crate::quiz::{QuizMode, QuizOutcome};
use crate::session::{PlacementSession, QuizSession, SessionEvent};
use crate::words::WordBank;

fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn dom_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

// --- Canvas connector surface -----------------------------------------------

const CANVAS_STYLE: &str =
    "position:absolute; top:0; left:0; width:100%; height:100%; pointer-events:none; z-index:1;";

struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn attach(doc: &Document, wrapper: &Element) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = match wrapper.query_selector(".connector-canvas")? {
            Some(el) => el.dyn_into()?,
            None => {
                let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
                c.set_class_name("connector-canvas");
                c.set_attribute("style", CANVAS_STYLE)?;
                wrapper.append_child(&c)?;
                c
            }
        };
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }
}

impl ConnectorSurface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        // Resizing the backing store also wipes it.
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn draw_connector(&mut self, connector: &Connector) {
        let seg = connector.segment;
        let style = connector.style;
        let ctx = &self.ctx;

        let dash = js_sys::Array::new();
        for d in style.dash {
            dash.push(&JsValue::from_f64(*d));
        }
        ctx.begin_path();
        ctx.move_to(seg.x1, seg.y1);
        ctx.line_to(seg.x2, seg.y2);
        ctx.set_stroke_style_str(style.color);
        ctx.set_line_width(style.line_width);
        ctx.set_global_alpha(style.line_alpha);
        ctx.set_line_dash(&dash).ok();
        ctx.stroke();
        ctx.set_line_dash(&js_sys::Array::new()).ok();

        // Dot at the body-part end
        ctx.begin_path();
        let _ = ctx.arc(seg.x2, seg.y2, ANCHOR_DOT_RADIUS, 0.0, TAU);
        ctx.set_fill_style_str(style.color);
        ctx.set_global_alpha(style.dot_alpha);
        ctx.fill();
        ctx.set_global_alpha(1.0);
    }
}

// --- Feedback element ----------------------------------------------------------

/// Mirrors a feedback channel into its DOM element, touching the DOM only on change.
struct FeedbackView {
    el: Option<Element>,
    shown: (String, &'static str),
}

impl FeedbackView {
    fn new(el: Option<Element>) -> Self {
        Self {
            el,
            shown: (String::new(), IDLE_CLASS),
        }
    }

    fn sync(&mut self, channel: &FeedbackChannel) {
        let text = channel.text();
        let class = channel.css_class();
        if self.shown.0 == text && self.shown.1 == class {
            return;
        }
        if let Some(el) = &self.el {
            el.set_text_content(Some(text));
            el.set_class_name(class);
        }
        self.shown = (text.to_string(), class);
    }
}

// --- Label game state ------------------------------------------------------------

// Drop targets only; word cards carry `data-part` too.
const ZONE_SELECTOR: &str =
    ".drop-zone[data-part], .build-drop-zone[data-part], .build-label-zone[data-part]";

struct GameState {
    session: PlacementSession,
    drag: DragTracker,
    projector: AnchorProjector,
    bank: WordBank,
    wrapper: Element,
    feedback: FeedbackView,
    overlay: Option<CanvasSurface>,
}

impl GameState {
    fn geometry(&self) -> Option<SceneGeometry> {
        let svg = self.wrapper.query_selector("svg").ok().flatten()?;
        Some(SceneGeometry {
            container: dom_rect(&self.wrapper),
            illustration: dom_rect(&svg),
            intrinsic: ILLUSTRATION_SIZE,
        })
    }

    fn redraw(&mut self) {
        if !self.session.layout().connectors {
            return;
        }
        let Some(geometry) = self.geometry() else {
            log::debug!("illustration not loaded yet; connectors skipped");
            return;
        };
        if let Some(surface) = self.overlay.as_mut() {
            let zones = self.session.board().zones();
            self.projector.render(zones, &geometry, surface);
        }
    }

    fn settle(&mut self, outcome: Outcome) -> String {
        if outcome == Outcome::Correct {
            self.redraw();
        }
        self.sync_feedback();
        outcome.as_str().to_string()
    }

    fn drop_token(&mut self, zone: &str, token: &str) -> String {
        let outcome = self.session.drop_token(zone, token, performance_now());
        self.settle(outcome)
    }

    fn tick(&mut self, now: f64) {
        let events = self.session.tick(now);
        if events.contains(&SessionEvent::AdvanceStage) {
            self.redraw();
        }
        self.sync_feedback();
    }

    fn sync_feedback(&mut self) {
        self.feedback.sync(self.session.feedback());
    }

    /// Zone boxes as currently laid out, for resolving touch drops.
    fn zone_boxes(&self) -> Vec<ZoneHitBox> {
        let mut boxes = Vec::new();
        let Ok(list) = self.wrapper.query_selector_all(ZONE_SELECTOR) else {
            return boxes;
        };
        for i in 0..list.length() {
            let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            if let Some(part_id) = el.get_attribute("data-part") {
                let rect = dom_rect(&el);
                boxes.push(ZoneHitBox { part_id, rect });
            }
        }
        boxes
    }
}

// --- Exports -------------------------------------------------------------------

#[wasm_bindgen]
pub struct LabelGame {
    state: Rc<RefCell<GameState>>,
}

#[wasm_bindgen]
impl LabelGame {
    /// `layout` is one of "drag-drop", "label-body", "build-body".
    #[wasm_bindgen(constructor)]
    pub fn new(layout: &str, wrapper_id: &str, feedback_id: &str) -> Result<LabelGame, JsValue> {
        let session = match layout {
            "build-body" => PlacementSession::build_body(),
            name => {
                let desc = board::layout(name)
                    .ok_or_else(|| JsValue::from_str(&format!("unknown layout: {name}")))?;
                PlacementSession::single(desc)
            }
        }
        .map_err(js_error)?;
        Self::mount(session, wrapper_id, feedback_id)
    }

    /// Custom pair list as JSON (`[{"part_id": .., "position": {"unit": "percent", ..}}]`).
    /// Ids must come from the word bank.
    #[cfg(feature = "serde_json")]
    pub fn with_pairs(
        pairs_json: &str,
        wrapper_id: &str,
        feedback_id: &str,
        connectors: bool,
    ) -> Result<LabelGame, JsValue> {
        let pairs = board::pairs_from_json(pairs_json).map_err(js_error)?;
        let bank = WordBank::body_parts();
        let desc = board::LayoutDesc::custom(&pairs, &bank, connectors)
            .map_err(js_error)?;
        let session = PlacementSession::custom(desc).map_err(js_error)?;
        Self::mount(session, wrapper_id, feedback_id)
    }

    /// Returns "correct", "incorrect" or "already-filled".
    pub fn attempt(&self, zone: &str, token: &str) -> String {
        self.state.borrow_mut().drop_token(zone, token)
    }

    pub fn type_answer(&self, zone: &str, input: &str) -> String {
        let mut st = self.state.borrow_mut();
        let bank = st.bank;
        let now = performance_now();
        let outcome = st.session.type_answer(zone, input, &bank, now);
        st.settle(outcome)
    }

    pub fn begin_drag(&self, token: &str, x: f64, y: f64) {
        self.state.borrow_mut().drag.begin(token, x, y);
    }

    pub fn move_drag(&self, x: f64, y: f64) -> Option<String> {
        let mut st = self.state.borrow_mut();
        st.drag.move_to(x, y)?;
        let boxes = st.zone_boxes();
        hit_test(&boxes, x, y).map(str::to_string)
    }

    /// Release at a viewport point. The drag is always cleared; an outcome is
    /// returned only when the point landed on a zone.
    pub fn end_drag(&self, x: f64, y: f64) -> Option<String> {
        let mut st = self.state.borrow_mut();
        let boxes = st.zone_boxes();
        let intent = st.drag.finish(hit_test(&boxes, x, y))?;
        Some(st.drop_token(&intent.zone_part_id, &intent.token_part_id))
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().drag.is_dragging()
    }

    pub fn is_complete(&self) -> bool {
        self.state.borrow().session.is_finished()
    }

    pub fn placed_count(&self) -> u32 {
        self.state.borrow().session.board().placed_count() as u32
    }

    pub fn restart_visible(&self) -> bool {
        self.state.borrow().session.restart_visible()
    }

    pub fn stage_name(&self) -> String {
        self.state.borrow().session.layout().name.to_string()
    }

    /// Token part ids in display order.
    pub fn token_order(&self) -> Vec<String> {
        let st = self.state.borrow();
        let tokens = st.session.board().tokens();
        tokens.iter().map(|t| t.part_id.clone()).collect()
    }

    pub fn token_caption(&self, part_id: &str) -> Option<String> {
        let st = self.state.borrow();
        let caption = st.session.layout().caption(&st.bank, part_id)?;
        Some(caption.to_string())
    }

    pub fn reset(&self) -> Result<(), JsValue> {
        let mut st = self.state.borrow_mut();
        st.drag.cancel();
        st.session.reset().map_err(js_error)?;
        st.redraw();
        st.sync_feedback();
        Ok(())
    }

    pub fn redraw(&self) {
        self.state.borrow_mut().redraw();
    }
}

impl LabelGame {
    fn mount(
        session: PlacementSession,
        wrapper_id: &str,
        feedback_id: &str,
    ) -> Result<LabelGame, JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let doc = document()?;
        let wrapper = doc
            .get_element_by_id(wrapper_id)
            .ok_or_else(|| js_error(format!("missing element #{wrapper_id}")))?;
        let overlay = if session.layout().connectors {
            Some(CanvasSurface::attach(&doc, &wrapper)?)
        } else {
            None
        };
        let name = session.layout().name;

        let state = Rc::new(RefCell::new(GameState {
            session,
            drag: DragTracker::new(),
            projector: AnchorProjector::default(),
            bank: WordBank::body_parts(),
            wrapper,
            feedback: FeedbackView::new(doc.get_element_by_id(feedback_id)),
            overlay,
        }));
        state.borrow_mut().redraw();

        // Resize listener: geometry changed, redraw connectors.
        {
            let weak = Rc::downgrade(&state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(st) = weak.upgrade() {
                    st.borrow_mut().redraw();
                }
            }) as Box<dyn FnMut()>);
            win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        start_frame_loop(Rc::downgrade(&state), GameState::tick);
        log::info!("{name} game mounted on #{wrapper_id}");
        Ok(LabelGame { state })
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop<T: 'static>(state: Weak<RefCell<T>>, tick: fn(&mut T, f64)) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        // Game freed: stop rescheduling.
        let Some(st) = state.upgrade() else {
            return;
        };
        tick(&mut st.borrow_mut(), ts);
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

// --- Quiz ------------------------------------------------------------------------

struct QuizState {
    session: QuizSession,
    feedback: FeedbackView,
}

impl QuizState {
    fn tick(&mut self, now: f64) {
        self.session.tick(now);
        self.sync_feedback();
    }

    fn sync_feedback(&mut self) {
        self.feedback.sync(self.session.feedback());
    }
}

/// Click-the-word / listen-and-find quiz over the whole word bank.
#[wasm_bindgen]
pub struct ClickQuiz {
    state: Rc<RefCell<QuizState>>,
}

#[wasm_bindgen]
impl ClickQuiz {
    /// `mode` is "click-word" or "listen-find".
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, feedback_id: &str) -> Result<ClickQuiz, JsValue> {
        let mode = QuizMode::from_name(mode)
            .ok_or_else(|| JsValue::from_str(&format!("unknown quiz: {mode}")))?;
        let feedback_el = document()?.get_element_by_id(feedback_id);
        let state = Rc::new(RefCell::new(QuizState {
            session: QuizSession::new(mode),
            feedback: FeedbackView::new(feedback_el),
        }));
        start_frame_loop(Rc::downgrade(&state), QuizState::tick);
        Ok(ClickQuiz { state })
    }

    /// Display word to find, `None` once every word is done.
    pub fn current_word(&self) -> Option<String> {
        let st = self.state.borrow();
        let entry = st.session.quiz().current()?;
        Some(entry.word.to_string())
    }

    pub fn listen_prompt(&self) -> Option<String> {
        self.state.borrow().session.quiz().listen_prompt()
    }

    /// Returns "correct", "incorrect" or "finished".
    pub fn answer(&self, part_id: &str) -> String {
        let mut st = self.state.borrow_mut();
        let outcome = st.session.answer(part_id, performance_now());
        st.sync_feedback();
        match outcome {
            QuizOutcome::Correct => "correct",
            QuizOutcome::Incorrect => "incorrect",
            QuizOutcome::Finished => "finished",
        }
        .to_string()
    }

    /// Percent of words answered, for the progress bar width.
    pub fn progress_percent(&self) -> f64 {
        self.state.borrow().session.quiz().progress() * 100.0
    }

    pub fn restart_visible(&self) -> bool {
        self.state.borrow().session.restart_visible()
    }

    pub fn restart(&self) {
        let mut st = self.state.borrow_mut();
        st.session.restart();
        st.sync_feedback();
    }
}

#[wasm_bindgen]
pub fn lookup_word(id: &str) -> Option<String> {
    let entry = WordBank::body_parts().lookup(id).ok()?;
    Some(entry.word.to_string())
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn word_bank_json() -> Result<String, JsValue> {
    let bank = WordBank::body_parts();
    crate::words::word_bank_to_json(&bank).map_err(js_error)
}

/// Build-the-body pieces (id, label, colour, target rect) as JSON.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn build_pieces_json() -> Result<String, JsValue> {
    board::build_pieces_to_json().map_err(js_error)
}
