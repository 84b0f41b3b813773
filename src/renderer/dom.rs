//! DOM backend: obstacles as absolutely positioned `div`s

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use super::{ObstacleView, PlayerView, RenderOp};

pub struct DomRenderer {
    document: Document,
    /// Layer that obstacle elements are appended to
    layer: HtmlElement,
    player: HtmlElement,
    elements: HashMap<u32, HtmlElement>,
}

impl DomRenderer {
    pub fn new(document: Document, layer: HtmlElement, player: HtmlElement) -> Self {
        Self {
            document,
            layer,
            player,
            elements: HashMap::new(),
        }
    }

    /// Apply reconciler output to the page
    pub fn apply(&mut self, ops: &[RenderOp]) -> Result<(), JsValue> {
        for op in ops {
            match op {
                RenderOp::Create(view) => {
                    let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
                    el.set_class_name("obstacle");
                    el.style().set_property("will-change", "transform")?;
                    place(&el, view)?;
                    self.layer.append_child(&el)?;
                    self.elements.insert(view.id, el);
                }
                RenderOp::Update(view) => {
                    if let Some(el) = self.elements.get(&view.id) {
                        place(el, view)?;
                    }
                }
                RenderOp::Remove(id) => {
                    if let Some(el) = self.elements.remove(id) {
                        el.remove();
                    }
                }
            }
        }
        Ok(())
    }

    pub fn draw_player(&self, view: &PlayerView) -> Result<(), JsValue> {
        let style = self.player.style();
        style.set_property("left", &format!("{}%", view.left_percent))?;
        style.set_property("top", &format!("{}%", view.top_percent))?;
        Ok(())
    }
}

fn place(el: &HtmlElement, view: &ObstacleView) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property("left", &format!("{}px", view.x))?;
    style.set_property("top", &format!("{}px", view.y))?;
    style.set_property("width", &format!("{}px", view.width))?;
    style.set_property("height", &format!("{}px", view.height))?;
    Ok(())
}
