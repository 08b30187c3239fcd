//! WASM bindings for in-browser rendering.
//!
//! The page's scroll observer lives in JavaScript: it reads `anchors()`,
//! watches those ids inside the article container and calls `notify` with
//! the visible id (or `undefined` when none is visible).

use wasm_bindgen::prelude::*;

use crate::Article;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(e: crate::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// An article owned by the JavaScript side.
#[wasm_bindgen]
pub struct ArticleHandle {
    inner: Article,
}

#[wasm_bindgen]
impl ArticleHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(html: &str) -> ArticleHandle {
        ArticleHandle {
            inner: Article::parse(html),
        }
    }

    /// Replace the source; returns whether anything was recomputed.
    #[wasm_bindgen(js_name = setSource)]
    pub fn set_source(&mut self, html: &str) -> bool {
        self.inner.set_source(html)
    }

    #[wasm_bindgen(js_name = treeJson)]
    pub fn tree_json(&self) -> Result<String, JsValue> {
        self.inner.tree_json().map_err(to_js)
    }

    #[wasm_bindgen(js_name = outlineJson)]
    pub fn outline_json(&self) -> Result<String, JsValue> {
        self.inner.outline_json().map_err(to_js)
    }

    /// Anchor ids to observe, in document order.
    pub fn anchors(&self) -> Vec<String> {
        self.inner.tracker().anchors().to_vec()
    }

    #[wasm_bindgen(js_name = activeId)]
    pub fn active_id(&self) -> String {
        self.inner.tracker().active_id().to_string()
    }

    /// Apply a scroll notification and return the active id.
    pub fn notify(&mut self, visible: Option<String>) -> String {
        self.inner.tracker_mut().notify(visible);
        self.active_id()
    }
}
