//! DOM access outside the component tree: storage, scrolling, theme and the chapter
//! manifest declared by the hosting page.

use folio_core::{ChapterEntry, ChapterManifest, config::ManifestConfig};
use folio_reader::{
    ACTIVE_HIGHLIGHT_CLASS, HIGHLIGHT_CLASS, PreferenceStore, Preferences, ScrollTarget, Theme,
};
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions,
};

/// Id of the scrolling content pane.
pub const CONTENT_AREA_ID: &str = "content-area";

/// Body class of the dark theme.
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// Scroll offset after which the back-to-top button shows.
pub const BACK_TO_TOP_THRESHOLD: i32 = 300;

/// Preferences backed by `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("local storage unavailable, preferences will not persist");
        }
        Self { storage }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            warn!("failed to store {key}: {e:?}");
        }
    }
}

/// Load preferences from local storage.
pub fn load_preferences() -> Preferences {
    Preferences::load(&LocalStorage::new())
}

/// Persist preferences to local storage.
pub fn save_preferences(prefs: &Preferences) {
    prefs.save(&mut LocalStorage::new());
}

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

fn element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Read the chapter buttons declared by the hosting page and remove them.
///
/// The reader renders its own chapter navigation from the manifest, so the static
/// buttons are taken out of the page once their file and label are known.
pub fn take_manifest(config: &ManifestConfig) -> ChapterManifest {
    let Some(document) = document() else {
        return ChapterManifest::default();
    };
    let nodes = match document.query_selector_all(&config.selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            warn!("invalid manifest selector '{}': {e:?}", config.selector);
            return ChapterManifest::default();
        }
    };

    let buttons: Vec<Element> = (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();

    let entries = buttons.iter().filter_map(|element| {
        let file = element.get_attribute(&config.file_attribute)?;
        let name = element.text_content().unwrap_or_default();
        Some(ChapterEntry::new(file.trim(), name.trim()))
    });
    let manifest = ChapterManifest::new(entries);

    for button in &buttons {
        button.remove();
    }
    debug!(
        "found {} chapters in the page, removed {} static buttons",
        manifest.len(),
        buttons.len()
    );
    manifest
}

/// Switch the body between the light and dark theme.
pub fn apply_theme(theme: Theme) {
    let Some(body) = document().and_then(|d| d.body()) else {
        return;
    };
    if let Err(e) = body.class_list().toggle_with_force(DARK_MODE_CLASS, theme.is_dark()) {
        warn!("failed to apply theme: {e:?}");
    }
}

/// Scroll the content pane to the top.
pub fn scroll_content_to_top() {
    let Some(content) = element_by_id(CONTENT_AREA_ID) else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    content.scroll_to_with_scroll_to_options(&options);
}

fn scroll_into_view(element: &Element, block: ScrollLogicalPosition) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(block);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Scroll to where a freshly loaded chapter should open.
pub fn apply_scroll(target: &ScrollTarget) {
    match target {
        ScrollTarget::Top => scroll_content_to_top(),
        ScrollTarget::Element(id) => match element_by_id(id) {
            Some(element) => scroll_into_view(&element, ScrollLogicalPosition::Start),
            None => debug!("scroll target #{id} not in the page"),
        },
    }
}

/// Mark one highlight as active and center it in view.
pub fn focus_highlight(id: &str) {
    let Some(document) = document() else {
        return;
    };

    if let Ok(active) = document.query_selector_all(&format!(".{ACTIVE_HIGHLIGHT_CLASS}")) {
        for element in (0..active.length())
            .filter_map(|i| active.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
        {
            let _ = element.class_list().remove_1(ACTIVE_HIGHLIGHT_CLASS);
        }
    }

    match document.get_element_by_id(id) {
        Some(marker) if marker.class_list().contains(HIGHLIGHT_CLASS) => {
            let _ = marker.class_list().add_1(ACTIVE_HIGHLIGHT_CLASS);
            scroll_into_view(&marker, ScrollLogicalPosition::Center);
        }
        _ => debug!("highlight #{id} not in the page"),
    }
}
