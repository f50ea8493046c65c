//! The synchronization state machine between the code view and the scene view.
//!
//! Two views edit the same drawing. Scene-originated changes regenerate the
//! code; text-originated changes reparse it. A text edit must never be
//! overwritten by the regeneration its own scene update triggers, so every
//! text transaction arms a [`OneShotGuard`] that swallows exactly one
//! regeneration attempt.
//!
//! # Example
//!
//! ```
//! use tikzsync::{
//!     geometry::Point,
//!     scene::ElementSpec,
//!     sync::{SyncController, SyncState},
//! };
//!
//! let mut controller = SyncController::new();
//!
//! // Scene side: the code is regenerated.
//! controller.add_element(ElementSpec::circle(Point::new(0.0, 0.0), 2.0));
//! assert!(controller.code().contains("\\draw (0,0) circle (2cm);"));
//! assert_eq!(controller.state(), SyncState::SceneEditing);
//!
//! // Text side: the typed text is kept verbatim.
//! let typed = "\\draw (1,1) -- (2,2);   % my line";
//! controller.edit_text(typed);
//! assert_eq!(controller.code(), typed);
//! assert_eq!(controller.scene().len(), 1);
//! ```

use std::fmt;

use log::{debug, info, trace};

use tikzsync_core::scene::{ElementId, ElementSpec, Scene, SceneElement};
use tikzsync_parser::{CodeParser, error::Diagnostic};

use crate::{
    generator,
    templates::{Preset, Snippet, Template},
};

const PICTURE_END: &str = "\\end{tikzpicture}";
const SNIPPET_INDENT: &str = "  ";

/// Which view is currently driving the session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    #[default]
    Idle,
    TextEditing,
    SceneEditing,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::TextEditing => write!(f, "text editing"),
            Self::SceneEditing => write!(f, "scene editing"),
        }
    }
}

/// Authoring tabs of the editor. Switching tabs changes nothing else.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AuthoringTab {
    #[default]
    Scene,
    Code,
    Templates,
    Snippets,
}

/// A flag that blocks exactly one check and then resets itself.
#[derive(Debug, Default)]
struct OneShotGuard {
    armed: bool,
}

impl OneShotGuard {
    fn arm(&mut self) {
        self.armed = true;
    }

    /// Returns whether the guard was armed, disarming it.
    fn take(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }

    #[cfg(test)]
    fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Owner of the scene and the generated code for one editing session.
///
/// The controller is the only writer of both. Every public entry point
/// first runs a pending deferred parse, so callers always observe a state
/// in which the scene reflects the code.
#[derive(Debug, Default)]
pub struct SyncController {
    scene: Scene,
    code: String,
    state: SyncState,
    tab: AuthoringTab,
    parser: CodeParser,
    suppress_regeneration: OneShotGuard,
    pending_parse: bool,
    diagnostics: Vec<Diagnostic>,
}

impl SyncController {
    /// Creates a controller holding an empty scene and its generated code.
    pub fn new() -> Self {
        let scene = Scene::new();
        let code = generator::generate(&scene);
        info!("Sync controller created");
        Self {
            scene,
            code,
            ..Self::default()
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The current code. While a text edit is in flight this is exactly what
    /// was typed.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn active_tab(&self) -> AuthoringTab {
        self.tab
    }

    /// Warnings from the most recent parse pass.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns true if a snippet insertion is waiting for its parse pass.
    pub fn has_pending_parse(&self) -> bool {
        self.pending_parse
    }

    /// Adds an element from the scene view and regenerates the code.
    pub fn add_element(&mut self, spec: ElementSpec) -> ElementId {
        self.flush();
        let id = self.scene.add(spec);
        debug!(id:%; "Element added from scene view");
        self.scene_edited();
        id
    }

    /// Removes an element from the scene view.
    ///
    /// The code is only regenerated when the element existed.
    pub fn remove_element(&mut self, id: ElementId) -> Option<SceneElement> {
        self.flush();
        let removed = self.scene.remove(id)?;
        debug!(id:%; "Element removed from scene view");
        self.scene_edited();
        Some(removed)
    }

    /// Replaces the scene with a preset.
    pub fn load_preset(&mut self, preset: &Preset) {
        self.flush();
        info!(preset = preset.label(); "Loading preset");
        self.scene.replace_all(preset.elements());
        self.scene_edited();
    }

    /// Removes every element.
    pub fn clear_scene(&mut self) {
        self.flush();
        self.scene.clear();
        self.scene_edited();
    }

    /// Applies a raw edit of the code view.
    ///
    /// The code becomes exactly `text` and the scene is rebuilt from it on a
    /// best-effort basis.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.flush();
        self.text_transaction(text.into());
    }

    /// Splices `snippet` into the code just before the closing
    /// `\end{tikzpicture}`, or appends it if there is none.
    ///
    /// The scene is updated by a deferred parse pass on the next
    /// [`tick`](Self::tick) or the next call to any other entry point.
    pub fn insert_snippet(&mut self, snippet: &Snippet) {
        self.insert_snippet_code(snippet.code());
    }

    /// Like [`insert_snippet`](Self::insert_snippet) for arbitrary code.
    pub fn insert_snippet_code(&mut self, code: &str) {
        self.flush();
        self.code = splice_snippet(&self.code, code);
        self.state = SyncState::TextEditing;
        self.pending_parse = true;
        debug!(bytes = code.len(); "Snippet inserted, parse deferred");
    }

    /// Replaces the code with a template and parses it.
    pub fn select_template(&mut self, template: &Template) {
        self.flush();
        info!(template = template.label(); "Template selected");
        self.text_transaction(template.code().to_string());
    }

    /// Switches the active authoring tab. Neither the scene nor the code
    /// changes.
    pub fn switch_tab(&mut self, tab: AuthoringTab) {
        self.flush();
        trace!(tab:?; "Switched authoring tab");
        self.tab = tab;
    }

    /// Notification that the scene changed, sent by the scene view.
    ///
    /// Returns whether the code was regenerated.
    pub fn notify_scene_changed(&mut self) -> bool {
        self.flush();
        self.regenerate()
    }

    /// Runs the deferred parse pass, if any. Returns whether it ran.
    pub fn tick(&mut self) -> bool {
        if !self.pending_parse {
            return false;
        }
        self.pending_parse = false;
        let code = std::mem::take(&mut self.code);
        self.text_transaction(code);
        true
    }

    /// Hands the current code to the host and ends the session.
    pub fn insert_final_code(&mut self) -> String {
        self.flush();
        self.state = SyncState::Idle;
        info!(bytes = self.code.len(); "Final code handed to host");
        self.code.clone()
    }

    fn flush(&mut self) {
        if self.tick() {
            trace!("Flushed deferred parse");
        }
    }

    fn scene_edited(&mut self) {
        self.state = SyncState::SceneEditing;
        self.regenerate();
    }

    /// One text transaction: arm the guard, take the text verbatim, parse,
    /// then send the scene-change notification that the guard swallows.
    fn text_transaction(&mut self, text: String) {
        self.suppress_regeneration.arm();
        self.code = text;
        self.state = SyncState::TextEditing;

        let outcome = self.parser.parse(&self.code);
        let replaced = outcome.apply_to(&mut self.scene);
        debug!(
            recognized = outcome.recognized(),
            skipped = outcome.skipped(),
            replaced;
            "Scene rebuilt from code"
        );
        self.diagnostics = outcome.diagnostics().to_vec();

        self.regenerate();
    }

    fn regenerate(&mut self) -> bool {
        if self.suppress_regeneration.take() {
            trace!("Regeneration suppressed");
            return false;
        }
        self.code = generator::generate(&self.scene);
        true
    }
}

/// Inserts `snippet`, indented and newline-terminated, before the last
/// `\end{tikzpicture}` of `code`.
fn splice_snippet(code: &str, snippet: &str) -> String {
    let mut block = String::new();
    for line in snippet.lines() {
        block.push_str(SNIPPET_INDENT);
        block.push_str(line);
        block.push('\n');
    }

    let (head, tail) = match code.rfind(PICTURE_END) {
        Some(pos) => code.split_at(pos),
        None => (code, ""),
    };

    let mut out = String::with_capacity(code.len() + block.len() + 1);
    out.push_str(head);
    if !head.is_empty() && !head.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&block);
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use tikzsync_core::geometry::Point;

    use super::*;
    use crate::templates::{PRESETS, SNIPPETS, TEMPLATES};

    fn circle() -> ElementSpec {
        ElementSpec::circle(Point::new(0.0, 0.0), 2.0)
    }

    #[test]
    fn test_guard_blocks_exactly_once() {
        let mut guard = OneShotGuard::default();
        assert!(!guard.take());

        guard.arm();
        assert!(guard.is_armed());
        assert!(guard.take());
        assert!(!guard.take());
    }

    #[test]
    fn test_new_controller() {
        let controller = SyncController::new();
        assert_eq!(controller.state(), SyncState::Idle);
        assert_eq!(controller.code(), "\\begin{tikzpicture}\n\\end{tikzpicture}");
        assert!(controller.scene().is_empty());
    }

    #[test]
    fn test_scene_change_regenerates() {
        let mut controller = SyncController::new();
        let id = controller.add_element(circle());

        assert_eq!(controller.state(), SyncState::SceneEditing);
        assert_eq!(
            controller.code(),
            "\\begin{tikzpicture}\n  \\draw (0,0) circle (2cm);\n\\end{tikzpicture}"
        );

        assert!(controller.remove_element(id).is_some());
        assert_eq!(controller.code(), "\\begin{tikzpicture}\n\\end{tikzpicture}");
        assert!(controller.remove_element(id).is_none());
    }

    #[test]
    fn test_text_edit_is_not_overwritten() {
        let mut controller = SyncController::new();
        let typed = "\\begin{tikzpicture}\n\\draw   (0,0)  circle (2);\n\\end{tikzpicture}";
        controller.edit_text(typed);

        assert_eq!(controller.code(), typed);
        assert_eq!(controller.state(), SyncState::TextEditing);
        assert_eq!(controller.scene().len(), 1);
        assert!(!controller.suppress_regeneration.is_armed());
    }

    #[test]
    fn test_suppression_consumed_by_own_notification() {
        let mut controller = SyncController::new();
        controller.edit_text("\\draw (0,0) -- (1,1);");

        // The next, independent notification regenerates again.
        assert!(controller.notify_scene_changed());
        assert!(controller.code().starts_with("\\begin{tikzpicture}"));
    }

    #[test]
    fn test_unrecognized_text_keeps_scene() {
        let mut controller = SyncController::new();
        controller.add_element(circle());

        controller.edit_text("\\draw (0,0) circ");
        assert_eq!(controller.code(), "\\draw (0,0) circ");
        assert_eq!(controller.scene().len(), 1);
        assert_eq!(controller.diagnostics().len(), 1);
    }

    #[test]
    fn test_snippet_parse_is_deferred() {
        let mut controller = SyncController::new();
        controller.insert_snippet(&SNIPPETS[0]);

        assert!(controller.has_pending_parse());
        assert!(controller.scene().is_empty());
        assert_eq!(
            controller.code(),
            "\\begin{tikzpicture}\n  \\draw (0,0) circle (1cm);\n\\end{tikzpicture}"
        );

        assert!(controller.tick());
        assert!(!controller.tick());
        assert_eq!(controller.scene().len(), 1);
        assert_eq!(
            controller.code(),
            "\\begin{tikzpicture}\n  \\draw (0,0) circle (1cm);\n\\end{tikzpicture}"
        );
    }

    #[test]
    fn test_entry_points_flush_pending_parse() {
        let mut controller = SyncController::new();
        controller.insert_snippet_code("\\draw (0,0) -- (1,0);");
        controller.switch_tab(AuthoringTab::Templates);

        assert!(!controller.has_pending_parse());
        assert_eq!(controller.scene().len(), 1);
        assert_eq!(controller.active_tab(), AuthoringTab::Templates);
    }

    #[test]
    fn test_switch_tab_changes_nothing_else() {
        let mut controller = SyncController::new();
        controller.add_element(circle());
        let code = controller.code().to_string();

        controller.switch_tab(AuthoringTab::Code);
        assert_eq!(controller.code(), code);
        assert_eq!(controller.scene().len(), 1);
        assert_eq!(controller.state(), SyncState::SceneEditing);
    }

    #[test]
    fn test_select_template() {
        let mut controller = SyncController::new();
        let template = &TEMPLATES[2];
        controller.select_template(template);

        assert_eq!(controller.code(), template.code());
        assert_eq!(controller.scene().plots().count(), 1);
    }

    #[test]
    fn test_load_preset_and_clear() {
        let mut controller = SyncController::new();
        controller.load_preset(&PRESETS[0]);
        assert_eq!(controller.scene().len(), PRESETS[0].elements().len());

        controller.clear_scene();
        assert!(controller.scene().is_empty());
        assert_eq!(controller.code(), "\\begin{tikzpicture}\n\\end{tikzpicture}");
    }

    #[test]
    fn test_insert_final_code_returns_to_idle() {
        let mut controller = SyncController::new();
        controller.edit_text("\\draw (0,0) -- (1,1);");

        let code = controller.insert_final_code();
        assert_eq!(code, "\\draw (0,0) -- (1,1);");
        assert_eq!(controller.state(), SyncState::Idle);
    }

    #[test]
    fn test_splice_snippet() {
        let spliced = splice_snippet("\\begin{tikzpicture}\n\\end{tikzpicture}", "a;\nb;");
        assert_eq!(spliced, "\\begin{tikzpicture}\n  a;\n  b;\n\\end{tikzpicture}");

        // the last closing tag wins
        let spliced = splice_snippet("\\end{tikzpicture}\n\\end{tikzpicture}", "x;");
        assert_eq!(spliced, "\\end{tikzpicture}\n  x;\n\\end{tikzpicture}");

        assert_eq!(splice_snippet("", "x;"), "  x;\n");
        assert_eq!(splice_snippet("\\draw;", "x;"), "\\draw;\n  x;\n");
    }
}
