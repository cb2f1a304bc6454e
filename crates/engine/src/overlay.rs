use glam::Vec2;
use std::collections::BTreeMap;
use std::fmt;

/// A HUD element drawn over the 3D view, in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Ring { center: Vec2, radius: f32 },
    Label { position: Vec2, text: String },
}

/// Retained set of named HUD widgets. The host draws whatever is in here each frame.
#[derive(Debug, Clone)]
pub struct Overlay {
    widgets: BTreeMap<String, Widget>,
    cursor_visible: bool,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            widgets: BTreeMap::new(),
            cursor_visible: true,
        }
    }
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a widget.
    pub fn set(&mut self, name: impl Into<String>, widget: Widget) {
        self.widgets.insert(name.into(), widget);
    }

    pub fn get(&self, name: &str) -> Option<&Widget> {
        self.widgets.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Widget> {
        self.widgets.remove(name)
    }

    /// Text of a label widget.
    pub fn label(&self, name: &str) -> Option<&str> {
        match self.widgets.get(name) {
            Some(Widget::Label { text, .. }) => Some(text),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Widget)> {
        self.widgets.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, widget) in &self.widgets {
            match widget {
                Widget::Ring { center, radius } => writeln!(
                    f,
                    "{name}: ring at ({:.0}, {:.0}) r={radius:.0}",
                    center.x, center.y
                )?,
                Widget::Label { position, text } => writeln!(
                    f,
                    "{name}: \"{text}\" at ({:.0}, {:.0})",
                    position.x, position.y
                )?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_by_name() {
        let mut overlay = Overlay::new();
        overlay.set(
            "fps",
            Widget::Label {
                position: Vec2::ZERO,
                text: "FPS: 60".into(),
            },
        );
        overlay.set(
            "fps",
            Widget::Label {
                position: Vec2::ZERO,
                text: "FPS: 30".into(),
            },
        );
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.label("fps"), Some("FPS: 30"));
    }

    #[test]
    fn cursor_visible_by_default() {
        let mut overlay = Overlay::new();
        assert!(overlay.cursor_visible());
        overlay.set_cursor_visible(false);
        assert!(!overlay.cursor_visible());
    }

    #[test]
    fn display_lists_widgets() {
        let mut overlay = Overlay::new();
        overlay.set(
            "crosshair",
            Widget::Ring {
                center: Vec2::new(640.0, 360.0),
                radius: 72.0,
            },
        );
        assert_eq!(overlay.to_string(), "crosshair: ring at (640, 360) r=72\n");
        assert_eq!(overlay.label("crosshair"), None);
    }
}
