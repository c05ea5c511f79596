//! Screen/button data model and the coercion rules applied to raw YAML.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::ImportError;

/// Number of grid units in one row. A button's `span` is expressed against
/// this budget in every orientation.
pub const COLUMNS: u16 = 6;

/// One grid cell: an actionable trigger (non-empty label) or a
/// spacer/separator (empty label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Display text. Empty marks a non-interactive element.
    pub label: String,
    /// Width in grid units, always within `[1, COLUMNS]` after validation.
    pub span: u16,
    /// Vertical multiplier in button-height units, always `>= 1`.
    pub height: u16,
    /// Endpoint POSTed on activation. Empty means the button is inert.
    pub url: String,
}

/// One page of the button grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    /// Unique id assigned at import time, never recomputed afterwards.
    pub id: String,
    pub title: String,
    /// Render order; drives row packing, so order is semantically meaningful.
    pub ui: Vec<Button>,
}

/// Result of coercing one untrusted field: the typed value plus whether the
/// fallback default had to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coerced<T> {
    pub value: T,
    pub defaulted: bool,
}

/// Build a validated `Screen` from one raw YAML document.
///
/// Structural requirements: a truthy `title` and a `ui` sequence. Everything
/// below that degrades per field instead of failing, so a single malformed
/// button field never blocks an otherwise-good configuration. `ordinal` is
/// the document's 1-based position, used only in error messages.
pub fn screen_from_document(doc: &Value, ordinal: usize, id: String) -> Result<Screen, ImportError> {
    let title = doc.get("title");
    if !title.is_some_and(is_truthy) {
        return Err(ImportError::InvalidDocument {
            index: ordinal,
            reason: "missing or empty `title`".into(),
        });
    }

    let Some(Value::Sequence(items)) = doc.get("ui") else {
        return Err(ImportError::InvalidDocument {
            index: ordinal,
            reason: "`ui` must be a sequence".into(),
        });
    };

    Ok(Screen {
        id,
        title: coerce_string(title).value,
        ui: items.iter().map(Button::from_yaml).collect(),
    })
}

impl Button {
    /// Coerce one raw `ui` entry into a button, field by field. A non-mapping
    /// entry yields the all-defaults button rather than an error.
    pub fn from_yaml(raw: &Value) -> Self {
        let label = coerce_string(raw.get("label"));
        let span = coerce_span(raw.get("span"));
        let height = coerce_height(raw.get("height"));
        let url = coerce_string(raw.get("url"));

        if span.defaulted || height.defaulted {
            tracing::debug!(
                "button '{}' fell back to default span/height",
                label.value
            );
        }

        Self {
            label: label.value,
            span: span.value,
            height: height.value,
            url: url.value,
        }
    }
}

/// Truthiness of a YAML value, mirroring how the loose config format treats
/// `title`: null, false, 0, and "" are falsy; collections are truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => true,
    }
}

/// Stringify a scalar field, defaulting to "".
pub fn coerce_string(raw: Option<&Value>) -> Coerced<String> {
    match raw {
        Some(Value::String(s)) => Coerced { value: s.clone(), defaulted: false },
        Some(Value::Number(n)) => Coerced { value: n.to_string(), defaulted: false },
        Some(Value::Bool(b)) => Coerced { value: b.to_string(), defaulted: false },
        _ => Coerced { value: String::new(), defaulted: true },
    }
}

/// Coerce `span` to an integer in `[1, COLUMNS]`. Missing, non-numeric, and
/// zero inputs fall back to 1; parsed values are clamped into range.
pub fn coerce_span(raw: Option<&Value>) -> Coerced<u16> {
    match extract_int(raw) {
        Some(v) => Coerced { value: v.clamp(1, COLUMNS as i64) as u16, defaulted: false },
        None => Coerced { value: 1, defaulted: true },
    }
}

/// Coerce `height` to an integer `>= 1`. No upper bound.
pub fn coerce_height(raw: Option<&Value>) -> Coerced<u16> {
    match extract_int(raw) {
        Some(v) => Coerced { value: v.clamp(1, u16::MAX as i64) as u16, defaulted: false },
        None => Coerced { value: 1, defaulted: true },
    }
}

/// Pull an integer out of an untrusted scalar: numbers truncate toward zero,
/// strings contribute their leading integer prefix ("3px" is 3), and
/// everything else fails. Zero is treated as a failed parse so it takes the
/// field default.
fn extract_int(raw: Option<&Value>) -> Option<i64> {
    let v = match raw? {
        Value::Number(n) => {
            let f = n.as_f64()?;
            if f.is_finite() { Some(f.trunc() as i64) } else { None }
        }
        Value::String(s) => parse_leading_int(s),
        _ => None,
    };
    v.filter(|v| *v != 0)
}

/// Parse the leading `[+-]?[0-9]+` prefix of a string, ignoring leading
/// whitespace and any trailing junk.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    // Saturate instead of failing on absurdly long digit runs.
    match digits.parse::<i64>() {
        Ok(v) => Some(sign * v),
        Err(_) => Some(if sign < 0 { i64::MIN } else { i64::MAX }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_span_clamps_into_range() {
        // Raw values outside [1, 6] always land inside it.
        for (raw, expected) in [
            ("span: 3", 3),
            ("span: 0", 1),
            ("span: -2", 1),
            ("span: 9", 6),
            ("span: 6", 6),
            ("span: 2.8", 2),
            ("span: '4'", 4),
            ("span: '4units'", 4),
            ("span: wide", 1),
            ("span: true", 1),
            ("span: null", 1),
        ] {
            let doc = yaml(raw);
            let got = coerce_span(doc.get("span"));
            assert_eq!(got.value, expected, "raw input: {raw}");
            assert!((1..=6).contains(&got.value));
        }
        // Missing field entirely.
        assert_eq!(coerce_span(None).value, 1);
        assert!(coerce_span(None).defaulted);
    }

    #[test]
    fn test_span_defaulted_flag() {
        let doc = yaml("a: junk\nb: 9");
        // Unparseable input is a default, an out-of-range parse is a clamp.
        assert!(coerce_span(doc.get("a")).defaulted);
        assert!(!coerce_span(doc.get("b")).defaulted);
    }

    #[test]
    fn test_height_has_no_upper_bound() {
        let doc = yaml("h: 40");
        assert_eq!(coerce_height(doc.get("h")).value, 40);

        let bad = yaml("h: [1, 2]");
        let got = coerce_height(bad.get("h"));
        assert_eq!(got.value, 1);
        assert!(got.defaulted);

        let neg = yaml("h: -5");
        assert_eq!(coerce_height(neg.get("h")).value, 1);
    }

    #[test]
    fn test_button_field_defaults_are_independent() {
        // One malformed field degrades alone; the rest still parse.
        let doc = yaml("label: On\nspan: garbage\nurl: http://x/on");
        let b = Button::from_yaml(&doc);
        assert_eq!(b.label, "On");
        assert_eq!(b.span, 1);
        assert_eq!(b.height, 1);
        assert_eq!(b.url, "http://x/on");
    }

    #[test]
    fn test_non_mapping_button_entry_is_all_defaults() {
        let b = Button::from_yaml(&yaml("just a string"));
        assert_eq!(b, Button { label: String::new(), span: 1, height: 1, url: String::new() });
    }

    #[test]
    fn test_document_requires_truthy_title() {
        for doc in ["ui: []", "title: ''\nui: []", "title: 0\nui: []", "title: false\nui: []"] {
            let err = screen_from_document(&yaml(doc), 2, "t-0".into()).unwrap_err();
            match err {
                ImportError::InvalidDocument { index, .. } => assert_eq!(index, 2),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_document_requires_ui_sequence() {
        let err = screen_from_document(&yaml("title: X\nui: not-a-list"), 1, "t-0".into())
            .unwrap_err();
        assert!(err.to_string().contains("document 1"));
    }

    #[test]
    fn test_empty_ui_is_a_valid_screen() {
        let s = screen_from_document(&yaml("title: Empty\nui: []"), 1, "t-0".into()).unwrap();
        assert_eq!(s.title, "Empty");
        assert!(s.ui.is_empty());
    }

    #[test]
    fn test_lights_scenario() {
        let doc = yaml(
            "title: Lights\nui:\n  - {label: 'On', span: 3, url: 'http://x/on'}\n  - {label: 'Off', span: 3, url: 'http://x/off'}",
        );
        let s = screen_from_document(&doc, 1, "1700000000000-0".into()).unwrap();
        assert_eq!(s.title, "Lights");
        assert_eq!(s.ui.len(), 2);
        assert_eq!((s.ui[0].span, s.ui[1].span), (3, 3));
        assert_eq!(s.ui[0].url, "http://x/on");
    }
}
