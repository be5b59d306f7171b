//! Typed overlay of partial JSON patches onto style trees.
//!
//! The style structs are the closed schema. Each leaf type decides what it
//! accepts:
//!
//! | Leaf | Accepts | Otherwise |
//! |------|---------|-----------|
//! | struct | object (merged field by field) | kept |
//! | `Vec<Color>` | array (replaced atomically) | kept |
//! | `Color` | any color shape that resolves | kept |
//! | choice enum | any string (unknown → default variant) | kept |
//! | `u32` / `f64` / `bool` / `String` | matching JSON kind | kept |
//!
//! Keys the schema does not define are dropped.

use serde_json::Value;

use crate::color::{Color, resolve_color};

/// In-place application of a partial patch.
pub trait Overlay {
    fn overlay(&mut self, patch: &Value);
}

pub(crate) fn reject(kind: &str, patch: &Value) {
    tracing::debug!(expected = kind, got = %patch, "style leaf rejected, keeping current value");
}

impl Overlay for u32 {
    fn overlay(&mut self, patch: &Value) {
        match patch.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => *self = n,
            None => reject("unsigned integer", patch),
        }
    }
}

impl Overlay for f64 {
    fn overlay(&mut self, patch: &Value) {
        match patch.as_f64().filter(|n| n.is_finite()) {
            Some(n) => *self = n,
            None => reject("number", patch),
        }
    }
}

impl Overlay for bool {
    fn overlay(&mut self, patch: &Value) {
        match patch.as_bool() {
            Some(b) => *self = b,
            None => reject("boolean", patch),
        }
    }
}

impl Overlay for String {
    fn overlay(&mut self, patch: &Value) {
        match patch.as_str() {
            Some(s) => *self = s.to_string(),
            None => reject("string", patch),
        }
    }
}

impl Overlay for Color {
    fn overlay(&mut self, patch: &Value) {
        match resolve_color(patch, None) {
            Some(c) => *self = Color::new(c),
            None => reject("color", patch),
        }
    }
}

impl Overlay for Vec<Color> {
    fn overlay(&mut self, patch: &Value) {
        match patch.as_array() {
            Some(items) => {
                *self = items
                    .iter()
                    .filter_map(|item| resolve_color(item, None))
                    .map(Color::new)
                    .collect();
            }
            None => reject("color list", patch),
        }
    }
}

/// Implement [`Overlay`] for a style struct by listing its fields.
///
/// A field may name its JSON key explicitly (`kind => "type"`).
macro_rules! overlay_fields {
    (@key $field:ident $key:literal) => { $key };
    (@key $field:ident) => { stringify!($field) };
    ($ty:ty { $($field:ident $(=> $key:literal)?),* $(,)? }) => {
        impl $crate::style::overlay::Overlay for $ty {
            fn overlay(&mut self, patch: &::serde_json::Value) {
                let Some(map) = patch.as_object() else {
                    $crate::style::overlay::reject(stringify!($ty), patch);
                    return;
                };
                const KEYS: &[&str] = &[$(overlay_fields!(@key $field $($key)?)),*];
                for key in map.keys().filter(|k| !KEYS.contains(&k.as_str())) {
                    ::tracing::debug!(style = stringify!($ty), key = %key, "dropping unknown style key");
                }
                $(
                    if let Some(value) = map.get(overlay_fields!(@key $field $($key)?)) {
                        $crate::style::overlay::Overlay::overlay(&mut self.$field, value);
                    }
                )*
            }
        }
    };
}

/// Implement string conversion, lenient deserialization and [`Overlay`] for
/// a unit-only choice enum. Unknown strings map to the default variant.
macro_rules! choice_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                // "rectRounded", "rect-rounded" and "rect_rounded" all match.
                let wanted = value.trim().to_ascii_lowercase().replace(['-', '_'], "");
                $(
                    if wanted == $name.replace('_', "") {
                        return $ty::$variant;
                    }
                )+
                $ty::default()
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self::from(value.as_str())
            }
        }

        impl $crate::style::overlay::Overlay for $ty {
            fn overlay(&mut self, patch: &::serde_json::Value) {
                match patch.as_str() {
                    Some(s) => *self = $ty::from(s),
                    None => $crate::style::overlay::reject(stringify!($ty), patch),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_u32_rejects_negative_and_fractional() {
        let mut n = 10u32;
        n.overlay(&json!(-4));
        assert_eq!(n, 10);
        n.overlay(&json!(2.5));
        assert_eq!(n, 10);
        n.overlay(&json!("12"));
        assert_eq!(n, 10);
        n.overlay(&json!(12));
        assert_eq!(n, 12);
    }

    #[test]
    fn test_f64_accepts_integers() {
        let mut v = 0.5f64;
        v.overlay(&json!(-45));
        assert_eq!(v, -45.0);
        v.overlay(&json!(null));
        assert_eq!(v, -45.0);
    }

    #[test]
    fn test_color_list_replaced_atomically() {
        let mut colors = vec![Color::from("#1"), Color::from("#2"), Color::from("#3")];
        colors.overlay(&json!(["#x", {"hex": "#y"}, 5]));
        assert_eq!(colors, vec![Color::from("#x"), Color::from("#y")]);
        colors.overlay(&json!("#z"));
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn test_color_rejects_unresolvable() {
        let mut c = Color::from("#fff");
        c.overlay(&json!({}));
        assert_eq!(c.as_str(), "#fff");
        c.overlay(&json!({"r": 0, "g": 0, "b": 255}));
        assert_eq!(c.as_str(), "#0000ff");
    }
}
