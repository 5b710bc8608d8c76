//! SVG back-end for the keyboard scene.
//!
//! Produces one standalone document per half, drawn at twice the layout size.

use super::{KeyShape, Scene};
use crate::models::{Half, LAYOUT_HEIGHT, LAYOUT_WIDTH};

/// Corner radius of a key in layout units.
const CORNER_RADIUS: f32 = 5.0;

/// Renders one half of the scene as an SVG document.
#[must_use]
pub fn render_half_svg(scene: &Scene, half: Half) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg width="{w}" height="{h}" viewBox="0, 0, {vw}, {vh}" xmlns="http://www.w3.org/2000/svg">"#,
        w = LAYOUT_WIDTH * 2.0,
        h = LAYOUT_HEIGHT * 2.0,
        vw = LAYOUT_WIDTH,
        vh = LAYOUT_HEIGHT,
    ));
    out.push('\n');
    for key in scene.keys(half) {
        write_key(&mut out, key);
    }
    out.push_str("</svg>\n");
    out
}

fn write_key(out: &mut String, key: &KeyShape) {
    let g = &key.geometry;
    let (w, h) = (g.width(), g.height());
    let transform = format!("rotate({},{},{})", g.rotation, g.x, g.y);
    let (fill, text_fill) = if key.selected {
        ("#f5c542", "black")
    } else {
        ("black", "white")
    };

    out.push_str(&format!(
        r#"  <rect data-half="{half}" data-index="{index}" x="{x}" y="{y}" width="{w}" height="{h}" rx="{r}" ry="{r}" fill="{fill}" transform="{transform}"/>"#,
        half = key.slot.half.id(),
        index = key.slot.index,
        x = g.x - w / 2.0,
        y = g.y - h / 2.0,
        r = CORNER_RADIUS,
    ));
    out.push('\n');
    out.push_str(&format!(
        r#"  <text x="{x}" y="{y}" dominant-baseline="middle" text-anchor="middle" fill="{text_fill}" transform="{transform}" font-size="{size}" pointer-events="none">{label}</text>"#,
        x = g.x,
        y = g.y,
        size = key.tier.point_size(),
        label = escape_xml(&key.label),
    ));
    out.push('\n');
}

/// Escapes text for use inside an XML element.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode_db::KeycodeDb;
    use crate::models::{BindingStore, LayoutTable, Selection, Slot, SymbolicCode};
    use crate::render::render_scene;

    fn scene_with(store: &BindingStore, selection: Selection) -> Scene {
        let db = KeycodeDb::load().unwrap();
        render_scene(&LayoutTable::new(), store, selection, &db)
    }

    #[test]
    fn test_svg_has_one_rect_per_key() {
        let scene = scene_with(&BindingStore::default(), Selection::Idle);
        let svg = render_half_svg(&scene, Half::Primary);
        assert!(svg.starts_with("<svg width=\"520\" height=\"640\" viewBox=\"0, 0, 260, 320\""));
        assert_eq!(svg.matches("<rect ").count(), 32);
        assert_eq!(svg.matches("<text ").count(), 32);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_svg_one_element_per_line() {
        let scene = scene_with(&BindingStore::default(), Selection::Idle);
        let svg = render_half_svg(&scene, Half::Secondary);
        let lines: Vec<&str> = svg.lines().collect();
        assert_eq!(lines.len(), 2 + 2 * 32);
        assert!(lines[1].starts_with("  <rect "));
        assert!(lines[2].starts_with("  <text "));
        assert!(svg.ends_with("</text>\n</svg>\n"));
    }

    #[test]
    fn test_svg_font_sizes_and_rotation() {
        let scene = scene_with(&BindingStore::default(), Selection::Idle);
        let svg = render_half_svg(&scene, Half::Secondary);
        // "K" is a single character label, "Bksp" is medium
        assert!(svg.contains(r#"font-size="16" pointer-events="none">K<"#));
        assert!(svg.contains(r#"font-size="8" pointer-events="none">Bksp<"#));
        // Mirrored thumb keys rotate the other way
        assert!(svg.contains("rotate(-80,"));
    }

    #[test]
    fn test_svg_escapes_labels() {
        let mut store = BindingStore::default();
        store.set(Half::Primary, 0, SymbolicCode::from("KC_COMMA"));
        let mut scene = scene_with(&store, Selection::Idle);
        scene.primary[0].label = "<&>".to_string();
        let svg = render_half_svg(&scene, Half::Primary);
        assert!(svg.contains(">&lt;&amp;&gt;<"));
    }

    #[test]
    fn test_svg_highlights_selection() {
        let scene = scene_with(
            &BindingStore::default(),
            Selection::Editing(Slot::new(Half::Primary, 4)),
        );
        let svg = render_half_svg(&scene, Half::Primary);
        assert_eq!(svg.matches("#f5c542").count(), 1);
        assert!(svg.contains(r#"data-half="primary" data-index="4""#));
    }
}
