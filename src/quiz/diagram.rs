//! SVG primitive builders for the visual question types.
//!
//! Pure string assembly: no randomness lives here, so the same inputs always
//! give byte-identical markup.

pub const FRAME_FILL: &str = "#fff7fb";
pub const PINK: &str = "#F8C8DC";
pub const TEAL: &str = "#4FB0AC";
pub const BROWN: &str = "#8B5E3C";

/// Wrap inner markup in the rounded diagram frame.
pub fn svg_wrap(inner: &str, width: u32, height: u32) -> String {
    format!(
        r#"
<svg viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="diagram">
  <rect x="0" y="0" width="{w}" height="{h}" rx="18" fill="{fill}" stroke="{pink}" stroke-width="4"/>
  {inner}
</svg>"#,
        w = width,
        h = height,
        fill = FRAME_FILL,
        pink = PINK,
        inner = inner
    )
}

/// Bold heading-style text label.
pub fn svg_label(x: i64, y: i64, text: &str) -> String {
    format!(
        r#"<text x="{}" y="{}" font-family="Quicksand, system-ui" font-size="18" font-weight="700" fill="{}">{}</text>"#,
        x, y, BROWN, text
    )
}

/// A rounded square block used by the block-counting diagrams.
pub fn svg_block(x: i64, y: i64, size: i64) -> String {
    format!(
        r##"<rect x="{x}" y="{y}" width="{s}" height="{s}" rx="6" fill="#e6fffb" stroke="{teal}" stroke-width="3"/>"##,
        x = x,
        y = y,
        s = size,
        teal = TEAL
    )
}

/// Plain line segment.
pub fn svg_line(x1: i64, y1: i64, x2: i64, y2: i64) -> String {
    format!(r#"<line x1="{}" y1="{}" x2="{}" y2="{}"/>"#, x1, y1, x2, y2)
}

/// Large letter marking a candidate (A-D).
pub fn svg_letter(x: i64, y: i64, letter: &str) -> String {
    format!(
        r#"<text x="{}" y="{}" font-family="Fredoka One, system-ui" font-size="22" fill="{}">{}</text>"#,
        x, y, TEAL, letter
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_wrap_frame() {
        let svg = svg_wrap("<g/>", 520, 260);
        assert!(svg.starts_with("\n<svg viewBox=\"0 0 520 260\""));
        assert!(svg.contains(r#"width="520" height="260" rx="18""#));
        assert!(svg.contains("  <g/>\n</svg>"));
    }

    #[test]
    fn test_builders_are_pure() {
        assert_eq!(svg_label(24, 40, "Mirror"), svg_label(24, 40, "Mirror"));
        assert_eq!(
            svg_label(24, 40, "Mirror"),
            r##"<text x="24" y="40" font-family="Quicksand, system-ui" font-size="18" font-weight="700" fill="#8B5E3C">Mirror</text>"##
        );
    }

    #[test]
    fn test_svg_block() {
        assert_eq!(
            svg_block(50, 164, 26),
            r##"<rect x="50" y="164" width="26" height="26" rx="6" fill="#e6fffb" stroke="#4FB0AC" stroke-width="3"/>"##
        );
    }
}
