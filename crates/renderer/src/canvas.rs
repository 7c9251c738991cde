//! Lightweight SVG document builder.
//!
//! Symbol renderers append shapes through typed methods instead of
//! concatenating markup by hand. Definitions (markers, inline CSS) are
//! collected separately and emitted in a single `<defs>` block so the
//! document stays valid no matter the order renderers run in.

use std::fmt::Write;

/// Accumulates an SVG path `d` attribute command by command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData(String);

impl PathData {
    pub fn new() -> Self {
        PathData(String::new())
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_cmd(format_args!("M {} {}", fmt_num(x), fmt_num(y)));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_cmd(format_args!("L {} {}", fmt_num(x), fmt_num(y)));
        self
    }

    /// Quadratic Bezier from the current point to `(x, y)` with a single
    /// control point.
    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.push_cmd(format_args!(
            "Q {} {} {} {}",
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(x),
            fmt_num(y)
        ));
        self
    }

    /// Elliptical arc from the current point to `(x, y)`.
    pub fn arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> &mut Self {
        self.push_cmd(format_args!(
            "A {} {} {} {} {} {} {}",
            fmt_num(rx),
            fmt_num(ry),
            fmt_num(x_rotation),
            large_arc as u8,
            sweep as u8,
            fmt_num(x),
            fmt_num(y)
        ));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.push_cmd(format_args!("Z"));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn push_cmd(&mut self, cmd: std::fmt::Arguments<'_>) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        // writing into a String cannot fail
        let _ = self.0.write_fmt(cmd);
    }
}

/// A fixed-size SVG document under construction.
///
/// All drawing methods are infallible; `finish` assembles the final
/// byte buffer.
#[derive(Debug)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    body: String,
    defs: String,
    open_groups: usize,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        SvgCanvas {
            width,
            height,
            body: String::with_capacity(4096),
            defs: String::new(),
            open_groups: 0,
        }
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &str) {
        let _ = write!(
            self.body,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
            fmt_num(x1),
            fmt_num(y1),
            fmt_num(x2),
            fmt_num(y2)
        );
        self.close_shape(style);
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], style: &str) {
        let _ = write!(self.body, "<polyline points=\"{}\"", fmt_points(points));
        self.close_shape(style);
    }

    pub fn polygon(&mut self, points: &[(f64, f64)], style: &str) {
        let _ = write!(self.body, "<polygon points=\"{}\"", fmt_points(points));
        self.close_shape(style);
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &str) {
        let _ = write!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(r)
        );
        self.close_shape(style);
    }

    pub fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, style: &str) {
        let _ = write!(
            self.body,
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"",
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(rx),
            fmt_num(ry)
        );
        self.close_shape(style);
    }

    pub fn path(&mut self, d: &PathData, style: &str) {
        let _ = write!(self.body, "<path d=\"{}\"", d.as_str());
        self.close_shape(style);
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &str) {
        let _ = write!(self.body, "<text x=\"{}\" y=\"{}\"", fmt_num(x), fmt_num(y));
        if !style.is_empty() {
            let _ = write!(self.body, " style=\"{}\"", escape_attr(style));
        }
        let _ = write!(self.body, ">{}</text>", escape_text(content));
    }

    pub fn image(&mut self, x: f64, y: f64, width: f64, height: f64, href: &str) {
        let _ = write!(
            self.body,
            "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" xlink:href=\"{}\"/>",
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height),
            escape_attr(href)
        );
    }

    /// Emits a scoped CSS block. The rules apply document-wide, so callers
    /// pass selectors already prefixed via [`scope_css`].
    pub fn style_block(&mut self, css: &str) {
        let _ = write!(
            self.body,
            "<style type=\"text/css\"><![CDATA[\n{}\n]]></style>",
            css
        );
    }

    /// Registers an auto-orienting marker holding a single polyline, for
    /// use via `marker-end: url(#id)`.
    pub fn def_marker_polyline(
        &mut self,
        id: &str,
        ref_x: f64,
        ref_y: f64,
        width: f64,
        height: f64,
        points: &[(f64, f64)],
        style: &str,
    ) {
        let _ = write!(
            self.defs,
            "<marker id=\"{}\" refX=\"{}\" refY=\"{}\" markerWidth=\"{}\" markerHeight=\"{}\" orient=\"auto\">",
            escape_attr(id),
            fmt_num(ref_x),
            fmt_num(ref_y),
            fmt_num(width),
            fmt_num(height)
        );
        let _ = write!(self.defs, "<polyline points=\"{}\"", fmt_points(points));
        if !style.is_empty() {
            let _ = write!(self.defs, " style=\"{}\"", escape_attr(style));
        }
        self.defs.push_str("/></marker>");
    }

    pub fn open_group_id(&mut self, id: &str) {
        let _ = write!(self.body, "<g id=\"{}\">", escape_attr(id));
        self.open_groups += 1;
    }

    pub fn open_group_transform(&mut self, transform: &str) {
        let _ = write!(self.body, "<g transform=\"{}\">", escape_attr(transform));
        self.open_groups += 1;
    }

    pub fn close_group(&mut self) {
        debug_assert!(self.open_groups > 0, "close_group without open group");
        self.body.push_str("</g>");
        self.open_groups = self.open_groups.saturating_sub(1);
    }

    /// Assembles the document. Any groups left open are closed so the
    /// output is always well-formed.
    pub fn finish(mut self) -> Vec<u8> {
        while self.open_groups > 0 {
            self.close_group();
        }
        let mut out = String::with_capacity(self.body.len() + self.defs.len() + 256);
        let _ = write!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">",
            w = self.width,
            h = self.height
        );
        if !self.defs.is_empty() {
            let _ = write!(out, "<defs>{}</defs>", self.defs);
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out.into_bytes()
    }

    fn close_shape(&mut self, style: &str) {
        if !style.is_empty() {
            let _ = write!(self.body, " style=\"{}\"", escape_attr(style));
        }
        self.body.push_str("/>");
    }
}

/// Prefixes every selector in `css` with `#scope ` so one object's rules
/// cannot bleed into elements drawn for another object on the same tile.
/// Comma-separated selector lists are split and each member is scoped.
pub fn scope_css(css: &str, scope: &str) -> String {
    let mut out = String::with_capacity(css.len() + scope.len() * 4);
    let mut rest = css;
    while let Some(open) = rest.find('{') {
        let (selectors, tail) = rest.split_at(open);
        let close = tail.find('}').map(|i| i + 1).unwrap_or(tail.len());
        let (block, after) = tail.split_at(close);
        if !out.is_empty() {
            out.push(' ');
        }
        let mut first = true;
        for selector in selectors.split(',') {
            let selector = selector.trim();
            if selector.is_empty() {
                continue;
            }
            if !first {
                out.push_str(", ");
            }
            out.push('#');
            out.push_str(scope);
            out.push(' ');
            out.push_str(selector);
            first = false;
        }
        out.push(' ');
        out.push_str(block);
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Trims the noise `{}` leaves on round numbers: whole values print
/// without a fractional part, everything else keeps full precision.
fn fmt_num(v: f64) -> FmtNum {
    FmtNum(v)
}

struct FmtNum(f64);

impl std::fmt::Display for FmtNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == self.0.trunc() && self.0.abs() < 1e15 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn fmt_points(points: &[(f64, f64)]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", fmt_num(*x), fmt_num(*y));
    }
    out
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
