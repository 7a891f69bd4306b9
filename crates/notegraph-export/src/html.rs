//! Self-contained interactive HTML rendering.
//!
//! The page embeds the [`GraphView`] as inline JSON and draws it on a canvas
//! with a small force-directed layout. Nothing is fetched at view time, so
//! the file can be downloaded and opened offline.

use crate::view::GraphView;
use notegraph_core::{Error, RenderConfig, Result};

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<style>
  body { margin: 0; font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; background: #fafafa; color: #222; }
  header { padding: 0.6rem 1rem; border-bottom: 1px solid #ddd; display: flex; gap: 1.5rem; align-items: center; flex-wrap: wrap; }
  header h1 { font-size: 1.1rem; margin: 0; }
  header .stats { color: #666; font-size: 0.85rem; }
  .controls { display: flex; gap: 1rem; align-items: center; font-size: 0.85rem; }
  .controls input[type=range] { width: 110px; }
  #graph { display: block; width: 100%; height: {{HEIGHT}}px; background: #fff; cursor: grab; }
  #tooltip { position: fixed; max-width: 420px; max-height: 300px; overflow: hidden; padding: 0.5rem 0.75rem;
             background: #fff; border: 1px solid #ccc; border-radius: 4px; box-shadow: 0 2px 8px rgba(0,0,0,0.15);
             font-size: 0.8rem; white-space: pre-wrap; pointer-events: none; display: none; }
  #tooltip strong { display: block; margin-bottom: 0.3rem; }
</style>
</head>
<body>
<header>
  <h1>{{TITLE}}</h1>
  <span class="stats" id="stats"></span>
  {{CONTROLS}}
</header>
<canvas id="graph"></canvas>
<div id="tooltip"></div>
<script id="graph-data" type="application/json">{{GRAPH_DATA}}</script>
<script>
(function () {
  "use strict";
  var data = JSON.parse(document.getElementById("graph-data").textContent);
  var canvas = document.getElementById("graph");
  var ctx = canvas.getContext("2d");
  var tooltip = document.getElementById("tooltip");
  var physics = { enabled: true, repulsion: 1800, spring: 0.02, length: 90, gravity: 0.01 };

  var byId = {};
  var sizes = data.nodes.map(function (n) { return n.size; }).filter(function (s) { return typeof s === "number"; });
  var minSize = sizes.length ? Math.min.apply(null, sizes) : 0;
  var maxSize = sizes.length ? Math.max.apply(null, sizes) : 0;
  var nodes = data.nodes.map(function (n, i) {
    var angle = 2 * Math.PI * i / Math.max(data.nodes.length, 1);
    var ring = 40 + 6 * Math.sqrt(data.nodes.length) * (1 + (i % 7) / 7);
    var radius = 10;
    if (typeof n.size === "number" && maxSize > minSize) {
      radius = 8 + 24 * (n.size - minSize) / (maxSize - minSize);
    }
    var node = { id: n.id, label: n.label, hover: n.hover, r: radius,
                 x: ring * Math.cos(angle), y: ring * Math.sin(angle), vx: 0, vy: 0, fixed: false };
    byId[n.id] = node;
    return node;
  });
  var edges = data.edges.map(function (e) { return { from: byId[e.from], to: byId[e.to] }; })
                        .filter(function (e) { return e.from && e.to; });
  document.getElementById("stats").textContent = nodes.length + " notes, " + edges.length + " links";

  var view = { x: 0, y: 0, scale: 1 };
  function resize() {
    canvas.width = canvas.clientWidth * window.devicePixelRatio;
    canvas.height = canvas.clientHeight * window.devicePixelRatio;
  }
  window.addEventListener("resize", resize);
  resize();

  function step() {
    if (!physics.enabled) { return; }
    var i, j, a, b, dx, dy, d2, d, f;
    for (i = 0; i < nodes.length; i++) {
      a = nodes[i];
      for (j = i + 1; j < nodes.length; j++) {
        b = nodes[j];
        dx = a.x - b.x; dy = a.y - b.y;
        d2 = dx * dx + dy * dy + 0.01;
        f = physics.repulsion / d2;
        d = Math.sqrt(d2);
        a.vx += f * dx / d; a.vy += f * dy / d;
        b.vx -= f * dx / d; b.vy -= f * dy / d;
      }
      a.vx -= a.x * physics.gravity; a.vy -= a.y * physics.gravity;
    }
    edges.forEach(function (e) {
      if (e.from === e.to) { return; }
      dx = e.to.x - e.from.x; dy = e.to.y - e.from.y;
      d = Math.sqrt(dx * dx + dy * dy) + 0.01;
      f = physics.spring * (d - physics.length);
      e.from.vx += f * dx / d; e.from.vy += f * dy / d;
      e.to.vx -= f * dx / d; e.to.vy -= f * dy / d;
    });
    nodes.forEach(function (n) {
      if (n.fixed) { n.vx = 0; n.vy = 0; return; }
      n.vx *= 0.6; n.vy *= 0.6;
      n.x += Math.max(-20, Math.min(20, n.vx));
      n.y += Math.max(-20, Math.min(20, n.vy));
    });
  }

  function toScreen(n) {
    return { x: canvas.width / 2 + (n.x + view.x) * view.scale * window.devicePixelRatio,
             y: canvas.height / 2 + (n.y + view.y) * view.scale * window.devicePixelRatio };
  }
  function toWorld(px, py) {
    var rect = canvas.getBoundingClientRect();
    var sx = (px - rect.left) * window.devicePixelRatio, sy = (py - rect.top) * window.devicePixelRatio;
    return { x: (sx - canvas.width / 2) / (view.scale * window.devicePixelRatio) - view.x,
             y: (sy - canvas.height / 2) / (view.scale * window.devicePixelRatio) - view.y };
  }

  function draw() {
    var k = view.scale * window.devicePixelRatio;
    ctx.clearRect(0, 0, canvas.width, canvas.height);
    ctx.lineWidth = Math.max(1, k * 0.8);
    ctx.strokeStyle = "#9aa5b1";
    ctx.fillStyle = "#9aa5b1";
    edges.forEach(function (e) {
      var s = toScreen(e.from), t = toScreen(e.to);
      if (e.from === e.to) {
        ctx.beginPath();
        ctx.arc(s.x + e.from.r * k, s.y - e.from.r * k, e.from.r * k * 0.7, 0, 2 * Math.PI);
        ctx.stroke();
        return;
      }
      var dx = t.x - s.x, dy = t.y - s.y, len = Math.sqrt(dx * dx + dy * dy) || 1;
      var ux = dx / len, uy = dy / len;
      var ex = t.x - ux * e.to.r * k, ey = t.y - uy * e.to.r * k;
      ctx.beginPath(); ctx.moveTo(s.x, s.y); ctx.lineTo(ex, ey); ctx.stroke();
      var head = 8 * Math.max(k, 0.6);
      ctx.beginPath();
      ctx.moveTo(ex, ey);
      ctx.lineTo(ex - ux * head - uy * head * 0.5, ey - uy * head + ux * head * 0.5);
      ctx.lineTo(ex - ux * head + uy * head * 0.5, ey - uy * head - ux * head * 0.5);
      ctx.closePath(); ctx.fill();
    });
    ctx.font = Math.round(11 * Math.max(k, 0.7)) + "px sans-serif";
    ctx.textAlign = "center";
    nodes.forEach(function (n) {
      var p = toScreen(n);
      ctx.beginPath();
      ctx.arc(p.x, p.y, n.r * k, 0, 2 * Math.PI);
      ctx.fillStyle = n.hover === undefined ? "#f0a35e" : "#4c8bf5";
      ctx.fill();
      ctx.fillStyle = "#222";
      ctx.fillText(n.label, p.x, p.y + n.r * k + 12 * Math.max(k, 0.7));
    });
  }

  function nodeAt(px, py) {
    var w = toWorld(px, py);
    for (var i = nodes.length - 1; i >= 0; i--) {
      var n = nodes[i], dx = n.x - w.x, dy = n.y - w.y;
      if (dx * dx + dy * dy <= n.r * n.r) { return n; }
    }
    return null;
  }

  var dragging = null, panning = null;
  canvas.addEventListener("mousedown", function (ev) {
    dragging = nodeAt(ev.clientX, ev.clientY);
    if (dragging) { dragging.fixed = true; } else { panning = { x: ev.clientX, y: ev.clientY }; }
  });
  window.addEventListener("mouseup", function () {
    if (dragging) { dragging.fixed = false; }
    dragging = null; panning = null;
  });
  canvas.addEventListener("mousemove", function (ev) {
    if (dragging) {
      var w = toWorld(ev.clientX, ev.clientY);
      dragging.x = w.x; dragging.y = w.y;
    } else if (panning) {
      view.x += (ev.clientX - panning.x) / view.scale;
      view.y += (ev.clientY - panning.y) / view.scale;
      panning = { x: ev.clientX, y: ev.clientY };
    }
    var hit = nodeAt(ev.clientX, ev.clientY);
    if (hit) {
      tooltip.innerHTML = "";
      var strong = document.createElement("strong");
      strong.textContent = hit.label;
      tooltip.appendChild(strong);
      if (hit.hover !== undefined) { tooltip.appendChild(document.createTextNode(hit.hover)); }
      tooltip.style.left = (ev.clientX + 14) + "px";
      tooltip.style.top = (ev.clientY + 14) + "px";
      tooltip.style.display = "block";
    } else {
      tooltip.style.display = "none";
    }
  });
  canvas.addEventListener("wheel", function (ev) {
    ev.preventDefault();
    view.scale = Math.max(0.1, Math.min(5, view.scale * (ev.deltaY < 0 ? 1.1 : 0.9)));
  }, { passive: false });

  function bind(id, apply) {
    var el = document.getElementById(id);
    if (!el) { return; }
    el.addEventListener("input", function () { apply(el); });
  }
  bind("physics-enabled", function (el) { physics.enabled = el.checked; });
  bind("physics-repulsion", function (el) { physics.repulsion = parseFloat(el.value); });
  bind("physics-length", function (el) { physics.length = parseFloat(el.value); });

  function frame() { step(); draw(); window.requestAnimationFrame(frame); }
  frame();
})();
</script>
</body>
</html>
"##;

const PHYSICS_CONTROLS: &str = r#"<div class="controls">
    <label><input type="checkbox" id="physics-enabled" checked> physics</label>
    <label>repulsion <input type="range" id="physics-repulsion" min="200" max="6000" step="100" value="1800"></label>
    <label>link length <input type="range" id="physics-length" min="20" max="300" step="10" value="90"></label>
  </div>"#;

/// Renders a [`GraphView`] into a standalone HTML page
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    config: RenderConfig,
}

impl HtmlRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render the page
    pub fn render(&self, view: &GraphView) -> Result<String> {
        let data = serde_json::to_string(view)
            .map_err(|e| Error::other(format!("Failed to serialize graph view: {}", e)))?;
        let controls = if self.config.physics_controls {
            PHYSICS_CONTROLS
        } else {
            ""
        };

        let title = escape_html(&self.config.page_title);
        let height = self.config.height.to_string();
        let data = escape_script(&data);

        Ok(fill_template(
            TEMPLATE,
            &[
                ("TITLE", &title),
                ("HEIGHT", &height),
                ("CONTROLS", controls),
                ("GRAPH_DATA", &data),
            ],
        ))
    }
}

/// Substitute `{{KEY}}` placeholders in one pass over the template.
///
/// Substituted values are never scanned again, so placeholder-like text in a
/// title or in note content stays literal. Unknown placeholders are kept.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let value = after.find("}}").and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((v, close)) => {
                out.push_str(v);
                rest = &after[close + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Keep embedded JSON from closing its `<script>` element early.
///
/// `<` only occurs inside JSON strings, where `\u003c` is equivalent.
fn escape_script(json: &str) -> String {
    json.replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{DisplayEdge, DisplayNode};

    fn view() -> GraphView {
        GraphView {
            directed: true,
            nodes: vec![
                DisplayNode {
                    id: "id1".into(),
                    label: "A".into(),
                    hover: Some("</script><b>bold</b>".into()),
                    size: Some(0.4),
                },
                DisplayNode {
                    id: "id2".into(),
                    label: "B".into(),
                    hover: None,
                    size: Some(0.6),
                },
            ],
            edges: vec![DisplayEdge {
                from: "id1".into(),
                to: "id2".into(),
            }],
        }
    }

    #[test]
    fn test_render_embeds_data() {
        let html = HtmlRenderer::default().render(&view()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#""from":"id1","to":"id2""#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_render_escapes_script_close() {
        let html = HtmlRenderer::default().render(&view()).unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
        assert!(html.contains(r"\u003c/script>\u003cb>bold\u003c/b>"));
    }

    #[test]
    fn test_render_title_and_controls() {
        let config = RenderConfig {
            page_title: "Q&A <notes>".to_string(),
            physics_controls: false,
            ..RenderConfig::default()
        };
        let html = HtmlRenderer::new(config).render(&view()).unwrap();

        assert!(html.contains("<title>Q&amp;A &lt;notes&gt;</title>"));
        assert!(!html.contains(r#"id="physics-enabled""#));
    }

    #[test]
    fn test_placeholders_in_title_stay_literal() {
        let config = RenderConfig {
            page_title: "{{GRAPH_DATA}} and {{HEIGHT}}".to_string(),
            ..RenderConfig::default()
        };
        let html = HtmlRenderer::new(config).render(&view()).unwrap();

        assert!(html.contains("<title>{{GRAPH_DATA}} and {{HEIGHT}}</title>"));
        assert_eq!(html.matches(r#""from":"id1""#).count(), 1);
    }

    #[test]
    fn test_fill_template() {
        let filled = fill_template("a {{X}} b {{Y}} {{", &[("X", "{{Y}}"), ("Y", "2")]);
        assert_eq!(filled, "a {{Y}} b 2 {{");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'"#), "&lt;a href=&quot;x&quot;&gt;&#39;");
    }
}
