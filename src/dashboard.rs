//! Self-contained HTML page: location dropdown, one line chart per location, and the
//! scatter chart in a tooltip that fades in while the pointer is over the data line.

use crate::context::{FADE_IN, FADE_OUT, TOOLTIP_OFFSET_Y};
use crate::error::{Error, Result};
use crate::filter::DEFAULT_LOCATION;
use crate::models::Dataset;
use crate::selector::distinct_locations;
use crate::viz::{self, Layout, Surface};
use std::path::Path;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the page. The default location is preselected when present, otherwise the
/// first one in sort order.
pub fn render_html(dataset: &Dataset, layout: &Layout) -> Result<String> {
    let locations = distinct_locations(dataset);
    let initial = if locations.iter().any(|l| l == DEFAULT_LOCATION) {
        DEFAULT_LOCATION.to_string()
    } else {
        locations.first().cloned().unwrap_or_default()
    };

    let mut scatter = Surface::new(layout.scatter.width, layout.scatter.height);
    viz::scatter_chart(&mut scatter, dataset, None, layout);
    let scatter_svg = scatter.to_svg()?;

    let mut options = String::new();
    let mut charts = String::new();
    let mut line = Surface::new(layout.line.width, layout.line.height);
    for loc in &locations {
        let esc = escape_html(loc);
        let selected = if *loc == initial { " selected" } else { "" };
        let hidden = if *loc == initial { "" } else { " hidden" };
        viz::line_chart(&mut line, dataset, Some(loc), layout);
        let svg = line.to_svg()?;
        options.push_str(&format!(
            "<option value=\"{esc}\"{selected}>{esc}</option>"
        ));
        charts.push_str(&format!(
            "<div class=\"chart\" data-location=\"{esc}\"{hidden}>{svg}</div>\n"
        ));
    }

    log::info!("dashboard with {} location chart(s)", locations.len());
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; }}
.tooltip {{ position: absolute; opacity: 0; pointer-events: none; background: #fff;
  border: 1px solid #ccc; transition: opacity {fade_out}ms; }}
.tooltip.shown {{ opacity: 1; transition: opacity {fade_in}ms; }}
.chart polyline {{ cursor: pointer; }}
</style>
</head>
<body>
<select id="location">{options}</select>
{charts}<div class="tooltip" id="tooltip">{scatter_svg}</div>
<script>
(function () {{
  const select = document.getElementById('location');
  const tooltip = document.getElementById('tooltip');
  select.addEventListener('change', function () {{
    document.querySelectorAll('.chart').forEach(function (c) {{
      c.hidden = c.dataset.location !== select.value;
    }});
  }});
  document.querySelectorAll('.chart polyline').forEach(function (path) {{
    path.addEventListener('mouseover', function (ev) {{
      tooltip.style.left = ev.pageX + 'px';
      tooltip.style.top = (ev.pageY - {offset}) + 'px';
      tooltip.classList.add('shown');
    }});
    path.addEventListener('mouseout', function () {{
      tooltip.classList.remove('shown');
    }});
  }});
}})();
</script>
</body>
</html>
"#,
        title = escape_html(viz::LINE_TITLE),
        fade_in = FADE_IN.as_millis(),
        fade_out = FADE_OUT.as_millis(),
        offset = TOOLTIP_OFFSET_Y,
    ))
}

/// Write the page to a file.
pub fn save_html<P: AsRef<Path>>(dataset: &Dataset, layout: &Layout, path: P) -> Result<()> {
    let path = path.as_ref();
    let html = render_html(dataset, layout)?;
    std::fs::write(path, html).map_err(|e| Error::io(path, e))
}
