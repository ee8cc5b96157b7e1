// Heating page - HTML shell around the Chart.js canvases
use crate::application::heating_service::{HeatingView, CURRENT_TEMPS_SECTION, TAB_GROUP};
use crate::application::tabs::ACTIVE_LABEL_CLASS;
use crate::application::view_registry::ViewId;
use crate::domain::chart::ChartRange;

/// Render the page for view `id`; the page's tab and section requests name it.
pub fn render_heating_page(id: ViewId, view: &HeatingView) -> Result<String, serde_json::Error> {
    let active = view.active_range().unwrap_or(ChartRange::Daily);
    let daily_config = script_safe_json(&serde_json::to_string(&view.daily_chart())?);
    let expanded = view
        .section(CURRENT_TEMPS_SECTION)
        .map(|section| section.expanded)
        .unwrap_or(true);

    let generated_at = view.generated_at().format("%Y-%m-%d %H:%M UTC").to_string();

    Ok(HEATING_HTML
        .replace("{{VIEW_ID}}", &id.to_string())
        .replace("{{GENERATED_AT}}", &generated_at)
        .replace("{{TAB_BUTTONS}}", &tab_buttons(active))
        .replace("{{TAB_PANELS}}", &tab_panels(view, active))
        .replace("{{CURRENT_TEMPS}}", &current_temps(view))
        .replace("{{SECTION}}", CURRENT_TEMPS_SECTION)
        .replace("{{CONTENT_DISPLAY}}", display(expanded))
        .replace("{{ADD_DISPLAY}}", display(!expanded))
        .replace("{{REMOVE_DISPLAY}}", display(expanded))
        .replace("{{TAB_GROUP}}", TAB_GROUP)
        .replace("{{ACTIVE_CLASS}}", ACTIVE_LABEL_CLASS)
        .replace("{{DAILY_CONFIG}}", &daily_config))
}

fn tab_buttons(active: ChartRange) -> String {
    ChartRange::ALL
        .iter()
        .map(|range| {
            let class = if *range == active {
                format!("{TAB_GROUP}_label tab-button {ACTIVE_LABEL_CLASS}")
            } else {
                format!("{TAB_GROUP}_label tab-button")
            };
            let onclick = format!("showAndLoadTab('{}')", range.id());
            let open = format!(
                r#"<button type="button" id="{}_label" class="{class}" onclick="{onclick}">"#,
                range.tab_id(),
            );
            format!("{open}{}</button>", range.title())
        })
        .collect::<Vec<_>>()
        .join("\n      ")
}

fn tab_panels(view: &HeatingView, active: ChartRange) -> String {
    ChartRange::ALL
        .iter()
        .map(|range| {
            let body = if view.has_canvas(*range) {
                format!(r#"<canvas id="{}"></canvas>"#, range.canvas_id())
            } else {
                r#"<p class="muted">Chart unavailable.</p>"#.to_string()
            };
            format!(
                r#"<div id="{tab}" class="{TAB_GROUP}" style="display: {display}">{body}</div>"#,
                tab = range.tab_id(),
                display = display(*range == active),
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ")
}

fn current_temps(view: &HeatingView) -> String {
    let rows: Vec<String> = view
        .latest_readings()
        .into_iter()
        .map(|latest| {
            let value = match latest.reading {
                Some(reading) => format!(
                    "{:.1}&nbsp;ºC <span class=\"muted\">{}</span>",
                    reading.value,
                    reading.timestamp.format("%d %b %H:%M")
                ),
                None => r#"<span class="muted">No data</span>"#.to_string(),
            };
            let swatch = format!(
                r#"<span class="swatch" style="background: {}"></span>"#,
                escape_html(&latest.color)
            );
            format!(
                "<tr><td>{swatch}{label}</td><td>{value}</td></tr>",
                label = escape_html(&latest.label),
            )
        })
        .collect();

    if rows.is_empty() {
        return r#"<p class="muted">No sensors reported.</p>"#.to_string();
    }
    format!("<table>{}</table>", rows.join(""))
}

fn display(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// JSON can be embedded in a script element as long as it cannot close it.
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

const HEATING_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Heating</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
  <script src="https://cdn.jsdelivr.net/npm/chartjs-adapter-date-fns@3"></script>
  <style>
    body {
      margin: 0;
      padding: 24px;
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
      background: #f4f1ec;
      color: #2b2a28;
    }

    .card {
      max-width: 1100px;
      margin: 0 auto 24px;
      background: white;
      border-radius: 12px;
      box-shadow: 0 8px 24px rgba(0, 0, 0, 0.08);
      padding: 24px;
    }

    h1, h2 {
      margin-top: 0;
    }

    .muted {
      color: #8b857d;
    }

    .tab-bar {
      display: flex;
      gap: 8px;
      margin-bottom: 16px;
    }

    .tab-button {
      border: 1px solid #d6d0c8;
      background: #faf8f5;
      border-radius: 999px;
      padding: 8px 16px;
      cursor: pointer;
    }

    .tab-button-active {
      background: #9C5013;
      border-color: #9C5013;
      color: white;
    }

    .section-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      cursor: pointer;
    }

    .icon {
      font-size: 1.4rem;
      line-height: 1;
    }

    .swatch {
      display: inline-block;
      width: 12px;
      height: 12px;
      border-radius: 3px;
      margin-right: 8px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    td {
      padding: 8px 4px;
      border-bottom: 1px solid #eee8e0;
    }
  </style>
</head>
<body data-view="{{VIEW_ID}}">
  <section class="card">
    <h1>Heating</h1>
    <p class="muted">Data as of {{GENERATED_AT}}</p>
    <div class="tab-bar">
      {{TAB_BUTTONS}}
    </div>
    {{TAB_PANELS}}
  </section>

  <section class="card">
    <div class="section-header" onclick="toggleSection('{{SECTION}}')">
      <h2>Current temperatures</h2>
      <span id="{{SECTION}}-add-icon" class="icon" style="display: {{ADD_DISPLAY}}">+</span>
      <span id="{{SECTION}}-remove-icon" class="icon"
            style="display: {{REMOVE_DISPLAY}}">&minus;</span>
    </div>
    <div id="{{SECTION}}-content" style="display: {{CONTENT_DISPLAY}}">
      {{CURRENT_TEMPS}}
    </div>
  </section>

  <script id="daily-config" type="application/json">{{DAILY_CONFIG}}</script>
  <script>
    const viewId = document.body.dataset.view;
    const charts = {};

    const instantiate = (range, config) => {
      const canvas = document.getElementById(`${range}_chart`);
      if (!config || !canvas || charts[range]) {
        return;
      }
      try {
        charts[range] = new Chart(canvas, config);
      } catch (err) {
        console.warn(`chart ${range} failed`, err);
      }
    };

    // Local fallback when the server cannot be reached.
    const showTab = (className, tabId) => {
      const tabs = document.getElementsByClassName(className);
      const labels = document.getElementsByClassName(`${className}_label`);
      for (let t = 0; t < tabs.length; t++) {
        tabs[t].style.display = 'none';
        labels[t].classList.remove('{{ACTIVE_CLASS}}');
      }
      document.getElementById(tabId).style.display = 'block';
      document.getElementById(`${tabId}_label`).classList.add('{{ACTIVE_CLASS}}');
    };

    const applyPanels = (panels) => {
      panels.forEach((panel) => {
        document.getElementById(panel.id).style.display = panel.visible ? 'block' : 'none';
        const label = document.getElementById(panel.label_id);
        label.classList.toggle('{{ACTIVE_CLASS}}', panel.label_active);
      });
    };

    const showAndLoadTab = async (range) => {
      try {
        const res = await fetch(`/heating/views/${viewId}/tabs/${range}`, { method: 'POST' });
        if (!res.ok) {
          throw new Error(await res.text());
        }
        const activation = await res.json();
        instantiate(range, activation.chart);
        applyPanels(activation.panels);
      } catch (err) {
        console.warn(err);
        showTab('{{TAB_GROUP}}', `${range}_tab`);
      }
    };

    const toggleSection = async (prefix) => {
      const url = `/heating/views/${viewId}/sections/${prefix}/toggle`;
      const res = await fetch(url, { method: 'POST' });
      if (!res.ok) {
        return;
      }
      const state = await res.json();
      const show = (suffix, visible) => {
        document.getElementById(`${prefix}-${suffix}`).style.display = visible ? 'block' : 'none';
      };
      show('content', state.content);
      show('add-icon', state.add_icon);
      show('remove-icon', state.remove_icon);
    };

    instantiate('day', JSON.parse(document.getElementById('daily-config').textContent));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::Dataset;
    use crate::domain::reading::SensorReading;
    use chrono::{TimeZone, Utc};

    fn view(ranges: &[ChartRange]) -> HeatingView {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let datasets = vec![Dataset::new(
            "Kids' <Room>".to_string(),
            vec![SensorReading::new(now, 18.4)],
            "#123456".to_string(),
            false,
        )];
        HeatingView::new(now, datasets, ranges)
    }

    #[test]
    fn test_page_has_every_tab_and_embeds_daily_chart() {
        let html = render_heating_page(7, &view(&ChartRange::ALL)).unwrap();

        for range in ChartRange::ALL {
            assert!(html.contains(&format!(r#"id="{}""#, range.tab_id())));
            assert!(html.contains(&format!(r#"id="{}""#, range.canvas_id())));
        }
        let daily = r#"<script id="daily-config" type="application/json">{"type":"line""#;
        assert!(html.contains(daily));
        assert!(html.contains("Kids&#39; &lt;Room&gt;"));
        assert!(html.contains("18.4"));
        assert!(html.contains(r#"<body data-view="7">"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_range_without_canvas_renders_placeholder() {
        let html = render_heating_page(7, &view(&[ChartRange::Daily])).unwrap();
        assert!(html.contains(r#"id="year_tab""#));
        assert!(!html.contains(r#"id="year_chart""#));
        assert!(html.contains("Chart unavailable."));
    }

    #[test]
    fn test_script_safe_json() {
        assert_eq!(script_safe_json(r#"{"label":"</script>"}"#), r#"{"label":"<\/script>"}"#);
    }
}
