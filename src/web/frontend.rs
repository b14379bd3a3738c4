//! Embedded HTML/CSS/JS frontend for the buildlens dashboard.
//!
//! The entire page is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies. Charts are
//! rendered as inline SVG by a small hand-rolled renderer; the two charts
//! are linked — hovering an index highlights it in both and loads the
//! configuration panel for that build.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>buildlens</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
  --cyan: #39d2c0;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app { max-width: 1280px; margin: 0 auto; padding: 24px; }

header {
  display: flex;
  align-items: baseline;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 22px; font-weight: 600; }
header .sub { color: var(--text-muted); font-size: 13px; }

.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 16px;
  margin-bottom: 16px;
}

textarea {
  width: 100%;
  min-height: 110px;
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  color: var(--text);
  font-family: var(--mono);
  font-size: 12px;
  padding: 10px;
  resize: vertical;
}
textarea:focus { outline: none; border-color: var(--accent); }

.input-row { display: flex; gap: 10px; margin-top: 10px; align-items: center; }
button {
  background: var(--accent);
  border: none;
  border-radius: var(--radius);
  color: #0d1117;
  cursor: pointer;
  font-weight: 600;
  padding: 7px 16px;
}
button:hover { filter: brightness(1.1); }
button.ghost {
  background: transparent;
  border: 1px solid var(--border);
  color: var(--text);
  font-weight: 400;
}
input[type=file] { display: none; }
.file-name { color: var(--text-muted); font-size: 12px; }

#error {
  display: none;
  background: rgba(248, 81, 73, 0.12);
  border: 1px solid var(--red);
  border-radius: var(--radius);
  color: var(--red);
  padding: 10px 14px;
  margin-bottom: 16px;
}
#notice {
  display: none;
  background: rgba(210, 153, 34, 0.12);
  border: 1px solid var(--yellow);
  border-radius: var(--radius);
  color: var(--yellow);
  padding: 10px 14px;
  margin-bottom: 16px;
}

#filters { display: none; gap: 8px; flex-wrap: wrap; margin-bottom: 16px; }
.filter-item {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: 999px;
  color: var(--text-muted);
  cursor: pointer;
  font-size: 13px;
  padding: 5px 14px;
}
.filter-item.active {
  background: var(--accent);
  border-color: var(--accent);
  color: #0d1117;
}

.chart-card h2 { font-size: 15px; font-weight: 600; margin-bottom: 10px; }
.chart-card svg { width: 100%; height: auto; display: block; }
.legend { display: flex; gap: 16px; font-size: 12px; color: var(--text-muted); margin-bottom: 6px; }
.legend span::before {
  content: "●";
  margin-right: 5px;
  color: var(--c);
}

#tooltip {
  display: none;
  position: fixed;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  font-size: 12px;
  padding: 8px 12px;
  pointer-events: none;
  z-index: 10;
  box-shadow: 0 4px 16px rgba(0,0,0,0.5);
}

#config-panel { display: none; }
.config-group { margin-bottom: 12px; }
.config-subtitle { color: var(--text-muted); font-size: 12px; margin-bottom: 6px; text-transform: uppercase; letter-spacing: 0.04em; }
.config-items { display: flex; flex-wrap: wrap; gap: 6px; }
.config-item {
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 6px;
  font-family: var(--mono);
  font-size: 12px;
  padding: 3px 8px;
}
.config-item.changed { border-color: var(--yellow); }
.config-item.changed .key::after { content: " Δ"; color: var(--yellow); }
.config-item .key { color: var(--text-muted); }
.config-item .val-true { color: var(--green); }
.config-item .val-false { color: var(--red); }
.empty-note { color: var(--text-muted); }
</style>
</head>
<body>
<div class="app">
  <header>
    <h1>buildlens</h1>
    <div class="sub">build-performance log visualization</div>
  </header>

  <div id="error"></div>
  <div id="notice"></div>

  <div class="card">
    <textarea id="json-input" placeholder="Paste build record JSON here (concatenated array dumps are repaired automatically)…"></textarea>
    <div class="input-row">
      <button id="analyze-btn">Analyze</button>
      <button class="ghost" id="file-btn">Load file…</button>
      <input type="file" id="file-input" accept=".json,.txt,application/json">
      <span class="file-name" id="file-name"></span>
    </div>
  </div>

  <div id="filters"></div>

  <div class="card chart-card" id="time-card" style="display:none">
    <h2>Stage duration trend</h2>
    <div class="legend">
      <span style="--c:#5470C6">compile</span>
      <span style="--c:#EE6666">optimize &amp; bundle</span>
      <span style="--c:#73C0DE">total</span>
    </div>
    <div id="time-chart"></div>
  </div>

  <div class="card chart-card" id="heap-card" style="display:none">
    <h2>Stage peak heap</h2>
    <div class="legend">
      <span style="--c:#91CC75">compile heap</span>
      <span style="--c:#FAC858">optimize heap</span>
    </div>
    <div id="heap-chart"></div>
  </div>

  <div class="card" id="config-panel">
    <h2 style="font-size:15px;margin-bottom:10px">Build configuration <span id="config-time" class="sub"></span></h2>
    <div id="config-groups"></div>
  </div>
</div>

<div id="tooltip"></div>

<script>
"use strict";

const FILTERS = [
  ["all", "All"],
  ["first7days", "First 7 days"],
  ["first15days", "First 15 days"],
  ["first10times", "First 10 builds"],
  ["last7days", "Last 7 days"],
  ["last15days", "Last 15 days"],
  ["last10times", "Last 10 builds"],
];

const COLORS = {
  compileTime: "#5470C6",
  optimizeTime: "#EE6666",
  totalTime: "#73C0DE",
  compileHeap: "#91CC75",
  optimizeHeap: "#FAC858",
};

let currentWindow = "all";
let lastData = null;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const $ = (id) => document.getElementById(id);

function debounce(fn, delay) {
  let timer = null;
  return function (...args) {
    if (timer) clearTimeout(timer);
    timer = setTimeout(() => fn.apply(this, args), delay);
  };
}

function showError(message) {
  const el = $("error");
  el.textContent = message;
  el.style.display = "block";
}

function clearError() {
  $("error").style.display = "none";
}

function formatValue(value, unit) {
  return unit === "s" ? value + "s" : value + "MB";
}

// ---------------------------------------------------------------------------
// Ingest
// ---------------------------------------------------------------------------

async function submitText(text) {
  clearError();
  const resp = await fetch("/api/ingest", { method: "POST", body: text });
  const body = await resp.json();
  if (!resp.ok) {
    showError("Ingest failed: " + body.error);
    return;
  }
  buildFilterBar();
  await loadSeries();
}

$("analyze-btn").addEventListener("click", () => {
  const text = $("json-input").value;
  submitText(text);
});

$("file-btn").addEventListener("click", () => $("file-input").click());
$("file-input").addEventListener("change", (e) => {
  const file = e.target.files[0];
  if (!file) return;
  $("file-name").textContent = file.name;
  const reader = new FileReader();
  reader.onload = (ev) => {
    $("json-input").value = ev.target.result;
    submitText(ev.target.result);
  };
  reader.readAsText(file);
});

// ---------------------------------------------------------------------------
// Filter bar
// ---------------------------------------------------------------------------

function buildFilterBar() {
  const bar = $("filters");
  if (bar.childElementCount === 0) {
    for (const [value, label] of FILTERS) {
      const item = document.createElement("div");
      item.className = "filter-item" + (value === currentWindow ? " active" : "");
      item.dataset.value = value;
      item.textContent = label;
      item.addEventListener("click", () => {
        currentWindow = value;
        bar.querySelectorAll(".filter-item").forEach((i) => i.classList.remove("active"));
        item.classList.add("active");
        loadSeries();
      });
      bar.appendChild(item);
    }
  }
  bar.style.display = "flex";
}

// ---------------------------------------------------------------------------
// Series loading and chart rendering
// ---------------------------------------------------------------------------

async function loadSeries() {
  const resp = await fetch("/api/series?window=" + encodeURIComponent(currentWindow));
  const data = await resp.json();
  if (!resp.ok) {
    showError(data.error);
    return;
  }
  lastData = data;

  const notice = $("notice");
  if (data.windowEmpty) {
    notice.textContent = "The selected window excludes every record.";
    notice.style.display = "block";
  } else if (!data.aligned) {
    notice.textContent =
      "Some records lack an optimize stage or total time — those series are not index-aligned with the x-axis.";
    notice.style.display = "block";
  } else {
    notice.style.display = "none";
  }

  renderCharts(data);
}

function byName(data, name) {
  return data.series.find((s) => s.name === name);
}

function renderCharts(data) {
  $("time-card").style.display = "block";
  $("heap-card").style.display = "block";

  drawChart($("time-chart"), data.time, [
    { ...byName(data, "compileTime"), kind: "line" },
    { ...byName(data, "optimizeTime"), kind: "line" },
    { ...byName(data, "totalTime"), kind: "line", dashed: true },
  ], { showAverage: data.showAverage });

  drawChart($("heap-chart"), data.time, [
    { ...byName(data, "compileHeap"), kind: "bar" },
    { ...byName(data, "optimizeHeap"), kind: "bar" },
  ], { showAverage: data.showAverage, limit: data.heapLimitMb, limitLabel: "heap limit " + data.heapLimitMb + "MB" });
}

const W = 1160, H = 320, PAD = { l: 56, r: 16, t: 16, b: 58 };

function drawChart(container, labels, seriesList, opts) {
  const present = seriesList.filter((s) => s && s.data.length > 0);
  const allValues = present.flatMap((s) => s.data).concat(opts.limit ? [opts.limit] : []);
  const maxY = allValues.length ? Math.max(...allValues) * 1.12 : 1;
  const plotW = W - PAD.l - PAD.r, plotH = H - PAD.t - PAD.b;
  const n = Math.max(labels.length, 1);
  const xAt = (i) => PAD.l + (plotW * (i + 0.5)) / n;
  const yAt = (v) => PAD.t + plotH - (plotH * v) / maxY;

  let svg = `<svg viewBox="0 0 ${W} ${H}" xmlns="http://www.w3.org/2000/svg">`;

  // y gridlines
  for (let g = 0; g <= 4; g++) {
    const v = (maxY * g) / 4;
    const y = yAt(v);
    svg += `<line x1="${PAD.l}" y1="${y}" x2="${W - PAD.r}" y2="${y}" stroke="#30363d" stroke-width="1"/>`;
    svg += `<text x="${PAD.l - 8}" y="${y + 4}" fill="#8b949e" font-size="10" text-anchor="end">${Math.round(v)}</text>`;
  }

  // x labels, rotated like the reference charts
  labels.forEach((label, i) => {
    svg += `<text x="${xAt(i)}" y="${H - PAD.b + 14}" fill="#8b949e" font-size="10" text-anchor="end" transform="rotate(-45 ${xAt(i)} ${H - PAD.b + 14})">${label}</text>`;
  });

  // reference limit line
  if (opts.limit) {
    const y = yAt(opts.limit);
    svg += `<line x1="${PAD.l}" y1="${y}" x2="${W - PAD.r}" y2="${y}" stroke="#f85149" stroke-width="1.5" stroke-dasharray="6 4"/>`;
    svg += `<text x="${W - PAD.r - 4}" y="${y - 5}" fill="#f85149" font-size="10" text-anchor="end">${opts.limitLabel}</text>`;
  }

  for (const s of present) {
    const color = COLORS[s.name];

    if (opts.showAverage && s.average != null) {
      const y = yAt(s.average);
      svg += `<line x1="${PAD.l}" y1="${y}" x2="${W - PAD.r}" y2="${y}" stroke="${color}" stroke-width="1" stroke-dasharray="3 4" opacity="0.6"/>`;
      svg += `<text x="${PAD.l + 4}" y="${y - 4}" fill="${color}" font-size="10" opacity="0.8">avg ${s.averageLabel}</text>`;
    }

    if (s.kind === "bar") {
      const barW = Math.min(18, (plotW / n) * 0.28);
      const offset = s.name === "optimizeHeap" ? barW / 2 + 1 : -barW / 2 - 1;
      s.data.forEach((v, i) => {
        const x = xAt(i) + offset - barW / 2;
        svg += `<rect data-series="${s.name}" data-index="${i}" x="${x}" y="${yAt(v)}" width="${barW}" height="${PAD.t + plotH - yAt(v)}" fill="${color}" opacity="0.85"/>`;
      });
    } else {
      const points = s.data.map((v, i) => `${xAt(i)},${yAt(v)}`).join(" ");
      svg += `<polyline points="${points}" fill="none" stroke="${color}" stroke-width="2"${s.dashed ? ' stroke-dasharray="4 4"' : ""}/>`;
      s.data.forEach((v, i) => {
        svg += `<circle data-series="${s.name}" data-index="${i}" cx="${xAt(i)}" cy="${yAt(v)}" r="3.5" fill="${color}"/>`;
      });
    }

    // inline value labels — suppressed at extrema, which get markers instead
    s.data.forEach((v, i) => {
      const above = s.kind === "bar" || s.name !== "optimizeTime";
      const y = yAt(v) + (above ? -8 : 14);
      if (i === s.maxIndex) {
        svg += `<text x="${xAt(i)}" y="${y - (above ? 4 : -4)}" fill="${color}" font-size="10" font-weight="700" text-anchor="middle">▲ ${s.maxLabel}</text>`;
      } else if (i === s.minIndex) {
        svg += `<text x="${xAt(i)}" y="${y}" fill="${color}" font-size="10" font-weight="700" text-anchor="middle">▼ ${s.minLabel}</text>`;
      } else {
        svg += `<text x="${xAt(i)}" y="${y}" fill="${color}" font-size="9" text-anchor="middle" opacity="0.8">${formatValue(v, s.unit)}</text>`;
      }
    });
  }

  // transparent hover zones, one per x index — these drive chart linking
  labels.forEach((_, i) => {
    svg += `<rect class="hover-zone" data-index="${i}" x="${xAt(i) - plotW / n / 2}" y="${PAD.t}" width="${plotW / n}" height="${plotH}" fill="transparent"/>`;
  });

  svg += "</svg>";
  container.innerHTML = svg;

  container.querySelectorAll(".hover-zone").forEach((zone) => {
    zone.addEventListener("mouseenter", (e) => {
      const i = Number(zone.dataset.index);
      showTooltip(e, i);
      debouncedShowConfig(labels[i]);
    });
    zone.addEventListener("mouseleave", hideTooltip);
  });
}

// ---------------------------------------------------------------------------
// Tooltip (linked across both charts)
// ---------------------------------------------------------------------------

function showTooltip(event, index) {
  if (!lastData) return;
  const lines = [`<b>${lastData.time[index]}</b>`];
  for (const s of lastData.series) {
    if (index < s.data.length) {
      lines.push(
        `<span style="color:${COLORS[s.name]}">●</span> ${s.name}: ${formatValue(s.data[index], s.unit)}`
      );
    }
  }
  const tip = $("tooltip");
  tip.innerHTML = lines.join("<br>");
  tip.style.left = event.clientX + 14 + "px";
  tip.style.top = event.clientY + 14 + "px";
  tip.style.display = "block";
}

function hideTooltip() {
  $("tooltip").style.display = "none";
}

// ---------------------------------------------------------------------------
// Configuration inspector panel
// ---------------------------------------------------------------------------

async function showConfig(label) {
  const resp = await fetch("/api/record?label=" + encodeURIComponent(label));
  if (!resp.ok) {
    $("config-panel").style.display = "none";
    return;
  }
  const data = await resp.json();

  $("config-time").textContent = data.label;
  const container = $("config-groups");
  container.innerHTML = "";

  if (data.groups.length === 0) {
    container.innerHTML = '<div class="empty-note">No configuration metadata on this record.</div>';
  }

  for (const group of data.groups) {
    const div = document.createElement("div");
    div.className = "config-group";
    const items = group.items
      .map((item) => {
        let valClass = "";
        if (item.boolLike === true) valClass = "val-true";
        if (item.boolLike === false) valClass = "val-false";
        const value = typeof item.value === "string" ? item.value : JSON.stringify(item.value);
        return `<span class="config-item${item.changed ? " changed" : ""}"><span class="key">${item.key}:</span> <span class="${valClass}">${value}</span></span>`;
      })
      .join("");
    div.innerHTML = `<div class="config-subtitle">${group.title}</div><div class="config-items">${items}</div>`;
    container.appendChild(div);
  }

  $("config-panel").style.display = "block";
}

const debouncedShowConfig = debounce(showConfig, 100);
</script>
</body>
</html>
"##;
