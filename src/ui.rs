use crate::tarot_gate::UNLOCK_THRESHOLD;

pub fn render_index() -> String {
    INDEX_HTML.replace("{{THRESHOLD}}", &UNLOCK_THRESHOLD.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Oracle</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #1d1a2f;
      --bg-2: #3b2f63;
      --ink: #f3eefc;
      --muted: #b9b0d3;
      --accent: #f5c26b;
      --accent-2: #8fd3c8;
      --card: rgba(38, 33, 61, 0.88);
      --shadow: 0 24px 60px rgba(8, 6, 20, 0.45);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #2a2145 60%, #17142a 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    .card {
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 28px;
    }

    h1, h2 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      margin: 0 0 8px;
    }

    h1 {
      font-size: clamp(2rem, 4vw, 2.8rem);
    }

    .subtitle, .hint {
      margin: 0;
      color: var(--muted);
    }

    .columns {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 24px;
    }

    .habits {
      display: grid;
      grid-template-columns: repeat(2, 1fr);
      gap: 10px;
      margin: 16px 0;
    }

    label.field {
      display: grid;
      gap: 6px;
      margin-top: 14px;
      color: var(--muted);
    }

    input, select {
      font: inherit;
      border-radius: 12px;
      border: 1px solid rgba(255, 255, 255, 0.15);
      background: rgba(0, 0, 0, 0.25);
      color: var(--ink);
      padding: 8px 10px;
    }

    .personas {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      margin-top: 8px;
    }

    .metrics {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
      margin: 12px 0 18px;
    }

    .stat {
      display: grid;
      gap: 4px;
      padding: 12px;
      border-radius: 16px;
      background: rgba(255, 255, 255, 0.06);
    }

    .stat .label {
      font-size: 0.85rem;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .bar-rate {
      fill: var(--accent);
    }

    .bar-mood {
      fill: var(--accent-2);
    }

    .chart-grid {
      stroke: rgba(255, 255, 255, 0.1);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    button {
      font: inherit;
      border: none;
      border-radius: 999px;
      padding: 12px 22px;
      cursor: pointer;
      background: var(--accent);
      color: #231c3a;
      font-weight: 600;
    }

    button.secondary {
      background: rgba(255, 255, 255, 0.12);
      color: var(--ink);
    }

    .banner {
      padding: 12px 16px;
      border-radius: 14px;
      background: rgba(143, 211, 200, 0.15);
      margin-bottom: 14px;
    }

    .banner[data-locked="true"] {
      background: rgba(245, 194, 107, 0.15);
    }

    .tarot {
      display: grid;
      grid-template-columns: 1fr 2fr;
      gap: 18px;
      align-items: start;
    }

    .tarot img, .partner img {
      width: 100%;
      border-radius: 16px;
    }

    .report {
      white-space: pre-wrap;
      line-height: 1.5;
    }

    textarea {
      width: 100%;
      min-height: 100px;
      font: inherit;
      border-radius: 12px;
      background: rgba(0, 0, 0, 0.25);
      color: var(--ink);
      padding: 10px;
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: #ff8a7a;
    }

    [hidden] {
      display: none !important;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .tarot, .metrics {
        grid-template-columns: 1fr;
      }
      button {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header class="card">
      <h1>Habit Oracle</h1>
      <p class="subtitle">Complete your habits and read your fortune. Your effort shapes what the cards say.</p>
    </header>

    <section class="card">
      <h2>Settings</h2>
      <div class="columns">
        <label class="field">Model API key
          <input id="model-key" type="password" autocomplete="off" />
        </label>
        <label class="field">Weather API key
          <input id="weather-key" type="password" autocomplete="off" />
        </label>
      </div>
      <p class="hint">Keys stay in server memory for this session only. Reach {{THRESHOLD}}% to draw a tarot card.</p>
    </section>

    <section class="columns">
      <div class="card">
        <h2>Today's check-in</h2>
        <div class="habits" id="habits"></div>
        <label class="field">Mood today: <span id="mood-value">5</span>/10
          <input id="mood" type="range" min="1" max="10" value="5" />
        </label>
        <label class="field">City
          <select id="city"></select>
        </label>
        <div class="field">Fortune teller style
          <div class="personas" id="personas"></div>
        </div>
      </div>

      <div class="card">
        <h2>Flow of fate</h2>
        <div class="metrics">
          <div class="stat"><span class="label">Completion</span><span class="value" id="rate">0%</span></div>
          <div class="stat"><span class="label">Habits done</span><span class="value" id="count">0</span></div>
          <div class="stat"><span class="label">Mood</span><span class="value" id="mood-metric">5/10</span></div>
        </div>
        <svg id="chart" viewBox="0 0 600 260" aria-label="Completion and mood by day" role="img"></svg>
      </div>
    </section>

    <section class="card">
      <h2>Today's tarot</h2>
      <div class="banner" id="gate-banner"></div>
      <button id="draw-btn" type="button" hidden>Flip the card of fate</button>
      <div class="tarot" id="tarot" hidden>
        <img src="https://upload.wikimedia.org/wikipedia/commons/d/de/RWS_Tarot_01_Magician.jpg" alt="Tarot card" />
        <div>
          <h2 id="tarot-name"></h2>
          <p><strong>Meaning:</strong> <span id="tarot-meaning"></span></p>
          <p class="hint" id="tarot-desc"></p>
          <button id="reset-btn" class="secondary" type="button">Draw again (testing)</button>
        </div>
      </div>
    </section>

    <section class="card">
      <button id="report-btn" type="button">Show my fortune report</button>
      <div class="status" id="status"></div>
      <div class="columns" id="report-area" hidden>
        <div>
          <div class="banner" id="weather-box"></div>
          <figure class="partner" id="partner" hidden>
            <img id="partner-img" alt="Lucky partner" />
            <figcaption id="partner-caption"></figcaption>
          </figure>
        </div>
        <div>
          <h2 id="report-title"></h2>
          <div class="report" id="report"></div>
          <label class="field">Share with a friend
            <textarea id="share" readonly></textarea>
          </label>
        </div>
      </div>
    </section>

    <details class="card">
      <summary>How to use</summary>
      <ol>
        <li><strong>Check habits</strong>: tick what you did today.</li>
        <li><strong>Unlock tarot</strong>: at {{THRESHOLD}}% or more you can draw a card.</li>
        <li><strong>Read the report</strong>: the oracle links your card to today's actions and reads wealth and relationships.</li>
      </ol>
    </details>
  </main>

  <script>
    const $ = (id) => document.getElementById(id);
    const statusEl = $('status');
    let options = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const api = async (path, body) => {
      const init = body === undefined
        ? { method: path.startsWith('/api/tarot') ? 'POST' : 'GET' }
        : { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(body) };
      const response = await fetch(path, init);
      if (!response.ok) {
        throw new Error(await response.text());
      }
      return response.json();
    };

    const renderChart = (points) => {
      const chartEl = $('chart');
      const width = 600;
      const height = 260;
      const padX = 40;
      const padY = 34;
      const top = 16;
      const groupWidth = (width - padX * 2) / Math.max(points.length, 1);
      const barWidth = groupWidth / 3;
      const y = (value) => height - padY - (value / 100) * (height - top - padY);

      let svg = '';
      for (let tick = 0; tick <= 100; tick += 25) {
        svg += `<line class="chart-grid" x1="${padX}" y1="${y(tick)}" x2="${width - padX}" y2="${y(tick)}" />`;
        svg += `<text class="chart-label" x="${padX - 8}" y="${y(tick) + 4}" text-anchor="end">${tick}</text>`;
      }
      points.forEach((point, index) => {
        const x = padX + index * groupWidth + barWidth / 2;
        svg += `<rect class="bar-rate" x="${x}" y="${y(point.completion_rate)}" width="${barWidth}" height="${y(0) - y(point.completion_rate)}" />`;
        svg += `<rect class="bar-mood" x="${x + barWidth}" y="${y(point.mood)}" width="${barWidth}" height="${y(0) - y(point.mood)}" />`;
        svg += `<text class="chart-label" x="${x + barWidth}" y="${height - padY + 18}" text-anchor="middle">${point.date.slice(5)}</text>`;
      });
      chartEl.innerHTML = svg;
    };

    const renderSession = (data) => {
      const snapshot = data.snapshot;
      $('rate').textContent = `${snapshot.completion_rate}%`;
      $('count').textContent = data.completed_count;
      $('mood-metric').textContent = `${snapshot.mood}/10`;
      renderChart(data.chart);

      const banner = $('gate-banner');
      const unlocked = data.gate === 'unlocked';
      banner.dataset.locked = String(!unlocked);
      $('draw-btn').hidden = !unlocked || !!data.tarot;
      $('tarot').hidden = !data.tarot;
      if (!unlocked) {
        banner.textContent = `Locked: completion is ${snapshot.completion_rate}%. Reach ${options.unlock_threshold}% to draw a tarot card.`;
      } else if (!data.tarot) {
        banner.textContent = `You completed ${snapshot.completion_rate}% of today's habits. The card of fate is unlocked!`;
      } else {
        banner.textContent = 'Press the report button below for the full reading.';
        $('tarot-name').textContent = data.tarot.name;
        $('tarot-meaning').textContent = data.tarot.meaning;
        $('tarot-desc').textContent = data.tarot_excerpt || '';
      }
    };

    const checkin = async () => {
      const habits = Array.from(document.querySelectorAll('.habit:checked')).map((el) => el.value);
      const mood = Number($('mood').value);
      $('mood-value').textContent = mood;
      try {
        renderSession(await api('/api/checkin', { habits, mood }));
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    const saveKeys = async () => {
      try {
        await api('/api/keys', {
          model_api_key: $('model-key').value,
          weather_api_key: $('weather-key').value,
        });
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    const selectedPersona = () => {
      const checked = document.querySelector('input[name="persona"]:checked');
      return checked ? checked.value : options.personas[0].key;
    };

    const requestReport = async () => {
      setStatus('The oracle is reading the cards and watching the stars...', '');
      $('report-btn').disabled = true;
      try {
        await saveKeys();
        const data = await api('/api/report', { city: $('city').value, persona: selectedPersona() });
        const persona = options.personas.find((p) => p.key === data.persona);
        $('report-area').hidden = false;
        $('weather-box').textContent = data.weather
          ? `${data.city} | ${data.weather.temperature}°C | ${data.weather.description}`
          : 'No weather data';
        $('partner').hidden = !data.dog;
        if (data.dog) {
          $('partner-img').src = data.dog.image_url;
          $('partner-caption').textContent = `Lucky partner: ${data.dog.breed}`;
        }
        $('report-title').textContent = `Reading by the ${persona ? persona.label : 'Oracle'}`;
        $('report').textContent = data.report;
        $('share').value = data.report;
        setStatus(data.notices.join(' '), '');
      } catch (err) {
        setStatus(err.message, 'error');
      } finally {
        $('report-btn').disabled = false;
      }
    };

    const init = async () => {
      options = await api('/api/options');
      $('habits').innerHTML = options.habits
        .map((h) => `<label><input class="habit" type="checkbox" value="${h.key}" /> ${h.label}</label>`)
        .join('');
      $('city').innerHTML = options.cities.map((c) => `<option>${c}</option>`).join('');
      $('personas').innerHTML = options.personas
        .map((p, i) => `<label><input type="radio" name="persona" value="${p.key}" ${i === 0 ? 'checked' : ''} /> ${p.label}</label>`)
        .join('');

      document.querySelectorAll('.habit').forEach((el) => el.addEventListener('change', checkin));
      $('mood').addEventListener('input', checkin);
      $('model-key').addEventListener('change', saveKeys);
      $('weather-key').addEventListener('change', saveKeys);
      $('draw-btn').addEventListener('click', async () => {
        try {
          renderSession(await api('/api/tarot/draw'));
        } catch (err) {
          setStatus(err.message, 'error');
        }
      });
      $('reset-btn').addEventListener('click', async () => {
        try {
          renderSession(await api('/api/tarot/reset'));
        } catch (err) {
          setStatus(err.message, 'error');
        }
      });
      $('report-btn').addEventListener('click', requestReport);

      await checkin();
    };

    init().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_fills_threshold() {
        let html = render_index();
        assert!(!html.contains("{{THRESHOLD}}"));
        assert!(html.contains("Reach 60% to draw a tarot card"));
    }

    #[test]
    fn tarot_buttons_surface_errors() {
        for call in ["renderSession(await api('/api/tarot/draw'))", "renderSession(await api('/api/tarot/reset'))"] {
            let at = INDEX_HTML.find(call).expect("missing tarot call");
            let before = INDEX_HTML[..at].trim_end();
            assert!(before.ends_with("try {"), "{call} is not guarded");
            let after = &INDEX_HTML[at..];
            let catch = after.find("catch (err)").expect("missing catch");
            assert!(after[catch..].trim_start_matches("catch (err) {").trim_start().starts_with("setStatus(err.message, 'error')"));
        }
    }
}
