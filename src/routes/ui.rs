use axum::{response::Html, Router, routing::get};

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

// Single-page frontend. Session state lives in `phase`/`currentSearch` and
// is passed into the render helpers; speech input and output are feature
// detected and their controls removed when the platform lacks them.
async fn index() -> Html<&'static str> {
    Html(r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>SearchMind</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 0; color: #1d1d1f; background: #f5f6fa; }
    .container { max-width: 860px; margin: 0 auto; padding: 2rem 1rem; }
    header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1.5rem; }
    h1 { margin: 0; font-size: 1.5rem; color: #2563eb; }
    .card { background: #fff; border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
    .hidden { display: none; }
    .muted { color: #6b7280; font-size: 0.9rem; }
    .error { border-color: #fca5a5; background: #fef2f2; color: #991b1b; }
    form { display: flex; gap: 0.5rem; }
    input[type=text] { flex: 1; padding: 0.6rem; border: 1px solid #ccc; border-radius: 6px; }
    button { padding: 0.6rem 1rem; border: 1px solid #ccc; border-radius: 6px; background: #fff; cursor: pointer; }
    button:disabled { opacity: 0.5; cursor: default; }
    button.primary { background: #2563eb; border-color: #2563eb; color: #fff; }
    #micBtn.active { background: #fee2e2; border-color: #ef4444; }
    .row { display: flex; justify-content: space-between; align-items: center; gap: 0.5rem; }
    .summary { white-space: pre-wrap; line-height: 1.6; }
    .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 0.75rem; }
    .citation { cursor: pointer; }
    .citation:hover { border-color: #2563eb; }
    .citation h4 { margin: 0.4rem 0; }
    .citation .snippet { margin: 0; font-size: 0.9rem; color: #374151; }
    .citation .domain { font-size: 0.8rem; color: #9ca3af; overflow: hidden; text-overflow: ellipsis; }
    .badge { display: inline-flex; align-items: center; justify-content: center; width: 1.6rem; height: 1.6rem; border-radius: 50%; background: #2563eb; color: #fff; font-size: 0.85rem; }
    .backdrop { position: fixed; inset: 0; background: rgba(0,0,0,0.5); display: flex; align-items: center; justify-content: center; padding: 1rem; }
    .modal { background: #fff; border-radius: 8px; max-width: 640px; width: 100%; max-height: 80vh; overflow-y: auto; padding: 1.25rem; }
    .modal label { display: block; margin-top: 0.75rem; font-weight: 600; font-size: 0.8rem; color: #6b7280; }
    .mono { font-family: monospace; font-size: 0.85rem; color: #2563eb; word-break: break-all; flex: 1; }
    a.visit { display: inline-block; padding: 0.6rem 1rem; background: #2563eb; color: #fff; border-radius: 6px; text-decoration: none; }
    .example { margin: 0.25rem 0.25rem 0 0; }
  </style>
</head>
<body>
  <div class="container">
    <header>
      <h1>SearchMind</h1>
      <button id="newSearchBtn" class="hidden">New Search</button>
    </header>

    <form id="searchForm" class="card">
      <input id="queryInput" type="text" placeholder="Ask anything..." autocomplete="off" />
      <button type="button" id="micBtn" title="Voice input">Mic</button>
      <button type="submit" id="submitBtn" class="primary">Search</button>
    </form>

    <div id="errorBox" class="card error hidden">
      <strong>Search Failed</strong>
      <p id="errorText"></p>
    </div>

    <div id="loadingBox" class="card hidden">
      <p>Searching the web and analyzing results...</p>
      <p class="muted">This may take a few moments while comprehensive information is gathered.</p>
    </div>

    <div id="emptyState" class="card">
      <p>Ask a question and get an AI summary with cited sources. Try one of these:</p>
      <button class="example">What is quantum computing?</button>
      <button class="example">How do vaccines work?</button>
      <button class="example">Latest developments in renewable energy</button>
    </div>

    <section id="resultsSection" class="hidden">
      <h2 id="resultQuery"></h2>
      <div class="card">
        <div class="row">
          <h3>AI Summary</h3>
          <button id="listenBtn">Listen</button>
        </div>
        <p id="summaryText" class="summary"></p>
      </div>
      <h3 id="sourcesHeading"></h3>
      <div id="citationGrid" class="grid"></div>
    </section>
  </div>

  <div id="modalBackdrop" class="backdrop hidden">
    <div class="modal">
      <div class="row">
        <span id="modalPosition" class="badge"></span>
        <h3 style="flex: 1">Citation Details</h3>
        <button id="modalCloseX">Close</button>
      </div>
      <label>Title</label>
      <h4 id="modalTitle"></h4>
      <label>Source URL</label>
      <div class="row">
        <span id="modalUrl" class="mono"></span>
        <button id="copyBtn">Copy</button>
      </div>
      <label>Content Preview</label>
      <p id="modalSnippet"></p>
      <label>Domain</label>
      <p id="modalDomain"></p>
      <div class="row" style="margin-top: 1rem">
        <button id="modalClose">Close</button>
        <a id="visitLink" class="visit" target="_blank" rel="noopener noreferrer">Visit Source</a>
      </div>
    </div>
  </div>

  <script>
    const searchForm = document.getElementById('searchForm');
    const queryInput = document.getElementById('queryInput');
    const submitBtn = document.getElementById('submitBtn');
    const micBtn = document.getElementById('micBtn');
    const newSearchBtn = document.getElementById('newSearchBtn');
    const errorBox = document.getElementById('errorBox');
    const errorText = document.getElementById('errorText');
    const loadingBox = document.getElementById('loadingBox');
    const emptyState = document.getElementById('emptyState');
    const resultsSection = document.getElementById('resultsSection');
    const resultQuery = document.getElementById('resultQuery');
    const summaryText = document.getElementById('summaryText');
    const sourcesHeading = document.getElementById('sourcesHeading');
    const citationGrid = document.getElementById('citationGrid');
    const listenBtn = document.getElementById('listenBtn');
    const modalBackdrop = document.getElementById('modalBackdrop');
    const copyBtn = document.getElementById('copyBtn');

    // phase: idle -> searching -> (results | errored); New Search resets to idle
    let phase = 'idle';
    let currentSearch = null;

    function setPhase(next) {
      phase = next;
      submitBtn.disabled = next === 'searching';
      loadingBox.classList.toggle('hidden', next !== 'searching');
      errorBox.classList.toggle('hidden', next !== 'errored');
      resultsSection.classList.toggle('hidden', next !== 'results');
      emptyState.classList.toggle('hidden', next !== 'idle');
      newSearchBtn.classList.toggle('hidden', currentSearch === null);
    }

    function hostname(url) {
      try { return new URL(url).hostname; } catch (e) { return ''; }
    }

    async function performSearch(query) {
      const trimmed = query.trim();
      if (!trimmed || phase === 'searching') return;
      stopSpeech();
      setPhase('searching');
      try {
        const res = await fetch('/api/search', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ query: trimmed })
        });
        if (!res.ok) {
          const data = await res.json().catch(() => ({}));
          throw new Error(data.error || 'Search failed');
        }
        currentSearch = await res.json();
        renderResults(currentSearch);
        setPhase('results');
      } catch (err) {
        errorText.textContent = err.message || 'An unexpected error occurred';
        setPhase('errored');
      }
    }

    function clearSearch() {
      currentSearch = null;
      stopSpeech();
      closeModal();
      queryInput.value = '';
      setPhase('idle');
    }

    function renderResults(result) {
      resultQuery.textContent = result.query;
      summaryText.textContent = result.summary;
      sourcesHeading.textContent = 'Sources (' + result.citations.length + ')';
      citationGrid.replaceChildren();
      for (const citation of result.citations) {
        const card = document.createElement('div');
        card.className = 'card citation';

        const badge = document.createElement('span');
        badge.className = 'badge';
        badge.textContent = citation.position;

        const title = document.createElement('h4');
        title.textContent = citation.title;

        const snippet = document.createElement('p');
        snippet.className = 'snippet';
        snippet.textContent = citation.snippet;

        const domain = document.createElement('div');
        domain.className = 'domain';
        domain.textContent = hostname(citation.url);

        card.append(badge, title, snippet, domain);
        card.addEventListener('click', () => openModal(citation));
        citationGrid.appendChild(card);
      }
    }

    // Citation detail modal
    let copyTimer = null;

    function openModal(citation) {
      document.getElementById('modalPosition').textContent = citation.position;
      document.getElementById('modalTitle').textContent = citation.title;
      document.getElementById('modalUrl').textContent = citation.url;
      document.getElementById('modalSnippet').textContent = citation.snippet;
      document.getElementById('modalDomain').textContent = hostname(citation.url);
      document.getElementById('visitLink').href = citation.url;
      copyBtn.textContent = 'Copy';
      modalBackdrop.classList.remove('hidden');
    }

    function closeModal() {
      modalBackdrop.classList.add('hidden');
    }

    copyBtn.addEventListener('click', async () => {
      try {
        await navigator.clipboard.writeText(document.getElementById('modalUrl').textContent);
        copyBtn.textContent = 'Copied';
        clearTimeout(copyTimer);
        copyTimer = setTimeout(() => { copyBtn.textContent = 'Copy'; }, 2000);
      } catch (err) {
        // clipboard unavailable; leave the button as-is
      }
    });

    document.getElementById('modalClose').addEventListener('click', closeModal);
    document.getElementById('modalCloseX').addEventListener('click', closeModal);
    modalBackdrop.addEventListener('click', (e) => {
      if (e.target === modalBackdrop) closeModal();
    });

    // Voice output: one utterance at a time, toggled by the Listen button
    const ttsSupported = 'speechSynthesis' in window;
    let speaking = false;

    if (!ttsSupported) listenBtn.remove();

    function stopSpeech() {
      if (!ttsSupported) return;
      try { window.speechSynthesis.cancel(); } catch (e) { /* best effort */ }
      speaking = false;
      listenBtn.textContent = 'Listen';
    }

    function toggleSpeech() {
      if (!ttsSupported || !currentSearch) return;
      if (speaking) {
        stopSpeech();
        return;
      }
      window.speechSynthesis.cancel();
      const utterance = new SpeechSynthesisUtterance(currentSearch.summary);
      utterance.rate = 0.9;
      utterance.pitch = 1;
      utterance.volume = 1;
      utterance.onend = () => { speaking = false; listenBtn.textContent = 'Listen'; };
      utterance.onerror = () => { speaking = false; listenBtn.textContent = 'Listen'; };
      speaking = true;
      listenBtn.textContent = 'Stop';
      window.speechSynthesis.speak(utterance);
    }

    if (ttsSupported) listenBtn.addEventListener('click', toggleSpeech);

    // Voice input: transcripts continuously overwrite the query field
    const RecognitionCtor = window.SpeechRecognition || window.webkitSpeechRecognition;
    let recognition = null;
    let listening = false;

    if (!RecognitionCtor) {
      micBtn.remove();
    } else {
      micBtn.addEventListener('click', () => {
        if (listening) { stopListening(); } else { startListening(); }
      });
    }

    function startListening() {
      recognition = new RecognitionCtor();
      recognition.lang = 'en-US';
      recognition.interimResults = true;
      recognition.continuous = false;
      recognition.onresult = (event) => {
        let text = '';
        for (let i = event.resultIndex; i < event.results.length; i++) {
          text += (event.results[i][0] && event.results[i][0].transcript) || '';
        }
        queryInput.value = text.trim();
      };
      recognition.onstart = () => { listening = true; micBtn.classList.add('active'); };
      recognition.onend = () => { listening = false; micBtn.classList.remove('active'); };
      recognition.onerror = () => { listening = false; micBtn.classList.remove('active'); };
      try { recognition.start(); } catch (e) { listening = false; }
    }

    function stopListening() {
      try { if (recognition) recognition.stop(); } catch (e) { /* best effort */ }
    }

    searchForm.addEventListener('submit', (e) => {
      e.preventDefault();
      performSearch(queryInput.value);
    });

    newSearchBtn.addEventListener('click', clearSearch);

    for (const example of document.querySelectorAll('.example')) {
      example.addEventListener('click', () => {
        queryInput.value = example.textContent;
        performSearch(example.textContent);
      });
    }
  </script>
</body>
</html>"##)
}
