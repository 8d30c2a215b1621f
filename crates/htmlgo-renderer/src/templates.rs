//! Static stylesheet and script fragments embedded in rendered documents.

/// Light/dark container for HTML fragments.
pub const FRAGMENT_CSS: &str = r"
body {
  font-family: 'Roboto', sans-serif;
  line-height: 1.6;
  color: #333;
  max-width: 1000px;
  margin: 0 auto;
  padding: 20px;
}
.container {
  background-color: white;
  border-radius: 8px;
  box-shadow: 0 2px 10px rgba(0,0,0,0.1);
  padding: 30px;
  margin-top: 20px;
}
@media (prefers-color-scheme: dark) {
  body { background-color: #1a1a1a; color: #e6e6e6; }
  .container { background-color: #2a2a2a; box-shadow: 0 2px 10px rgba(0,0,0,0.3); }
}
";

/// Page background plus diagram and embedded SVG blocks for Markdown.
pub const MARKDOWN_CSS: &str = r"
body { margin: 0; padding: 0; background-color: #f5f5f7; }
.markdown-body { max-width: 960px; margin: 0 auto; padding: 32px; }
.mermaid, .embedded-svg-container { margin: 1.5em 0; text-align: center; overflow-x: auto; }
.embedded-svg-container svg { max-width: 100%; height: auto; }
.mermaid-error { margin: 1.5em 0; border: 1px solid #f5c2c7; border-radius: 6px; background: #fff5f5; }
.mermaid-error .error-message { padding: 8px 12px; color: #b42318; font-weight: 500; }
.mermaid-error .code-display { margin: 0; padding: 12px; white-space: pre-wrap; overflow-x: auto; }
.markdown-alert { margin: 1em 0; padding: 0.5em 1em; border-left: 4px solid #6366f1; }
.markdown-alert-title { font-weight: 600; margin: 0 0 0.25em; }
@media (prefers-color-scheme: dark) {
  body { background-color: #1a1a1a; }
  .mermaid-error { background: #2a1a1a; border-color: #7a2e2e; }
  .mermaid-error .error-message { color: #f97066; }
}
";

/// Centered viewer with a right-click context menu.
pub const SVG_VIEWER_CSS: &str = r"
body {
  margin: 0;
  padding: 10px;
  display: flex;
  justify-content: center;
  align-items: center;
  min-height: 100vh;
  background-color: #f5f5f5;
}
#svg-container { position: relative; width: 100%; max-width: 100%; text-align: center; }
#svg-container svg { max-width: 100%; max-height: 90vh; height: auto; width: auto; margin: 0 auto; display: inline-block; }
.svg-error { color: #b42318; font-family: sans-serif; }
.context-menu {
  display: none;
  position: absolute;
  background-color: white;
  border: 1px solid #ccc;
  border-radius: 4px;
  box-shadow: 0 2px 10px rgba(0,0,0,0.2);
  padding: 8px 0;
  z-index: 1000;
}
.context-menu-item {
  padding: 8px 16px;
  cursor: pointer;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;
  font-size: 14px;
  color: #333;
}
.context-menu-item:hover { background-color: #f2f2f2; }
@media (prefers-color-scheme: dark) {
  body { background-color: #1a1a1a; }
  .context-menu { background-color: #2a2a2a; border-color: #444; }
  .context-menu-item { color: #e5e7eb; }
  .context-menu-item:hover { background-color: #3a3a3a; }
}
";

/// Synthesizes a missing `viewBox` and exports the SVG as PNG.
///
/// Export size: width/height attributes, then viewBox, then bounding box,
/// floored at 100px; scale 2x, reduced so neither side exceeds 4000px.
pub const SVG_VIEWER_JS: &str = r"
document.addEventListener('DOMContentLoaded', function () {
  var container = document.getElementById('svg-container');
  var svg = container.querySelector('svg');
  var menu = document.getElementById('context-menu');
  var exportPng = document.getElementById('export-png');

  if (!svg) {
    if (!container.querySelector('.svg-error')) {
      var notice = document.createElement('p');
      notice.className = 'svg-error';
      notice.textContent = 'SVG failed to load or the content is not valid SVG.';
      container.insertBefore(notice, container.firstChild);
    }
    return;
  }

  if (!svg.getAttribute('viewBox') && svg.getAttribute('width') && svg.getAttribute('height')) {
    svg.setAttribute('viewBox', '0 0 ' + parseFloat(svg.getAttribute('width')) + ' ' + parseFloat(svg.getAttribute('height')));
  }

  container.addEventListener('contextmenu', function (e) {
    e.preventDefault();
    menu.style.display = 'block';
    menu.style.left = e.pageX + 'px';
    menu.style.top = e.pageY + 'px';
  });
  document.addEventListener('click', function () {
    menu.style.display = 'none';
  });

  exportPng.addEventListener('click', function () {
    var width, height;
    if (svg.getAttribute('width') && svg.getAttribute('height')) {
      width = parseFloat(svg.getAttribute('width'));
      height = parseFloat(svg.getAttribute('height'));
    } else if (svg.viewBox.baseVal && svg.viewBox.baseVal.width > 0) {
      width = svg.viewBox.baseVal.width;
      height = svg.viewBox.baseVal.height;
    } else {
      var rect = svg.getBoundingClientRect();
      width = rect.width;
      height = rect.height;
    }
    width = Math.max(width || 0, 100);
    height = Math.max(height || 0, 100);

    var maxSize = 4000;
    var scale = 2;
    if (width * scale > maxSize || height * scale > maxSize) {
      scale = Math.min(maxSize / width, maxSize / height);
    }

    var canvas = document.createElement('canvas');
    canvas.width = width * scale;
    canvas.height = height * scale;
    var ctx = canvas.getContext('2d');

    var data = new XMLSerializer().serializeToString(svg).replace(/NS\d+:href/g, 'xlink:href');
    var DOMURL = window.URL || window.webkitURL || window;
    var url = DOMURL.createObjectURL(new Blob([data], { type: 'image/svg+xml;charset=utf-8' }));
    var img = new Image();
    img.onload = function () {
      ctx.setTransform(1, 0, 0, 1, 0, 0);
      ctx.clearRect(0, 0, canvas.width, canvas.height);
      ctx.scale(scale, scale);
      ctx.drawImage(img, 0, 0, width, height);
      DOMURL.revokeObjectURL(url);
      var link = document.createElement('a');
      link.download = 'svg-export-' + new Date().toISOString().slice(0, 19).replace(/:/g, '-') + '.png';
      link.href = canvas.toDataURL('image/png');
      link.style.display = 'none';
      document.body.appendChild(link);
      link.click();
      document.body.removeChild(link);
    };
    img.onerror = function () {
      alert('PNG export failed. Try saving the SVG with the browser instead.');
    };
    img.src = url;
  });
});
";

/// Runs highlight.js over every code block once the DOM is ready.
pub const HIGHLIGHT_INIT_JS: &str = r"
document.addEventListener('DOMContentLoaded', function () {
  if (typeof hljs === 'undefined') return;
  document.querySelectorAll('pre code').forEach(function (block) {
    hljs.highlightElement(block);
  });
});
";

/// Client-side diagram bundle.
///
/// Expects `window.HTMLGO_DIAGRAMS = { pollMs, maxAttempts }` to be set by a
/// preceding script. On load it converts leftover `language-mermaid` code
/// blocks into placeholders, then renders placeholders with a theme that
/// follows the color scheme, retrying while the engine is unavailable.
/// Blocks that fail to parse, or that are still unrendered after
/// `maxAttempts`, are replaced with an error message and their source.
/// If the engine throws while initializing, every pending block gets
/// the error instead.
pub const DIAGRAM_BUNDLE_JS: &str = r"
(function () {
  var cfg = window.HTMLGO_DIAGRAMS || { pollMs: 1000, maxAttempts: 10 };
  var attempts = 0;
  var initialized = false;

  function prefersDark() {
    return !!(window.matchMedia && window.matchMedia('(prefers-color-scheme: dark)').matches);
  }

  function convertCodeBlocks() {
    document.querySelectorAll('pre code.language-mermaid').forEach(function (code) {
      var placeholder = document.createElement('div');
      placeholder.className = 'mermaid';
      placeholder.textContent = code.textContent;
      code.parentNode.replaceWith(placeholder);
    });
  }

  function pending() {
    return Array.prototype.filter.call(document.querySelectorAll('div.mermaid'), function (el) {
      return !el.querySelector('svg');
    });
  }

  function showError(el, message) {
    var source = el.getAttribute('data-source') || el.textContent;
    el.className = 'mermaid-error';
    el.removeAttribute('data-processed');
    el.textContent = '';
    var msg = document.createElement('div');
    msg.className = 'error-message';
    msg.textContent = 'Diagram rendering failed: ' + message;
    var pre = document.createElement('pre');
    pre.className = 'code-display';
    pre.textContent = source;
    el.appendChild(msg);
    el.appendChild(pre);
  }

  function schedule() {
    var left = pending();
    if (!left.length) return;
    if (attempts >= cfg.maxAttempts) {
      left.forEach(function (el) { showError(el, 'diagram engine unavailable'); });
      return;
    }
    setTimeout(renderPending, cfg.pollMs);
  }

  function renderPending() {
    attempts += 1;
    if (typeof mermaid === 'undefined') {
      schedule();
      return;
    }
    if (!initialized) {
      try {
        mermaid.initialize({ startOnLoad: false, theme: prefersDark() ? 'dark' : 'default', securityLevel: 'strict' });
      } catch (err) {
        pending().forEach(function (el) {
          showError(el, 'diagram engine failed to initialize: ' + ((err && err.message) || String(err)));
        });
        return;
      }
      initialized = true;
    }
    var nodes = pending();
    var checks = nodes.map(function (el) {
      if (!el.hasAttribute('data-source')) el.setAttribute('data-source', el.textContent);
      el.removeAttribute('data-processed');
      el.textContent = el.getAttribute('data-source');
      return Promise.resolve()
        .then(function () { return mermaid.parse(el.textContent); })
        .then(function () { return el; }, function (err) {
          showError(el, (err && err.message) || String(err));
          return null;
        });
    });
    Promise.all(checks).then(function (results) {
      var valid = results.filter(Boolean);
      if (!valid.length) return schedule();
      return mermaid.run({ nodes: valid, suppressErrors: true }).then(schedule, schedule);
    });
  }

  document.addEventListener('DOMContentLoaded', function () {
    convertCodeBlocks();
    if (pending().length) setTimeout(renderPending, 500);
  });
})();
";

/// Static Tier-1 diagram page.
pub const STATIC_DIAGRAM_CSS: &str = r"
body { margin: 0; padding: 20px; display: flex; justify-content: center; align-items: center; min-height: 100vh; background-color: #ffffff; }
.mermaid-container { max-width: 100%; overflow: auto; }
.mermaid-container svg { max-width: 100%; height: auto; }
@media (prefers-color-scheme: dark) {
  body { background-color: #1a1a1a; }
  .mermaid-container { background-color: #ffffff; border-radius: 8px; padding: 16px; }
}
";

/// Client-rendered diagram page.
pub const CLIENT_DIAGRAM_CSS: &str = r"
body { margin: 0; padding: 20px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; background-color: #ffffff; }
.mermaid { display: flex; justify-content: center; }
.mermaid-error { max-width: 960px; margin: 0 auto; border: 1px solid #f5c2c7; border-radius: 6px; background: #fff5f5; }
.mermaid-error .error-message { padding: 8px 12px; color: #b42318; font-weight: 500; }
.mermaid-error .code-display { margin: 0; padding: 12px; white-space: pre-wrap; }
@media (prefers-color-scheme: dark) {
  body { background-color: #1a1a1a; color: #e6e6e6; }
  .mermaid-error { background: #2a1a1a; border-color: #7a2e2e; }
}
";
