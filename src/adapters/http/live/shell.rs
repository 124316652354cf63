//! The static page shell served at `/`.
//!
//! The shell holds only the content container, a loading indicator and the
//! small script that speaks the WebSocket protocol; everything visible is
//! sent over `/live` by the commit.

use crate::adapters::render::html_escape;

/// Renders the shell with an escaped `title`.
pub fn render_shell(title: &str) -> String {
    SHELL.replace("{{title}}", &html_escape(title))
}

const SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
    <style>
        .tile { transition-property: opacity; cursor: pointer; }
        .track { background: #333; height: 0.5em; }
        .bar { background: #f5c542; height: 100%; }
        #loading[hidden] { display: none; }
    </style>
</head>
<body>
    <div id="loading">Loading&hellip;</div>
    <main id="content"></main>
    <script>
    (function () {
        const content = document.getElementById("content");
        const loading = document.getElementById("loading");
        const scheme = location.protocol === "https:" ? "wss" : "ws";
        const socket = new WebSocket(scheme + "://" + location.host + "/live");

        function byId(id) { return document.getElementById(id); }

        function apply(msg) {
            switch (msg.type) {
            case "replace_content":
                content.innerHTML = msg.markup;
                break;
            case "batch":
                msg.messages.forEach(apply);
                break;
            case "register_handler": {
                const el = byId(msg.elementId);
                if (!el) break;
                el.addEventListener("click", function (ev) {
                    ev.stopPropagation();
                    const out = { type: "event", elementId: msg.elementId, event: msg.event };
                    if (msg.event === "click_position") {
                        const rect = el.getBoundingClientRect();
                        out.value = rect.width > 0 ? (ev.clientX - rect.left) / rect.width : 0;
                    }
                    socket.send(JSON.stringify(out));
                });
                break;
            }
            case "animate": {
                const el = byId(msg.elementId);
                if (!el) break;
                el.style.transitionDuration = msg.durationMs + "ms";
                el.style.opacity = msg.opacity;
                break;
            }
            case "set_style": {
                const el = byId(msg.elementId);
                if (el) el.style.setProperty(msg.property, msg.value);
                break;
            }
            case "set_text": {
                const el = byId(msg.elementId);
                if (el) el.textContent = msg.text;
                break;
            }
            case "ready":
                loading.hidden = true;
                break;
            case "error":
                console.error(msg.code, msg.message);
                break;
            }
        }

        socket.onmessage = function (event) { apply(JSON.parse(event.data)); };
        socket.onclose = function () { loading.hidden = false; };
    })();
    </script>
</body>
</html>"#;
