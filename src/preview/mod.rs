//! Markdown preview host document.
//!
//! Assembles the HTML handed to the external web-rendering host: the
//! resolved renderer/diagram scripts plus the document text, percent-encoded
//! so it survives the trip into an inline script block. Markdown parsing and
//! diagram layout happen inside the host's scripts, not here.

use crate::services::ports::ResolvedAsset;

/// Percent-encode `text` for transport into the host document; the host
/// recovers it with `decodeURIComponent`. Everything outside the unreserved
/// set is encoded, so quotes, backticks and newlines can never break out of
/// the script block.
pub fn percent_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                out.push('%');
                out.push(char::from_digit((byte >> 4) as u32, 16).unwrap_or('0'));
                out.push(char::from_digit((byte & 0x0f) as u32, 16).unwrap_or('0'));
            }
        }
    }
    out
}

/// Complete document for the rendering host: `renderer` parses markdown,
/// `diagrams` draws `mermaid` fenced blocks. Both script tags come from the
/// resolver, so the host works from cache, bundled copy or the live CDN.
pub fn host_document(
    markdown: &str,
    renderer: &ResolvedAsset,
    diagrams: &ResolvedAsset,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        body {{
            background-color: transparent;
            font-family: -apple-system, system-ui, sans-serif;
        }}
        .content {{
            padding: 20px;
            line-height: 1.6;
        }}
        pre {{
            background: rgba(128, 128, 128, 0.1);
            padding: 15px;
            border-radius: 8px;
            overflow-x: auto;
        }}
        .mermaid {{
            display: flex;
            justify-content: center;
            margin: 20px 0;
            background: white;
            padding: 20px;
            border-radius: 10px;
        }}
    </style>
    {renderer_tag}
    {diagram_tag}
    <script>
        try {{
            mermaid.initialize({{ startOnLoad: false, theme: 'default' }});
        }} catch (e) {{ console.error('mermaid init error', e); }}

        window.renderMarkdown = async function(md) {{
            try {{
                const renderer = new marked.Renderer();
                renderer.code = function(code, language) {{
                    if (typeof code === 'object') {{
                        language = code.lang;
                        code = code.text;
                    }}
                    if (language === 'mermaid') {{
                        return '<div class="mermaid">' + code + '</div>';
                    }}
                    const escaped = code.replace(/&/g, '&amp;').replace(/</g, '&lt;').replace(/>/g, '&gt;');
                    return '<pre><code class="language-' + language + '">' + escaped + '</code></pre>';
                }};
                document.getElementById('content').innerHTML = marked.parse(md, {{ renderer: renderer }});
            }} catch (e) {{ console.error('marked parse error', e); return; }}
            try {{
                await mermaid.run({{ querySelector: '.mermaid' }});
            }} catch (e) {{ console.error('mermaid render error', e); }}
        }}
    </script>
</head>
<body>
    <div id="content" class="content"></div>
    <script>
        window.renderMarkdown(decodeURIComponent("{encoded}"));
    </script>
</body>
</html>
"#,
        renderer_tag = renderer.script_tag(),
        diagram_tag = diagrams.script_tag(),
        encoded = percent_encode(markdown),
    )
}
