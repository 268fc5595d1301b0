use crate::error::Result;
use crate::flareplot::FlareplotDocument;
use std::fmt;
use std::fs;
use std::path::Path;

pub const D3_URL: &str = "https://d3js.org/d3.v3.min";
pub const FLAREPLOT_URL: &str = "https://cdn.rawgit.com/GPCRviz/FlarePlot/master/flareplot-main.js";
pub const REQUIREJS_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/require.js/2.3.6/require.min.js";

const CONTAINER_ID: &str = "flare-container";
const EXPORT_BUTTON_ID: &str = "export-svg";

/// An HTML fragment ready to be displayed in a notebook cell or written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlareplotHtml(String);

impl FlareplotHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, &self.0)?;
        Ok(())
    }
}

impl fmt::Display for FlareplotHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FlareplotHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Escapes characters that would let JSON text terminate an inline `<script>` element
fn sanitize_json_str(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => sanitized.push_str(r"\u003c"),
            '>' => sanitized.push_str(r"\u003e"),
            '&' => sanitized.push_str(r"\u0026"),
            '\u{2028}' => sanitized.push_str(r"\u2028"),
            '\u{2029}' => sanitized.push_str(r"\u2029"),
            other => sanitized.push(other),
        }
    }
    sanitized
}

/// Embeds a flareplot document in an HTML fragment.
///
/// The fragment holds a `width`×`height` container, an "Export as SVG" button
/// and a script that loads D3 through require.js, loads the flareplot library,
/// draws the plot and wires the button to download the rendered SVG.
/// The page hosting the fragment must provide require.js.
pub fn render_html(document: &FlareplotDocument, width: u32, height: u32) -> Result<FlareplotHtml> {
    let json_data = sanitize_json_str(&document.to_json()?);

    let html = format!(
        r##"
<div id="{container}" style="width: {width}px; height: {height}px;"></div>
<button id="{button}">Export as SVG</button>
<script>
    require.config({{
        paths: {{
            d3: '{d3}'
        }}
    }});

    require(['d3'], function(d3) {{
        var script = document.createElement('script');
        script.src = '{flareplot}';
        script.onload = function() {{
            var jsonData = {json_data};
            var plot = createFlareplot({width}, jsonData, "#{container}");

            d3.select("#{button}").on("click", function() {{
                var svgElement = d3.select("#{container} svg").node();

                var serializer = new XMLSerializer();
                var source = serializer.serializeToString(svgElement);

                if(!source.match(/^<svg[^>]+xmlns="http\:\/\/www\.w3\.org\/2000\/svg"/)) {{
                    source = source.replace(/^<svg/, '<svg xmlns="http://www.w3.org/2000/svg"');
                }}
                if(!source.match(/^<svg[^>]+"http\:\/\/www\.w3\.org\/1999\/xlink"/)) {{
                    source = source.replace(/^<svg/, '<svg xmlns:xlink="http://www.w3.org/1999/xlink"');
                }}

                source = '<?xml version="1.0" standalone="no"?>\r\n' + source;

                var url = "data:image/svg+xml;charset=utf-8," + encodeURIComponent(source);

                var link = document.createElement("a");
                link.download = "flareplot.svg";
                link.href = url;
                document.body.appendChild(link);
                link.click();
                document.body.removeChild(link);
            }});
        }};
        document.head.appendChild(script);
    }});
</script>
"##,
        container = CONTAINER_ID,
        button = EXPORT_BUTTON_ID,
        d3 = D3_URL,
        flareplot = FLAREPLOT_URL,
        json_data = json_data,
        width = width,
        height = height,
    );

    Ok(FlareplotHtml(html))
}

/// Wraps a fragment in a complete page that loads require.js, so it can be
/// opened directly in a browser.
pub fn render_standalone_page(fragment: &FlareplotHtml, title: &str) -> FlareplotHtml {
    let title = title
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    FlareplotHtml(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <script src="{requirejs}"></script>
</head>
<body>
{fragment}
</body>
</html>
"#,
        title = title,
        requirejs = REQUIREJS_URL,
        fragment = fragment.as_str(),
    ))
}
