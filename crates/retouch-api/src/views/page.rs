//! The editor page: upload form, parameter controls, before/after images.

use maud::{html, Markup, DOCTYPE};
use retouch_processing::TransformParams;

const PAGE_TITLE: &str = "Retouch";

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 1100px; padding: 1.5rem; color: #222; }
form.editor { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 0.75rem 1.5rem; align-items: end; }
form.editor label { display: flex; flex-direction: column; gap: 0.25rem; font-size: 0.9rem; }
form.editor .flags { flex-direction: row; gap: 1rem; }
.actions { display: flex; gap: 0.5rem; }
.error { background: #fde8e8; border: 1px solid #e0a0a0; color: #8a1f1f; padding: 0.75rem 1rem; margin-bottom: 1rem; }
.images { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; margin-top: 1.5rem; }
.images figure { margin: 0; }
.images img { max-width: 100%; border: 1px solid #ddd; }
"#;

const PREVIEW_SCRIPT: &str = r#"
document.getElementById('preview-button').addEventListener('click', async () => {
  const form = document.getElementById('editor-form');
  const response = await fetch('/preview', { method: 'POST', body: new FormData(form) });
  const body = await response.json();
  const banner = document.getElementById('error-banner');
  if (!response.ok) {
    banner.textContent = body.error;
    banner.hidden = false;
    return;
  }
  banner.hidden = true;
  document.getElementById('original-image').src = body.original_image;
  document.getElementById('processed-image').src = body.processed_image;
  document.getElementById('images').hidden = false;
});
"#;

/// Everything the page shows besides static chrome.
#[derive(Debug, Default)]
pub struct PageView {
    pub params: TransformParams,
    pub original_image: Option<String>,
    pub processed_image: Option<String>,
    pub error: Option<String>,
}

impl PageView {
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Renders the base HTML document structure
fn base_document(content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (PAGE_TITLE) }
                style { (maud::PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn editor_form(params: &TransformParams) -> Markup {
    html! {
        form.editor id="editor-form" method="post" action="/" enctype="multipart/form-data" {
            label {
                "Image (png, jpg, jpeg, gif)"
                input type="file" name="file" accept=".png,.jpg,.jpeg,.gif" required;
            }
            label {
                "Brightness"
                input type="range" name="brightness_value" min="-100" max="100" step="1"
                    value=(params.brightness);
            }
            label {
                "Contrast"
                input type="range" name="contrast_value" min="0" max="3" step="0.1"
                    value=(params.contrast);
            }
            label {
                "Blur kernel"
                input type="number" name="blur_value" min="1" max="51" step="2"
                    value=(params.blur);
            }
            label.flags {
                span {
                    input type="checkbox" name="grayscale_value" value="true" checked[params.grayscale];
                    " Grayscale"
                }
                span {
                    input type="checkbox" name="edge_value" value="true" checked[params.edge];
                    " Edges"
                }
            }
            div.actions {
                button type="submit" { "Apply" }
                button type="button" id="preview-button" { "Preview" }
                button type="submit" formaction="/download" { "Download" }
            }
        }
    }
}

fn image_panels(view: &PageView) -> Markup {
    let shown = view.original_image.is_some() && view.processed_image.is_some();
    html! {
        section id="images" class="images" hidden[!shown] {
            figure {
                figcaption { "Original" }
                img id="original-image" alt="Original" src=[view.original_image.as_deref()];
            }
            figure {
                figcaption { "Processed" }
                img id="processed-image" alt="Processed" src=[view.processed_image.as_deref()];
            }
        }
    }
}

/// Renders the full editor page.
pub fn render_page(view: &PageView) -> Markup {
    let content = html! {
        main {
            h1 { (PAGE_TITLE) }
            div id="error-banner" class="error" role="alert" hidden[view.error.is_none()] {
                @if let Some(error) = &view.error {
                    (error)
                }
            }
            (editor_form(&view.params))
            (image_panels(view))
        }
        script { (maud::PreEscaped(PREVIEW_SCRIPT)) }
    };

    base_document(content)
}
