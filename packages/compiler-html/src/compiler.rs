use missive_blocks::{BlockData, Registry};
use missive_editor::{render_document_static, Document, EditSession, EditorError};
use thiserror::Error;
use tracing::debug;

const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";
const DEFAULT_BACKDROP: &str = "#F8F8F8";
const DEFAULT_CANVAS: &str = "#FFFFFF";

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Root block \"{0}\" not found")]
    RootNotFound(String),

    #[error("Render error: {0}")]
    Render(EditorError),
}

impl From<EditorError> for CompileError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::RootNotFound(id) => CompileError::RootNotFound(id),
            other => CompileError::Render(other),
        }
    }
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Document `<title>`
    pub title: String,
    /// Pretty print the shell
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            title: "Email Template".to_string(),
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl CompileOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Page-level colors and font taken from the root block.
///
/// Each value falls back to the key older documents kept directly in the root's
/// data, then to a fixed default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub font_family: String,
    pub backdrop_color: String,
    pub canvas_color: String,
}

impl Theme {
    pub fn from_root(data: &BlockData) -> Self {
        let legacy = |key: &str| {
            data.extra
                .get(key)
                .and_then(missive_blocks::value_text)
                .filter(|value| !value.is_empty())
        };
        let pick = |primary: Option<String>, legacy_key: &str, default: &str| {
            primary
                .filter(|value| !value.is_empty())
                .or_else(|| legacy(legacy_key))
                .map(|value| css_value(&value))
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            font_family: pick(data.style_text("fontFamily"), "fontFamily", DEFAULT_FONT_FAMILY),
            backdrop_color: pick(data.prop_text("backdropColor"), "backdropColor", DEFAULT_BACKDROP),
            canvas_color: pick(data.style_text("backgroundColor"), "canvasColor", DEFAULT_CANVAS),
        }
    }
}

/// Values land inside a `<style>` element; drop anything that could end the
/// declaration or the element.
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';'))
        .collect::<String>()
        .trim()
        .to_string()
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a document to a standalone, email-safe HTML page
pub fn compile_to_html(
    document: &Document,
    registry: &Registry,
    options: CompileOptions,
) -> Result<String, CompileError> {
    let root = document
        .root()
        .ok_or_else(|| CompileError::RootNotFound(document.root_id().to_string()))?;
    let theme = Theme::from_root(&root.data);
    let body = render_document_static(document, registry)?;

    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(&theme, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line("<div class=\"email-container\">");
    ctx.indent();
    if !body.is_empty() {
        ctx.add_line(&body);
    }
    ctx.dedent();
    ctx.add_line("</div>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    debug!("Compiled {} blocks to HTML", document.len());
    Ok(ctx.get_output())
}

/// Compile the session's document. The email subject, when set, becomes the
/// page title; otherwise the project title does.
pub fn compile_session(session: &EditSession) -> Result<String, CompileError> {
    let editor = session.options();
    let title = if editor.email_subject.is_empty() {
        &editor.project_title
    } else {
        &editor.email_subject
    };
    compile_to_html(
        session.document(),
        session.registry(),
        CompileOptions::default().with_title(title.as_str()),
    )
}

fn compile_head(theme: &Theme, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = html_escape::encode_text(&ctx.options.title).into_owned();
    ctx.add_line(&format!("<title>{}</title>", title));

    ctx.add_line("<style>");
    ctx.indent();
    ctx.add_line("* { box-sizing: border-box; }");
    ctx.add_line("table { border-collapse: collapse; width: 100%; }");
    ctx.add_line("img { max-width: 100%; height: auto; display: block; }");
    ctx.add_line("a { text-decoration: none; }");
    ctx.add_line(&format!(
        "body {{ margin: 0; padding: 0; font-family: {}; background-color: {}; }}",
        theme.font_family, theme.backdrop_color
    ));
    ctx.add_line(&format!(
        ".email-container {{ max-width: 600px; margin: 0 auto; background-color: {}; }}",
        theme.canvas_color
    ));
    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}
