#![forbid(unsafe_code)]

//! Load a document, render one frame, write it out.

use std::fs;
use std::io::{self, BufWriter, Write};

use folio::doc::BufferEntry;
use folio::{Error, Node, RenderOptions, Renderer, Result, TerminalCapabilities, Theme};
use tracing::{debug, info, warn};

use crate::cli::{Opts, OverlayKind};

/// Document shown when no file is given.
pub const SAMPLE: &str = include_str!("../data/sample.json");

const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// Decode a JSON document tree.
pub fn parse_document(json: &str) -> Result<Node> {
    serde_json::from_str(json).map_err(|err| Error::Document(err.to_string()))
}

/// Read `file`, or the built-in sample when `None`.
pub fn load_document(file: Option<&str>) -> Result<Node> {
    match file {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            let doc = parse_document(&json)?;
            info!(path, nodes = doc.node_count(), "document loaded");
            Ok(doc)
        }
        None => parse_document(SAMPLE),
    }
}

/// Theme preset by name; unknown names fall back to terminal detection.
pub fn resolve_theme(name: Option<&str>) -> Theme {
    match name {
        Some(name) => Theme::by_name(name).unwrap_or_else(|| {
            warn!(
                theme = name,
                known = ?Theme::preset_names(),
                "unknown theme, detecting from terminal"
            );
            Theme::auto()
        }),
        None => Theme::auto(),
    }
}

/// Frame size from the options, else the terminal, else 80x24.
pub fn frame_size(opts: &Opts, terminal: Option<(u16, u16)>) -> (u16, u16) {
    let (tw, th) = terminal.unwrap_or(DEFAULT_SIZE);
    (opts.width.unwrap_or(tw), opts.height.unwrap_or(th))
}

/// Render `doc` and the requested overlay into a fresh renderer.
pub fn render_frame(doc: &Node, opts: &Opts, size: (u16, u16), theme: Theme) -> Renderer {
    let (width, height) = size;
    let options = RenderOptions::new().justify(opts.justify);
    let mut renderer = Renderer::new(width, height)
        .with_theme(theme)
        .with_options(options);
    let scroll = renderer.clamp_scroll(doc, opts.scroll);
    if scroll != opts.scroll {
        debug!(requested = opts.scroll, scroll, "scroll clamped");
    }
    renderer.render(doc, scroll);
    if let Some(kind) = opts.overlay {
        draw_overlay(&mut renderer, kind, opts.file.as_deref());
    }
    renderer
}

fn draw_overlay(renderer: &mut Renderer, kind: OverlayKind, file: Option<&str>) {
    match kind {
        OverlayKind::Toc => {
            let labels = folio::generate_labels(renderer.headings().len());
            renderer.render_toc(&labels, "", 0);
        }
        OverlayKind::Links => {
            let labels = folio::generate_labels(renderer.links().len());
            renderer.render_link_index(&labels, "", 0);
        }
        OverlayKind::Labels => {
            let labels = folio::generate_labels(renderer.visible_links().len());
            renderer.render_link_labels(&labels, "");
        }
        OverlayKind::Inputs => {
            let labels = folio::generate_labels(renderer.visible_inputs().len());
            renderer.render_input_labels(&labels, "");
        }
        OverlayKind::Buffers => {
            let title = renderer
                .headings()
                .first()
                .map_or_else(|| "untitled".to_string(), |h| h.text.clone());
            let buffers = [BufferEntry {
                title,
                url: file.unwrap_or("sample").to_string(),
                active: true,
            }];
            let labels = folio::generate_labels(buffers.len());
            renderer.render_buffer_list(&buffers, &labels, "", 0);
        }
    }
}

/// Load, render and write one frame to stdout.
pub fn run(opts: &Opts) -> Result<()> {
    let doc = load_document(opts.file.as_deref())?;
    let size = frame_size(opts, folio::terminal_size());
    let theme = resolve_theme(opts.theme.as_deref());
    let renderer = render_frame(&doc, opts, size, theme);

    let caps = TerminalCapabilities::detect();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    renderer.present(&mut out, &caps)?;
    out.write_all(b"\r\n")?;
    out.flush()?;
    Ok(())
}
