// src/formatting/block_renderer.rs
//! Block rendering engine: a block tree to an indented text outline.
//!
//! Traversal is pre-order and iterative: an explicit stack of frames carries
//! each block with its depth, so a pathological tree fails with
//! `MalformedTree` instead of exhausting the call stack.

use crate::constants::{BLOCK_MAX_RENDER_DEPTH, CHARS_PER_BLOCK_ESTIMATE, INDENT_SPACES};
use crate::error::AppError;
use crate::model::{Block, BlockKind, ImageSource};

/// One pending block on the traversal stack.
struct Frame<'a> {
    block: &'a Block,
    depth: usize,
    /// Position within a run of consecutive numbered list items (1-based).
    ordinal: usize,
}

// --- Public API ---

/// Renders blocks into outline lines, children indented under their parent.
pub fn render_outline(blocks: &[Block]) -> Result<Vec<String>, AppError> {
    let mut lines = Vec::with_capacity(blocks.len());
    let mut stack = Vec::new();
    push_siblings(&mut stack, blocks, 0);

    while let Some(frame) = stack.pop() {
        if frame.depth >= BLOCK_MAX_RENDER_DEPTH {
            return Err(AppError::MalformedTree {
                limit: BLOCK_MAX_RENDER_DEPTH,
            });
        }

        let indent = " ".repeat(frame.depth * INDENT_SPACES);
        log::trace!("Rendering {} at depth {}", frame.block.block_type(), frame.depth);
        render_block(frame.block, frame.ordinal, &indent, &mut lines);

        push_siblings(&mut stack, &frame.block.children, frame.depth + 1);
    }

    Ok(lines)
}

/// Renders blocks into a single newline-terminated string.
pub fn render_blocks(blocks: &[Block]) -> Result<String, AppError> {
    let lines = render_outline(blocks)?;
    let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    for line in lines {
        output.push_str(&line);
        output.push('\n');
    }
    Ok(output)
}

// --- Traversal ---

/// Pushes siblings in reverse so they pop in source order.
fn push_siblings<'a>(stack: &mut Vec<Frame<'a>>, siblings: &'a [Block], depth: usize) {
    let mut ordinals = Vec::with_capacity(siblings.len());
    let mut run = 0;
    for block in siblings {
        run = match block.kind {
            BlockKind::NumberedListItem { .. } => run + 1,
            _ => 0,
        };
        ordinals.push(run);
    }

    for (block, ordinal) in siblings.iter().zip(ordinals).rev() {
        stack.push(Frame {
            block,
            depth,
            ordinal,
        });
    }
}

// --- Per-Block Text ---

fn render_block(block: &Block, ordinal: usize, indent: &str, lines: &mut Vec<String>) {
    // Blank lines carry no indentation.
    let mut line = |text: String| {
        lines.push(if text.is_empty() {
            text
        } else {
            format!("{}{}", indent, text)
        })
    };

    match &block.kind {
        BlockKind::Heading { level, text } => {
            line(format!("{} {}", "#".repeat(*level as usize), text))
        }
        BlockKind::Paragraph { text } => line(text.clone()),
        BlockKind::BulletedListItem { text } => line(format!("- {}", text)),
        BlockKind::NumberedListItem { text } => line(format!("{}. {}", ordinal.max(1), text)),
        BlockKind::ToDo { text, checked } => {
            line(format!("[{}] {}", if *checked { "x" } else { " " }, text))
        }
        BlockKind::Toggle { text } => line(format!("▸ {}", text)),
        BlockKind::Code { language, text } => {
            line(format!("```{}", language));
            for code_line in text.lines() {
                line(code_line.to_string());
            }
            line("```".to_string());
        }
        BlockKind::Quote { text } => line(format!("> {}", text)),
        BlockKind::Callout { icon: Some(icon), text } => line(format!("{} {}", icon, text)),
        BlockKind::Callout { icon: None, text } => line(text.clone()),
        BlockKind::Divider => line("---".to_string()),
        BlockKind::Table { width } => line(format!("[Table: {} columns]", width)),
        BlockKind::TableRow { cells } => line(format!("| {} |", cells.join(" | "))),
        BlockKind::Image {
            source: ImageSource::External(url),
        } => line(format!("[Image: {}]", url)),
        BlockKind::Image {
            source: ImageSource::Uploaded,
        } => line("[Image: uploaded file]".to_string()),
        BlockKind::Bookmark { url } => line(format!("[Bookmark: {}]", url)),
        BlockKind::Embed { url } => line(format!("[Embed: {}]", url)),
        BlockKind::ChildPage { title } => line(format!("[Child page: {}]", title)),
        BlockKind::ChildDatabase { title } => line(format!("[Child database: {}]", title)),
        BlockKind::Equation { expression } => line(format!("$$ {} $$", expression)),
        BlockKind::ColumnList => line("[Columns]".to_string()),
        BlockKind::Column => line("[Column]".to_string()),
        BlockKind::SyncedBlock => line("[Synced block]".to_string()),
        BlockKind::TableOfContents => line("[Table of contents]".to_string()),
        BlockKind::Breadcrumb => line("[Breadcrumb]".to_string()),
        BlockKind::LinkToPage { target } => line(format!("[Link to page: {}]", target)),
        BlockKind::Media { label, url: Some(url) } => line(format!("[{}: {}]", label, url)),
        BlockKind::Media { label, url: None } => line(format!("[{}]", label)),
        BlockKind::LinkPreview { url } => line(format!("[Link preview: {}]", url)),
        BlockKind::Template { text } => line(format!("[Template: {}]", text)),
        BlockKind::Unsupported => line("[Unsupported block]".to_string()),
    }
}
