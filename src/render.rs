use std::io::{self, Write};

use crossterm::style::Stylize;
use crossterm::tty::IsTty;

/// Presentation backend. The session core only produces strings; how they
/// land on the terminal is decided here, so the core never branches on which
/// backend is active.
pub trait Renderer {
    /// One line of body text.
    fn line(&self, text: &str);
    /// Prompt text, printed without a trailing newline.
    fn prompt_text(&self, text: &str);
    /// Section heading.
    fn heading(&self, title: &str);
    /// A bordered block, used for history entries and match detail.
    fn panel(&self, body: &str);
    /// An informational `[Info]` line.
    fn notice(&self, text: &str);
    /// A corrective or fatal `[Error]` line.
    fn error(&self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    Plain,
    Fancy,
}

/// Styled output only makes sense on an interactive terminal.
pub fn auto_kind() -> RendererKind {
    if io::stdout().is_tty() {
        RendererKind::Fancy
    } else {
        RendererKind::Plain
    }
}

pub fn build(kind: RendererKind) -> Box<dyn Renderer> {
    match kind {
        RendererKind::Plain => Box::new(PlainRenderer),
        RendererKind::Fancy => Box::new(FancyRenderer),
    }
}

pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn line(&self, text: &str) {
        println!("{text}");
    }

    fn prompt_text(&self, text: &str) {
        print!("{text}");
        let _ = io::stdout().flush();
    }

    fn heading(&self, title: &str) {
        println!("========== {title} ==========");
    }

    fn panel(&self, body: &str) {
        println!("--------");
        for line in body.lines() {
            println!("{line}");
        }
        println!("--------");
    }

    fn notice(&self, text: &str) {
        println!("[Info] {text}");
    }

    fn error(&self, text: &str) {
        println!("[Error] {text}");
    }
}

pub struct FancyRenderer;

impl Renderer for FancyRenderer {
    fn line(&self, text: &str) {
        println!("{text}");
    }

    fn prompt_text(&self, text: &str) {
        print!("{}", text.cyan());
        let _ = io::stdout().flush();
    }

    fn heading(&self, title: &str) {
        println!(
            "{} {} {}",
            "━━━━━━━━━━".dark_magenta(),
            title.bold(),
            "━━━━━━━━━━".dark_magenta()
        );
    }

    fn panel(&self, body: &str) {
        let width = body.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        println!("{}", format!("┌{}┐", "─".repeat(width + 2)).dark_grey());
        for line in body.lines() {
            let pad = width - line.chars().count();
            println!(
                "{} {line}{} {}",
                "│".dark_grey(),
                " ".repeat(pad),
                "│".dark_grey()
            );
        }
        println!("{}", format!("└{}┘", "─".repeat(width + 2)).dark_grey());
    }

    fn notice(&self, text: &str) {
        println!("{} {text}", "[Info]".green());
    }

    fn error(&self, text: &str) {
        println!("{} {text}", "[Error]".red());
    }
}
