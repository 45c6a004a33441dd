//! Handles all user-facing output for the CLI.
//!
//! Text output is colorized when the sink supports it; `--json` output goes
//! through `serde_json` unchanged.

use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::corpus::CorpusStats;
use crate::index::FrameMatch;
use crate::model::{Frame, VerbClass};
use crate::syntax::Child;

/// Picks colored output only when stdout is a terminal.
pub fn stdout() -> StandardStream {
    let choice = if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Writes command results either as text or as pretty JSON.
pub struct Printer<W: WriteColor> {
    out: W,
    json: bool,
}

impl<W: WriteColor> Printer<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn stats(&mut self, stats: &CorpusStats) -> io::Result<()> {
        if self.json {
            return self.write_json(stats);
        }
        for (label, value) in [
            ("classes", stats.classes),
            ("members", stats.members),
            ("frames", stats.frames),
            ("index keys", stats.index_keys),
            ("index entries", stats.index_entries),
        ] {
            self.label(&format!("{label:>13}"))?;
            writeln!(self.out, " {value}")?;
        }
        Ok(())
    }

    pub fn class_ids<'a>(&mut self, ids: impl Iterator<Item = &'a str>) -> io::Result<()> {
        let ids: Vec<&str> = ids.collect();
        if self.json {
            return self.write_json(&ids);
        }
        for id in ids {
            writeln!(self.out, "{id}")?;
        }
        Ok(())
    }

    pub fn class(&mut self, class: &VerbClass) -> io::Result<()> {
        if self.json {
            return self.write_json(class);
        }
        self.heading(&class.id)?;

        self.label("members")?;
        writeln!(self.out)?;
        for (name, info) in &class.members {
            write!(self.out, "  {name}")?;
            if let Some(sense) = info.wordnet_sense() {
                write!(self.out, " [{sense}]")?;
            }
            writeln!(self.out)?;
        }

        self.label("roles")?;
        writeln!(self.out)?;
        for (role, restrictions) in &class.themroles {
            writeln!(self.out, "  {role} {}", render_children(restrictions))?;
        }

        self.label("frames")?;
        writeln!(self.out)?;
        for frame in class.frames.values() {
            self.frame(frame)?;
        }
        Ok(())
    }

    pub fn matches(&mut self, matches: &[FrameMatch]) -> io::Result<()> {
        if self.json {
            return self.write_json(&matches);
        }
        if matches.is_empty() {
            writeln!(self.out, "no matching frames")?;
            return Ok(());
        }
        for found in matches {
            self.heading(&found.class_id)?;
            self.frame(&found.frame)?;
        }
        Ok(())
    }

    // ============================================================================
    // PRIVATE HELPERS
    // ============================================================================

    fn frame(&mut self, frame: &Frame) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(self.out, "  {}", frame.primary_pattern)?;
        self.out.reset()?;
        if let Some(number) = frame.description_number() {
            write!(self.out, " ({number})")?;
        }
        writeln!(self.out)?;
        for example in frame.examples.iter().flatten() {
            writeln!(self.out, "    e.g. {example}")?;
        }
        writeln!(self.out, "    syntax    {}", render_children(&frame.syntax))?;
        writeln!(self.out, "    semantics {}", render_children(&frame.semantics))?;
        Ok(())
    }

    fn heading(&mut self, text: &str) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        writeln!(self.out, "{text}")?;
        self.out.reset()
    }

    fn label(&mut self, text: &str) -> io::Result<()> {
        self.out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(self.out, "{text}")?;
        self.out.reset()
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)
    }
}

fn render_children(children: &[Child]) -> String {
    children
        .iter()
        .map(Child::pretty)
        .collect::<Vec<_>>()
        .join(" ")
}
