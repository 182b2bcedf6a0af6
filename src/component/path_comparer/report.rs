use super::comparison::{Comparison, FileDigest, RootSummary};
use crate::tools::DiffResult;
use console::Style;
use rust_i18n::t;
use std::io::{self, Write};

/// 輸出用的顏色組合，由呼叫端建立後傳入 `Reporter`
#[derive(Debug, Clone)]
pub struct Palette {
    pub same: Style,
    pub differ: Style,
    pub heading: Style,
    pub detail: Style,
}

impl Palette {
    #[must_use]
    pub fn colored() -> Self {
        Self {
            same: Style::new().green().bold(),
            differ: Style::new().red().bold(),
            heading: Style::new().cyan(),
            detail: Style::new().yellow(),
        }
    }

    #[must_use]
    pub fn plain() -> Self {
        Self {
            same: Style::new(),
            differ: Style::new(),
            heading: Style::new(),
            detail: Style::new(),
        }
    }

    #[must_use]
    pub fn from_flag(color: bool) -> Self {
        if color { Self::colored() } else { Self::plain() }
    }
}

pub struct Reporter<W: Write> {
    out: W,
    palette: Palette,
}

impl<W: Write> Reporter<W> {
    pub const fn new(out: W, palette: Palette) -> Self {
        Self { out, palette }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn report(&mut self, comparison: &Comparison) -> io::Result<()> {
        match comparison {
            Comparison::Files { first, second, .. } => self.report_files(first, second),
            Comparison::Directories {
                first,
                second,
                diff,
                ..
            } => self.report_directories(first, second, diff),
        }
    }

    /// 以 JSON 輸出比較結果
    pub fn report_json(&mut self, comparison: &Comparison) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, comparison)?;
        writeln!(self.out)
    }

    fn report_files(&mut self, first: &FileDigest, second: &FileDigest) -> io::Result<()> {
        if first.sha256 == second.sha256 {
            writeln!(
                self.out,
                "\n{}",
                self.palette.same.apply_to(t!("compare.file_identical"))
            )?;
            writeln!(self.out, "\nSHA-256: {}", first.sha256)?;
            return Ok(());
        }

        writeln!(
            self.out,
            "\n{}",
            self.palette.differ.apply_to(t!("compare.file_different"))
        )?;
        for digest in [first, second] {
            writeln!(
                self.out,
                "\n{}",
                t!("compare.file_label", path = digest.path)
            )?;
            writeln!(
                self.out,
                "  └─ {}",
                self.palette.detail.apply_to(format!("SHA-256: {}", digest.sha256))
            )?;
        }
        Ok(())
    }

    fn report_directories(
        &mut self,
        first: &RootSummary,
        second: &RootSummary,
        diff: &DiffResult,
    ) -> io::Result<()> {
        for summary in [first, second] {
            writeln!(
                self.out,
                "{}",
                t!("compare.file_count", path = summary.path, count = summary.files)
            )?;
        }

        if diff.is_identical() {
            writeln!(
                self.out,
                "\n{}",
                self.palette.same.apply_to(t!("compare.identical"))
            )?;
            return Ok(());
        }

        writeln!(
            self.out,
            "\n{}",
            self.palette.differ.apply_to(t!("compare.different"))
        )?;

        self.write_section(&t!("compare.modified"), &diff.modified)?;
        self.write_section(
            &t!("compare.only_in", path = first.path),
            &diff.only_in_first,
        )?;
        self.write_section(
            &t!("compare.only_in", path = second.path),
            &diff.only_in_second,
        )?;
        Ok(())
    }

    fn write_section(&mut self, title: &str, paths: &[String]) -> io::Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        writeln!(
            self.out,
            "\n{}",
            self.palette
                .heading
                .apply_to(format!("{title} ({})", paths.len()))
        )?;
        for path in paths {
            writeln!(self.out, "{path}")?;
        }
        Ok(())
    }
}
