//! Human-readable console report.
//!
//! Layout per scenario:
//! - header: `--- TEST <i>/<total> ---`, the request and the expected tool
//! - success: duration and answer summary
//! - failure: duration and `<Kind>: <truncated message>...`

use std::io::{self, Write};

use crate::outcome::{Outcome, OutcomeRecord};
use crate::runner::RunSummary;
use crate::scenario::Scenario;

const RULE_WIDTH: usize = 60;
const OPENING_TITLE: &str = "🤖 TOOL FONKSİYONEL VE PERFORMANS TESTİ BAŞLIYOR ⏱️";
const CLOSING_TITLE: &str = "TESTLER TAMAMLANDI. HATA ALAN TOOL'LARI KONTROL EDİN.";
const TRUNCATION_MARKER: &str = "...";

/// Writes report sections to an output stream as the run progresses.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn opening_banner(&mut self) -> io::Result<()> {
        let rule = rule();
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "{OPENING_TITLE}")?;
        writeln!(self.out, "{rule}")
    }

    /// Header block; `index` is zero-based and printed one-based.
    pub fn scenario_header(
        &mut self,
        index: usize,
        total: usize,
        scenario: &Scenario,
    ) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- TEST {}/{} ---", index + 1, total)?;
        writeln!(self.out, "❓ SORU: {}", scenario.request_text)?;
        writeln!(self.out, "🎯 BEKLENEN TOOL: {}", scenario.expected_capability)?;
        self.out.flush()
    }

    pub fn outcome(&mut self, record: &OutcomeRecord) -> io::Result<()> {
        let secs = record.duration_seconds();
        match &record.outcome {
            Outcome::Success { summary } => {
                writeln!(self.out, "✅ BAŞARILI. Süre: {secs:.2} saniye")?;
                writeln!(self.out, "🤖 Cevap Özeti: {summary}")?;
            }
            Outcome::Failure { kind, message } => {
                writeln!(self.out, "❌ HATA! Süre: {secs:.2} saniye")?;
                writeln!(self.out, "Hata Detayı: {kind}: {message}{TRUNCATION_MARKER}")?;
            }
        }
        self.out.flush()
    }

    pub fn closing_banner(&mut self, summary: &RunSummary) -> io::Result<()> {
        let rule = rule();
        writeln!(self.out, "{rule}")?;
        writeln!(
            self.out,
            "Toplam: {} | Başarılı: {} | Hatalı: {}",
            summary.total, summary.succeeded, summary.failed
        )?;
        writeln!(self.out, "{CLOSING_TITLE}")?;
        writeln!(self.out, "{rule}")?;
        self.out.flush()
    }
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}
