//! Text output for `--list`, `--info` and `--preview`.

use std::fmt::{self, Display, Formatter};

use fontmerger_font_merger::{
    Config, Font, NAME_ID_FAMILY, NAME_ID_FULL_NAME, NAME_ID_SUBFAMILY, NameEntry,
};

/// One line per configured extension font.
pub fn available_fonts(config: &Config) -> Vec<String> {
    let mut lines = vec![format!("{:-^80}", " Available Fonts ")];
    for ctx in config.contexts() {
        lines.push(format!("{:>16}: {}", ctx.id, ctx.name));
        if !ctx.description.is_empty() {
            lines.push(format!("{:>20} {}", "-", ctx.description));
        }
    }
    lines
}

/// Attributes of a base font shown by `--info`.
#[derive(Debug, Clone)]
pub struct FontSummary {
    pub postscript_name: String,
    pub family: String,
    pub full_name: String,
    pub subfamily: String,
    pub units_per_em: u16,
    pub ascent: i16,
    pub descent: i16,
    pub num_glyphs: usize,
    pub num_encoded: usize,
    pub copyright: String,
    pub names: Vec<NameEntry>,
}

impl From<&Font> for FontSummary {
    fn from(font: &Font) -> Self {
        let name = |id| font.name(id).unwrap_or_default().to_string();
        let metrics = font.metrics();
        Self {
            postscript_name: font.postscript_name().unwrap_or_default().to_string(),
            family: name(NAME_ID_FAMILY),
            full_name: name(NAME_ID_FULL_NAME),
            subfamily: name(NAME_ID_SUBFAMILY),
            units_per_em: metrics.units_per_em,
            ascent: metrics.ascent,
            descent: metrics.descent,
            num_glyphs: font.num_glyphs(),
            num_encoded: font.num_encoded(),
            copyright: font.copyright().unwrap_or_default().to_string(),
            names: font.names().to_vec(),
        }
    }
}

impl Display for FontSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:-^80}:", " Font Details: ")?;
        writeln!(f, "{:>32}: {}", "fontname", self.postscript_name)?;
        writeln!(f, "{:>32}: {}", "familyname", self.family)?;
        writeln!(f, "{:>32}: {}", "fullname", self.full_name)?;
        writeln!(f, "{:>32}: {}", "subfamily", self.subfamily)?;
        writeln!(f, "{:>32}: {}", "em", self.units_per_em)?;
        writeln!(f, "{:>32}: {}", "ascent", self.ascent)?;
        writeln!(f, "{:>32}: {}", "descent", self.descent)?;
        writeln!(f, "{:>32}: {}", "glyphs", self.num_glyphs)?;
        writeln!(f, "{:>32}: {}", "encoded", self.num_encoded)?;
        writeln!(f, "{:>32}: {}", "copyright", self.copyright.replace('\n', " / "))?;
        for entry in &self.names {
            let key = format!("{}/{}/{:#06x}", entry.platform_id, entry.encoding_id, entry.language_id);
            writeln!(f, "{key:>32}: {} = {}", entry.name_id, entry.value)?;
        }
        Ok(())
    }
}
