//! Generic font table manipulation utilities.

use anyhow::Result;
use read_fonts::{FontRef, ReadError, TableProvider, types::Tag};
use write_fonts::{
    FontBuilder,
    tables::name::{Name, NameRecord},
};

/// Windows platform, Unicode BMP encoding, US English.
pub const WINDOWS_ENGLISH: (u16, u16, u16) = (3, 1, 0x409);

/// Rewrite font data by applying a transformation function.
///
/// Copies every table from the source font except the ones listed in `dropped`,
/// then calls `f` to replace or add tables. Tables added by `f` override the
/// raw copies.
pub fn rewrite_font(
    data: &[u8],
    dropped: &[Tag],
    f: impl FnOnce(&FontRef, &mut FontBuilder) -> Result<()>,
) -> Result<Vec<u8>> {
    let font = FontRef::new(data)?;
    let mut builder = FontBuilder::new();

    for record in font.table_directory.table_records() {
        let tag = record.tag();
        if dropped.contains(&tag) {
            continue;
        }
        if let Some(table_data) = font.table_data(tag) {
            builder.add_raw(tag, table_data);
        }
    }

    f(&font, &mut builder)?;
    Ok(builder.build())
}

/// A decoded `name` table record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub value: String,
}

impl NameEntry {
    /// A Windows / Unicode BMP / US English record.
    pub fn windows_english(name_id: u16, value: impl Into<String>) -> Self {
        let (platform_id, encoding_id, language_id) = WINDOWS_ENGLISH;
        Self { platform_id, encoding_id, language_id, name_id, value: value.into() }
    }

    fn is_windows_english(&self) -> bool {
        (self.platform_id, self.encoding_id, self.language_id) == WINDOWS_ENGLISH
    }
}

/// Decode every `name` record of a font.
///
/// Records whose string cannot be decoded are skipped. A font without a
/// `name` table yields an empty list.
pub fn read_name_entries(font: &FontRef) -> Result<Vec<NameEntry>> {
    let name = match font.name() {
        Ok(name) => name,
        Err(ReadError::TableIsMissing(_)) => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut entries = Vec::new();
    for record in name.name_record() {
        let value = match record.string(name.string_data()) {
            Ok(s) => s.chars().collect::<String>(),
            Err(_) => continue,
        };
        entries.push(NameEntry {
            platform_id: record.platform_id(),
            encoding_id: record.encoding_id(),
            language_id: record.language_id(),
            name_id: record.name_id().to_u16(),
            value,
        });
    }
    Ok(entries)
}

/// Look up a name string, preferring the Windows English record.
pub fn find_name(entries: &[NameEntry], name_id: u16) -> Option<&str> {
    let mut candidates = entries.iter().filter(|e| e.name_id == name_id);
    let first = candidates.clone().next()?;
    let preferred = candidates
        .clone()
        .find(|e| e.is_windows_english())
        .or_else(|| candidates.find(|e| e.platform_id == 3))
        .unwrap_or(first);
    Some(preferred.value.as_str())
}

/// Replace the string of every record with `name_id`.
///
/// When the font has no such record a Windows English one is added.
pub fn set_name(entries: &mut Vec<NameEntry>, name_id: u16, value: &str) {
    let mut found = false;
    for entry in entries.iter_mut().filter(|e| e.name_id == name_id) {
        entry.value = value.to_string();
        found = true;
    }
    if !found {
        entries.push(NameEntry::windows_english(name_id, value));
    }
}

/// Build a `name` table from decoded records, sorted as the format requires.
pub fn build_name_table(entries: &[NameEntry]) -> Name {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| (e.platform_id, e.encoding_id, e.language_id, e.name_id));
    sorted.dedup_by_key(|e| (e.platform_id, e.encoding_id, e.language_id, e.name_id));

    let records = sorted
        .into_iter()
        .map(|e| {
            NameRecord::new(
                e.platform_id,
                e.encoding_id,
                e.language_id,
                read_fonts::types::NameId::new(e.name_id),
                e.value.into(),
            )
        })
        .collect();
    Name::new(records)
}
