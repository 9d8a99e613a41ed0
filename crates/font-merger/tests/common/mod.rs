//! Synthetic fonts for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use fontmerger_font_ops::{NameEntry, build_name_table};
use kurbo::{Rect, Shape};
use read_fonts::types::{GlyphId, Tag};
use write_fonts::{
    FontBuilder,
    tables::{
        cmap::Cmap,
        glyf::{GlyfLocaBuilder, Glyph, SimpleGlyph},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
        os2::Os2,
        post::Post,
        vhea::Vhea,
        vmtx::{self, Vmtx},
    },
};

pub struct TestGlyph {
    pub name: String,
    pub codepoint: Option<u32>,
    pub rect: Option<Rect>,
    pub advance: u16,
}

/// Builder for a small TrueType font whose glyphs are rectangles.
pub struct TestFont {
    pub units_per_em: u16,
    pub ascent: i16,
    pub descent: i16,
    pub glyphs: Vec<TestGlyph>,
    pub names: Vec<NameEntry>,
    pub vertical: bool,
    pub raw_tables: Vec<(Tag, Vec<u8>)>,
}

impl TestFont {
    pub fn new(units_per_em: u16, ascent: i16, descent: i16) -> Self {
        Self {
            units_per_em,
            ascent,
            descent,
            glyphs: vec![TestGlyph {
                name: ".notdef".to_string(),
                codepoint: None,
                rect: None,
                advance: units_per_em / 2,
            }],
            names: Vec::new(),
            vertical: false,
            raw_tables: Vec::new(),
        }
    }

    pub fn glyph(mut self, name: &str, codepoint: u32, rect: Rect, advance: u16) -> Self {
        self.glyphs.push(TestGlyph {
            name: name.to_string(),
            codepoint: Some(codepoint),
            rect: Some(rect),
            advance,
        });
        self
    }

    pub fn blank(mut self, name: &str, codepoint: u32, advance: u16) -> Self {
        self.glyphs.push(TestGlyph {
            name: name.to_string(),
            codepoint: Some(codepoint),
            rect: None,
            advance,
        });
        self
    }

    pub fn name(mut self, name_id: u16, value: &str) -> Self {
        self.names.push(NameEntry::windows_english(name_id, value));
        self
    }

    pub fn family(self, family: &str, subfamily: &str, postscript: &str) -> Self {
        let full = format!("{family} {subfamily}");
        self.name(1, family).name(2, subfamily).name(4, &full).name(6, postscript)
    }

    pub fn copyright(self, text: &str) -> Self {
        self.name(0, text)
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }

    pub fn raw_table(mut self, tag: &[u8; 4], data: Vec<u8>) -> Self {
        self.raw_tables.push((Tag::new(tag), data));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let num_glyphs = self.glyphs.len() as u16;

        let mut glyf_builder = GlyfLocaBuilder::new();
        let mut side_bearings = Vec::new();
        for glyph in &self.glyphs {
            match glyph.rect {
                Some(rect) => {
                    let simple = SimpleGlyph::from_bezpath(&rect.to_path(0.1)).expect("outline");
                    side_bearings.push((simple.bbox.x_min, self.ascent - simple.bbox.y_max));
                    glyf_builder.add_glyph(&Glyph::Simple(simple)).expect("glyf");
                }
                None => {
                    side_bearings.push((0, 0));
                    glyf_builder.add_glyph(&Glyph::Empty).expect("glyf");
                }
            }
        }
        let (glyf, loca, loca_format) = glyf_builder.build();

        let mut mappings: Vec<(char, GlyphId)> = self
            .glyphs
            .iter()
            .enumerate()
            .filter_map(|(gid, g)| {
                let ch = char::from_u32(g.codepoint?)?;
                Some((ch, GlyphId::new(gid as u32)))
            })
            .collect();
        mappings.sort();
        let cmap = Cmap::from_mappings(mappings).expect("cmap");

        let head = Head {
            font_revision: font_types::Fixed::from_f64(1.0),
            checksum_adjustment: 0,
            magic_number: 0x5F0F3CF5,
            flags: write_fonts::tables::head::Flags::empty(),
            units_per_em: self.units_per_em,
            created: font_types::LongDateTime::new(0),
            modified: font_types::LongDateTime::new(0),
            x_min: 0,
            y_min: self.descent,
            x_max: self.units_per_em as i16,
            y_max: self.ascent,
            mac_style: write_fonts::tables::head::MacStyle::empty(),
            lowest_rec_ppem: 8,
            font_direction_hint: 2,
            index_to_loc_format: match loca_format {
                write_fonts::tables::loca::LocaFormat::Short => 0,
                write_fonts::tables::loca::LocaFormat::Long => 1,
            },
        };

        let hhea = Hhea {
            ascender: font_types::FWord::new(self.ascent),
            descender: font_types::FWord::new(self.descent),
            line_gap: font_types::FWord::new(0),
            advance_width_max: font_types::UfWord::new(
                self.glyphs.iter().map(|g| g.advance).max().unwrap_or(0),
            ),
            min_left_side_bearing: font_types::FWord::new(0),
            min_right_side_bearing: font_types::FWord::new(0),
            x_max_extent: font_types::FWord::new(self.units_per_em as i16),
            caret_slope_rise: 1,
            caret_slope_run: 0,
            caret_offset: 0,
            number_of_h_metrics: num_glyphs,
        };

        let hmtx = Hmtx {
            h_metrics: self
                .glyphs
                .iter()
                .zip(&side_bearings)
                .map(|(g, (lsb, _))| LongMetric { advance: g.advance, side_bearing: *lsb })
                .collect(),
            left_side_bearings: vec![],
        };

        let maxp = Maxp {
            num_glyphs,
            max_points: Some(4),
            max_contours: Some(1),
            max_composite_points: Some(0),
            max_composite_contours: Some(0),
            max_zones: Some(1),
            max_twilight_points: Some(0),
            max_storage: Some(0),
            max_function_defs: Some(0),
            max_instruction_defs: Some(0),
            max_stack_elements: Some(0),
            max_size_of_instructions: Some(0),
            max_component_elements: Some(0),
            max_component_depth: Some(0),
        };

        let post = Post::new_v2(self.glyphs.iter().map(|g| g.name.as_str()));

        let mut builder = FontBuilder::new();
        builder.add_table(&head).unwrap();
        builder.add_table(&hhea).unwrap();
        builder.add_table(&hmtx).unwrap();
        builder.add_table(&maxp).unwrap();
        builder.add_table(&cmap).unwrap();
        builder.add_table(&post).unwrap();
        builder.add_table(&glyf).unwrap();
        builder.add_table(&loca).unwrap();
        builder.add_table(&make_os2(self.ascent, self.descent)).unwrap();
        if !self.names.is_empty() {
            builder.add_table(&build_name_table(&self.names)).unwrap();
        }

        if self.vertical {
            let vhea = Vhea {
                ascender: font_types::FWord::new(self.units_per_em as i16 / 2),
                descender: font_types::FWord::new(-(self.units_per_em as i16 / 2)),
                line_gap: font_types::FWord::new(0),
                advance_height_max: font_types::UfWord::new(self.units_per_em),
                min_top_side_bearing: font_types::FWord::new(0),
                min_bottom_side_bearing: font_types::FWord::new(0),
                y_max_extent: font_types::FWord::new(self.units_per_em as i16),
                caret_slope_rise: 0,
                caret_slope_run: 1,
                caret_offset: 0,
                number_of_long_ver_metrics: num_glyphs,
            };
            let vmtx = Vmtx {
                v_metrics: side_bearings
                    .iter()
                    .map(|(_, tsb)| vmtx::LongMetric {
                        advance: self.units_per_em,
                        side_bearing: *tsb,
                    })
                    .collect(),
                top_side_bearings: vec![],
            };
            builder.add_table(&vhea).unwrap();
            builder.add_table(&vmtx).unwrap();
        }

        for (tag, data) in &self.raw_tables {
            builder.add_raw(*tag, data.clone());
        }

        builder.build()
    }

    pub fn write(&self, dir: &Path, filename: &str) -> PathBuf {
        let path = dir.join(filename);
        std::fs::write(&path, self.build()).expect("write font");
        path
    }
}

fn make_os2(ascent: i16, descent: i16) -> Os2 {
    Os2 {
        x_avg_char_width: 500,
        us_weight_class: 400,
        us_width_class: 5,
        fs_type: 0,
        y_subscript_x_size: 650,
        y_subscript_y_size: 600,
        y_subscript_x_offset: 0,
        y_subscript_y_offset: 75,
        y_superscript_x_size: 650,
        y_superscript_y_size: 600,
        y_superscript_x_offset: 0,
        y_superscript_y_offset: 350,
        y_strikeout_size: 50,
        y_strikeout_position: 300,
        s_family_class: 0,
        panose_10: [0; 10],
        ul_unicode_range_1: 0,
        ul_unicode_range_2: 0,
        ul_unicode_range_3: 0,
        ul_unicode_range_4: 0,
        ach_vend_id: font_types::Tag::new(b"NONE"),
        fs_selection: write_fonts::tables::os2::SelectionFlags::REGULAR,
        us_first_char_index: 0x20,
        us_last_char_index: 0x7E,
        s_typo_ascender: ascent,
        s_typo_descender: descent,
        s_typo_line_gap: 0,
        us_win_ascent: ascent as u16,
        us_win_descent: descent.unsigned_abs(),
        ul_code_page_range_1: Some(0),
        ul_code_page_range_2: Some(0),
        sx_height: Some(500),
        s_cap_height: Some(700),
        us_default_char: Some(0),
        us_break_char: Some(0x20),
        us_max_context: Some(0),
        us_lower_optical_point_size: None,
        us_upper_optical_point_size: None,
    }
}

/// A CFF table whose only top DICT declares a Registry-Ordering-Supplement.
pub fn cid_keyed_cff() -> Vec<u8> {
    let top_dict = [0xF8, 0x1B, 0xF8, 0x1C, 0x8B, 0x0C, 0x1E];
    let mut data = vec![1, 0, 4, 1];
    // Name INDEX
    data.extend([0, 1, 1, 1, 2, b'A']);
    // Top DICT INDEX
    data.extend([0, 1, 1, 1, 1 + top_dict.len() as u8]);
    data.extend(top_dict);
    // String INDEX
    data.extend([0, 1, 1, 1, 2, b'x']);
    // Global Subr INDEX
    data.extend([0, 1, 1, 1, 2, 0x0B]);
    data
}

/// An `fvar` table with no axes.
pub fn empty_fvar() -> Vec<u8> {
    vec![0, 1, 0, 0, 0, 16, 0, 2, 0, 0, 0, 20, 0, 0, 0, 4]
}

/// A 1000-unit base font: half-width ASCII, one full-width form, `.notdef`.
pub fn base_font() -> TestFont {
    TestFont::new(1000, 800, -200)
        .family("Test Sans", "Bold", "TestSans-Bold")
        .copyright("Copyright Base Foundry")
        .blank("space", 0x20, 250)
        .glyph("numbersign", 0x23, Rect::new(50.0, 0.0, 450.0, 700.0), 500)
        .glyph("A", 0x41, Rect::new(20.0, 0.0, 480.0, 700.0), 500)
        .glyph("B", 0x42, Rect::new(40.0, 0.0, 460.0, 700.0), 500)
        .glyph("uniFF01", 0xFF01, Rect::new(50.0, -100.0, 950.0, 750.0), 1000)
}

/// A 2048-unit icon font with a private-use glyph and three letters.
pub fn icon_font() -> TestFont {
    TestFont::new(2048, 1638, -410)
        .copyright("Copyright Icon Project")
        .glyph("wide", 0xE000, Rect::new(0.0, -410.0, 2048.0, 1638.0), 2048)
        .glyph("narrow", 0xE001, Rect::new(100.0, 0.0, 900.0, 1500.0), 1000)
        .glyph("tall", 0xE002, Rect::new(0.0, 0.0, 1000.0, 2000.0), 1000)
        .glyph("A", 0x41, Rect::new(0.0, 0.0, 1800.0, 1400.0), 2048)
        .glyph("B", 0x42, Rect::new(0.0, 0.0, 1800.0, 1400.0), 2048)
        .glyph("C", 0x43, Rect::new(0.0, 0.0, 800.0, 1400.0), 1000)
        .glyph("D", 0x44, Rect::new(0.0, 0.0, 800.0, 1400.0), 1000)
}
