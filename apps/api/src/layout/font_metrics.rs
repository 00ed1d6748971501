//! Static font-metric tables for the PDF base-14 families used by the exporter.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe AFM files for Helvetica, Times and Courier (regular and bold).
//! Measuring against the same tables the viewer uses keeps wrapped lines from
//! overrunning the right margin.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Points to millimetres.
pub const PT_TO_MM: f32 = 0.352_778;

// ────────────────────────────────────────────────────────────────────────────
// Font family / weight
// ────────────────────────────────────────────────────────────────────────────

/// Font families available to the exporter. Requests naming a common desktop
/// font are mapped onto the closest base-14 family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Sans-serif.
    #[default]
    #[serde(
        alias = "Helvetica",
        alias = "calibri",
        alias = "Calibri",
        alias = "arial",
        alias = "Arial",
        alias = "sans-serif"
    )]
    Helvetica,
    /// Serif.
    #[serde(
        alias = "Times",
        alias = "times new roman",
        alias = "Times New Roman",
        alias = "georgia",
        alias = "Georgia",
        alias = "serif"
    )]
    Times,
    /// Monospace.
    #[serde(
        alias = "Courier",
        alias = "courier new",
        alias = "Courier New",
        alias = "monospace"
    )]
    Courier,
}

impl FontFamily {
    /// CSS font stack used by the flow document for this family.
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Calibri, 'Segoe UI', Helvetica, Arial, sans-serif",
            FontFamily::Times => "'Times New Roman', Times, Georgia, serif",
            FontFamily::Courier => "'Courier New', Courier, monospace",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one family/weight pair.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub font: FontFamily,
    pub weight: FontWeight,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters.
    pub average_char_width: f32,
    pub space_width: f32,
    /// Width of the "•" list marker, which sits outside the ASCII range.
    pub bullet_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Measures the rendered width of a string in millimetres at `size_pt`.
    pub fn width_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt * PT_TO_MM
    }

    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if c == '•' {
            self.bullet_width
        } else if c.is_whitespace() {
            self.space_width
        } else {
            self.average_char_width
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Helvetica,
    weight: FontWeight::Normal,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
    bullet_width: 0.350,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Helvetica,
    weight: FontWeight::Bold,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    space_width: 0.278,
    bullet_width: 0.350,
};

static TIMES_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Times,
    weight: FontWeight::Normal,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.500,
    space_width: 0.250,
    bullet_width: 0.350,
};

static TIMES_BOLD_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Times,
    weight: FontWeight::Bold,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.555, 0.500, 0.500, 1.000, 0.833, 0.278, 0.333, 0.333, 0.500, 0.570, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.570, 0.570, 0.570, 0.500, 0.930,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.778, 0.389, 0.500, 0.778, 0.667, 0.944,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.611, 0.778, 0.722, 0.556, 0.667, 0.722, 0.722, 1.000, 0.722, 0.722, 0.667,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.581, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.500, 0.556, 0.444, 0.556, 0.444, 0.333, 0.500, 0.556, 0.278, 0.333, 0.556, 0.278, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.500, 0.556, 0.556, 0.444, 0.389, 0.333, 0.556, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.394, 0.220, 0.394, 0.520,
    ],
    average_char_width: 0.556,
    space_width: 0.250,
    bullet_width: 0.350,
};

/// Courier is fixed-pitch: every glyph is 0.6em in both weights.
static COURIER_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Courier,
    weight: FontWeight::Normal,
    widths: [0.600; 95],
    average_char_width: 0.600,
    space_width: 0.600,
    bullet_width: 0.600,
};

static COURIER_BOLD_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Courier,
    weight: FontWeight::Bold,
    widths: [0.600; 95],
    average_char_width: 0.600,
    space_width: 0.600,
    bullet_width: 0.600,
};

/// Returns the static metric table for a family/weight pair.
pub fn get_metrics(font: FontFamily, weight: FontWeight) -> &'static FontMetricTable {
    match (font, weight) {
        (FontFamily::Helvetica, FontWeight::Normal) => &HELVETICA_TABLE,
        (FontFamily::Helvetica, FontWeight::Bold) => &HELVETICA_BOLD_TABLE,
        (FontFamily::Times, FontWeight::Normal) => &TIMES_TABLE,
        (FontFamily::Times, FontWeight::Bold) => &TIMES_BOLD_TABLE,
        (FontFamily::Courier, FontWeight::Normal) => &COURIER_TABLE,
        (FontFamily::Courier, FontWeight::Bold) => &COURIER_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontFamily::Helvetica, FontWeight::Normal);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFamily::Helvetica, FontWeight::Normal);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFamily::Helvetica, FontWeight::Normal);
        let width = metrics.measure_str("é");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_bullet_marker_has_own_width() {
        let metrics = get_metrics(FontFamily::Times, FontWeight::Normal);
        assert!((metrics.measure_str("•") - 0.350).abs() < 1e-4);
    }

    #[test]
    fn test_bold_wider_than_regular() {
        let text = "Senior Software Engineer";
        let regular = get_metrics(FontFamily::Helvetica, FontWeight::Normal);
        let bold = get_metrics(FontFamily::Helvetica, FontWeight::Bold);
        assert!(bold.measure_str(text) > regular.measure_str(text));
    }

    #[test]
    fn test_courier_is_fixed_pitch() {
        let metrics = get_metrics(FontFamily::Courier, FontWeight::Bold);
        assert!((metrics.measure_str("iiii") - metrics.measure_str("WWWW")).abs() < 1e-6);
    }

    #[test]
    fn test_width_mm_scales_with_size() {
        let metrics = get_metrics(FontFamily::Helvetica, FontWeight::Normal);
        let at_10 = metrics.width_mm("Resume", 10.0);
        let at_20 = metrics.width_mm("Resume", 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-4);
    }

    #[test]
    fn test_all_six_tables_accessible() {
        for font in [FontFamily::Helvetica, FontFamily::Times, FontFamily::Courier] {
            for weight in [FontWeight::Normal, FontWeight::Bold] {
                let table = get_metrics(font, weight);
                assert_eq!(table.font, font);
                assert_eq!(table.weight, weight);
            }
        }
    }
}
