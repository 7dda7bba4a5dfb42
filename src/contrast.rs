// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Terminal color contrast probing.
//!
//! Sweep the 24-bit color cube for colors that keep a minimum luminance
//! contrast against a fixed palette of foreground and background colors.
//! Handy for finding prompt or accent colors that stay readable against an
//! existing terminal theme, which is what the default solarized-dark
//! palette is for.
//!
//! # Contrast Model
//!
//! Luminance is a gamma-corrected (gamma 2.2) weighted sum of the RGB
//! channels using Rec. 709 weights, left unnormalized since only ratios
//! matter here. The contrast of two luminances is their ratio folded to be
//! at least 1.0, or 0.0 if either luminance is zero. A candidate color
//! passes when its _minimum_ contrast, taken as a background against every
//! palette foreground and as a foreground against every palette background,
//! exceeds a threshold.
//!
//! Correlation between this contrast figure and actual readability is meh.
//! The swatch output exists so your eyes get the final vote.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use tracing::debug;

/// Sample text rendered inside every swatch.
const SAMPLE_TEXT: &str = "this is the     sample text";

/// A 24-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Construct color from packed 24-bit hex value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Pack color back into a 24-bit hex value.
    pub fn to_hex(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Gamma-corrected relative luminance.
    ///
    /// Rec. 709 channel weights over a gamma 2.2 power curve. Channels are
    /// not normalized to [0, 1] first; only luminance ratios are ever
    /// consumed, so the shared scale factor cancels out.
    pub fn luminance(self) -> f64 {
        const GAMMA: f64 = 2.2;
        0.2126 * f64::from(self.r).powf(GAMMA)
            + 0.7152 * f64::from(self.g).powf(GAMMA)
            + 0.0722 * f64::from(self.b).powf(GAMMA)
    }
}

impl FromStr for Rgb {
    type Err = ContrastError;

    /// Parse hex color notation, e.g. `0x839496`, `#839496`, or `839496`.
    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let digits = data
            .strip_prefix("0x")
            .or_else(|| data.strip_prefix("0X"))
            .or_else(|| data.strip_prefix('#'))
            .unwrap_or(data);

        let hex = u32::from_str_radix(digits, 16).map_err(|err| ContrastError::ParseColor {
            source: err,
            notation: data.to_string(),
        })?;

        if hex > 0xFFFFFF {
            return Err(ContrastError::ColorOutOfRange { hex });
        }

        Ok(Self::from_hex(hex))
    }
}

impl Display for Rgb {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        write!(fmt, "0x{:06x}", self.to_hex())
    }
}

/// Contrast between two luminances.
///
/// Ratio of the two values folded to be at least 1.0. Zero luminance on
/// either side yields 0.0, i.e. no measurable contrast.
pub fn contrast(lum1: f64, lum2: f64) -> f64 {
    if lum1 == 0.0 || lum2 == 0.0 {
        return 0.0;
    }

    let ratio = lum1 / lum2;
    if ratio < 1.0 {
        1.0 / ratio
    } else {
        ratio
    }
}

/// A candidate color that survived a palette sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// The surviving color.
    pub color: Rgb,

    /// Minimum contrast against the whole palette.
    pub min_contrast: f64,
}

/// Palette of theme colors to probe candidates against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Foreground colors candidates must hold up under.
    pub foregrounds: Vec<Rgb>,

    /// Background colors candidates must hold up over.
    pub backgrounds: Vec<Rgb>,
}

impl Palette {
    /// Construct new palette from foreground and background colors.
    pub fn new(
        foregrounds: impl IntoIterator<Item = Rgb>,
        backgrounds: impl IntoIterator<Item = Rgb>,
    ) -> Self {
        Self {
            foregrounds: foregrounds.into_iter().collect(),
            backgrounds: backgrounds.into_iter().collect(),
        }
    }

    /// The solarized-dark palette this author's terminal runs.
    pub fn solarized_dark() -> Self {
        Self::new(
            [
                Rgb::from_hex(0x839496),
                Rgb::from_hex(0x657b83),
                Rgb::from_hex(0xeee8d5),
            ],
            [Rgb::from_hex(0x002b36)],
        )
    }

    /// Minimum contrast of candidate against every palette color.
    ///
    /// The candidate plays background to each palette foreground, and
    /// foreground to each palette background. The smallest contrast across
    /// all pairings wins.
    pub fn min_contrast(&self, candidate: Rgb) -> f64 {
        let lum = candidate.luminance();
        let mut min = f64::INFINITY;

        for fore in &self.foregrounds {
            min = min.min(contrast(fore.luminance(), lum));
        }

        for back in &self.backgrounds {
            min = min.min(contrast(lum, back.luminance()));
        }

        if min.is_infinite() {
            0.0
        } else {
            min
        }
    }

    /// Sweep the color cube for candidates above a contrast threshold.
    ///
    /// Walks `0..=0xFFFFFF` in strides of `0xFFFFFF / steps`, keeping every
    /// sampled color whose minimum palette contrast exceeds the threshold.
    pub fn sweep(&self, steps: u32, threshold: f64) -> Vec<Candidate> {
        let stride = (0xFFFFFF / steps.max(1)).max(1);
        let mut candidates = Vec::new();

        let mut hex = 0u32;
        while hex < 0xFFFFFF {
            let color = Rgb::from_hex(hex);
            let min_contrast = self.min_contrast(color);
            if min_contrast > threshold {
                candidates.push(Candidate {
                    color,
                    min_contrast,
                });
            }
            hex += stride;
        }

        debug!(
            "swept {} samples, {} candidates above {threshold}",
            steps,
            candidates.len()
        );

        candidates
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::solarized_dark()
    }
}

/// ANSI truecolor swatch of sample text.
///
/// Renders the sample text with target foreground over target background
/// using 24-bit SGR escape sequences, reset at the end.
pub fn swatch(fore: Rgb, back: Rgb) -> String {
    format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{SAMPLE_TEXT}\x1b[0m",
        fore.r, fore.g, fore.b, back.r, back.g, back.b
    )
}

/// Contrast probing error types.
#[derive(Debug, thiserror::Error)]
pub enum ContrastError {
    /// Color notation cannot be parsed as hex digits.
    #[error("failed to parse color notation {notation:?}")]
    ParseColor {
        #[source]
        source: std::num::ParseIntError,
        notation: String,
    },

    /// Color value does not fit in 24 bits.
    #[error("color 0x{hex:x} does not fit in 24 bits")]
    ColorOutOfRange { hex: u32 },
}

/// Friendly result alias :3
pub type Result<T, E = ContrastError> = std::result::Result<T, E>;
