//! Visual roles shared by the terminal view and the PDF layout.
//!
//! Both front ends look colors, weights and sizes up here so they cannot
//! drift apart.

use serde::Serialize;

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to 0.0 ..= 1.0.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

pub const WHITE: Rgb = Rgb(255, 255, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleRole {
    HeaderBand,
    HeaderTitle,
    HeaderSubtitle,
    HeaderMeta,
    Intro,
    SectionBar,
    QuestionLabel,
    AnswerBlock,
    AnswerText,
    Unanswered,
    Footer,
    ProgressDone,
    ProgressCurrent,
    ProgressUpcoming,
    Tip,
    Success,
    Error,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoleStyle {
    /// Foreground / text color.
    pub color: Rgb,
    /// Fill behind the text, if any. For `AnswerBlock` this is the tint and
    /// `color` is the left accent.
    pub background: Option<Rgb>,
    pub weight: FontWeight,
    /// Font size in points (PDF only).
    pub size: f32,
}

const fn role(color: Rgb, background: Option<Rgb>, weight: FontWeight, size: f32) -> RoleStyle {
    RoleStyle {
        color,
        background,
        weight,
        size,
    }
}

const BLUE_600: Rgb = Rgb(37, 99, 235);
const BLUE_300: Rgb = Rgb(147, 197, 253);
const BLUE_50: Rgb = Rgb(239, 246, 255);
const SLATE_800: Rgb = Rgb(30, 41, 59);
const SLATE_700: Rgb = Rgb(51, 65, 85);
const SLATE_600: Rgb = Rgb(71, 85, 105);
const SLATE_400: Rgb = Rgb(148, 163, 184);
const SLATE_300: Rgb = Rgb(203, 213, 225);
const AMBER_800: Rgb = Rgb(146, 64, 14);
const AMBER_50: Rgb = Rgb(255, 251, 235);
const GREEN_600: Rgb = Rgb(22, 163, 74);
const RED_600: Rgb = Rgb(220, 38, 38);
const HEADER_NAVY: Rgb = Rgb(15, 40, 84);
const SUBTITLE_SKY: Rgb = Rgb(191, 219, 254);

static STYLE_TABLE: &[(StyleRole, RoleStyle)] = &[
    (StyleRole::HeaderBand, role(WHITE, Some(HEADER_NAVY), FontWeight::Regular, 0.0)),
    (StyleRole::HeaderTitle, role(WHITE, Some(HEADER_NAVY), FontWeight::Bold, 20.0)),
    (StyleRole::HeaderSubtitle, role(SUBTITLE_SKY, Some(HEADER_NAVY), FontWeight::Regular, 11.0)),
    (StyleRole::HeaderMeta, role(WHITE, Some(HEADER_NAVY), FontWeight::Regular, 10.0)),
    (StyleRole::Intro, role(SLATE_600, None, FontWeight::Italic, 10.0)),
    (StyleRole::SectionBar, role(WHITE, Some(BLUE_600), FontWeight::Bold, 12.0)),
    (StyleRole::QuestionLabel, role(SLATE_800, None, FontWeight::Bold, 10.0)),
    (StyleRole::AnswerBlock, role(BLUE_600, Some(BLUE_50), FontWeight::Regular, 10.0)),
    (StyleRole::AnswerText, role(SLATE_700, None, FontWeight::Regular, 10.0)),
    (StyleRole::Unanswered, role(SLATE_400, None, FontWeight::Italic, 10.0)),
    (StyleRole::Footer, role(SLATE_400, None, FontWeight::Regular, 8.0)),
    (StyleRole::ProgressDone, role(BLUE_300, None, FontWeight::Regular, 0.0)),
    (StyleRole::ProgressCurrent, role(BLUE_600, None, FontWeight::Bold, 0.0)),
    (StyleRole::ProgressUpcoming, role(SLATE_300, None, FontWeight::Regular, 0.0)),
    (StyleRole::Tip, role(AMBER_800, Some(AMBER_50), FontWeight::Regular, 0.0)),
    (StyleRole::Success, role(GREEN_600, None, FontWeight::Bold, 0.0)),
    (StyleRole::Error, role(RED_600, None, FontWeight::Bold, 0.0)),
    (StyleRole::Muted, role(SLATE_400, None, FontWeight::Regular, 0.0)),
];

/// Look a role up in the shared table.
pub fn style(role: StyleRole) -> RoleStyle {
    STYLE_TABLE
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, s)| *s)
        .unwrap_or(RoleStyle {
            color: SLATE_700,
            background: None,
            weight: FontWeight::Regular,
            size: 10.0,
        })
}
