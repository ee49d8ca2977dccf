//! Shared colors. Pink marks girls / a gap favoring girls, blue marks boys.

use egui::Color32;

pub const GIRLS: Color32 = Color32::from_rgb(255, 130, 198); // #ff82c6
pub const BOYS: Color32 = Color32::from_rgb(106, 165, 255); // #6aa5ff
pub const NEUTRAL: Color32 = Color32::from_rgb(156, 163, 175); // #9ca3af
pub const AXIS_TITLE: Color32 = Color32::from_rgb(203, 213, 245); // #cbd5f5

pub const MINI_GIRLS: Color32 = Color32::from_rgb(255, 140, 188); // #ff8cbc
pub const MINI_BOYS: Color32 = Color32::from_rgb(126, 156, 255); // #7e9cff
pub const FERTILITY_TRACK: Color32 = Color32::from_rgb(241, 226, 255); // #f1e2ff
pub const FERTILITY_MARKER: Color32 = Color32::from_rgb(255, 94, 156); // #ff5e9c
pub const SURVIVAL: Color32 = Color32::from_rgb(60, 143, 93); // #3c8f5d

pub const WATER: Color32 = Color32::from_rgb(14, 42, 71);
pub const GRATICULE: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 60);
pub const COUNTRY: Color32 = Color32::RED;
pub const COUNTRY_BORDER: Color32 = Color32::WHITE;
