//! Color name to hex lookups for wolai text annotations.
//!
//! wolai reports colors by name (`"red"`, `"blue_background"`, ...). The
//! markup output needs concrete hex values for inline `style` attributes.

/// Foreground colors, as documented in the wolai color reference.
pub const FRONT_COLOR_HEX: &[(&str, &str)] = &[
    ("gray", "#8C8C8C"),
    ("dark_gray", "#5C5C5C"),
    ("brown", "#A3431F"),
    ("orange", "#F06B05"),
    ("yellow", "#DFAB01"),
    ("green", "#038766"),
    ("blue", "#0575C5"),
    ("indigo", "#4A52C7"),
    ("purple", "#8831CC"),
    ("pink", "#C815B6"),
    ("red", "#E91E2C"),
    ("default", "#000000"),
];

/// Background colors, as documented in the wolai color reference.
pub const BACK_COLOR_HEX: &[(&str, &str)] = &[
    ("cultured_background", "#F3F3F3"),
    ("light_gray_background", "#E3E3E3"),
    ("apricot_background", "#EFDFDB"),
    ("vivid_tangerine_background", "#FCE5D7"),
    ("blond_background", "#FCF5D6"),
    ("aero_blue_background", "#D7EAE5"),
    ("uranian_blue_background", "#D7E7F4"),
    ("lavender_blue_background", "#E0E2F5"),
    ("pale_purple_background", "#EADDF6"),
    ("pink_lavender_background", "#F5D9F2"),
    ("light_pink_background", "#FBDADC"),
    ("fluorescent_yellow_background", "#FFF784"),
    ("fluorescent_green_background", "#CDF7AD"),
    ("fluorescent_green2_background", "#A6F9CB"),
    ("fluorescent_blue_background", "#A8FFFF"),
    ("fluorescent_purple_background", "#FDB7FF"),
    ("fluorescent_purple2_background", "#CCC4FF"),
    ("default", "#FFFFFF"),
];

/// Which of the two color tables a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorLayer {
    Foreground,
    Background,
}

impl ColorLayer {
    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ColorLayer::Foreground => FRONT_COLOR_HEX,
            ColorLayer::Background => BACK_COLOR_HEX,
        }
    }

    /// The CSS property this layer is rendered with.
    pub fn css_property(self) -> &'static str {
        match self {
            ColorLayer::Foreground => "color",
            ColorLayer::Background => "background-color",
        }
    }

    /// Looks up the hex value for a color name in this layer's table.
    pub fn hex(self, name: &str) -> Option<&'static str> {
        self.table()
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, hex)| *hex)
    }
}
