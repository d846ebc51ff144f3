///
/// Representation of a colour as three 16-bit channels
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Color {
    pub red:    u16,
    pub green:  u16,
    pub blue:   u16
}

///
/// Colour names understood by `Color::from_name`, as 8-bit channel values
///
const NAMED_COLORS: [(&str, (u8, u8, u8)); 64] = [
    ("aliceblue",       (240, 248, 255)),
    ("aquamarine",      (127, 255, 212)),
    ("azure",           (240, 255, 255)),
    ("beige",           (245, 245, 220)),
    ("black",           (0, 0, 0)),
    ("blue",            (0, 0, 255)),
    ("blueviolet",      (138, 43, 226)),
    ("brown",           (165, 42, 42)),
    ("burlywood",       (222, 184, 135)),
    ("cadetblue",       (95, 158, 160)),
    ("chartreuse",      (127, 255, 0)),
    ("chocolate",       (210, 105, 30)),
    ("coral",           (255, 127, 80)),
    ("cornflowerblue",  (100, 149, 237)),
    ("cyan",            (0, 255, 255)),
    ("darkblue",        (0, 0, 139)),
    ("darkcyan",        (0, 139, 139)),
    ("darkgray",        (169, 169, 169)),
    ("darkgreen",       (0, 100, 0)),
    ("darkgrey",        (169, 169, 169)),
    ("darkmagenta",     (139, 0, 139)),
    ("darkorange",      (255, 140, 0)),
    ("darkred",         (139, 0, 0)),
    ("darkviolet",      (148, 0, 211)),
    ("deeppink",        (255, 20, 147)),
    ("deepskyblue",     (0, 191, 255)),
    ("dimgray",         (105, 105, 105)),
    ("firebrick",       (178, 34, 34)),
    ("forestgreen",     (34, 139, 34)),
    ("gold",            (255, 215, 0)),
    ("goldenrod",       (218, 165, 32)),
    ("gray",            (190, 190, 190)),
    ("green",           (0, 255, 0)),
    ("greenyellow",     (173, 255, 47)),
    ("grey",            (190, 190, 190)),
    ("hotpink",         (255, 105, 180)),
    ("indianred",       (205, 92, 92)),
    ("ivory",           (255, 255, 240)),
    ("khaki",           (240, 230, 140)),
    ("lavender",        (230, 230, 250)),
    ("lightblue",       (173, 216, 230)),
    ("lightgray",       (211, 211, 211)),
    ("lightgreen",      (144, 238, 144)),
    ("lightgrey",       (211, 211, 211)),
    ("lightyellow",     (255, 255, 224)),
    ("limegreen",       (50, 205, 50)),
    ("magenta",         (255, 0, 255)),
    ("maroon",          (176, 48, 96)),
    ("navy",            (0, 0, 128)),
    ("navyblue",        (0, 0, 128)),
    ("olivedrab",       (107, 142, 35)),
    ("orange",          (255, 165, 0)),
    ("orangered",       (255, 69, 0)),
    ("orchid",          (218, 112, 214)),
    ("pink",            (255, 192, 203)),
    ("plum",            (221, 160, 221)),
    ("purple",          (160, 32, 240)),
    ("red",             (255, 0, 0)),
    ("salmon",          (250, 128, 114)),
    ("seagreen",        (46, 139, 87)),
    ("skyblue",         (135, 206, 235)),
    ("violet",          (238, 130, 238)),
    ("white",           (255, 255, 255)),
    ("yellow",          (255, 255, 0)),
];

impl Color {
    ///
    /// Creates a colour from its three 16-bit channels
    ///
    pub const fn rgb(red: u16, green: u16, blue: u16) -> Color {
        Color { red, green, blue }
    }

    pub const fn black() -> Color { Color::rgb(0, 0, 0) }
    pub const fn white() -> Color { Color::rgb(0xffff, 0xffff, 0xffff) }

    ///
    /// Creates a colour from 8-bit channels, scaling each one to 16 bits
    ///
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Color {
        Color::rgb((red as u16) * 0x101, (green as u16) * 0x101, (blue as u16) * 0x101)
    }

    ///
    /// Looks up a colour by name
    ///
    /// Names are matched case-insensitively with spaces ignored ("Light Blue" is the same as
    /// "lightblue"), and `#rrggbb` hex strings are also accepted.
    ///
    pub fn from_name(name: &str) -> Option<Color> {
        let name = name.trim();

        if name.starts_with('#') {
            return Self::from_hex(&name[1..]);
        }

        let canonical = name.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(|c| c.to_lowercase())
            .collect::<String>();

        NAMED_COLORS.iter()
            .find(|(color_name, _)| *color_name == canonical)
            .map(|(_, (r, g, b))| Color::from_rgb8(*r, *g, *b))
    }

    ///
    /// Parses the 'rrggbb' part of a hex colour
    ///
    fn from_hex(hex: &str) -> Option<Color> {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let red     = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let green   = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let blue    = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color::from_rgb8(red, green, blue))
    }

    ///
    /// Returns this colour as floating-point RGB components in the range 0-1
    ///
    pub fn to_rgb(&self) -> (f64, f64, f64) {
        (self.red as f64 / 65535.0, self.green as f64 / 65535.0, self.blue as f64 / 65535.0)
    }

    ///
    /// Moves this colour towards white according to a fill level
    ///
    /// A level of 1 leaves the colour unchanged and 0xffff produces white, with levels in between
    /// desaturating linearly. A level of 0 means 'unfilled' and also leaves the colour unchanged.
    ///
    pub fn desaturate(&self, level: u16) -> Color {
        if level <= 1 {
            return *self;
        }

        let fraction    = (level as f64 - 1.0) / 65534.0;
        let towards     = |channel: u16| {
            let channel = channel as f64;
            (channel + fraction * (65535.0 - channel)).round() as u16
        };

        Color::rgb(towards(self.red), towards(self.green), towards(self.blue))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn named_colors_are_sorted() {
        // from_name does a linear search, but keeping the table ordered makes it easy to maintain
        for idx in 1..NAMED_COLORS.len() {
            assert!(NAMED_COLORS[idx-1].0 < NAMED_COLORS[idx].0);
        }
    }

    #[test]
    fn find_red_by_name() {
        assert!(Color::from_name("red") == Some(Color::rgb(0xffff, 0, 0)));
    }

    #[test]
    fn names_ignore_case_and_spaces() {
        assert!(Color::from_name("Light Blue") == Color::from_name("lightblue"));
        assert!(Color::from_name("Light Blue").is_some());
    }

    #[test]
    fn hex_colors() {
        assert!(Color::from_name("#ff8000") == Some(Color::rgb(0xffff, 0x8080, 0)));
        assert!(Color::from_name("#ff80").is_none());
        assert!(Color::from_name("#gg8000").is_none());
    }

    #[test]
    fn unknown_name() {
        assert!(Color::from_name("not-a-colour").is_none());
    }

    #[test]
    fn desaturate_endpoints() {
        let red = Color::rgb(0xffff, 0, 0);

        assert!(red.desaturate(1) == red);
        assert!(red.desaturate(0xffff) == Color::white());
    }

    #[test]
    fn desaturate_halfway() {
        let half = Color::black().desaturate(0x8000);

        assert!((half.red as i32 - 0x7fff).abs() <= 1);
        assert!(half.red == half.green && half.green == half.blue);
    }
}
