use super::draw::*;
use super::page::*;
use super::color::*;

///
/// Trait implemented by objects that can be encoded into a canvas
///
pub trait CanvasEncoding<Buffer> {
    ///
    /// Encodes this item by appending it to the specified string
    ///
    fn encode_canvas(&self, append_to: &mut Buffer);
}

pub (crate) const ENCODING_CHAR_SET: [char; 64] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '+', '/'
];

impl CanvasEncoding<String> for char {
    #[inline]
    fn encode_canvas(&self, append_to: &mut String) {
        append_to.push(*self)
    }
}

impl CanvasEncoding<String> for bool {
    #[inline]
    fn encode_canvas(&self, append_to: &mut String) {
        append_to.push(if *self { 'Y' } else { 'N' })
    }
}

impl CanvasEncoding<String> for u16 {
    #[inline]
    fn encode_canvas(&self, append_to: &mut String) {
        let mut remaining = *self;

        for _ in 0..3 {
            append_to.push(ENCODING_CHAR_SET[(remaining & 0x3f) as usize]);
            remaining >>= 6;
        }
    }
}

impl CanvasEncoding<String> for u32 {
    #[inline]
    fn encode_canvas(&self, append_to: &mut String) {
        // Base-64 wastes some bits but requires 2 less characters than hex for a 32-bit number
        let mut remaining = *self;

        for _ in 0..6 {
            let next_part = remaining & 0x3f;
            let next_char = ENCODING_CHAR_SET[next_part as usize];
            append_to.push(next_char);

            remaining >>= 6;
        }
    }
}

impl CanvasEncoding<String> for u64 {
    #[inline]
    fn encode_canvas(&self, append_to: &mut String) {
        let mut remaining = *self;

        for _ in 0..11 {
            append_to.push(ENCODING_CHAR_SET[(remaining & 0x3f) as usize]);
            remaining >>= 6;
        }
    }
}

impl CanvasEncoding<String> for f64 {
    #[inline]
    fn encode_canvas(&self, append_to: &mut String) {
        self.to_bits().encode_canvas(append_to)
    }
}

impl CanvasEncoding<String> for str {
    ///
    /// Strings are written as their length in characters followed by the characters themselves
    ///
    fn encode_canvas(&self, append_to: &mut String) {
        (self.chars().count() as u32).encode_canvas(append_to);
        append_to.push_str(self);
    }
}

impl CanvasEncoding<String> for String {
    #[inline]
    fn encode_canvas(&self, append_to: &mut String) {
        self.as_str().encode_canvas(append_to)
    }
}

//
// Some convenience encodings for implementing the main canvas encoding
//

impl<A: CanvasEncoding<String>, B: CanvasEncoding<String>> CanvasEncoding<String> for (A, B) {
    fn encode_canvas(&self, append_to: &mut String) {
        self.0.encode_canvas(append_to);
        self.1.encode_canvas(append_to);
    }
}

impl<A: CanvasEncoding<String>, B: CanvasEncoding<String>, C: CanvasEncoding<String>> CanvasEncoding<String> for (A, B, C) {
    fn encode_canvas(&self, append_to: &mut String) {
        self.0.encode_canvas(append_to);
        self.1.encode_canvas(append_to);
        self.2.encode_canvas(append_to);
    }
}

impl<A: CanvasEncoding<String>, B: CanvasEncoding<String>, C: CanvasEncoding<String>, D: CanvasEncoding<String>> CanvasEncoding<String> for (A, B, C, D) {
    fn encode_canvas(&self, append_to: &mut String) {
        self.0.encode_canvas(append_to);
        self.1.encode_canvas(append_to);
        self.2.encode_canvas(append_to);
        self.3.encode_canvas(append_to);
    }
}

impl<A: CanvasEncoding<String>, B: CanvasEncoding<String>, C: CanvasEncoding<String>, D: CanvasEncoding<String>, E: CanvasEncoding<String>> CanvasEncoding<String> for (A, B, C, D, E) {
    fn encode_canvas(&self, append_to: &mut String) {
        self.0.encode_canvas(append_to);
        self.1.encode_canvas(append_to);
        self.2.encode_canvas(append_to);
        self.3.encode_canvas(append_to);
        self.4.encode_canvas(append_to);
    }
}

//
// Main canvas encoding
//

impl CanvasEncoding<String> for Color {
    fn encode_canvas(&self, append_to: &mut String) {
        ('R', self.red, self.green, self.blue).encode_canvas(append_to)
    }
}

impl CanvasEncoding<String> for LineJoin {
    fn encode_canvas(&self, append_to: &mut String) {
        use self::LineJoin::*;

        match self {
            Miter       => 'M',
            Round       => 'R',
            Bevel       => 'B',
            Triangular  => 'T'
        }.encode_canvas(append_to)
    }
}

impl CanvasEncoding<String> for LineCap {
    fn encode_canvas(&self, append_to: &mut String) {
        use self::LineCap::*;

        match self {
            Butt        => 'B',
            Round       => 'R',
            Projecting  => 'P',
            Triangular  => 'T'
        }.encode_canvas(append_to)
    }
}

impl CanvasEncoding<String> for WindingRule {
    fn encode_canvas(&self, append_to: &mut String) {
        match self {
            WindingRule::EvenOdd => 'E',
            WindingRule::NonZero => 'N'
        }.encode_canvas(append_to)
    }
}

impl CanvasEncoding<String> for HorizontalAlignment {
    fn encode_canvas(&self, append_to: &mut String) {
        match self {
            HorizontalAlignment::Left   => 'l',
            HorizontalAlignment::Center => 'c',
            HorizontalAlignment::Right  => 'r'
        }.encode_canvas(append_to)
    }
}

impl CanvasEncoding<String> for VerticalAlignment {
    fn encode_canvas(&self, append_to: &mut String) {
        match self {
            VerticalAlignment::Bottom   => 'b',
            VerticalAlignment::Baseline => 'x',
            VerticalAlignment::Center   => 'c',
            VerticalAlignment::Top      => 't'
        }.encode_canvas(append_to)
    }
}

impl CanvasEncoding<String> for TextLabel {
    fn encode_canvas(&self, append_to: &mut String) {
        (self.position, self.angle, self.font_size, self.horizontal, self.vertical).encode_canvas(append_to);
        (&self.font_name, &self.text).encode_canvas(append_to);
    }
}

impl<'a, T: CanvasEncoding<String>+?Sized> CanvasEncoding<String> for &'a T {
    #[inline]
    fn encode_canvas(&self, append_to: &mut String) {
        (*self).encode_canvas(append_to)
    }
}

impl CanvasEncoding<String> for Draw {
    fn encode_canvas(&self, append_to: &mut String) {
        use self::Draw::*;

        match self {
            ClearCanvas(col)                        => ('N', 'A', *col).encode_canvas(append_to),
            NewPath                                 => ('N', 'p').encode_canvas(append_to),
            Move(x, y)                              => ('m', *x, *y).encode_canvas(append_to),
            Line(x, y)                              => ('l', *x, *y).encode_canvas(append_to),
            BezierCurve(p1, p2, p3)                 => ('c', *p1, *p2, *p3).encode_canvas(append_to),
            QuadraticCurve(p1, p2)                  => ('q', *p1, *p2).encode_canvas(append_to),
            Arc(end, center, clockwise)             => ('a', *end, *center, *clockwise).encode_canvas(append_to),
            ClosePath                               => '.'.encode_canvas(append_to),
            Fill                                    => 'F'.encode_canvas(append_to),
            Stroke                                  => 'S'.encode_canvas(append_to),
            LineWidth(width)                        => ('L', 'w', *width).encode_canvas(append_to),
            LineJoin(join)                          => ('L', 'j', *join).encode_canvas(append_to),
            LineCap(cap)                            => ('L', 'c', *cap).encode_canvas(append_to),
            MiterLimit(limit)                       => ('L', 'm', *limit).encode_canvas(append_to),
            NewDashPattern                          => ('D', 'n').encode_canvas(append_to),
            DashLength(length)                      => ('D', 'l', *length).encode_canvas(append_to),
            DashOffset(offset)                      => ('D', 'o', *offset).encode_canvas(append_to),
            WindingRule(rule)                       => ('W', *rule).encode_canvas(append_to),
            StrokeColor(col)                        => ('C', 's', *col).encode_canvas(append_to),
            FillColor(col)                          => ('C', 'f', *col).encode_canvas(append_to),
            Point(x, y)                             => ('o', *x, *y).encode_canvas(append_to),
            Label(label)                            => ('t', label).encode_canvas(append_to)
        }
    }
}

impl CanvasEncoding<String> for PageDescription {
    fn encode_canvas(&self, append_to: &mut String) {
        (self.number, self.size, self.background).encode_canvas(append_to)
    }
}

impl CanvasEncoding<String> for MetafileEvent {
    fn encode_canvas(&self, append_to: &mut String) {
        use self::MetafileEvent::*;

        match self {
            BeginPage(page)     => ('P', 'b', page).encode_canvas(append_to),
            Draw(draw)          => draw.encode_canvas(append_to),
            EndFrame            => ('P', 'f').encode_canvas(append_to),
            EndPage             => ('P', 'e').encode_canvas(append_to)
        }
    }
}

impl CanvasEncoding<String> for Vec<Draw> {
    fn encode_canvas(&self, append_to: &mut String) {
        self.iter().for_each(|item| { item.encode_canvas(append_to); append_to.push('\n'); });
    }
}
