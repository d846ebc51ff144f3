use super::draw::*;
use super::page::*;
use super::color::*;

use std::result::Result;

///
/// The instructions that take a fixed-length block of operands after their opcode
///
#[derive(Clone, Copy, PartialEq, Debug)]
enum Operand {
    ClearCanvas,        // 'NA' (color)
    Move,               // 'm' (x, y)
    Line,               // 'l' (x, y)
    BezierCurve,        // 'c' (x, y, x, y, x, y)
    QuadraticCurve,     // 'q' (x, y, x, y)
    Arc,                // 'a' (x, y, x, y, clockwise)
    Point,              // 'o' (x, y)
    LineWidth,          // 'Lw' (w)
    LineJoin,           // 'Lj' (j)
    LineCap,            // 'Lc' (c)
    MiterLimit,         // 'Lm' (limit)
    DashLength,         // 'Dl' (len)
    DashOffset,         // 'Do' (offset)
    WindingRule,        // 'W' (rule)
    StrokeColor,        // 'Cs' (color)
    FillColor,          // 'Cf' (color)
    BeginPage           // 'Pb' (number, width, height, color)
}

const F64_LEN: usize    = 11;
const U16_LEN: usize    = 3;
const U32_LEN: usize    = 6;
const COLOR_LEN: usize  = 1 + U16_LEN*3;

impl Operand {
    ///
    /// The number of characters that make up the operands of this instruction
    ///
    fn length(&self) -> usize {
        use self::Operand::*;

        match self {
            ClearCanvas | StrokeColor | FillColor   => COLOR_LEN,
            Move | Line | Point                     => F64_LEN*2,
            BezierCurve                             => F64_LEN*6,
            QuadraticCurve                          => F64_LEN*4,
            Arc                                     => F64_LEN*4 + 1,
            LineWidth | MiterLimit                  => F64_LEN,
            DashLength | DashOffset                 => F64_LEN,
            LineJoin | LineCap | WindingRule        => 1,
            BeginPage                               => U32_LEN + F64_LEN*2 + COLOR_LEN
        }
    }
}

enum DecoderState {
    None,

    New,                            // 'N'
    LineStyle,                      // 'L'
    Dash,                           // 'D'
    Color,                          // 'C'
    Page,                           // 'P'

    Operands(Operand, String),      // Fixed-length operands
    Label(Vec<char>),               // 't' (x, y, angle, size, h, v, font, text)
}

type DecodeResult = Result<(DecoderState, Option<MetafileEvent>), DecoderError>;

///
/// Possible error from the decoder
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecoderError {
    /// A character appeared that is not valid at this point in the stream
    InvalidCharacter(char),

    /// A number was decoded that doesn't fit the type it's meant to be
    NumberOutOfRange,

    /// An instruction ran out of characters before all of its operands were read
    UnexpectedEnd,

    /// The stream finished part way through an instruction
    IncompleteInstruction
}

///
/// Reads operands from a block of encoded characters
///
struct OperandReader<'a> {
    chars:  &'a [char],
    pos:    usize
}

impl<'a> OperandReader<'a> {
    fn new(chars: &'a [char]) -> OperandReader<'a> {
        OperandReader { chars, pos: 0 }
    }

    fn take(&mut self, count: usize) -> Result<&'a [char], DecoderError> {
        if self.pos + count > self.chars.len() {
            Err(DecoderError::UnexpectedEnd)
        } else {
            let chars   = &self.chars[self.pos..(self.pos+count)];
            self.pos    += count;
            Ok(chars)
        }
    }

    fn next_char(&mut self) -> Result<char, DecoderError> {
        Ok(self.take(1)?[0])
    }

    fn number(&mut self, len: usize) -> Result<u64, DecoderError> {
        let mut result = 0u64;

        for (idx, chr) in self.take(len)?.iter().enumerate() {
            result |= decode_digit(*chr)? << (idx*6);
        }

        Ok(result)
    }

    fn f64(&mut self) -> Result<f64, DecoderError> {
        Ok(f64::from_bits(self.number(F64_LEN)?))
    }

    fn point(&mut self) -> Result<(f64, f64), DecoderError> {
        Ok((self.f64()?, self.f64()?))
    }

    fn u16(&mut self) -> Result<u16, DecoderError> {
        let number = self.number(U16_LEN)?;
        if number > 0xffff { Err(DecoderError::NumberOutOfRange) } else { Ok(number as u16) }
    }

    fn u32(&mut self) -> Result<u32, DecoderError> {
        let number = self.number(U32_LEN)?;
        if number > 0xffff_ffff { Err(DecoderError::NumberOutOfRange) } else { Ok(number as u32) }
    }

    fn bool(&mut self) -> Result<bool, DecoderError> {
        match self.next_char()? {
            'Y'     => Ok(true),
            'N'     => Ok(false),
            other   => Err(DecoderError::InvalidCharacter(other))
        }
    }

    fn color(&mut self) -> Result<Color, DecoderError> {
        match self.next_char()? {
            'R'     => Ok(Color::rgb(self.u16()?, self.u16()?, self.u16()?)),
            other   => Err(DecoderError::InvalidCharacter(other))
        }
    }

    fn string(&mut self) -> Result<String, DecoderError> {
        let len = self.u32()? as usize;
        Ok(self.take(len)?.iter().collect())
    }

    fn line_join(&mut self) -> Result<LineJoin, DecoderError> {
        match self.next_char()? {
            'M'     => Ok(LineJoin::Miter),
            'R'     => Ok(LineJoin::Round),
            'B'     => Ok(LineJoin::Bevel),
            'T'     => Ok(LineJoin::Triangular),
            other   => Err(DecoderError::InvalidCharacter(other))
        }
    }

    fn line_cap(&mut self) -> Result<LineCap, DecoderError> {
        match self.next_char()? {
            'B'     => Ok(LineCap::Butt),
            'R'     => Ok(LineCap::Round),
            'P'     => Ok(LineCap::Projecting),
            'T'     => Ok(LineCap::Triangular),
            other   => Err(DecoderError::InvalidCharacter(other))
        }
    }

    fn winding_rule(&mut self) -> Result<WindingRule, DecoderError> {
        match self.next_char()? {
            'E'     => Ok(WindingRule::EvenOdd),
            'N'     => Ok(WindingRule::NonZero),
            other   => Err(DecoderError::InvalidCharacter(other))
        }
    }

    fn label(&mut self) -> Result<TextLabel, DecoderError> {
        Ok(TextLabel {
            position:   self.point()?,
            angle:      self.f64()?,
            font_size:  self.f64()?,
            horizontal: self.horizontal()?,
            vertical:   self.vertical()?,
            font_name:  self.string()?,
            text:       self.string()?
        })
    }

    fn horizontal(&mut self) -> Result<HorizontalAlignment, DecoderError> {
        match self.next_char()? {
            'l'     => Ok(HorizontalAlignment::Left),
            'c'     => Ok(HorizontalAlignment::Center),
            'r'     => Ok(HorizontalAlignment::Right),
            other   => Err(DecoderError::InvalidCharacter(other))
        }
    }

    fn vertical(&mut self) -> Result<VerticalAlignment, DecoderError> {
        match self.next_char()? {
            'b'     => Ok(VerticalAlignment::Bottom),
            'x'     => Ok(VerticalAlignment::Baseline),
            'c'     => Ok(VerticalAlignment::Center),
            't'     => Ok(VerticalAlignment::Top),
            other   => Err(DecoderError::InvalidCharacter(other))
        }
    }
}

///
/// Decodes a single base-64 digit
///
fn decode_digit(chr: char) -> Result<u64, DecoderError> {
    match chr {
        'A'..='Z'   => Ok((chr as u64) - ('A' as u64)),
        'a'..='z'   => Ok((chr as u64) - ('a' as u64) + 26),
        '0'..='9'   => Ok((chr as u64) - ('0' as u64) + 52),
        '+'         => Ok(62),
        '/'         => Ok(63),
        _           => Err(DecoderError::InvalidCharacter(chr))
    }
}

///
/// Represents a (stateful) canvas decoder
///
/// Characters are fed in one at a time, and the decoder returns an event whenever one is complete.
///
pub struct CanvasDecoder {
    state: DecoderState
}

impl CanvasDecoder {
    ///
    /// Creates a new canvas decoder
    ///
    pub fn new() -> CanvasDecoder {
        CanvasDecoder {
            state: DecoderState::None
        }
    }

    ///
    /// Decodes a character, returning the next event if there is one
    ///
    pub fn decode(&mut self, next_chr: char) -> Result<Option<MetafileEvent>, DecoderError> {
        use self::DecoderState::*;

        let state = std::mem::replace(&mut self.state, DecoderState::None);

        // Next state depends on the character and the current state
        let (next_state, result) = match state {
            None                            => Self::decode_none(next_chr)?,

            New                             => Self::decode_new(next_chr)?,
            LineStyle                       => Self::decode_line_style(next_chr)?,
            Dash                            => Self::decode_dash(next_chr)?,
            Color                           => Self::decode_color(next_chr)?,
            Page                            => Self::decode_page(next_chr)?,

            Operands(operand, operands)     => Self::decode_operands(operand, operands, next_chr)?,
            Label(chars)                    => Self::decode_label(chars, next_chr)?
        };

        self.state = next_state;
        Ok(result)
    }

    ///
    /// Checks that the decoder is not part way through an instruction
    ///
    pub fn finish(&self) -> Result<(), DecoderError> {
        match self.state {
            DecoderState::None  => Ok(()),
            _                   => Err(DecoderError::IncompleteInstruction)
        }
    }

    ///
    /// Matches the first character of a canvas item
    ///
    #[inline] fn decode_none(next_chr: char) -> DecodeResult {
        let draw        = |draw: Draw| -> DecodeResult { Ok((DecoderState::None, Some(MetafileEvent::Draw(draw)))) };
        let operands    = |operand: Operand| -> DecodeResult { Ok((DecoderState::Operands(operand, String::new()), None)) };

        match next_chr {
            // Whitespace separates instructions
            '\n' | '\r' | ' ' => Ok((DecoderState::None, None)),

            // Multi-character commands
            'N' => Ok((DecoderState::New, None)),
            'L' => Ok((DecoderState::LineStyle, None)),
            'D' => Ok((DecoderState::Dash, None)),
            'C' => Ok((DecoderState::Color, None)),
            'P' => Ok((DecoderState::Page, None)),

            // Single character commands
            '.' => draw(Draw::ClosePath),
            'F' => draw(Draw::Fill),
            'S' => draw(Draw::Stroke),

            // Single character commands with a parameter
            'm' => operands(Operand::Move),
            'l' => operands(Operand::Line),
            'c' => operands(Operand::BezierCurve),
            'q' => operands(Operand::QuadraticCurve),
            'a' => operands(Operand::Arc),
            'o' => operands(Operand::Point),
            'W' => operands(Operand::WindingRule),
            't' => Ok((DecoderState::Label(vec![]), None)),

            // Other characters are not accepted
            _   => Err(DecoderError::InvalidCharacter(next_chr))
        }
    }

    #[inline] fn decode_new(next_chr: char) -> DecodeResult {
        match next_chr {
            'p' => Ok((DecoderState::None, Some(MetafileEvent::Draw(Draw::NewPath)))),
            'A' => Ok((DecoderState::Operands(Operand::ClearCanvas, String::new()), None)),
            _   => Err(DecoderError::InvalidCharacter(next_chr))
        }
    }

    #[inline] fn decode_line_style(next_chr: char) -> DecodeResult {
        match next_chr {
            'w' => Ok((DecoderState::Operands(Operand::LineWidth, String::new()), None)),
            'j' => Ok((DecoderState::Operands(Operand::LineJoin, String::new()), None)),
            'c' => Ok((DecoderState::Operands(Operand::LineCap, String::new()), None)),
            'm' => Ok((DecoderState::Operands(Operand::MiterLimit, String::new()), None)),
            _   => Err(DecoderError::InvalidCharacter(next_chr))
        }
    }

    #[inline] fn decode_dash(next_chr: char) -> DecodeResult {
        match next_chr {
            'n' => Ok((DecoderState::None, Some(MetafileEvent::Draw(Draw::NewDashPattern)))),
            'l' => Ok((DecoderState::Operands(Operand::DashLength, String::new()), None)),
            'o' => Ok((DecoderState::Operands(Operand::DashOffset, String::new()), None)),
            _   => Err(DecoderError::InvalidCharacter(next_chr))
        }
    }

    #[inline] fn decode_color(next_chr: char) -> DecodeResult {
        match next_chr {
            's' => Ok((DecoderState::Operands(Operand::StrokeColor, String::new()), None)),
            'f' => Ok((DecoderState::Operands(Operand::FillColor, String::new()), None)),
            _   => Err(DecoderError::InvalidCharacter(next_chr))
        }
    }

    #[inline] fn decode_page(next_chr: char) -> DecodeResult {
        match next_chr {
            'b' => Ok((DecoderState::Operands(Operand::BeginPage, String::new()), None)),
            'f' => Ok((DecoderState::None, Some(MetafileEvent::EndFrame))),
            'e' => Ok((DecoderState::None, Some(MetafileEvent::EndPage))),
            _   => Err(DecoderError::InvalidCharacter(next_chr))
        }
    }

    ///
    /// Accumulates the operands for an instruction, decoding it once they're all present
    ///
    fn decode_operands(operand: Operand, mut operands: String, next_chr: char) -> DecodeResult {
        operands.push(next_chr);

        if operands.chars().count() < operand.length() {
            return Ok((DecoderState::Operands(operand, operands), None));
        }

        let chars       = operands.chars().collect::<Vec<_>>();
        let mut reader  = OperandReader::new(&chars);

        let event = match operand {
            Operand::ClearCanvas        => MetafileEvent::Draw(Draw::ClearCanvas(reader.color()?)),
            Operand::Move               => MetafileEvent::Draw(Draw::Move(reader.f64()?, reader.f64()?)),
            Operand::Line               => MetafileEvent::Draw(Draw::Line(reader.f64()?, reader.f64()?)),
            Operand::BezierCurve        => MetafileEvent::Draw(Draw::BezierCurve(reader.point()?, reader.point()?, reader.point()?)),
            Operand::QuadraticCurve     => MetafileEvent::Draw(Draw::QuadraticCurve(reader.point()?, reader.point()?)),
            Operand::Arc                => MetafileEvent::Draw(Draw::Arc(reader.point()?, reader.point()?, reader.bool()?)),
            Operand::Point              => MetafileEvent::Draw(Draw::Point(reader.f64()?, reader.f64()?)),
            Operand::LineWidth          => MetafileEvent::Draw(Draw::LineWidth(reader.f64()?)),
            Operand::LineJoin           => MetafileEvent::Draw(Draw::LineJoin(reader.line_join()?)),
            Operand::LineCap            => MetafileEvent::Draw(Draw::LineCap(reader.line_cap()?)),
            Operand::MiterLimit         => MetafileEvent::Draw(Draw::MiterLimit(reader.f64()?)),
            Operand::DashLength         => MetafileEvent::Draw(Draw::DashLength(reader.f64()?)),
            Operand::DashOffset         => MetafileEvent::Draw(Draw::DashOffset(reader.f64()?)),
            Operand::WindingRule        => MetafileEvent::Draw(Draw::WindingRule(reader.winding_rule()?)),
            Operand::StrokeColor        => MetafileEvent::Draw(Draw::StrokeColor(reader.color()?)),
            Operand::FillColor          => MetafileEvent::Draw(Draw::FillColor(reader.color()?)),
            Operand::BeginPage          => MetafileEvent::BeginPage(PageDescription {
                number:     reader.u32()?,
                size:       reader.point()?,
                background: reader.color()?
            })
        };

        Ok((DecoderState::None, Some(event)))
    }

    ///
    /// Accumulates a label, which has variable-length strings in it
    ///
    fn decode_label(mut chars: Vec<char>, next_chr: char) -> DecodeResult {
        chars.push(next_chr);

        let label = OperandReader::new(&chars).label();

        match label {
            Ok(label)                           => Ok((DecoderState::None, Some(MetafileEvent::Draw(Draw::Label(label))))),
            Err(DecoderError::UnexpectedEnd)    => Ok((DecoderState::Label(chars), None)),
            Err(other)                          => Err(other)
        }
    }
}

///
/// Decodes every event in an encoded string
///
pub fn decode_events(encoded: &str) -> Result<Vec<MetafileEvent>, DecoderError> {
    let mut decoder = CanvasDecoder::new();
    let mut events  = vec![];

    for chr in encoded.chars() {
        if let Some(event) = decoder.decode(chr)? {
            events.push(event);
        }
    }

    decoder.finish()?;
    Ok(events)
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::encoding::*;

    ///
    /// Checks if a particular drawing operation can be both encoded and decoded
    ///
    fn check_can_round_trip(instruction: Draw) {
        // Encode the instruction
        let mut encoded = String::new();
        instruction.encode_canvas(&mut encoded);

        // Try decoding it
        let mut decoder = CanvasDecoder::new();
        let mut decoded = None;

        for c in encoded.chars() {
            // As we've encoded a single instruction we should never start with a valid value
            assert!(decoded.is_none());

            // Update with the next state
            decoded = decoder.decode(c).unwrap();
        }

        // Should decode OK
        assert!(decoded == Some(MetafileEvent::Draw(instruction)));
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn decode_move() {
        check_can_round_trip(Draw::Move(10.0, 15.0));
    }

    #[test]
    fn decode_bezier_curve() {
        check_can_round_trip(Draw::BezierCurve((1.0, 2.0), (3.0, 4.0), (5.0, -6.25)));
    }

    #[test]
    fn decode_arc() {
        check_can_round_trip(Draw::Arc((0.0, 1.0), (0.0, 0.0), false));
    }

    #[test]
    fn decode_clear_canvas() {
        check_can_round_trip(Draw::ClearCanvas(Color::rgb(1, 2, 0xffff)));
    }

    #[test]
    fn decode_line_join() {
        check_can_round_trip(Draw::LineJoin(LineJoin::Triangular));
    }

    #[test]
    fn decode_label_with_unicode() {
        check_can_round_trip(Draw::Label(TextLabel {
            position:   (20.0, 30.0),
            angle:      45.0,
            font_size:  12.0,
            font_name:  "HersheySerif".to_string(),
            horizontal: HorizontalAlignment::Center,
            vertical:   VerticalAlignment::Baseline,
            text:       "Ünïcode\nlabel".to_string()
        }));
    }

    #[test]
    fn decode_page_events() {
        let page        = PageDescription { number: 3, size: (570.0, 570.0), background: Color::white() };
        let events      = vec![
            MetafileEvent::BeginPage(page),
            MetafileEvent::Draw(Draw::NewPath),
            MetafileEvent::EndFrame,
            MetafileEvent::EndPage
        ];

        let mut encoded = String::new();
        events.iter().for_each(|event| { event.encode_canvas(&mut encoded); encoded.push('\n'); });

        assert!(decode_events(&encoded) == Ok(events));
    }

    #[test]
    fn reject_invalid_character() {
        assert!(decode_events("Z") == Err(DecoderError::InvalidCharacter('Z')));
        assert!(decode_events("Nx") == Err(DecoderError::InvalidCharacter('x')));
        assert!(decode_events("LjX") == Err(DecoderError::InvalidCharacter('X')));
    }

    #[test]
    fn reject_truncated_instruction() {
        assert!(decode_events("mAAAA") == Err(DecoderError::IncompleteInstruction));
    }
}
