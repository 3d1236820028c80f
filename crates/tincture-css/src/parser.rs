use tincture_fill::{BorderFillSpanHalf, FillHalves, FillSpanHalf, Placeholder};
use tincture_paint::coords::Vec2;
use tincture_paint::{Color, ColorStop, LinearGradient, Paint, RadialGradient, Side, SpreadMode};

use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenWithPos};
use crate::sheet::FillSheet;

/// Slot a declaration targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Target {
    Text,
    Shape,
    Stroke,
    Background,
    Border,
}

/// A length as written: plain number or percentage.
#[derive(Debug, Copy, Clone)]
struct Len {
    value: f32,
    percent: bool,
}

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_pos(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| (t.line, t.col))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn peek_ahead(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        let (line, col) = self.current_pos();
        ParseError::syntax(msg, line, col)
    }

    /// Error located at the token just consumed.
    fn err_prev(&self, msg: impl Into<String>) -> ParseError {
        let (line, col) = self
            .tokens
            .get(self.pos.saturating_sub(1))
            .map(|t| (t.line, t.col))
            .unwrap_or((1, 1));
        ParseError::syntax(msg, line, col)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_token(&mut self, expected: &Token) -> Result<(), ParseError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.err(format!("expected {:?}, got {:?}", expected, self.peek())))
        }
    }

    fn expect_keyword(&mut self, word: &str) -> Result<(), ParseError> {
        match self.peek() {
            Token::Ident(s) if s == word => {
                self.advance();
                Ok(())
            }
            tok => Err(self.err(format!("expected `{word}`, got {tok:?}"))),
        }
    }

    fn peek_keyword(&self, word: &str) -> bool {
        matches!(self.peek(), Token::Ident(s) if s == word)
    }

    pub fn expect_eof(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Token::Eof => Ok(()),
            tok => Err(self.err(format!("unexpected {tok:?} after value"))),
        }
    }

    // ── Sheet ─────────────────────────────────────────────────────────────

    pub fn parse_sheet(&mut self) -> Result<FillSheet, ParseError> {
        let mut sheet = FillSheet::default();
        while self.peek() != &Token::Eof {
            self.parse_decl(&mut sheet)?;
        }
        Ok(sheet)
    }

    /// `property ':' value_list ';'?` where property is `<slot>-from` or `<slot>-to`.
    fn parse_decl(&mut self, sheet: &mut FillSheet) -> Result<(), ParseError> {
        let property = match self.advance() {
            Token::Ident(s) => s,
            tok => return Err(self.err_prev(format!("expected a property, got {tok:?}"))),
        };
        let (slot, is_from) = match property.rsplit_once('-') {
            Some((slot, "from")) => (slot, true),
            Some((slot, "to")) => (slot, false),
            _ => return Err(self.err_prev(format!("unknown property {property:?}"))),
        };
        let target = match slot {
            "text" => Target::Text,
            "shape" => Target::Shape,
            "stroke" => Target::Stroke,
            "background" => Target::Background,
            "border" => Target::Border,
            _ => return Err(self.err_prev(format!("unknown property {property:?}"))),
        };
        self.expect_token(&Token::Colon)?;

        let halves: &mut FillHalves = if is_from { &mut sheet.from } else { &mut sheet.to };
        match target {
            Target::Text | Target::Shape | Target::Stroke => {
                let half = self.parse_half()?;
                let slot = match target {
                    Target::Text => &mut halves.text,
                    Target::Shape => &mut halves.shape,
                    _ => &mut halves.stroke,
                };
                *slot = Some(half);
            }
            Target::Background => {
                let mut list = vec![self.parse_half()?];
                while self.eat(&Token::Comma) {
                    list.push(self.parse_half()?);
                }
                halves.background = list;
            }
            Target::Border => {
                let mut list = vec![self.parse_border_entry()?];
                while self.eat(&Token::Comma) {
                    list.push(self.parse_border_entry()?);
                }
                halves.border = list;
            }
        }

        if !self.eat(&Token::Semicolon) && !matches!(self.peek(), Token::Eof | Token::Ident(_)) {
            return Err(self.err(format!("expected `;`, got {:?}", self.peek())));
        }
        Ok(())
    }

    /// One to four halves separated by whitespace.
    pub fn parse_border_entry(&mut self) -> Result<BorderFillSpanHalf, ParseError> {
        let mut values = vec![self.parse_half()?];
        while values.len() < 4 && self.at_half_start() {
            values.push(self.parse_half()?);
        }
        BorderFillSpanHalf::from_values(&values).ok_or_else(|| self.err("a border entry takes 1 to 4 values"))
    }

    /// True when the next token starts another value rather than the next
    /// declaration.
    fn at_half_start(&self) -> bool {
        match self.peek() {
            Token::Color(_) => true,
            Token::Ident(_) => self.peek_ahead(1) != &Token::Colon,
            _ => false,
        }
    }

    // ── Values ────────────────────────────────────────────────────────────

    pub fn parse_half(&mut self) -> Result<FillSpanHalf, ParseError> {
        match self.advance() {
            Token::Color([r, g, b, a]) => Ok(Paint::solid(Color::from_srgb_u8(r, g, b, a)).into()),
            Token::Ident(word) => match word.as_str() {
                "transparent" => Ok(Paint::transparent().into()),
                "text" => Ok(Placeholder::Text.into()),
                "shape" => Ok(Placeholder::Shape.into()),
                "stroke" => Ok(Placeholder::Stroke.into()),
                "skip" => Ok(Placeholder::Skip.into()),
                "bg" => self.parse_bg_suffix(),
                "border" => self.parse_border_suffix(),
                "linear-gradient" => Ok(Paint::from(self.parse_linear()?).into()),
                "radial-gradient" => Ok(Paint::from(self.parse_radial()?).into()),
                _ => Err(self.err_prev(format!("unknown value {word:?}"))),
            },
            tok => Err(self.err_prev(format!("expected a color, special or gradient, got {tok:?}"))),
        }
    }

    pub fn parse_color(&mut self) -> Result<Color, ParseError> {
        match self.advance() {
            Token::Color([r, g, b, a]) => Ok(Color::from_srgb_u8(r, g, b, a)),
            Token::Ident(w) if w == "transparent" => Ok(Color::TRANSPARENT),
            tok => Err(self.err_prev(format!("expected a color, got {tok:?}"))),
        }
    }

    fn parse_index(&mut self) -> Result<u8, ParseError> {
        match self.advance() {
            Token::Number(n) if n.fract() == 0.0 && (0.0..=255.0).contains(&n) => Ok(n as u8),
            tok => Err(self.err_prev(format!("expected an index in 0..=255, got {tok:?}"))),
        }
    }

    /// `bg` already consumed; optional `[n]`.
    fn parse_bg_suffix(&mut self) -> Result<FillSpanHalf, ParseError> {
        if !self.eat(&Token::LBracket) {
            return Ok(Placeholder::background().into());
        }
        let index = self.parse_index()?;
        self.expect_token(&Token::RBracket)?;
        Ok(Placeholder::background_at(index).into())
    }

    /// `border` already consumed; optional `[n]`, `[n:side]` or `[:side]`.
    fn parse_border_suffix(&mut self) -> Result<FillSpanHalf, ParseError> {
        if !self.eat(&Token::LBracket) {
            return Ok(Placeholder::border().into());
        }
        let index = if matches!(self.peek(), Token::Number(_)) { Some(self.parse_index()?) } else { None };
        let side = if self.eat(&Token::Colon) {
            match self.advance() {
                Token::Ident(s) => match Side::from_name(&s) {
                    Some(side) => Some(side),
                    None => return Err(self.err_prev(format!("unknown border side {s:?}"))),
                },
                tok => return Err(self.err_prev(format!("expected a border side, got {tok:?}"))),
            }
        } else {
            None
        };
        self.expect_token(&Token::RBracket)?;
        Ok(Placeholder::Border { index, side }.into())
    }

    // ── Gradients ─────────────────────────────────────────────────────────

    fn parse_number(&mut self) -> Result<f32, ParseError> {
        match self.advance() {
            Token::Number(n) => Ok(n),
            tok => Err(self.err_prev(format!("expected a number, got {tok:?}"))),
        }
    }

    fn parse_len(&mut self) -> Result<Len, ParseError> {
        match self.advance() {
            Token::Number(n) => Ok(Len { value: n, percent: false }),
            Token::Percent(n) => Ok(Len { value: n / 100.0, percent: true }),
            tok => Err(self.err_prev(format!("expected a length, got {tok:?}"))),
        }
    }

    fn parse_point(&mut self) -> Result<(Vec2, bool), ParseError> {
        let x = self.parse_len()?;
        let y = self.parse_len()?;
        if x.percent != y.percent {
            return Err(self.err_prev("cannot mix percent and absolute lengths"));
        }
        Ok((Vec2::new(x.value, y.value), x.percent))
    }

    /// Optional `, spread` then one or more `, color offset` followed by `)`.
    fn parse_spread_and_stops(&mut self) -> Result<(SpreadMode, Vec<ColorStop>), ParseError> {
        let mut spread = SpreadMode::Pad;
        let mut stops = Vec::new();
        while self.eat(&Token::Comma) {
            let spread_word = match self.peek() {
                Token::Ident(w) if stops.is_empty() => match w.as_str() {
                    "pad" => Some(SpreadMode::Pad),
                    "repeat" => Some(SpreadMode::Repeat),
                    "reflect" => Some(SpreadMode::Reflect),
                    _ => None,
                },
                _ => None,
            };
            if let Some(s) = spread_word {
                self.advance();
                spread = s;
                continue;
            }
            let color = self.parse_color()?;
            let offset = self.parse_len()?;
            stops.push(ColorStop::new(offset.value, color));
        }
        self.expect_token(&Token::RParen)?;
        if stops.is_empty() {
            return Err(self.err_prev("a gradient needs at least one stop"));
        }
        Ok((spread, stops))
    }

    /// `linear-gradient` already consumed.
    fn parse_linear(&mut self) -> Result<LinearGradient, ParseError> {
        self.expect_token(&Token::LParen)?;
        self.expect_keyword("from")?;
        let (start, p0) = self.parse_point()?;
        self.expect_keyword("to")?;
        let (end, p1) = self.parse_point()?;
        if p0 != p1 {
            return Err(self.err_prev("cannot mix percent and absolute lengths"));
        }
        let (spread, stops) = self.parse_spread_and_stops()?;
        Ok(LinearGradient::new(start, end, stops).proportional(p0).spread(spread))
    }

    /// `radial-gradient` already consumed.
    fn parse_radial(&mut self) -> Result<RadialGradient, ParseError> {
        self.expect_token(&Token::LParen)?;
        let mut focus_angle = 0.0;
        let mut focus_distance = 0.0;
        if self.peek_keyword("focus-angle") {
            self.advance();
            focus_angle = self.parse_number()?;
            self.expect_token(&Token::Comma)?;
        }
        if self.peek_keyword("focus-distance") {
            self.advance();
            focus_distance = self.parse_number()?;
            self.expect_token(&Token::Comma)?;
        }
        self.expect_keyword("center")?;
        let (center, proportional) = self.parse_point()?;
        self.expect_token(&Token::Comma)?;
        self.expect_keyword("radius")?;
        let radius = self.parse_len()?;
        if radius.percent != proportional {
            return Err(self.err_prev("cannot mix percent and absolute lengths"));
        }
        let (spread, stops) = self.parse_spread_and_stops()?;
        Ok(RadialGradient::new(center, radius.value, stops)
            .focus(focus_angle, focus_distance)
            .proportional(proportional)
            .spread(spread))
    }
}

// ── Public parse entry points ─────────────────────────────────────────────

/// Parse a fill sheet into its from/to halves.
pub fn parse_sheet(src: &str) -> Result<FillSheet, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_sheet()
}

/// Parse a single value such as `bg[1]` or `#ff8800`.
pub fn parse_half(src: &str) -> Result<FillSpanHalf, ParseError> {
    let mut parser = Parser::new(Lexer::new(src).tokenize()?);
    let half = parser.parse_half()?;
    parser.expect_eof()?;
    Ok(half)
}

/// Parse one border entry of 1 to 4 values.
pub fn parse_border_half(src: &str) -> Result<BorderFillSpanHalf, ParseError> {
    let mut parser = Parser::new(Lexer::new(src).tokenize()?);
    let half = parser.parse_border_entry()?;
    parser.expect_eof()?;
    Ok(half)
}

pub fn parse_color(src: &str) -> Result<Color, ParseError> {
    let mut parser = Parser::new(Lexer::new(src).tokenize()?);
    let color = parser.parse_color()?;
    parser.expect_eof()?;
    Ok(color)
}
