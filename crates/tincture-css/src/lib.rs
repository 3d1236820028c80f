//! Lexer and parser for **fill sheets**, the small declaration language that
//! describes what an element's paints transition between.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`error`] | `ParseError`, `ParseErrorKind` |
//! | [`lexer`] | `Lexer`, `Token` |
//! | [`parser`] | `parse_sheet`, `parse_half`, `parse_border_half`, `parse_color` |
//! | [`sheet`] | `FillSheet` |
//!
//! # Quick start
//!
//! ```rust
//! use tincture_css::parse_sheet;
//!
//! let src = r#"
//!     text-from: text;
//!     text-to: #ffffff;
//!     background-to: bg[1], #202030;   // outermost first
//!     border-from: #000 #333;          // top/bottom, right/left
//! "#;
//!
//! let fill = parse_sheet(src).unwrap().to_fill();
//! assert!(fill.has_special());
//! assert_eq!(fill.background().map(|b| b.len()), Some(2));
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod sheet;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{parse_border_half, parse_color, parse_half, parse_sheet};
pub use sheet::FillSheet;

use tincture_fill::{FillSpanHalf, Placeholder};
use tincture_paint::Color;

/// Like [`parse_half`], but logs the error and falls back to `skip`, which
/// leaves the slot's current paint in place.
pub fn parse_half_or_default(src: &str) -> FillSpanHalf {
    parse_half(src).unwrap_or_else(|e| {
        log::warn!("{e}; using `skip` for {src:?}");
        Placeholder::Skip.into()
    })
}

/// Like [`parse_color`], but logs the error and falls back to opaque black.
pub fn parse_color_or_black(src: &str) -> Color {
    parse_color(src).unwrap_or_else(|e| {
        log::warn!("{e}; using black for {src:?}");
        Color::BLACK
    })
}

#[cfg(test)]
mod parse_tests {
    use super::*;
    use tincture_fill::{BorderSpan, ColorSpan, SpanEnd};
    use tincture_paint::logging::{init_logging, LoggingConfig};
    use tincture_paint::{Paint, Side};

    fn ok(src: &str) { parse_sheet(src).unwrap(); }
    fn err(src: &str) { parse_sheet(src).unwrap_err(); }

    #[test] fn empty_sheet() { assert!(parse_sheet("").unwrap().is_empty()); }
    #[test] fn single_text_decl() { ok("text-from: #000; text-to: #fff;"); }
    #[test] fn semicolons_optional() { ok("text-from: #000 text-to: #fff"); }
    #[test] fn block_comment() { ok("/* a */ shape-from: shape /* b */; shape-to: #123456"); }
    #[test] fn line_comment() { ok("// header\nstroke-to: stroke // tail\n"); }
    #[test] fn color_3digit() { ok("text-to: #abc"); }
    #[test] fn color_8digit() { ok("text-to: #aabbccdd"); }
    #[test] fn background_list() { ok("background-from: bg[2], bg[1], bg; background-to: #000, #111, #222;"); }
    #[test] fn border_entries() { ok("border-from: border; border-to: #000 #111 #222 #333, border[0:left];"); }
    #[test] fn gradient_value() {
        ok("background-to: linear-gradient(from 0% 0% to 0% 100%, #fff 0%, #000 100%);");
    }
    #[test] fn err_unknown_property() { err("color-to: #fff;"); }
    #[test] fn err_missing_side_suffix() { err("text: #fff;"); }
    #[test] fn err_bad_color() { err("text-to: #xyz;"); }
    #[test] fn err_unknown_side() { err("border-to: border[0:middle];"); }
    #[test] fn err_double_colon() { err("text-to: : #fff;"); }
    #[test] fn err_list_on_single_slot() { err("text-to: #fff, #000;"); }

    #[test]
    fn error_positions_point_at_the_problem() {
        let e = parse_sheet("text-from: #000;\ntext-to: wat;").unwrap_err();
        assert_eq!((e.line, e.col), (2, 10));
        assert_eq!(e.kind, ParseErrorKind::Syntax);
        assert!(e.to_string().starts_with("fill syntax error at 2:10"));
    }

    #[test]
    fn later_declarations_win() {
        let sheet = parse_sheet("text-to: #000; text-to: #fff;").unwrap();
        assert_eq!(sheet.to.text, Some(SpanEnd::from(Paint::solid(Color::WHITE))));
    }

    #[test]
    fn sheet_assembles_from_innermost() {
        let fill = parse_sheet("background-from: #000, #f00; background-to: #00f;").unwrap().to_fill();
        let bg = fill.background().unwrap();
        assert_eq!(bg.len(), 2);
        assert_eq!(bg[0], ColorSpan::constant(Color::BLACK));
        assert_eq!(bg[1], ColorSpan::new(Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 0.0, 1.0)));
    }

    #[test]
    fn border_sheet_collapses() {
        let fill = parse_sheet("border-from: #000; border-to: #fff #fff;").unwrap().to_fill();
        let border = &fill.border().unwrap()[0];
        assert!(border.is_uniform());
        assert_eq!(border, &BorderSpan::uniform(ColorSpan::new(Color::BLACK, Color::WHITE)));
        assert_eq!(border.side(Side::Left).interpolate(1.0), Paint::solid(Color::WHITE));
    }

    #[test]
    fn lenient_helpers_fall_back() {
        init_logging(LoggingConfig::for_tests());
        assert_eq!(parse_half_or_default("bg["), SpanEnd::from(Placeholder::Skip));
        assert_eq!(parse_half_or_default("bg[1]"), SpanEnd::from(Placeholder::background_at(1)));
        assert_eq!(parse_color_or_black("nope"), Color::BLACK);
        assert_eq!(parse_color_or_black("#ffffff"), Color::WHITE);
    }
}
