use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context, Result};

use tincture_css::parse_sheet;
use tincture_fill::{FillApplier, Fillable, SpanCache, StyledRegion};
use tincture_paint::coords::CornerRadii;
use tincture_paint::logging::{init_logging, LoggingConfig};
use tincture_paint::{BackgroundFill, BorderStroke, Color, Paint};

const SAMPLE_SHEET: &str = include_str!("../sheets/hover.fill");

const USAGE: &str = "usage: tincture-studio [--steps N] [--no-cache] [--log FILTER] [SHEET_FILE]";

#[derive(Debug, PartialEq)]
struct Options {
    steps: u32,
    cache: bool,
    log: Option<String>,
    sheet: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self { steps: 4, cache: true, log: None, sheet: None }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut opts = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--steps" => {
                let n = args.next().context("--steps needs a value")?;
                opts.steps = n.parse().with_context(|| format!("invalid step count {n:?}"))?;
                if opts.steps == 0 {
                    bail!("--steps must be at least 1");
                }
            }
            "--no-cache" => opts.cache = false,
            "--log" => opts.log = Some(args.next().context("--log needs a filter")?),
            "-h" | "--help" => bail!("{USAGE}"),
            flag if flag.starts_with("--") => bail!("unknown option {flag:?}\n{USAGE}"),
            path => {
                if opts.sheet.is_some() {
                    bail!("only one sheet file may be given\n{USAGE}");
                }
                opts.sheet = Some(PathBuf::from(path));
            }
        }
    }
    Ok(opts)
}

/// The element the sample sheet is written for.
fn sample_region() -> StyledRegion {
    StyledRegion::new()
        .with_text_fill(Color::from_rgb_hex(0xa0a0b0))
        .with_background(vec![
            BackgroundFill::new(Color::from_rgb_hex(0x202028)),
            BackgroundFill::new(Color::from_rgb_hex(0x2a2a3a)).radii(CornerRadii::all(4.0)),
        ])
        .with_border(vec![BorderStroke::uniform(Color::from_rgb_hex(0x444455), 1.0)])
}

fn print_frame(t: f32, region: &StyledRegion) {
    let show = |p: Option<&Paint>| p.map_or_else(|| "-".to_owned(), Paint::to_string);
    println!("  t = {t:.3}");
    println!("    text        {}", show(region.text_fill()));
    for (i, layer) in region.background().iter().enumerate() {
        println!("    background  [{i}] {}", layer.paint);
    }
    for (i, stroke) in region.border().iter().enumerate() {
        let [top, right, bottom, left] = &stroke.paints;
        println!("    border      [{i}] {top} {right} {bottom} {left}");
    }
}

fn main() -> Result<()> {
    let opts = parse_args(std::env::args().skip(1))?;
    init_logging(LoggingConfig { env_filter: opts.log.clone(), ..LoggingConfig::default() });

    let env_disabled = std::env::var("TINCTURE_SPAN_CACHE").is_ok_and(|v| v == "0");
    if !opts.cache || env_disabled {
        SpanCache::global().set_enabled(false);
    }

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║          TINCTURE STUDIO v0.1          ║");
    println!("  ║   fill sheets  ·  span interpolation   ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let (name, src) = match &opts.sheet {
        Some(path) => {
            let src = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (path.display().to_string(), src)
        }
        None => ("built-in hover sample".to_owned(), SAMPLE_SHEET.to_owned()),
    };
    let sheet = parse_sheet(&src).with_context(|| format!("failed to parse {name}"))?;
    let fill = sheet.to_fill();
    log::info!("loaded {name}: special={} spans={}", fill.has_special(), fill.has_fill_spans());

    let region = Rc::new(RefCell::new(sample_region().with_fill(fill)));
    let mut applier = FillApplier::bind(region);

    for i in 0..=opts.steps {
        let t = i as f32 / opts.steps as f32;
        applier.interpolate_and_apply(t);
        print_frame(t, &applier.element().borrow());
    }

    let cache = SpanCache::global();
    log::info!(
        "span cache {}: {} spans, {} border spans",
        if cache.is_enabled() { "enabled" } else { "disabled" },
        cache.len(),
        cache.border_len()
    );
    println!();
    Ok(())
}
