use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use structopt::StructOpt;

use juliox::complex::c;
use juliox::painter::{GreyscalePainter, Painter};
use juliox::{DivergenceConfig, Region, Strategy};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "juliox-imagegen",
    about = "Render the escape-time map of a Julia set to a grayscale PNG"
)]
struct Opt {
    #[structopt(long, default_value = "-0.1", allow_hyphen_values = true)]
    left: f64,
    #[structopt(long, default_value = "0.1", allow_hyphen_values = true)]
    right: f64,
    #[structopt(long, default_value = "0.1", allow_hyphen_values = true)]
    top: f64,
    #[structopt(long, default_value = "-0.1", allow_hyphen_values = true)]
    bottom: f64,

    /// Real part of c
    #[structopt(long, default_value = "-0.835", allow_hyphen_values = true)]
    re: f64,
    /// Imaginary part of c
    #[structopt(long, default_value = "-0.2321", allow_hyphen_values = true)]
    im: f64,

    /// Horizontal resolution; the vertical one follows the region's aspect ratio
    #[structopt(short, long, default_value = "4000")]
    resolution: u32,
    #[structopt(long, default_value = "2.0")]
    threshold: f64,
    #[structopt(long, default_value = "20")]
    itermin: u32,
    #[structopt(long, default_value = "100")]
    itermax: u32,

    /// scalar, array or simd
    #[structopt(long, default_value = "scalar")]
    strategy: Strategy,
    /// Worker threads, 0 to run on the main thread [default: physical cores]
    #[structopt(short, long)]
    threads: Option<usize>,

    /// Paint bounded points black
    #[structopt(long)]
    invert: bool,
    #[structopt(short, long, default_value = "plot.png", parse(from_os_str))]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    let region = Region::new(opt.left, opt.right, opt.top, opt.bottom);
    let mut config = DivergenceConfig::new(c(opt.re, opt.im))
        .with_threshold(opt.threshold)
        .with_window(opt.itermin, opt.itermax)
        .with_resolution(opt.resolution)
        .with_strategy(opt.strategy);
    if let Some(threads) = opt.threads {
        config = config.with_threads(threads);
    }

    let start = Instant::now();
    let map = config.over(&region)?;
    let solved = start.elapsed();

    let (width, height) = map.dim();
    let painter = if opt.invert {
        GreyscalePainter::inverted()
    } else {
        GreyscalePainter::new()
    };
    painter.save(&map, &opt.output)?;

    println!(
        "{}x{} c={} strategy={} threads={}: solved in {}ms, wrote {}",
        width,
        height,
        config.c,
        config.strategy,
        config.threads,
        solved.as_millis(),
        opt.output.display()
    );
    Ok(())
}
