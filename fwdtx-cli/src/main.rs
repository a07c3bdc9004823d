#![forbid(unsafe_code)]

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fwdtx::{BitDepth, Flip, TxSize, TxType, fwd_txfm2d_flipped, fwd_txfm2d_reference};

#[derive(Parser)]
#[command(name = "fwdtx")]
#[command(about = "Fixed-point forward DCT/ADST transforms for 4x4 and 8x8 residual blocks")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a residual block read as whitespace-separated integers
    Transform {
        /// Input file; stdin when omitted
        input: Option<PathBuf>,

        #[arg(long, default_value = "4", value_parser = parse_size)]
        size: TxSize,

        #[arg(long, value_enum, default_value_t = TxTypeArg::DctDct)]
        tx_type: TxTypeArg,

        #[arg(long, default_value = "8", value_parser = parse_bit_depth)]
        bit_depth: BitDepth,

        /// Samples per input row (defaults to the block width)
        #[arg(long)]
        stride: Option<usize>,

        #[arg(long)]
        flipud: bool,

        #[arg(long)]
        fliplr: bool,

        /// Run the scalar reference and report its peak intermediate magnitude
        #[arg(long)]
        reference: bool,
    },

    /// Print the cosine table for one precision
    Table {
        #[arg(long, default_value = "13")]
        cos_bit: u8,
    },

    /// Print the configuration record for a type and size
    Config {
        #[arg(long, default_value = "4", value_parser = parse_size)]
        size: TxSize,

        #[arg(long, value_enum, default_value_t = TxTypeArg::DctDct)]
        tx_type: TxTypeArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TxTypeArg {
    DctDct,
    AdstDct,
    DctAdst,
    AdstAdst,
}

impl From<TxTypeArg> for TxType {
    fn from(arg: TxTypeArg) -> Self {
        match arg {
            TxTypeArg::DctDct => TxType::DctDct,
            TxTypeArg::AdstDct => TxType::AdstDct,
            TxTypeArg::DctAdst => TxType::DctAdst,
            TxTypeArg::AdstAdst => TxType::AdstAdst,
        }
    }
}

fn parse_size(s: &str) -> Result<TxSize, String> {
    let n: usize = s.parse().map_err(|_| format!("invalid size: {s}"))?;
    match TxSize::try_from(n) {
        Ok(size) if TxSize::SUPPORTED.contains(&size) => Ok(size),
        _ => Err(format!("unsupported size: {n} (expected 4 or 8)")),
    }
}

fn parse_bit_depth(s: &str) -> Result<BitDepth, String> {
    let v: u8 = s.parse().map_err(|_| format!("invalid bit depth: {s}"))?;
    BitDepth::try_from(v).map_err(|e| e.to_string())
}

fn read_residuals(input: Option<&PathBuf>) -> anyhow::Result<Vec<i16>> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    text.split_whitespace()
        .map(|tok| {
            tok.parse::<i16>()
                .with_context(|| format!("invalid residual: {tok}"))
        })
        .collect()
}

fn print_grid(values: &[i32], n: usize) {
    let width = values
        .iter()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);
    for row in values.chunks(n) {
        let line: Vec<String> = row.iter().map(|v| format!("{v:>width$}")).collect();
        println!("{}", line.join(" "));
    }
}

fn cmd_transform(
    input: Option<PathBuf>,
    size: TxSize,
    tx_type: TxType,
    bd: BitDepth,
    stride: Option<usize>,
    flip: Flip,
    reference: bool,
) -> anyhow::Result<()> {
    let n = size.width();
    let stride = stride.unwrap_or(n);
    if stride < n {
        bail!("stride {stride} is shorter than the block width {n}");
    }

    let residuals = read_residuals(input.as_ref())?;
    let needed = (n - 1) * stride + n;
    if residuals.len() < needed {
        bail!(
            "expected at least {needed} residuals for a {n}x{n} block at stride {stride}, got {}",
            residuals.len()
        );
    }

    let limit = bd.max_residual();
    for r in 0..n {
        for &v in &residuals[r * stride..r * stride + n] {
            if !(-limit..=limit).contains(&v) {
                bail!("residual {v} outside the {}-bit range", bd.bits());
            }
        }
    }

    debug!(?size, ?tx_type, ?bd, stride, ?flip, "transforming block");

    if reference {
        let out = fwd_txfm2d_reference(&residuals, stride, tx_type, size, bd, flip);
        print_grid(&out.coeffs, n);
        println!("peak intermediate magnitude: {}", out.peak.magnitude);
        if !out.peak.fits_i32() {
            bail!("intermediate values exceed the 32-bit range");
        }
    } else {
        let out = fwd_txfm2d_flipped(&residuals, stride, tx_type, size, bd, flip);
        print_grid(&out, n);
    }
    Ok(())
}

fn cmd_table(cos_bit: u8) -> anyhow::Result<()> {
    let table = fwdtx::try_cospi(cos_bit)?;
    info!(cos_bit, "cosine table");
    for (k, row) in table.chunks(8).enumerate() {
        let line: Vec<String> = row.iter().map(|v| format!("{v:>6}")).collect();
        println!("{:>2}: {}", k * 8, line.join(" "));
    }
    Ok(())
}

fn cmd_config(size: TxSize, tx_type: TxType) -> anyhow::Result<()> {
    let cfg = fwdtx::try_fwd_txfm_config(tx_type, size)?;
    println!("tx_type:            {:?}", cfg.tx_type);
    println!("tx_size:            {:?}", cfg.tx_size);
    println!("column kernel:      {:?}", cfg.txfm_type_col);
    println!("row kernel:         {:?}", cfg.txfm_type_row);
    println!("input_shift:        {}", cfg.input_shift);
    println!("column_round_shift: {}", cfg.column_round_shift);
    println!("row_round_shift:    {}", cfg.row_round_shift);
    println!("column_precision:   {}", cfg.column_precision);
    println!("row_precision:      {}", cfg.row_precision);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Transform {
            input,
            size,
            tx_type,
            bit_depth,
            stride,
            flipud,
            fliplr,
            reference,
        } => cmd_transform(
            input,
            size,
            tx_type.into(),
            bit_depth,
            stride,
            Flip {
                ud: flipud,
                lr: fliplr,
            },
            reference,
        ),
        Commands::Table { cos_bit } => cmd_table(cos_bit),
        Commands::Config { size, tx_type } => cmd_config(size, tx_type.into()),
    }
}
