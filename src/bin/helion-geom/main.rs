//! helion-geom - inspect layouts and packed geometry buffers.

use clap::{ArgAction, Parser, Subcommand};
use helion_geometry::prelude::*;
use helion_geometry::util::layout;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("HELION_BUILD_DATE"), ")");

#[derive(Parser, Debug)]
#[command(name = "helion-geom")]
#[command(version = VERSION)]
#[command(about = "Inspect geometry type layouts and packed buffer files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output (-vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only show errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print size, alignment and stride of every compute and storage type
    Layout {
        /// Emit JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },

    /// Summarize a packed buffer file
    Info {
        /// Raw little-endian f32 buffer
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Element kind: vec3, vec4, mat3, mat4
        #[arg(short, long, default_value = "vec3")]
        kind: Kind,

        /// Emit JSON instead of text
        #[arg(short, long)]
        json: bool,
    },

    /// Transform every element of a vec3/vec4 buffer
    Transform {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Element kind: vec3 or vec4
        #[arg(short, long, default_value = "vec3")]
        kind: Kind,

        /// Translation "x,y,z"
        #[arg(long, value_parser = parse_floats::<3>, allow_hyphen_values = true)]
        translate: Option<[f32; 3]>,

        /// Scale "x,y,z"
        #[arg(long, value_parser = parse_floats::<3>, allow_hyphen_values = true)]
        scale: Option<[f32; 3]>,

        /// Rotation "axis_x,axis_y,axis_z,degrees"
        #[arg(long, value_parser = parse_floats::<4>, allow_hyphen_values = true)]
        rotate: Option<[f32; 4]>,

        /// Treat vec3 elements as directions (ignore translation)
        #[arg(long)]
        direction: bool,
    },
}

fn parse_floats<const N: usize>(s: &str) -> std::result::Result<[f32; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated numbers, got {}", parts.len()));
    }
    let mut out = [0.0f32; N];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid number '{part}': {e}"))?;
    }
    Ok(out)
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Layout { json } => cmd_layout(json),
        Commands::Info { file, kind, json } => cmd_info(&file, kind, json),
        Commands::Transform {
            input,
            output,
            kind,
            translate,
            scale,
            rotate,
            direction,
        } => {
            let matrix = compose_matrix(translate, scale, rotate);
            cmd_transform(&input, &output, kind, &matrix, direction)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_layout(json: bool) -> Result<()> {
    let report = layout::report();
    if json {
        let entries: Vec<serde_json::Value> = report
            .iter()
            .map(|l| {
                serde_json::json!({
                    "type": l.type_name,
                    "kind": l.kind.name(),
                    "representation": l.representation.name(),
                    "size": l.size,
                    "align": l.align,
                    "stride": l.stride,
                    "padding": l.padding(),
                    "packed": l.is_packed(),
                })
            })
            .collect();
        println!("{}", to_pretty_json(&serde_json::Value::Array(entries))?);
        return Ok(());
    }

    for l in &report {
        println!("{l}");
    }
    Ok(())
}

/// Per-buffer summary printed by `info`.
struct Summary {
    count: usize,
    bytes: usize,
    non_finite: usize,
    bounds: Option<Bounds3>,
}

fn summarize<T: Packed>(buffer: &PackedBuffer<T>, point: impl Fn(&T) -> Option<Vec3>) -> Summary {
    let mut non_finite = 0;
    let mut bounds = Bounds3::EMPTY;
    for element in buffer.iter() {
        let components: &[f32] = bytemuck::cast_slice(std::slice::from_ref(element));
        if !components.iter().all(|c| c.is_finite()) {
            non_finite += 1;
        }
        if let Some(p) = point(element) {
            bounds.include(p);
        }
    }
    Summary {
        count: buffer.len(),
        bytes: buffer.byte_len(),
        non_finite,
        bounds: (!bounds.is_empty()).then_some(bounds),
    }
}

fn cmd_info(path: &Path, kind: Kind, json: bool) -> Result<()> {
    info!("Opening buffer: {} ({})", path.display(), kind);
    let summary = match kind {
        Kind::Vec3 => summarize(&PackedBuffer::<PackedVec3>::open(path)?, |p| Some(p.to_compute())),
        Kind::Vec4 => summarize(&PackedBuffer::<PackedVec4>::open(path)?, |p| {
            Some(p.to_compute().truncate())
        }),
        Kind::Mat3 => summarize(&PackedBuffer::<PackedMat3>::open(path)?, |_| None),
        Kind::Mat4 => summarize(&PackedBuffer::<PackedMat4>::open(path)?, |_| None),
    };
    if summary.non_finite > 0 {
        warn!("{} element(s) contain NaN or infinite components", summary.non_finite);
    }

    if json {
        let bounds = summary.bounds.map(|b| {
            serde_json::json!({
                "min": b.min.to_array(),
                "max": b.max.to_array(),
            })
        });
        let value = serde_json::json!({
            "file": path.display().to_string(),
            "kind": kind.name(),
            "count": summary.count,
            "bytes": summary.bytes,
            "stride": kind.num_bytes(),
            "non_finite": summary.non_finite,
            "bounds": bounds,
        });
        println!("{}", to_pretty_json(&value)?);
        return Ok(());
    }

    println!("File:       {}", path.display());
    println!("Kind:       {} ({} bytes per element)", kind, kind.num_bytes());
    println!("Elements:   {}", summary.count);
    println!("Bytes:      {}", summary.bytes);
    println!("Non-finite: {}", summary.non_finite);
    if let Some(b) = summary.bounds {
        println!("Bounds min: {:?}", b.min.to_array());
        println!("Bounds max: {:?}", b.max.to_array());
    }
    Ok(())
}

/// `translate * rotate * scale`, identity for anything omitted.
fn compose_matrix(
    translate: Option<[f32; 3]>,
    scale: Option<[f32; 3]>,
    rotate: Option<[f32; 4]>,
) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    if let Some(t) = translate {
        m *= Mat4::from_translation(Vec3::from_array(t));
    }
    if let Some([x, y, z, degrees]) = rotate {
        let axis = Vec3::new(x, y, z).normalize();
        m *= Mat4::from_axis_angle(axis, degrees.to_radians());
    }
    if let Some(s) = scale {
        m *= Mat4::from_scale(Vec3::from_array(s));
    }
    m
}

fn cmd_transform(input: &Path, output: &Path, kind: Kind, matrix: &Mat4, direction: bool) -> Result<()> {
    if !matrix.is_finite() {
        return Err(Error::other("transform matrix is not finite (zero rotation axis?)"));
    }
    debug!("matrix (rows): {:?}", matrix.to_rows_array());
    let m = *matrix;

    let count = match kind {
        Kind::Vec3 => {
            let mut buffer = PackedBuffer::<PackedVec3>::open(input)?;
            if direction {
                buffer.par_map_in_place(|v| m.transform_vector3(v));
            } else {
                buffer.par_map_in_place(|p| m.transform_point3(p));
            }
            buffer.save(output)?;
            buffer.len()
        }
        Kind::Vec4 => {
            if direction {
                warn!("--direction ignored for vec4; w is taken from the data");
            }
            let mut buffer = PackedBuffer::<PackedVec4>::open(input)?;
            buffer.par_map_in_place(|v| m * v);
            buffer.save(output)?;
            buffer.len()
        }
        Kind::Mat3 | Kind::Mat4 => {
            return Err(Error::other(format!("transform supports vec3 and vec4, not {kind}")));
        }
    };

    info!("Transformed {} {} element(s) -> {}", count, kind, output.display());
    Ok(())
}

fn to_pretty_json(value: &serde_json::Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::other(e.to_string()))
}
