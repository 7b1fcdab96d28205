use std::io::{self, Write};

use clap::{ArgAction, Parser, Subcommand};
use lunar_toolkit::coords::{GeoCoordinate, cartesian_to_spherical, spherical_to_cartesian};
use lunar_toolkit::export::curve;
use lunar_toolkit::geometry::arc_points;
use lunar_toolkit::logging;
use lunar_toolkit::shapes::Sphere;
use lunar_toolkit::vector::Point3;

/// Quick coordinate conversions on a sphere centered at the origin.
#[derive(Parser, Debug)]
#[command(author, version, about = "Sphere coordinate helper")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Latitude/longitude (degrees) to Cartesian x y z
    ToXyz {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
    },
    /// Cartesian point to latitude/longitude (degrees)
    ToLatlon {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long, allow_hyphen_values = true)]
        z: f64,
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
    },
    /// Surface arc between two "lat lon" coordinates, as CSV on stdout
    Arc {
        #[arg(long, allow_hyphen_values = true)]
        from: GeoCoordinate,
        #[arg(long, allow_hyphen_values = true)]
        to: GeoCoordinate,
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
        #[arg(long, default_value_t = 32)]
        segments: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::ToXyz { lat, lon, radius } => {
            let p = spherical_to_cartesian(lat, lon, radius);
            writeln!(out, "{:.9} {:.9} {:.9}", p.x, p.y, p.z)?;
        }
        Command::ToLatlon { x, y, z, radius } => {
            let sphere = Sphere::centered(radius)?;
            let coordinate = cartesian_to_spherical(Point3::new(x, y, z), sphere.radius());
            writeln!(
                out,
                "{:.9} {:.9}",
                coordinate.latitude_deg, coordinate.longitude_deg
            )?;
        }
        Command::Arc {
            from,
            to,
            radius,
            segments,
        } => {
            let sphere = Sphere::centered(radius)?;
            let (start, end) = (from.to_point(&sphere), to.to_point(&sphere));
            let points = arc_points(start, end, &sphere, segments)?;
            curve::write_points(&mut out, &points)?;
        }
    }
    Ok(())
}
