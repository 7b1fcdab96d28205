//! Export helpers for CSV polylines and JSON scene snapshots.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod curve {
    use std::collections::BTreeSet;
    use std::io::{self, Write};

    use lunar_core::Point3;

    pub use super::writer_for_path;

    const HEADER: &str = "index,x,y,z";

    /// Write the polyline CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row for one polyline vertex.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub index: usize,
        pub point: Point3,
    }

    impl Record {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{:.9},{:.9},{:.9}",
                self.index, self.point.x, self.point.y, self.point.z
            )
        }
    }

    /// Write a header followed by one row per point.
    pub fn write_points(writer: &mut dyn Write, points: &[Point3]) -> io::Result<()> {
        write_header(writer)?;
        for (index, point) in points.iter().enumerate() {
            Record {
                index,
                point: *point,
            }
            .write_to(writer)?;
        }
        writer.flush()
    }

    /// File-system friendly stem for a host object name (`Ball Green` -> `ball_green`).
    pub fn file_stem(name: &str) -> String {
        let stem: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        if stem.is_empty() {
            "curve".to_string()
        } else {
            stem
        }
    }

    /// Hands out [`file_stem`]s that are unique within one export directory.
    ///
    /// Names that map to the same stem get `_2`, `_3`, ... in the order they are claimed.
    #[derive(Debug, Default)]
    pub struct Stems {
        taken: BTreeSet<String>,
    }

    impl Stems {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn claim(&mut self, name: &str) -> String {
            let base = file_stem(name);
            let mut stem = base.clone();
            let mut n = 2;
            while self.taken.contains(&stem) {
                stem = format!("{base}_{n}");
                n += 1;
            }
            self.taken.insert(stem.clone());
            stem
        }
    }
}

pub mod snapshot {
    use std::io::{self, Write};
    use std::path::Path;

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::writer_for_path;

    /// Metadata describing the composed scene.
    #[derive(Debug)]
    pub struct Metadata<'a> {
        pub scene: &'a str,
        pub generated_utc: &'a str,
        pub sphere_center: [f64; 3],
        pub sphere_radius: f64,
    }

    #[derive(Serialize)]
    struct Envelope<'a, T: Serialize> {
        scene: &'a str,
        generated_utc: &'a str,
        sphere_center: [f64; 3],
        sphere_radius: f64,
        contents: &'a T,
    }

    /// Write a pretty JSON snapshot envelope around `contents` (`-` writes to stdout).
    pub fn write_snapshot<T: Serialize>(
        output: &Path,
        meta: &Metadata<'_>,
        contents: &T,
    ) -> io::Result<()> {
        let envelope = Envelope {
            scene: meta.scene,
            generated_utc: meta.generated_utc,
            sphere_center: meta.sphere_center,
            sphere_radius: meta.sphere_radius,
            contents,
        };
        let mut writer = writer_for_path(output)?;
        to_writer_pretty(&mut writer, &envelope)?;
        writeln!(writer)?;
        writer.flush()
    }
}
