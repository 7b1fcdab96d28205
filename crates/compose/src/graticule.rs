use lunar_config::Rgba;
use lunar_coords::{GraticuleSpec, graticule};
use lunar_core::Sphere;
use lunar_orientation::facing_outward;
use tracing::debug;

use crate::ComposeError;
use crate::composer::{Group, SceneComposer};
use crate::host::{Pose, Primitive, SceneHost};
use crate::style::{GRATICULE_BEVEL_FRACTION, GREEN, LABEL_SIZE_FRACTION, Style};

/// Replace the graticule group with meridian and parallel curves, optionally labelled.
///
/// Labels sit at each line's anchor and face away from the sphere center. Returns the number of
/// lines drawn.
pub fn draw_graticule<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    sphere: &Sphere,
    spec: &GraticuleSpec,
    labels: bool,
    color: Rgba,
) -> Result<usize, ComposeError> {
    composer.clear_group(Group::Graticule)?;
    let lines = graticule(sphere, spec)?;
    let line_style = Style::new("GraticuleMaterial", color);
    let label_style = Style::new("GraticuleLabelMaterial", GREEN);
    let bevel = sphere.radius() * GRATICULE_BEVEL_FRACTION;

    for line in &lines {
        let name = line.name();
        composer.polyline(
            Group::Graticule,
            &name,
            line.points.clone(),
            line.cyclic,
            bevel,
            &line_style,
        )?;
        if !labels {
            continue;
        }
        let label_name = format!("{name}_Label");
        let orientation =
            facing_outward(line.label_anchor - sphere.center()).map_err(ComposeError::from);
        let Some(orientation) = composer.or_skip(&label_name, orientation)? else {
            continue;
        };
        let label = Primitive::Label {
            text: line.label(),
            pose: Pose::new(line.label_anchor, orientation),
            size: sphere.radius() * LABEL_SIZE_FRACTION,
        };
        composer.upsert(Group::Graticule, &label_name, label, &label_style)?;
    }
    debug!(lines = lines.len(), labels, "graticule drawn");
    Ok(lines.len())
}
