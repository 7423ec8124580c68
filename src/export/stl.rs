//! ASCII STL writer for bounding-box placeholder meshes

use std::io::Write;

use crate::entities::Geometry;
use crate::export::ExportError;

/// Box faces as corner quads, counter-clockwise seen from outside.
/// Corner `i` sits at (x, y, z) = (bit 0, bit 1, bit 2) of `i`.
const FACES: [([f64; 3], [usize; 4]); 6] = [
    ([0.0, 0.0, -1.0], [0, 2, 3, 1]),
    ([0.0, 0.0, 1.0], [4, 5, 7, 6]),
    ([0.0, -1.0, 0.0], [0, 1, 5, 4]),
    ([0.0, 1.0, 0.0], [2, 6, 7, 3]),
    ([-1.0, 0.0, 0.0], [0, 4, 6, 2]),
    ([1.0, 0.0, 0.0], [1, 3, 7, 5]),
];

/// Write the geometry's bounding box as a 12-facet ASCII STL solid
/// spanning (0, 0, 0) to (length, width, height).
pub fn write_box_stl<W: Write>(geometry: &Geometry, name: &str, mut writer: W) -> Result<(), ExportError> {
    let bbox = geometry.bounding_box();
    let corner = |i: usize| {
        [
            if i & 1 != 0 { bbox.length } else { 0.0 },
            if i & 2 != 0 { bbox.width } else { 0.0 },
            if i & 4 != 0 { bbox.height } else { 0.0 },
        ]
    };

    writeln!(writer, "solid {name}")?;
    for (normal, [a, b, c, d]) in FACES {
        for triangle in [[a, b, c], [a, c, d]] {
            let [nx, ny, nz] = normal;
            writeln!(writer, "  facet normal {nx:e} {ny:e} {nz:e}")?;
            writeln!(writer, "    outer loop")?;
            for [x, y, z] in triangle.map(corner) {
                writeln!(writer, "      vertex {x:e} {y:e} {z:e}")?;
            }
            writeln!(writer, "    endloop")?;
            writeln!(writer, "  endfacet")?;
        }
    }
    writeln!(writer, "endsolid {name}")?;

    Ok(())
}
