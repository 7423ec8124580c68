//! STEP (ISO 10303-21) placeholder writer
//!
//! Emits a valid exchange-file envelope with an empty DATA section. The
//! geometry type and bounding box travel in comments so downstream tools can
//! rebuild the envelope.

use std::io::Write;

use crate::entities::Geometry;
use crate::export::ExportError;

/// Escape a string for a STEP string literal
fn step_string(s: &str) -> String {
    s.replace('\'', "''")
}

pub fn write_step_shell<W: Write>(geometry: &Geometry, name: &str, mut writer: W) -> Result<(), ExportError> {
    let bbox = geometry.bounding_box();

    writeln!(writer, "ISO-10303-21;")?;
    writeln!(writer, "HEADER;")?;
    writeln!(
        writer,
        "FILE_DESCRIPTION(('partwise bounding-box placeholder'),'2;1');"
    )?;
    writeln!(
        writer,
        "FILE_NAME('{}.step','',(''),(''),'partwise {}','','');",
        step_string(name),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(writer, "FILE_SCHEMA(('AUTOMOTIVE_DESIGN'));")?;
    writeln!(writer, "ENDSEC;")?;
    writeln!(writer, "/* geometry: {} */", geometry.kind())?;
    writeln!(
        writer,
        "/* bounding box: {} x {} x {} mm */",
        bbox.length, bbox.width, bbox.height
    )?;
    writeln!(writer, "/* volume: {} mm3 */", bbox.volume)?;
    writeln!(writer, "DATA;")?;
    writeln!(writer, "ENDSEC;")?;
    writeln!(writer, "END-ISO-10303-21;")?;

    Ok(())
}
