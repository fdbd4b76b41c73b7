//! Distro-specific composition of the version string.

use super::parser::ReleaseRecord;

type Compose = fn(&str, &ReleaseRecord) -> Option<String>;

/// Supported `ID` values and how each renders its version.
const DISTROS: &[(&str, Compose)] = &[
    ("cos", compose_cos),
    ("debian", compose_id_version),
    ("ubuntu", compose_id_version),
    ("centos", compose_id_version),
    ("rhel", compose_id_version),
    ("ol", compose_id_version),
];

/// The human-readable `VERSION`, falling back to `VERSION_ID`.
fn version_field(record: &ReleaseRecord) -> Option<&str> {
    record
        .non_empty("VERSION")
        .or_else(|| record.non_empty("VERSION_ID"))
}

fn compose_cos(id: &str, record: &ReleaseRecord) -> Option<String> {
    let version = version_field(record)?;
    let build = record.non_empty("BUILD_ID")?;
    Some(format!("{} {}-{}", id, version, build))
}

fn compose_id_version(id: &str, record: &ReleaseRecord) -> Option<String> {
    version_field(record).map(|version| format!("{} {}", id, version))
}

/// Build the version string, or explain why the record is unusable.
pub fn compose(record: &ReleaseRecord) -> Result<String, String> {
    let id = record
        .non_empty("ID")
        .ok_or_else(|| "missing ID".to_string())?;

    let (_, render) = DISTROS
        .iter()
        .find(|(known, _)| *known == id)
        .ok_or_else(|| format!("unsupported ID {:?}", id))?;

    render(id, record).ok_or_else(|| format!("no usable version fields for ID {:?}", id))
}
