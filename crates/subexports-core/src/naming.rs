//! Path strings for published artifacts
//!
//! Everything here works on `/`-separated strings rather than `Path`s: the
//! results end up in `package.json` and in JavaScript specifiers, which use
//! `/` on every platform.

/// Prefix a path with `./` unless it is already explicitly relative
pub fn to_relative(path: &str) -> String {
    if path.starts_with("./") || path.starts_with("../") {
        path.to_string()
    } else {
        format!("./{}", path)
    }
}

/// Join an entry file name onto the output directory
pub fn in_outdir(outdir: &str, file_name: &str) -> String {
    format!("{}/{}", outdir.trim_end_matches('/'), file_name)
}

/// Specifier for `target` as seen from the root shim of entry `name`
///
/// Top-level entries get `./target`; nested entries such as `utils/fs`
/// climb back to the project root with one `../` per directory.
pub fn shim_specifier(name: &str, target: &str) -> String {
    match name.matches('/').count() {
        0 => to_relative(target),
        depth => format!("{}{}", "../".repeat(depth), target),
    }
}
