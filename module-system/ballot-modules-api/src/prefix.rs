use ballot_state::Prefix;

const SEPARATOR: u8 = b'/';

/// The prefix of the state container `field` of a module:
/// `<module_path>/<module_name>/<field>/`.
///
/// Modules build their prefixes with `module_path!()`, so two modules, or two
/// fields of one module, never share a key space.
pub fn storage_prefix(module_path: &str, module_name: &str, field: &str) -> Prefix {
    let segments = [module_path, module_name, field];
    let mut bytes = Vec::with_capacity(segments.iter().map(|s| s.len() + 1).sum());
    for segment in segments {
        bytes.extend_from_slice(segment.as_bytes());
        bytes.push(SEPARATOR);
    }
    Prefix::new(bytes)
}
