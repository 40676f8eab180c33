//! Asset file naming and per-run collision tracking

use crate::utils::to_kebab_case;
use std::collections::HashMap;
use std::sync::Mutex;

/// Build a sanitized file name for an exported asset.
///
/// The node name is normalized to kebab-case, falling back to the node ID
/// when the name is empty and to the literal `"asset"` when normalization
/// leaves nothing. Raster formats at scale > 1 get an `@{scale}x` suffix;
/// vector formats never do, being scale-invariant by construction.
///
/// This is a pure function: collision handling lives in [`NameRegistry`].
pub(crate) fn build_file_name(node_name: &str, node_id: &str, format: &str, scale: f64) -> String {
    let name = if node_name.is_empty() { node_id } else { node_name };

    let mut name = to_kebab_case(name);
    if name.is_empty() {
        name = "asset".to_string();
    }

    let scale_suffix = if scale > 1.0 && format != "svg" && format != "pdf" {
        format!("@{scale}x")
    } else {
        String::new()
    };

    format!("{name}{scale_suffix}.{format}")
}

/// Per-run registry enforcing unique file names across all export phases.
///
/// Collision resolution depends on a strictly serialized check-then-register
/// sequence, so the map lives behind one lock shared by all concurrent
/// downloads. Which physical node receives the bare name and which the `-2`
/// suffix depends on completion order and is deliberately unspecified; only
/// run-wide uniqueness is guaranteed.
#[derive(Debug, Default)]
pub(crate) struct NameRegistry {
    used: Mutex<HashMap<String, u32>>,
}

impl NameRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Claim a file name, rewriting on collision.
    ///
    /// A colliding candidate is rewritten to `{base}-{n}{ext}` where `n` is
    /// the occurrence count of the *candidate* name; the rewritten name is
    /// then claimed through the same map, so collisions on rewritten names
    /// are tracked independently of their original base.
    pub(crate) fn claim(&self, candidate: String) -> String {
        let mut used = self.used.lock().unwrap_or_else(|e| e.into_inner());

        let mut name = candidate;
        loop {
            match used.get_mut(&name) {
                None => {
                    used.insert(name.clone(), 1);
                    return name;
                }
                Some(count) => {
                    *count += 1;
                    let occurrence = *count;
                    let (base, ext) = split_extension(&name);
                    name = format!("{base}-{occurrence}{ext}");
                }
            }
        }
    }
}

/// Split `"header.png"` into `("header", ".png")`; names without a dot keep
/// an empty extension
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => (&name[..idx], &name[idx..]),
        None => (name, ""),
    }
}
