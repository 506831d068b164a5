use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to find how a sibling crate is reachable
/// from code emitted by a proc-macro.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_schema"));
/// ```
///
/// # Resolution rules
///
/// 1. If the caller is the requested crate itself, return `::crate_name`.
///    The crate must carry `extern crate self as crate_name;` for this to
///    resolve inside its own sources.
/// 2. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 3. If the requested crate name begins with `vc_` and the caller depends on
///    the facade crate `vc_persist`, return `::vc_persist::short_name`
///    (e.g. `vc_schema` -> `::vc_persist::schema`).
/// 4. Repeat steps 2-3 in `dev-dependencies`.
/// 5. Otherwise, fall back to `::crate_name`.
#[derive(Debug)]
pub struct Manifest {
    package: Option<String>,
    manifest: Option<Document<Box<str>>>,
    modified_time: Option<SystemTime>,
}

const FACADE_NAME: &str = "vc_persist";
const CRATE_PREFIX: &str = "vc_";

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    fn read(path: &Path) -> Self {
        let manifest = fs::read_to_string(path)
            .ok()
            .and_then(|text| Document::parse(text.into_boxed_str()).ok());
        Self {
            package: env::var("CARGO_PKG_NAME").ok(),
            manifest,
            modified_time: fs::metadata(path).and_then(|m| m.modified()).ok(),
        }
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let mut path = syn::Path {
            leading_colon: Some(Default::default()),
            segments: Default::default(),
        };
        for segment in segments {
            path.segments
                .push(syn::Ident::new(segment, proc_macro2::Span::call_site()).into());
        }
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::absolute(&[FACADE_NAME, module]))
    }

    /// Returns a [`syn::Path`] for the package named `name` as seen from the
    /// caller. See the type documentation for the resolution order.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        if self.package.as_deref() == Some(name) {
            return Self::absolute(&[name]);
        }

        if let Some(manifest) = &self.manifest {
            for table in ["dependencies", "dev-dependencies"] {
                if let Some(Item::Table(deps)) = manifest.get(table)
                    && let Some(path) = Self::find_in_deps(deps, name)
                {
                    return path;
                }
            }
        }

        Self::absolute(&[name])
    }

    /// Runs `func` with the caller's manifest.
    ///
    /// Parsed manifests are cached per path and reparsed when the file's
    /// modification time changes. An unreadable manifest resolves every
    /// crate to its absolute path.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Self {
                package: env::var("CARGO_PKG_NAME").ok(),
                manifest: None,
                modified_time: None,
            });
        };
        let modified_time = fs::metadata(&path).and_then(|m| m.modified()).ok();

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time.is_some()
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Self::read(&path);
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
