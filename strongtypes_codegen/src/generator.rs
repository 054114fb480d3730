//! Build-script driver: scans source files, runs the cached pipeline and
//! keeps an output directory in sync with the generated units.
//!
//! Each unit is written to `{out_dir}/{namespace}.{unit_name}.rs` holding only
//! its items.
//! The index file nests one `pub mod` per namespace segment and `include!`s
//! the units inside, so several units sharing a namespace end up in the same
//! module:
//!
//! ```rust,ignore
//! include!(concat!(env!("OUT_DIR"), "/strongtypes.g.rs"));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, trace};
use proc_macro2::TokenStream;
use quote::quote;

use crate::cache::{ChangeDetectionCache, PassReport};
use crate::config::GeneratorConfig;
use crate::emit::{EmitOptions, GENERATED_HEADER, GeneratedUnit, emit, naming};
use crate::error::{CodegenError, CodegenResult};
use crate::extract::ExtractOptions;
use crate::scan::{MarkedDeclaration, Markers, scan_source};

/// A source file and the dotted module path it defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub module_path: String,
}

pub struct Generator {
    config: GeneratorConfig,
    emit_options: EmitOptions,
    extract_options: ExtractOptions,
    markers: Markers,
    sources: Vec<SourceFile>,
    cache: ChangeDetectionCache,
    files: BTreeSet<String>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> CodegenResult<Self> {
        Ok(Self {
            emit_options: config.emit_options()?,
            extract_options: config.extract_options()?,
            markers: config.markers(),
            config,
            sources: Vec::new(),
            cache: ChangeDetectionCache::new(),
            files: BTreeSet::new(),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn cache(&self) -> &ChangeDetectionCache {
        &self.cache
    }

    pub fn sources(&self) -> &[SourceFile] {
        &self.sources
    }

    /// Adds one file defining the module at `module_path` (dotted, may be empty).
    pub fn add_source(
        &mut self,
        path: impl Into<PathBuf>,
        module_path: impl Into<String>,
    ) -> &mut Self {
        let source = SourceFile {
            path: path.into(),
            module_path: module_path.into(),
        };
        trace!("Added source {} ({})", source.path.display(), source.module_path);
        self.sources.push(source);
        self
    }

    /// Adds every `.rs` file under `src_root`, deriving module paths from the
    /// file layout below the configured root module.
    pub fn add_crate_sources(&mut self, src_root: impl AsRef<Path>) -> CodegenResult<&mut Self> {
        let src_root = src_root.as_ref();
        let mut files = Vec::new();
        collect_rust_files(src_root, &mut files)?;
        files.sort();

        for file in files {
            let relative = module_path_for(src_root, &file);
            let module_path = match (self.config.root_module.is_empty(), relative.is_empty()) {
                (true, _) => relative,
                (false, true) => self.config.root_module.clone(),
                (false, false) => format!("{}.{relative}", self.config.root_module),
            };
            self.add_source(file, module_path);
        }
        Ok(self)
    }

    /// Marked declarations of every source, in source order.
    pub fn scan(&self) -> CodegenResult<Vec<MarkedDeclaration>> {
        let mut declarations = Vec::new();
        for source in &self.sources {
            let text =
                fs::read_to_string(&source.path).map_err(|e| CodegenError::io(&source.path, e))?;
            let file = source.path.display().to_string();
            let found = scan_source(&file, &source.module_path, &text, &self.markers).map_err(|e| {
                CodegenError::Parse {
                    path: source.path.clone(),
                    source: e,
                }
            })?;
            declarations.extend(found);
        }
        Ok(declarations)
    }

    /// Runs one pass and brings the output directory up to date.
    pub fn run(&mut self) -> CodegenResult<PassReport> {
        let declarations = self.scan()?;
        let emit_options = &self.emit_options;
        let report = self.cache.run_pass(&declarations, &self.extract_options, |request| {
            emit(request, emit_options)
        });

        let out_dir = &self.config.out_dir;
        fs::create_dir_all(out_dir).map_err(|e| CodegenError::io(out_dir, e))?;

        let units = self.cache.units();
        let mut files = BTreeSet::new();
        for unit in &units {
            let file = unit.file_name();
            let path = out_dir.join(&file);
            if report.emitted.iter().any(|name| name == unit.name()) || !path.exists() {
                write_if_changed(&path, &unit.item_source()?)?;
            }
            files.insert(file);
        }

        for stale in self.files.difference(&files) {
            let path = out_dir.join(stale);
            if path.exists() {
                fs::remove_file(&path).map_err(|e| CodegenError::io(&path, e))?;
                debug!("Removed {}", path.display());
            }
        }

        let index = render_index(&units)?;
        write_if_changed(&out_dir.join(&self.config.index_file), &index)?;

        info!(
            "strongtypes: {} emitted, {} unchanged, {} removed",
            report.emitted.len(),
            report.unchanged.len(),
            report.removed.len()
        );
        self.files = files;
        Ok(report)
    }
}

/// Writes `contents` unless the file already holds exactly that. Returns
/// whether the file was written.
pub fn write_if_changed(path: &Path, contents: &str) -> CodegenResult<bool> {
    if let Ok(existing) = fs::read_to_string(path)
        && existing == contents
    {
        trace!("{} is up to date", path.display());
        return Ok(false);
    }
    fs::write(path, contents).map_err(|e| CodegenError::io(path, e))?;
    debug!("Wrote {}", path.display());
    Ok(true)
}

fn collect_rust_files(dir: &Path, files: &mut Vec<PathBuf>) -> CodegenResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| CodegenError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| CodegenError::io(dir, e))?.path();
        if path.is_dir() {
            collect_rust_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    Ok(())
}

/// Dotted module path `file` defines relative to `src_root`: `lib.rs`,
/// `main.rs` and `mod.rs` name their directory, other files add their stem.
pub fn module_path_for(src_root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(src_root).unwrap_or(file);
    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();

    let stem = relative.file_stem().map(|stem| stem.to_string_lossy().into_owned());
    match stem.as_deref() {
        Some("mod") => {}
        Some("lib" | "main") if segments.is_empty() => {}
        Some(stem) => segments.push(stem.to_string()),
        None => {}
    }
    segments.join(".")
}

#[derive(Default)]
struct ModuleTree<'a> {
    files: Vec<String>,
    children: BTreeMap<&'a str, ModuleTree<'a>>,
}

impl<'a> ModuleTree<'a> {
    fn insert(&mut self, unit: &'a GeneratedUnit) {
        let node = unit
            .namespace()
            .split('.')
            .filter(|segment| !segment.is_empty())
            .fold(self, |node, segment| node.children.entry(segment).or_default());
        node.files.push(unit.file_name());
    }

    fn tokens(&self) -> TokenStream {
        let includes = self.files.iter().map(|file| quote!(include!(#file);));
        let children = self.children.iter().map(|(segment, child)| {
            let module = naming::ident(segment);
            let inner = child.tokens();
            quote! {
                pub mod #module {
                    #inner
                }
            }
        });
        quote! {
            #( #includes )*
            #( #children )*
        }
    }
}

/// Index source including every unit inside its namespace modules.
pub fn render_index(units: &[&GeneratedUnit]) -> CodegenResult<String> {
    let mut tree = ModuleTree::default();
    for unit in units {
        tree.insert(*unit);
    }
    let file = syn::parse2::<syn::File>(tree.tokens()).map_err(|source| CodegenError::Render {
        unit: "index".to_string(),
        source,
    })?;
    Ok(format!("{GENERATED_HEADER}\n{}", prettyplease::unparse(&file)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_path_for() {
        let root = Path::new("src");
        assert_eq!(module_path_for(root, Path::new("src/lib.rs")), "");
        assert_eq!(module_path_for(root, Path::new("src/model.rs")), "model");
        assert_eq!(module_path_for(root, Path::new("src/model/mod.rs")), "model");
        assert_eq!(module_path_for(root, Path::new("src/model/ids.rs")), "model.ids");
        assert_eq!(module_path_for(root, Path::new("src/bin/lib.rs")), "bin.lib");
    }

    #[test]
    fn test_index_groups_units_by_namespace() {
        let a = GeneratedUnit::new("StrongIDs.A.g", "model", TokenStream::new());
        let b = GeneratedUnit::new("StrongKeys.B.g", "model", TokenStream::new());
        let c = GeneratedUnit::new("StrongKeys.C.g", "", TokenStream::new());

        let index = render_index(&[&a, &b, &c]).unwrap();
        assert!(index.starts_with(GENERATED_HEADER));
        assert_eq!(index.matches("pub mod model").count(), 1);
        assert!(index.contains("include!(\"model.StrongIDs.A.g.rs\");"));
        assert!(index.contains("include!(\"StrongKeys.C.g.rs\");"));
    }
}
