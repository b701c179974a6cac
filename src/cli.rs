//! CLI: infer → (go | generate | schema)
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;
use rayon::prelude::*;

use json_to_go::inference::Inference;
use json_to_go::{path_de, render, InferredType, Value, DEFAULT_TYPE_NAME};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a Go struct declaration from example JSON
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer one type from all inputs and print (or write) the Go declaration
    Go(GoOut),
    /// convert every *.json input into its own <stem>.go file
    Generate(GenerateOut),
    /// infer and print the inferred type tree as JSON (debugging)
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone, Default)]
struct Selection {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every result is one sample
    #[arg(long)]
    jq_expr: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    #[command(flatten)]
    selection: Selection,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
struct Framing {
    /// emit `package <name>` (and `import "time"` when needed) before the declaration
    #[arg(long)]
    package: Option<String>,

    /// emit the "Code generated ... DO NOT EDIT" marker
    #[arg(long, default_value_t = false)]
    caution: bool,
}

#[derive(clap::Parser, Debug)]
struct GoOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    framing: Framing,

    /// top-level Go type name
    #[arg(long, default_value = DEFAULT_TYPE_NAME)]
    type_name: String,

    /// output .go file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    selection: Selection,

    #[command(flatten)]
    framing: Framing,

    /// Directories (every *.json inside), files, or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// output directory (created when missing)
    #[arg(long, short)]
    output: PathBuf,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

const CAUTION_MARKER: &str = "// Code generated by go generate; DO NOT EDIT";

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Selection {
    /// Decode `source` and apply pointer then jq; each result is one sample.
    fn samples(&self, source: &str, origin: &str) -> Result<Vec<Value>> {
        if self.json_pointer.is_none() && self.jq_expr.is_none() {
            let value = path_de::value_from_str(source)
                .with_context(|| format!("failed to parse JSON source file ({origin})"))?;
            return Ok(vec![value]);
        }

        let mut json = path_de::from_str_with_path::<serde_json::Value>(source)
            .with_context(|| format!("failed to parse JSON source file ({origin})"))?;
        if let Some(pointer) = self.json_pointer.as_deref() {
            json = json
                .pointer_mut(pointer)
                .map(serde_json::Value::take)
                .ok_or_else(|| anyhow!("JSON pointer {pointer} matched nothing in {origin}"))?;
        }
        let selected = match self.jq_expr.as_deref() {
            None => vec![json],
            Some(jq_expr) => crate::jq_exec::run_jq(jq_expr, &json).with_context(|| {
                format!("failed to apply jq expression to source file ({origin})")
            })?,
        };
        Ok(selected.into_iter().map(Value::from).collect())
    }

    /// Read one file and feed every selected sample into `inf`.
    fn observe_file(&self, inf: &mut Inference, path: &Path) -> Result<()> {
        let origin = path.display().to_string();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read source file {origin}"))?;
        let before = inf.samples();
        for value in self.samples(&source, &origin)? {
            inf.observe_value(&value);
        }
        if inf.samples() == before {
            tracing::warn!(file = %origin, "selection produced no samples");
        }
        Ok(())
    }

    fn infer_file(&self, path: &Path) -> Result<InferredType> {
        let mut inf = Inference::new();
        self.observe_file(&mut inf, path)?;
        Ok(inf.solve())
    }
}

impl InputSettings {
    fn infer_all(&self) -> Result<InferredType> {
        let mut inf = Inference::new();
        for source_path in resolve_file_path_patterns(&self.input)? {
            self.selection.observe_file(&mut inf, &source_path)?;
        }
        tracing::debug!(samples = inf.samples(), "inputs observed");
        Ok(inf.solve())
    }
}

impl Framing {
    /// Wrap the rendered declaration of `ty` into a complete .go file body.
    fn frame(&self, ty: &InferredType, body: &str) -> String {
        let mut out = String::new();
        if self.caution {
            out.push_str(CAUTION_MARKER);
            out.push_str("\n\n");
        }
        if let Some(package) = self.package.as_deref() {
            out.push_str(&format!("package {package}\n\n"));
            if ty.uses_timestamp() {
                out.push_str("import \"time\"\n\n");
            }
        }
        out.push_str(body);
        out.push('\n');
        out
    }
}

impl GenerateOut {
    fn run(&self) -> Result<()> {
        let inputs = collect_json_inputs(&self.input)?;
        ensure_distinct_stems(&inputs)?;
        std::fs::create_dir_all(&self.output)
            .with_context(|| format!("failed to create output directory {}", self.output.display()))?;

        let results: Vec<(PathBuf, Result<PathBuf>)> = inputs
            .par_iter()
            .map(|path| (path.clone(), self.generate_one(path)))
            .collect();

        let mut failed = 0usize;
        for (source, result) in &results {
            match result {
                Ok(saved) => println!("{} - {}", saved.display(), "Saved".green()),
                Err(error) => {
                    failed += 1;
                    eprintln!("{} {}: {error:#}", "failed".red().bold(), source.display());
                }
            }
        }
        println!("Done.");

        if failed > 0 {
            bail!("{failed} of {} inputs failed", results.len());
        }
        Ok(())
    }

    fn generate_one(&self, path: &Path) -> Result<PathBuf> {
        let stem = file_stem(path)?;
        let ty = self.selection.infer_file(path)?;
        let save_path = self.output.join(format!("{stem}.go"));
        let body = self.framing.frame(&ty, &render(&ty, &stem));
        std::fs::write(&save_path, body)
            .with_context(|| format!("failed to write {}", save_path.display()))?;
        tracing::info!(source = %path.display(), target = %save_path.display(), "generated");
        Ok(save_path)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Go(target) => {
                let ty = target.input_settings.infer_all()?;
                let go_src = target.framing.frame(&ty, &render(&ty, &target.type_name));
                write_or_print(target.out.as_deref(), &go_src)
            }
            Command::Generate(target) => target.run(),
            Command::Schema(target) => {
                let ty = target.input_settings.infer_all()?;
                let schema_src = serde_json::to_string_pretty(&ty)?;
                write_or_print(target.out.as_deref(), &schema_src)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_or_print(out: Option<&Path>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            print!("{src}");
            if !src.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}

fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("input has no file name: {}", path.display()))
}

/// Every input maps to `<output>/<stem>.go`, so two inputs sharing a stem
/// would overwrite each other. Refuse before anything is written.
fn ensure_distinct_stems(inputs: &[PathBuf]) -> Result<()> {
    let mut by_stem = IndexMap::<String, Vec<&Path>>::new();
    for path in inputs {
        by_stem.entry(file_stem(path)?).or_default().push(path);
    }
    let clashes: Vec<String> = by_stem
        .iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(stem, paths)| {
            let files: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
            format!("{stem}.go <- {}", files.join(", "))
        })
        .collect();
    if !clashes.is_empty() {
        bail!("inputs would overwrite each other's output: {}", clashes.join("; "));
    }
    Ok(())
}

fn has_glob_chars(s: &str) -> bool {
    // Minimal glob detection for the `glob` crate syntax.
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

/// Like `resolve_file_path_patterns`, but a directory expands to the `*.json`
/// files directly inside it (sorted, not recursive).
fn collect_json_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in resolve_file_path_patterns(patterns)? {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in std::fs::read_dir(&path).with_context(|| format!("failed to list {}", path.display()))? {
                let entry_path = entry?.path();
                if entry_path.is_file() && entry_path.extension().is_some_and(|ext| ext == "json") {
                    found.push(entry_path);
                }
            }
            found.sort();
            out.extend(found);
        } else {
            out.push(path);
        }
    }
    Ok(out)
}
