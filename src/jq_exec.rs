use anyhow::{anyhow, Context, Result};
use jaq_core::{load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Run a jq filter over one document; every emitted result is one sample.
pub fn run_jq(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader.load(&arena, program).map_err(|errs| {
        let details = errs.into_iter().map(|(_, err)| format!("{err:?}"));
        invalid_filter(filter_src, "syntax error", details)
    })?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| {
            let details = errs
                .into_iter()
                .flat_map(|(_, names)| names)
                .map(|(name, kind)| format!("`{name}` ({kind:?})"));
            invalid_filter(filter_src, "unknown name", details)
        })?;

    let inputs = RcIter::new(core::iter::empty());
    let mut it = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    while let Some(item) = it.next() {
        let v = item.map_err(|e| anyhow!("jq runtime error: {e:?}"))?;
        // Val: Display -> JSON text
        let text = format!("{v}");
        let json = serde_json::from_str::<Value>(&text)
            .with_context(|| format!("jq produced a non-JSON value: {text}"))?;
        out.push(json);
    }
    tracing::debug!(filter = filter_src, results = out.len(), "jq filter applied");
    Ok(out)
}

/// Single-line error naming the filter and the compile stage that rejected it.
fn invalid_filter(filter_src: &str, stage: &str, details: impl Iterator<Item = String>) -> anyhow::Error {
    let details: Vec<String> = details.collect();
    anyhow!("invalid jq filter `{filter_src}`: {stage}: {}", details.join("; "))
}
