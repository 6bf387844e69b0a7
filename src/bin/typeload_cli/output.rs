//! Output formatting for the typeload CLI
//!
//! Provides human-readable and JSON output formatting for all commands.

use serde::Serialize;

use typeload::{Autoloader, Plan, Resolution, TypeRuntime, UnitSource};

/// Everything observable after one `resolve`.
#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub requested: String,
    pub loaded: bool,
    /// Name the type was declared with, when it ended up defined.
    pub canonical: Option<String>,
    /// All names bound to the type, aliases included.
    pub names: Vec<String>,
    pub source: Option<String>,
    pub included: Vec<String>,
    pub initialized: Vec<String>,
}

impl ResolveReport {
    pub fn collect<S: UnitSource>(requested: &str, loaded: bool, runtime: &TypeRuntime<S>) -> Self {
        let types = runtime.types();
        let def = types.by_name(requested);
        Self {
            requested: requested.to_string(),
            loaded,
            canonical: def.map(|d| d.name.clone()),
            names: def
                .map(|d| types.names_of(d.id).into_iter().map(str::to_string).collect())
                .unwrap_or_default(),
            source: def.map(|d| d.source.display().to_string()),
            included: runtime
                .included()
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            initialized: runtime.initialized().to_vec(),
        }
    }
}

/// Format a resolve report
pub fn format_resolve_report(report: &ResolveReport, json_output: bool) -> String {
    if json_output {
        return serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
    }

    let mut out = String::new();
    if report.loaded {
        out.push_str(&format!("\x1b[32m✓ Loaded {}\x1b[0m\n", report.requested));
    } else {
        out.push_str(&format!("\x1b[31m✗ No loader resolved {}\x1b[0m\n", report.requested));
    }

    if let Some(canonical) = &report.canonical {
        out.push_str(&format!("Type: {}\n", canonical));
    }
    if report.names.len() > 1 {
        out.push_str(&format!("Names: {}\n", report.names.join(", ")));
    }
    if let Some(source) = &report.source {
        out.push_str(&format!("Defined in: {}\n", source));
    }

    if !report.included.is_empty() {
        out.push_str("\n\x1b[1mIncluded Files:\x1b[0m\n");
        for path in &report.included {
            out.push_str(&format!("  \x1b[36m{}\x1b[0m\n", path));
        }
    }

    if !report.initialized.is_empty() {
        out.push_str("\n\x1b[1mInitializers Run:\x1b[0m\n");
        for name in &report.initialized {
            out.push_str(&format!("  {}\n", name));
        }
    }

    out.trim_end().to_string()
}

fn resolution_kind(resolution: &Resolution) -> &'static str {
    match resolution {
        Resolution::Include { .. } => "include",
        Resolution::CoreAlias { .. } => "core-alias",
        Resolution::Conventional { .. } => "conventional",
        Resolution::Psr { .. } => "psr",
    }
}

/// Format a dry-run plan
pub fn format_plan(type_name: &str, plan: Option<&Plan>, json_output: bool) -> String {
    if json_output {
        #[derive(Serialize)]
        struct PlanJson<'a> {
            type_name: &'a str,
            resolved: bool,
            strategy: Option<&'static str>,
            kind: Option<&'static str>,
            path: Option<String>,
            alias_of: Option<&'a str>,
            runs_initializer: Option<bool>,
        }

        let json = PlanJson {
            type_name,
            resolved: plan.is_some(),
            strategy: plan.map(|p| p.strategy),
            kind: plan.map(|p| resolution_kind(&p.resolution)),
            path: plan.map(|p| p.resolution.path().display().to_string()),
            alias_of: plan.and_then(|p| match &p.resolution {
                Resolution::CoreAlias { qualified, .. } => Some(qualified.as_str()),
                _ => None,
            }),
            runs_initializer: plan.map(|p| p.resolution.runs_initializer()),
        };
        return serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string());
    }

    let Some(plan) = plan else {
        return format!("\x1b[31m✗ No strategy resolves {}\x1b[0m", type_name);
    };

    let mut out = format!(
        "{} → {} ({})\n  path: {}",
        type_name,
        plan.strategy,
        resolution_kind(&plan.resolution),
        plan.resolution.path().display()
    );
    if let Resolution::CoreAlias { qualified, .. } = &plan.resolution {
        out.push_str(&format!("\n  alias of: {}", qualified));
    }
    if !plan.resolution.runs_initializer() {
        out.push_str("\n  initializer: skipped");
    }
    out
}

/// Format the layout and registries of an autoloader
pub fn format_registries(loader: &Autoloader, json_output: bool) -> String {
    let layout = loader.layout();
    let namespaces = loader.namespaces();
    let core = loader.core_namespaces();

    if json_output {
        let json = serde_json::json!({
            "app_path": layout.app_path.display().to_string(),
            "classes_root": layout.classes_root().display().to_string(),
            "extension": &layout.extension,
            "namespaces": namespaces,
            "core_namespaces": core,
        });
        return serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string());
    }

    let mut out = String::new();
    out.push_str(&format!("App path: {}\n", layout.app_path.display()));
    out.push_str(&format!("Classes root: {}\n", layout.classes_root().display()));
    out.push_str(&format!("Extension: .{}\n", layout.extension));

    out.push_str(&format!("\n\x1b[1mNamespaces ({}):\x1b[0m\n", namespaces.len()));
    for entry in &namespaces {
        let prefix = if entry.prefix.is_empty() {
            "<global>"
        } else {
            entry.prefix.as_str()
        };
        let psr = if entry.psr { " [psr-0]" } else { "" };
        out.push_str(&format!("  {} → {}{}\n", prefix, entry.base_path.display(), psr));
    }

    out.push_str(&format!("\n\x1b[1mCore Namespaces ({}):\x1b[0m\n", core.len()));
    for namespace in &core {
        out.push_str(&format!("  {}\n", namespace));
    }

    out.trim_end().to_string()
}
