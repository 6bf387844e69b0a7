//! Explain command - dry-run the strategy chain for a type name

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use typeload::{Autoloader, FsSource, TypeRuntime};

use super::output::format_plan;

#[derive(Parser, Debug)]
#[command(about = "Show how a type would be resolved without loading it")]
pub struct ExplainCmd {
    /// Type name, e.g. 'Auth\Login' or Controller_Welcome
    pub type_name: String,
}

impl ExplainCmd {
    /// Returns whether any strategy would handle the name.
    pub fn execute(&self, loader: &Arc<Autoloader>, json_output: bool) -> Result<bool> {
        let runtime = TypeRuntime::new(FsSource);
        let plan = loader.explain(&runtime, &self.type_name);
        println!("{}", format_plan(&self.type_name, plan.as_ref(), json_output));
        Ok(plan.is_some())
    }
}
