//! Resolve command - load a type through the autoloader and report the outcome
//!
//! Unit files are read from disk; the report lists every file the load pulled
//! in and every initializer that ran, so nested dependency loads are visible.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use typeload::{Autoloader, FsSource, TypeRuntime};

use super::output::{format_resolve_report, ResolveReport};

#[derive(Parser, Debug)]
#[command(about = "Load a type and report the outcome")]
pub struct ResolveCmd {
    /// Type name, e.g. 'Auth\Login' or Controller_Welcome
    pub type_name: String,
}

impl ResolveCmd {
    /// Returns whether the type was loaded.
    pub fn execute(&self, loader: &Arc<Autoloader>, json_output: bool) -> Result<bool> {
        let mut runtime = TypeRuntime::new(FsSource);
        loader.register(&mut runtime);

        let loaded = loader.load(&mut runtime, &self.type_name)?;
        let report = ResolveReport::collect(&self.type_name, loaded, &runtime);
        println!("{}", format_resolve_report(&report, json_output));

        Ok(loaded)
    }
}
