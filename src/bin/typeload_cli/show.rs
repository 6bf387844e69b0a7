//! Show command - print the layout and registries a config produces

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use typeload::Autoloader;

use super::output::format_registries;

#[derive(Parser, Debug)]
#[command(about = "Print the configured layout and registries")]
pub struct ShowCmd {
    /// Only print the base path registered for this namespace prefix
    #[arg(long)]
    pub namespace: Option<String>,
}

impl ShowCmd {
    pub fn execute(&self, loader: &Arc<Autoloader>, json_output: bool) -> Result<bool> {
        if let Some(prefix) = &self.namespace {
            return match loader.namespace_path(prefix) {
                Some(path) => {
                    println!("{}", path.display());
                    Ok(true)
                }
                None => {
                    eprintln!("namespace {} is not registered", prefix);
                    Ok(false)
                }
            };
        }
        println!("{}", format_registries(loader, json_output));
        Ok(true)
    }
}
