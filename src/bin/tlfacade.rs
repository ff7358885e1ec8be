use std::{error::Error, path::PathBuf};

use clap::Parser;
use tlfacade::{
    ImportOptions, SchemaDescription, StandardSchemaLayer,
    schema::{self, DEFAULT_SERVICE_PREFIX, DEFAULT_TYPE_PREFIX, NamespaceNode},
};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON schema description
    schema: PathBuf,
    /// Root prefix of the type namespace
    #[arg(long, default_value = DEFAULT_TYPE_PREFIX)]
    type_prefix: String,
    /// Root prefix of the service namespace
    #[arg(long, default_value = DEFAULT_SERVICE_PREFIX)]
    service_prefix: String,
    /// Dotted path to resolve instead of printing the whole tree
    #[arg(long)]
    lookup: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let description = SchemaDescription::from_path(&cli.schema)?;
    let options = ImportOptions::default()
        .with_type_prefix(cli.type_prefix)
        .with_service_prefix(cli.service_prefix);
    let imported = schema::import(&description, &options, &StandardSchemaLayer::new())?;

    let Some(path) = cli.lookup else {
        print!("{imported}");
        return Ok(());
    };

    let mut found = false;
    for root in [imported.types(), imported.service()] {
        match root.get(&path) {
            Some(NamespaceNode::Leaf(leaf)) => println!("{}: {leaf}", leaf.id()),
            Some(NamespaceNode::Branch(branch)) => print!("{branch}"),
            None => continue,
        }
        found = true;
    }

    if !found {
        return Err(format!("'{path}' not found").into());
    }
    Ok(())
}
