//! `slipway graph` command

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::cli::GraphArgs;
use slipway::core::{PackageId, Recipe};
use slipway::resolver::{self, ResolvedGraph};

use super::{global_context, open_store};

pub fn execute(args: GraphArgs, store: Option<PathBuf>) -> Result<()> {
    let gctx = global_context(store)?;
    let recipe = Recipe::load(&gctx.find_recipe()?)?;
    let store = open_store(&gctx);

    let graph = resolver::resolve(recipe.package_id(), recipe.requirements(), &store)
        .map_err(|e| anyhow::anyhow!("{}", e.to_diagnostic().format(false)))?;

    match args.format.as_str() {
        "tree" => print_tree(&graph),
        "json" => print_json(&graph)?,
        other => bail!("unknown format `{}` (expected tree or json)", other),
    }

    Ok(())
}

fn print_tree(graph: &ResolvedGraph) {
    println!("{}", graph.root());
    let mut visited = HashSet::new();
    visited.insert(graph.root());
    print_children(graph, graph.root(), "", &mut visited);
}

fn print_children(
    graph: &ResolvedGraph,
    pkg: PackageId,
    prefix: &str,
    visited: &mut HashSet<PackageId>,
) {
    let mut deps = graph.deps(pkg);
    deps.sort();

    for (i, dep) in deps.iter().enumerate() {
        let last = i == deps.len() - 1;
        let connector = if last { "└── " } else { "├── " };

        if visited.insert(*dep) {
            println!("{}{}{}", prefix, connector, dep);
            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            print_children(graph, *dep, &child_prefix, visited);
        } else {
            println!("{}{}{} (*)", prefix, connector, dep);
        }
    }
}

fn print_json(graph: &ResolvedGraph) -> Result<()> {
    let packages: Vec<_> = graph
        .dependencies()
        .map(|entry| {
            let id = entry.package_id();
            let mut requires: Vec<_> = graph.deps(id).iter().map(PackageId::to_string).collect();
            requires.sort();

            serde_json::json!({
                "name": id.name().as_str(),
                "version": id.version().to_string(),
                "path": entry.root(),
                "requires": requires,
            })
        })
        .collect();

    let doc = serde_json::json!({
        "root": graph.root().to_string(),
        "packages": packages,
    });

    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
